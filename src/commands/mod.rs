// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod codes;
pub mod dashboard;
pub mod reports;
pub mod scan;
pub mod seed;
pub mod transactions;
