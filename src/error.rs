// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections raised when a transaction is about to be created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Code must be between 6 and 12 characters (got {len})")]
    InvalidLength { len: usize },

    #[error("Code must contain only letters and digits")]
    InvalidCharset,

    #[error("Code '{code}' is already in use")]
    DuplicateCode { code: String },

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
}

/// Failures of the receipt extraction service. None of these are fatal:
/// callers fall back to a manual draft.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Extraction service returned no content")]
    EmptyResponse,

    #[error("Could not parse extracted data: {0}")]
    Malformed(String),
}
