// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::Transaction;

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const CODE_LEN: usize = 8;
pub const CODE_MIN_LEN: usize = 6;
pub const CODE_MAX_LEN: usize = 12;

// Collisions at 36^8 are vanishingly rare; after this many misses the code
// grows by one character, up to CODE_MAX_LEN.
const ATTEMPTS_PER_LEN: usize = 32;

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

fn random_code<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn is_taken(code: &str, existing: &[Transaction]) -> bool {
    existing.iter().any(|t| t.code.eq_ignore_ascii_case(code))
}

/// A fresh upper-case code that does not collide, ignoring case, with any
/// existing one.
pub fn generate_unique_code<R: Rng + ?Sized>(rng: &mut R, existing: &[Transaction]) -> String {
    let mut len = CODE_LEN;
    loop {
        for _ in 0..ATTEMPTS_PER_LEN {
            let code = random_code(rng, len);
            if !is_taken(&code, existing) {
                return code;
            }
        }
        if len < CODE_MAX_LEN {
            len += 1;
            tracing::debug!(len, "code space crowded, widening");
        }
    }
}

/// Checks length, charset, then uniqueness. `excluding_id` names the record
/// being edited so it does not collide with itself.
pub fn validate_code(
    code: &str,
    existing: &[Transaction],
    excluding_id: Option<&str>,
) -> Result<(), ValidationError> {
    let len = code.chars().count();
    if !(CODE_MIN_LEN..=CODE_MAX_LEN).contains(&len) {
        return Err(ValidationError::InvalidLength { len });
    }
    if !CODE_RE.is_match(code) {
        return Err(ValidationError::InvalidCharset);
    }
    let duplicate = existing
        .iter()
        .filter(|t| excluding_id != Some(t.id.as_str()))
        .any(|t| t.code.eq_ignore_ascii_case(code));
    if duplicate {
        return Err(ValidationError::DuplicateCode {
            code: code.to_string(),
        });
    }
    Ok(())
}
