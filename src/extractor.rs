// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Receipt-to-fields extraction through a hosted generative model.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ExtractionError;
use crate::models::ExtractedData;
use crate::utils::http_client;

const PROMPT: &str = "Analyse this receipt or invoice image and extract: the merchant name, \
the transaction date (format YYYY-MM-DD), the total amount, and a short description of the \
main items if available. The amount must be a plain number without currency symbols.";

const TIMEOUT_SECS: u64 = 60;

pub trait ReceiptExtractor {
    fn extract(&self, image: &[u8], mime_type: &str) -> Result<ExtractedData, ExtractionError>;
}

/// Pick the Gemini client when an API key is configured, the offline sample
/// otherwise.
pub fn from_config(cfg: &Config) -> Box<dyn ReceiptExtractor> {
    match &cfg.api_key {
        Some(key) => Box::new(GeminiExtractor {
            api_base: cfg.api_base.clone(),
            model: cfg.model.clone(),
            api_key: key.clone(),
        }),
        None => {
            warn!("GEMINI_API_KEY not set, using sample extraction data");
            Box::new(MockExtractor {
                today: Utc::now().date_naive(),
            })
        }
    }
}

pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

pub struct GeminiExtractor {
    pub api_base: String,
    pub model: String,
    pub api_key: String,
}

impl GeminiExtractor {
    fn request_body(image: &[u8], mime_type: &str) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": mime_type, "data": STANDARD.encode(image) } },
                    { "text": PROMPT }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "establishment": { "type": "STRING", "description": "Merchant name." },
                        "date": { "type": "STRING", "description": "Transaction date, YYYY-MM-DD." },
                        "amount": { "type": "NUMBER", "description": "Total amount." },
                        "description": { "type": "STRING", "description": "Short description of the purchase." }
                    }
                }
            }
        })
    }
}

impl ReceiptExtractor for GeminiExtractor {
    fn extract(&self, image: &[u8], mime_type: &str) -> Result<ExtractedData, ExtractionError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        info!(model = %self.model, bytes = image.len(), mime_type, "requesting receipt extraction");
        let client = http_client(TIMEOUT_SECS)?;
        let resp = client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(image, mime_type))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ExtractionError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body: GenerateResponse = resp.json()?;
        let text = body.first_text().ok_or(ExtractionError::EmptyResponse)?;
        debug!(text, "extraction response");
        parse_extraction(text)
    }
}

/// Fixed sample used when no API key is available.
pub struct MockExtractor {
    pub today: NaiveDate,
}

impl ReceiptExtractor for MockExtractor {
    fn extract(&self, _image: &[u8], _mime_type: &str) -> Result<ExtractedData, ExtractionError> {
        Ok(ExtractedData {
            establishment: Some("Sample Supermarket".to_string()),
            date: Some(self.today),
            amount: Some(Decimal::new(12345, 2)),
            description: Some("Mock test purchase".to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFields {
    establishment: Option<Value>,
    date: Option<Value>,
    amount: Option<Value>,
    description: Option<Value>,
}

fn text_field(v: Option<Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn amount_field(v: Option<Value>) -> Option<Decimal> {
    let d = match v? {
        Value::Number(n) => Decimal::try_from(n.as_f64()?).ok()?,
        Value::String(s) => s.trim().replace(',', ".").parse::<Decimal>().ok()?,
        _ => return None,
    };
    Some(d.round_dp(2)).filter(|d| *d > Decimal::ZERO)
}

/// Parse the model's JSON answer. Fields that are missing, mistyped or
/// implausible come back as `None`; only unparseable JSON is an error.
pub fn parse_extraction(text: &str) -> Result<ExtractedData, ExtractionError> {
    let raw: RawFields =
        serde_json::from_str(text).map_err(|e| ExtractionError::Malformed(e.to_string()))?;
    let data = ExtractedData {
        establishment: text_field(raw.establishment),
        date: text_field(raw.date).and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        amount: amount_field(raw.amount),
        description: text_field(raw.description),
    };
    Ok(data.normalized())
}
