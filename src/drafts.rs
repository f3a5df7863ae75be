// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::codes::validate_code;
use crate::error::ValidationError;
use crate::models::{Category, ExtractedData, Transaction, TransactionType};

/// An entry being filled in, either by hand or from extracted receipt data.
/// Every field may still be wrong until `validate` accepts it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub code: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: Option<Decimal>,
    pub r#type: TransactionType,
    pub category: Category,
}

/// Draft fields that passed validation; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub code: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
}

impl ValidDraft {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            code: self.code,
            date: self.date,
            description: self.description,
            amount: self.amount,
            r#type: self.r#type,
            category: self.category,
        }
    }
}

impl TransactionDraft {
    pub fn manual(r#type: TransactionType, code: String, today: NaiveDate) -> Self {
        Self {
            code,
            date: Some(today),
            description: String::new(),
            amount: None,
            r#type,
            category: Category::ALL[0],
        }
    }

    /// Prefill from receipt data. Missing or implausible fields are left for
    /// the user to supply.
    pub fn from_extracted(data: &ExtractedData, code: String, today: NaiveDate) -> Self {
        let mut draft = Self::manual(TransactionType::Expense, code, today);
        if let Some(amount) = data.amount.filter(|a| *a > Decimal::ZERO) {
            draft.amount = Some(amount.round_dp(2));
        }
        if let Some(date) = data.date {
            draft.date = Some(date);
        }
        if let Some(desc) = data
            .description
            .as_deref()
            .or(data.establishment.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            draft.description = desc.to_string();
        }
        draft
    }

    /// Existing record as an editable draft.
    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            code: t.code.clone(),
            date: Some(t.date),
            description: t.description.clone(),
            amount: Some(t.amount),
            r#type: t.r#type,
            category: t.category,
        }
    }

    pub fn validate(
        &self,
        existing: &[Transaction],
        excluding_id: Option<&str>,
    ) -> Result<ValidDraft, ValidationError> {
        let description = self.description.trim();
        let code = self.code.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingRequiredField {
                field: "description",
            });
        }
        if code.is_empty() {
            return Err(ValidationError::MissingRequiredField { field: "code" });
        }
        let date = self
            .date
            .ok_or(ValidationError::MissingRequiredField { field: "date" })?;
        let amount = self
            .amount
            .ok_or(ValidationError::MissingRequiredField { field: "amount" })?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        validate_code(code, existing, excluding_id)?;
        Ok(ValidDraft {
            code: code.to_string(),
            date,
            description: description.to_string(),
            amount,
            r#type: self.r#type,
            category: self.category,
        })
    }
}
