// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionType::Income),
            "expense" | "despesa" => Ok(TransactionType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// The fixed category set. Parsing accepts the English names as well as the
/// Portuguese labels used by the mobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Leisure,
    Health,
    Education,
    Salary,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Leisure,
        Category::Health,
        Category::Education,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Leisure => "Leisure",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Housing => "Moradia",
            Category::Leisure => "Lazer",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Salary => "Salário",
            Category::Other => "Outros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == needle || c.label_pt().to_lowercase() == needle)
            .ok_or_else(|| anyhow::anyhow!("Unknown category '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub code: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: Category,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.r#type == TransactionType::Income
    }

    /// `YYYY-MM` prefix of the date.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Fields read off a receipt. Nothing is guaranteed to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub establishment: Option<String>,
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl ExtractedData {
    pub fn is_empty(&self) -> bool {
        self.establishment.is_none()
            && self.date.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }

    /// Fill whichever of establishment/description is missing from the other.
    pub fn normalized(mut self) -> Self {
        match (&self.establishment, &self.description) {
            (Some(e), None) => self.description = Some(e.clone()),
            (None, Some(d)) => self.establishment = Some(d.clone()),
            _ => {}
        }
        self
    }
}
