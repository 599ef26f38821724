// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed spending categories. Code 5 was never assigned and stays unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Entertainment,
    Household,
    Transportation,
    Education,
    Utilities,
    Others,
}

impl Category {
    pub fn all() -> [Category; 7] {
        [
            Category::Groceries,
            Category::Entertainment,
            Category::Household,
            Category::Transportation,
            Category::Education,
            Category::Utilities,
            Category::Others,
        ]
    }

    pub fn from_code(code: i64) -> Option<Category> {
        match code {
            1 => Some(Category::Groceries),
            2 => Some(Category::Entertainment),
            3 => Some(Category::Household),
            4 => Some(Category::Transportation),
            6 => Some(Category::Education),
            7 => Some(Category::Utilities),
            8 => Some(Category::Others),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Category::Groceries => 1,
            Category::Entertainment => 2,
            Category::Household => 3,
            Category::Transportation => 4,
            Category::Education => 6,
            Category::Utilities => 7,
            Category::Others => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Entertainment => "Entertainment",
            Category::Household => "Household",
            Category::Transportation => "Transportation",
            Category::Education => "Education",
            Category::Utilities => "Utilities",
            Category::Others => "Others",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    Text(String),
    Date(NaiveDate),
}

/// A transaction as handed over by the store or a caller, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub amount: String,
    pub category: String,
    pub date: RawDate,
    pub description: Option<String>,
}

impl RawTransaction {
    pub fn new(
        amount: impl ToString,
        category: impl ToString,
        date: &str,
        description: &str,
    ) -> Self {
        Self {
            amount: amount.to_string(),
            category: category.to_string(),
            date: RawDate::Text(date.to_string()),
            description: Some(description.to_string()),
        }
    }

    pub fn dated(amount: impl ToString, category: impl ToString, date: NaiveDate) -> Self {
        Self {
            amount: amount.to_string(),
            category: category.to_string(),
            date: RawDate::Date(date),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: i64,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl StoredTransaction {
    pub fn category_name(&self) -> &'static str {
        self.category
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(Category::from_code)
            .map(Category::name)
            .unwrap_or("Unknown")
    }
}

impl From<StoredTransaction> for RawTransaction {
    fn from(t: StoredTransaction) -> Self {
        RawTransaction {
            amount: t.amount,
            category: t.category,
            date: RawDate::Text(t.date),
            description: Some(t.description),
        }
    }
}
