// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_transactions;
use crate::models::{Category, StoredTransaction};
use crate::utils::{parse_date_flexible, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: i64,
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(&load_transactions(conn)?);
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.id.to_string(), i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["ID", "Issue", "Detail"], rows));
    }
    Ok(())
}

/// Rows insights would drop (bad amount, category or date) and rows the add
/// form would have refused (unknown category code, non-positive amount).
pub fn find_issues(rows: &[StoredTransaction]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for t in rows {
        let mut push = |kind: &'static str, detail: &str| {
            issues.push(Issue {
                id: t.id,
                kind,
                detail: detail.to_string(),
            })
        };
        match t.amount.trim().parse::<Decimal>() {
            Err(_) => push("invalid_amount", &t.amount),
            Ok(a) if a <= Decimal::ZERO => push("non_positive_amount", &t.amount),
            Ok(_) => {}
        }
        match t.category.trim().parse::<i64>() {
            Err(_) => push("invalid_category", &t.category),
            Ok(code) if Category::from_code(code).is_none() => {
                push("unknown_category", &t.category)
            }
            Ok(_) => {}
        }
        if parse_date_flexible(&t.date).is_none() {
            push("invalid_date", &t.date);
        }
    }
    issues
}
