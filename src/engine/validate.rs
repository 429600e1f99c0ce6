// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

/// Pre-persistence checks for a balance-sheet or daily-expense entry.
/// Returns human-readable problems; an empty list means the input may be
/// written. Aggregation itself never gates on these.
pub fn validate_entry(amount: Decimal, category: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if amount <= Decimal::ZERO {
        errors.push("Amount must be greater than zero".to_string());
    }
    if category.trim().is_empty() {
        errors.push("Category is required".to_string());
    }
    errors
}

pub fn validate_asset(name: &str, amount: Decimal) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if amount < Decimal::ZERO {
        errors.push("Amount cannot be negative".to_string());
    }
    errors
}
