// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::utils::{amount_input_parse, format_currency};
use rust_decimal::Decimal;

#[test]
fn amount_parse_strips_noise_and_truncates() {
    assert_eq!(amount_input_parse("$1,234.567"), "1234.56".parse().unwrap());
    assert_eq!(amount_input_parse("1234.5"), "1234.5".parse().unwrap());
    assert_eq!(amount_input_parse("  42 "), Decimal::from(42));
}

#[test]
fn amount_parse_accepts_partial_input() {
    // trailing dot mid-entry
    assert_eq!(amount_input_parse("12."), Decimal::from(12));
    assert_eq!(amount_input_parse(".5"), "0.5".parse().unwrap());
}

#[test]
fn amount_parse_keeps_first_dot_only() {
    assert_eq!(amount_input_parse("1.2.3"), "1.23".parse().unwrap());
    assert_eq!(amount_input_parse("1.2.3.4"), "1.23".parse().unwrap());
}

#[test]
fn amount_parse_falls_back_to_zero() {
    assert_eq!(amount_input_parse(""), Decimal::ZERO);
    assert_eq!(amount_input_parse("abc"), Decimal::ZERO);
    assert_eq!(amount_input_parse("."), Decimal::ZERO);
    assert_eq!(amount_input_parse("$ ,"), Decimal::ZERO);
}

#[test]
fn currency_formatting_groups_and_pads() {
    assert_eq!(format_currency(Decimal::from(600), "USD"), "$600.00");
    assert_eq!(
        format_currency("1234.5".parse().unwrap(), "USD"),
        "$1,234.50"
    );
    assert_eq!(format_currency(Decimal::ZERO, "USD"), "$0.00");
    assert_eq!(format_currency(Decimal::from(-5), "USD"), "-$5.00");
}

#[test]
fn currency_formatting_honors_code() {
    assert_eq!(format_currency(Decimal::from(9), "EUR"), "\u{20ac}9.00");
    // unknown codes fall back to a code prefix
    assert_eq!(format_currency(Decimal::from(9), "CHF"), "CHF 9.00");
}
