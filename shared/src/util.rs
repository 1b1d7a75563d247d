//! Price normalization helpers
//!
//! Per-variant prices never block a submission: anything that is not a
//! finite, non-negative number collapses to `0.0`.

use rust_decimal::prelude::*;

/// Decimal places kept on a price
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Coerce a price to a finite, non-negative value rounded to cents (half away from zero).
pub fn normalize_price(price: f64) -> f64 {
    if !price.is_finite() || price < 0.0 {
        return 0.0;
    }
    Decimal::from_f64(price)
        .map(|d| d.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Parse operator price input the lenient way: the longest leading numeric
/// prefix wins (`"12.5 EUR"` is `12.5`), anything else is `0.0`.
pub fn parse_price(input: &str) -> f64 {
    leading_number(input).map(normalize_price).unwrap_or(0.0)
}

fn leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_while = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = if matches!(bytes.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    let int_end = digits_while(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = digits_while(end + 1);
        mantissa_digits += frac_end - end - 1;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_end = digits_while(j);
        if exp_end > j {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
