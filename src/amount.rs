// src/amount.rs
//! Fixed-point token amount handling.
//!
//! DGOLD and DVOTE both use 18 decimals. Amounts live in u128 base units
//! everywhere; decimal text exists only at the input and display edges.

/// Decimals shared by the DGOLD and DVOTE contracts
pub const TOKEN_DECIMALS: u32 = 18;

/// Base units per whole token (10^18)
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Parse decimal text from an amount input into base units.
///
/// Returns None for anything that is not a plain non-negative decimal
/// number: empty text, signs, stray characters, more than one dot, more
/// fractional digits than the token has decimals, or overflow. A None
/// here keeps the submit control disabled.
pub fn parse_base_units(text: &str) -> Option<u128> {
    let text = text.trim();
    if text.is_empty() || text == "." {
        return None;
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let mut parts = text.splitn(2, '.');
    let whole_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("");
    if frac_part.contains('.') {
        return None;
    }
    if frac_part.len() > TOKEN_DECIMALS as usize {
        return None;
    }

    let whole: u128 = if whole_part.is_empty() {
        0
    } else {
        whole_part.parse().ok()?
    };

    let frac: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = TOKEN_DECIMALS as usize);
        padded.parse().ok()?
    };

    whole
        .checked_mul(BASE_UNITS_PER_TOKEN)?
        .checked_add(frac)
}

/// Format base units as exact decimal text, trailing zeros trimmed.
///
/// Parsing the result yields the original value back.
pub fn format_base_units(units: u128) -> String {
    let whole = units / BASE_UNITS_PER_TOKEN;
    let frac = units % BASE_UNITS_PER_TOKEN;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:018}", frac);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

/// Truncated 4-decimal form for balance labels
pub fn display_base_units(units: u128) -> String {
    let whole = units / BASE_UNITS_PER_TOKEN;
    let frac4 = (units % BASE_UNITS_PER_TOKEN) / 100_000_000_000_000;
    format!("{}.{:04}", whole, frac4)
}
