use alloy_primitives::{
    utils::{format_units, parse_units, ParseUnits},
    U256,
};

use crate::{consts::TOKEN_DECIMALS, error::DonetteError};

/// Parse a human-entered decimal amount into base units.
///
/// Returns `Ok(None)` when the input is blank, zero or negative, which the claim form treats
/// as "nothing to submit". Malformed input is an error.
pub fn parse_amount(input: &str) -> Result<Option<U256>, DonetteError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match parse_units(trimmed, TOKEN_DECIMALS)? {
        ParseUnits::U256(value) if !value.is_zero() => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// Render base units as a decimal string with at most `precision` fractional digits.
/// Trailing zeros are dropped, so whole amounts print without a decimal point.
pub fn format_amount(value: U256, precision: usize) -> String {
    let full = match format_units(value, TOKEN_DECIMALS) {
        Ok(s) => s,
        Err(_) => return value.to_string(),
    };
    let (whole, fraction) = full.split_once('.').unwrap_or((full.as_str(), ""));
    let fraction = fraction[..fraction.len().min(precision)].trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Exact decimal rendering, used to prefill the claim input from a preset.
pub fn format_amount_exact(value: U256) -> String {
    format_amount(value, TOKEN_DECIMALS as usize)
}
