//! Exact decimal formatting of integer token amounts

use alloy_primitives::U256;

/// Decimals of the native currency, assumed identical on every supported network
pub const NATIVE_DECIMALS: u8 = 18;

/// Format `raw / 10^decimals` without any floating point
///
/// The result always carries a fractional part with trailing zeros trimmed
/// down to one digit: `1000000000000000000` at 18 decimals is `"1.0"`,
/// `2500000` at 6 decimals is `"2.5"`.
pub fn format_units(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;

    let (whole, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Format a native-currency amount (18 decimals)
pub fn format_native(raw: U256) -> String {
    format_units(raw, NATIVE_DECIMALS)
}
