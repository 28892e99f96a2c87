//! Number formatting helpers.

/// Significant digits printed for non-integral numbers.
pub const FLOAT_PRECISION: usize = 6;

/// Formats `value` the way C's `%g` does with the default precision.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least the precision; trailing zeros are removed in both forms.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= FLOAT_PRECISION as i32 {
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (FLOAT_PRECISION as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
