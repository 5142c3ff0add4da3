// Raw integer amounts to human readable decimal strings

use bigdecimal::BigDecimal;
use std::str::FromStr;

use super::error::StatementError;

/// Places the decimal point `decimals` digits from the right of `raw`.
///
/// Exact for any length of input; fractional trailing zeros are trimmed and
/// the result never uses exponent notation.
pub fn format_units(raw: &str, decimals: u8) -> Result<String, StatementError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StatementError::InvalidAmount(format!(
            "'{}' is not a non-negative integer",
            raw
        )));
    }

    let (digits, _) = BigDecimal::from_str(raw)
        .map_err(|e| StatementError::InvalidAmount(format!("'{}': {}", raw, e)))?
        .into_bigint_and_exponent();

    let scaled = BigDecimal::new(digits, i64::from(decimals)).normalized();
    let (digits, scale) = scaled.as_bigint_and_exponent();

    Ok(render_plain(&digits.to_string(), scale))
}

/// Renders `digits * 10^-scale` without exponent notation
fn render_plain(digits: &str, scale: i64) -> String {
    if digits == "0" {
        return "0".to_string();
    }
    if scale <= 0 {
        return format!("{}{}", digits, "0".repeat(scale.unsigned_abs() as usize));
    }

    let scale = scale as usize;
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits.to_string()
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    format!("{}.{}", int_part, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::num_bigint::BigInt;

    #[test]
    fn test_whole_token() {
        assert_eq!(format_units("1000000000000000000", 18).unwrap(), "1");
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(format_units("1500000", 6).unwrap(), "1.5");
        assert_eq!(format_units("1", 6).unwrap(), "0.000001");
        assert_eq!(format_units("123456789", 4).unwrap(), "12345.6789");
    }

    #[test]
    fn test_zero_decimals_returns_integer() {
        assert_eq!(format_units("42", 0).unwrap(), "42");
        assert_eq!(format_units("1000", 0).unwrap(), "1000");
        assert_eq!(format_units("0007", 0).unwrap(), "7");
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(format_units("0", 18).unwrap(), "0");
        assert_eq!(format_units("000", 6).unwrap(), "0");
    }

    #[test]
    fn test_beyond_u128() {
        let raw = "1157920892373161954235709850086879078532699846656405640394575840079131296";
        assert_eq!(
            format_units(raw, 18).unwrap(),
            "1157920892373161954235709850086879078532699846656405640.394575840079131296"
        );
    }

    #[test]
    fn test_rejects_malformed_amounts() {
        for raw in ["", "-1", "1.5", "0x10", "12a", "+3", " 5 ", "5\n"] {
            assert!(
                matches!(format_units(raw, 6), Err(StatementError::InvalidAmount(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_scaling_back_recovers_raw_amount() {
        let samples = [
            ("0", 0u8),
            ("5", 18),
            ("1000000", 6),
            ("98765432109876543210987654321", 12),
            ("340282366920938463463374607431768211455", 18),
            ("100", 1),
        ];
        for (raw, decimals) in samples {
            let formatted = format_units(raw, decimals).unwrap();
            let parsed = BigDecimal::from_str(&formatted).unwrap();
            let (digits, scale) = parsed.as_bigint_and_exponent();
            let shift = i64::from(decimals) - scale;
            assert!(shift >= 0, "{} has more fractional digits than {}", formatted, decimals);
            let recovered = digits * BigInt::from(10).pow(shift as u32);
            assert_eq!(recovered, BigInt::from_str(raw).unwrap(), "{} / {}", raw, decimals);
        }
    }
}
