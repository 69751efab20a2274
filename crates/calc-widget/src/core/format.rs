//! Display formatting for results
//!
//! The output follows the ECMAScript `Number::toString` layout: shortest
//! round-trip digits, plain notation for magnitudes in `[1e-6, 1e21)`, and
//! `1e+21` style exponents outside that range. A result such as `1e+21`
//! therefore lands back in the buffer with an `e` in it, which the next
//! evaluation rejects as invalid input.

/// Significant digits kept for non-integer results
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 12;

/// Enough digits to print any `f64` exactly (the longest needs 767)
const EXACT_DIGITS: usize = 800;

/// Formats a result with the default precision
///
/// ```
/// use calc_widget::core::format_number;
///
/// assert_eq!(format_number(2.0), "2");
/// assert_eq!(format_number(1.0 / 3.0), "0.333333333333");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    format_number_with_precision(value, DEFAULT_SIGNIFICANT_DIGITS)
}

/// Formats a result, rounding non-integers to `digits` significant digits
///
/// Integers are printed exactly. Rounding goes through a decimal string and
/// back, which strips insignificant trailing zeros.
#[must_use]
pub fn format_number_with_precision(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.fract() == 0.0 {
        return number_to_string(value);
    }
    number_to_string(round_significant(value, digits))
}

/// Rounds to `digits` significant decimal digits, ties away from zero
///
/// Works on the exact decimal expansion of `value`, so a tie is only a tie
/// when the binary value really sits halfway.
fn round_significant(value: f64, digits: usize) -> f64 {
    let digits = digits.clamp(1, EXACT_DIGITS);
    let exact = format!("{:.*e}", EXACT_DIGITS - 1, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return value;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return value;
    };

    let all: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let Some(kept) = all.get(..digits) else {
        return value;
    };
    let mut kept = kept.to_vec();

    if all.get(digits).is_some_and(|next| *next >= 5) {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            // 99..9 rolled over to 100..0
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
    }

    let text: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    let scale = exponent - (digits as i32 - 1);
    let rounded: f64 = format!("{text}e{scale}").parse().unwrap_or(value);
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Renders a number the way a browser prints it
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }
    if value.is_sign_negative() {
        return format!("-{}", number_to_string(-value));
    }
    if value.is_infinite() {
        return "Infinity".to_string();
    }

    let (digits, point) = shortest_digits(value);
    let k = digits.len() as i32;
    let n = point;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.push_str(&"0".repeat((n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let exponent = n - 1;
        let sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    }
}

/// Returns the shortest round-trip digit string and the decimal point position
///
/// For `value = 0.d1 d2 ... dk × 10^n` this yields `("d1d2...dk", n)`.
fn shortest_digits(value: f64) -> (String, i32) {
    // `{:e}` without a precision prints the shortest round-trip mantissa
    let rendered = format!("{value:e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exponent + 1)
}
