//! Fixed-point number formatting for prices and ratings.
//!
//! Rounding works on the shortest decimal representation of the value
//! rather than on its binary expansion, so a price entered as `1.005`
//! rounds to `1.01` the way a merchant expects, not to `1.00`.

/// Round `value` half away from zero to `places` decimals and render it
/// with exactly that many decimals, `.` as separator and no grouping.
///
/// Non-finite values render as zero.
pub fn round_half_up(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return zero(places);
    }

    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let round_up = frac_part
        .as_bytes()
        .get(places)
        .map(|d| *d >= b'5')
        .unwrap_or(false);

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.extend(
        frac_part
            .bytes()
            .map(|b| b - b'0')
            .chain(std::iter::repeat(0))
            .take(places),
    );

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - places;
    let int_digits: String = digits[..split].iter().map(|d| (b'0' + d) as char).collect();
    let frac_digits: String = digits[split..].iter().map(|d| (b'0' + d) as char).collect();

    let is_zero = digits.iter().all(|d| *d == 0);
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if places == 0 {
        format!("{}{}", sign, int_digits)
    } else {
        format!("{}{}.{}", sign, int_digits, frac_digits)
    }
}

/// Format a price for structured data: two decimals, `.` separator, no
/// thousands grouping.
///
/// ```
/// use theme_catalog::format_price;
/// assert_eq!(format_price(19.999), "20.00");
/// assert_eq!(format_price(5.0), "5.00");
/// ```
pub fn format_price(amount: f64) -> String {
    round_half_up(amount, 2)
}

fn zero(places: usize) -> String {
    if places == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(places))
    }
}
