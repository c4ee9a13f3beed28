/// Formats a dollar amount with thousands separators and two decimals,
/// e.g. `$13,000,000.00` or `-$400.50`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" after rounding is still zero
    let sign = if amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(13_000_000.0), "$13,000,000.00");
        assert_eq!(format_currency(800_000.0), "$800,000.00");
        assert_eq!(format_currency(2_500.0), "$2,500.00");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn keeps_sign_for_losses() {
        assert_eq!(format_currency(-1_234_567.891), "-$1,234,567.89");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percentages_use_two_decimals() {
        assert_eq!(format_percent(7.0 / 13.0 * 100.0), "53.85%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(-12.5), "-12.50%");
    }
}
