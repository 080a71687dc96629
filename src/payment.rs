//! Payment Verification
//!
//! Rule-based check of a customer-reported amount against the product price.
//! The comparison is exact; no rounding tolerance is applied.

/// Returns true iff `amount >= price`.
pub fn verify(amount: f64, price: f64) -> bool {
    amount >= price
}

/// Amount still owed, formatted with two decimals.
pub fn shortfall(amount: f64, price: f64) -> String {
    format!("{:.2}", price - amount)
}

/// Parse the amount argument of `/payment`.
///
/// Returns `None` for anything that is not a finite number. The whole argument
/// must be numeric: inputs with a numeric prefix such as `12abc` or `100$` are
/// rejected rather than read as 12 or 100.
pub fn parse_amount(arg: &str) -> Option<f64> {
    arg.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 100.0, true)]
    #[case(150.0, 100.0, true)]
    #[case(99.99, 100.0, false)]
    #[case(0.0, 100.0, false)]
    #[case(-5.0, 0.0, false)]
    fn test_verify(#[case] amount: f64, #[case] price: f64, #[case] expected: bool) {
        assert_eq!(verify(amount, price), expected);
    }

    #[rstest]
    #[case(80.0, 100.0, "20.00")]
    #[case(99.99, 100.0, "0.01")]
    #[case(33.333, 50.0, "16.67")]
    fn test_shortfall(#[case] amount: f64, #[case] price: f64, #[case] expected: &str) {
        assert_eq!(shortfall(amount, price), expected);
    }

    #[rstest]
    #[case("100", Some(100.0))]
    #[case("99.5", Some(99.5))]
    #[case("-3", Some(-3.0))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("12abc", None)]
    #[case("100$", None)]
    fn test_parse_amount(#[case] arg: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(arg), expected);
    }
}
