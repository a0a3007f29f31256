//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` in the JSON payloads. Every calculation converts
//! to `Decimal`, works there, and rounds back to 2 decimal places
//! (half away from zero) on the way out.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert an f64 amount into Decimal (non-finite values become zero)
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round a Decimal to cents and convert to f64
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

/// Round to cents, half away from zero
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an f64 amount to cents
pub fn round_f64(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// `price × quantity`
pub fn line_total(price: f64, quantity: u32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// `amount × percent / 100`, rounded to cents
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round(amount * percent / Decimal::ONE_HUNDRED)
}

/// Whether two amounts are equal to the cent
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

/// Change owed for a cash payment; `None` when the received amount is short
pub fn change_due(total: f64, received: f64) -> Option<f64> {
    let diff = round(to_decimal(received)) - round(to_decimal(total));
    if diff < Decimal::ZERO {
        None
    } else {
        Some(to_f64(diff))
    }
}

/// Format an amount with thousands separators (es-CO style: `$ 12.345,50`)
pub fn format_money(symbol: &str, amount: f64) -> String {
    let cents = (round(to_decimal(amount)) * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or_default();
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}{} {},{:02}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        frac
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_f64(0.125), 0.13);
        assert_eq!(round_f64(-0.125), -0.13);
        assert_eq!(round_f64(10.0), 10.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(to_f64(line_total(10.0, 2)), 20.0);
        assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(Decimal::from(100), Decimal::from(19)), Decimal::from(19));
        assert_eq!(
            to_f64(percent_of(to_decimal(33.33), Decimal::from(10))),
            3.33
        );
    }

    #[test]
    fn test_change_due() {
        assert_eq!(change_due(119.0, 150.0), Some(31.0));
        assert_eq!(change_due(119.0, 119.0), Some(0.0));
        assert_eq!(change_due(119.0, 100.0), None);
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(0.1 + 0.2, 0.3));
        assert!(!money_eq(10.0, 10.02));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("$", 12345.5), "$ 12.345,50");
        assert_eq!(format_money("$", 0.0), "$ 0,00");
        assert_eq!(format_money("$", 999.0), "$ 999,00");
        assert_eq!(format_money("$", 1000000.0), "$ 1.000.000,00");
        assert_eq!(format_money("$", -5.25), "-$ 5,25");
    }
}
