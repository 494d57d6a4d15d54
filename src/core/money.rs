use super::error::FiscalError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero, keeping a scale of 2 so outputs
/// always print as `1234.50` rather than `1234.5`.
pub fn round_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Largest amount accepted for a single field (one quadrillion euros). Sums
/// and ratios of amounts below it stay inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<Decimal, FiscalError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FiscalError::input(field, format!("must not be negative, got {amount}")));
    }
    if amount > MAX_AMOUNT {
        return Err(FiscalError::input(field, format!("amount out of range, got {amount}")));
    }
    Ok(amount)
}

/// `a + b`, or an out-of-range error naming `field`.
pub fn checked_add(field: &str, a: Decimal, b: Decimal) -> Result<Decimal, FiscalError> {
    a.checked_add(b)
        .ok_or_else(|| FiscalError::input(field, "amount out of range"))
}

pub fn format_eur(amount: Decimal) -> String {
    format!("{:.2} €", amount)
}

pub fn format_eur_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{:.2} €", amount.abs())
    } else {
        format!("{:.2} €", amount)
    }
}

/// Format a ratio such as `0.80` as `80%`.
pub fn format_pct(ratio: Decimal) -> String {
    format!("{}%", (ratio * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_cents(dec!(333.3333)), dec!(333.33));
        assert_eq!(round_cents(dec!(0.005)), dec!(0.01));
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(-2.675)), dec!(-2.68));
    }

    #[test]
    fn rounded_values_keep_two_places() {
        assert_eq!(round_cents(dec!(6400)).to_string(), "6400.00");
        assert_eq!(round_cents(dec!(340.5)).to_string(), "340.50");
    }

    #[test]
    fn negative_amounts_rejected() {
        assert!(ensure_non_negative("gross_rent", dec!(-0.01)).is_err());
        assert_eq!(ensure_non_negative("gross_rent", dec!(0)).unwrap(), dec!(0));
        assert_eq!(ensure_non_negative("gross_rent", dec!(-0)).unwrap(), dec!(0));
    }

    #[test]
    fn amounts_above_ceiling_rejected() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
        assert!(ensure_non_negative("gross_rent", MAX_AMOUNT).is_ok());
        let err = ensure_non_negative("gross_rent", MAX_AMOUNT + dec!(0.01)).unwrap_err();
        assert_eq!(err.field(), Some("gross_rent"));
        assert!(ensure_non_negative("gross_rent", Decimal::MAX).is_err());
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(checked_add("total", dec!(1), dec!(2)).unwrap(), dec!(3));
        let err = checked_add("total", Decimal::MAX, dec!(1)).unwrap_err();
        assert_eq!(err.field(), Some("total"));
    }

    #[test]
    fn formatting() {
        assert_eq!(format_eur(dec!(7733.33)), "7733.33 €");
        assert_eq!(format_eur_signed(dec!(-1200)), "-1200.00 €");
        assert_eq!(format_pct(dec!(0.80)), "80%");
        assert_eq!(format_pct(dec!(0.002)), "0.2%");
    }
}
