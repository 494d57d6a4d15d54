use super::engine::FiscalEngine;
use super::error::FiscalError;
use super::money::{ensure_non_negative, round_cents};
use rust_decimal::Decimal;

impl FiscalEngine {
    /// Rough CFE (business property levy) from annual receipts.
    ///
    /// Each band's bound is inclusive. Above the last band the levy is the
    /// greater of the top multiple of the minimum and a share of receipts.
    pub fn estimate_cfe(&self, receipts: Decimal) -> Result<Decimal, FiscalError> {
        ensure_non_negative("receipts", receipts)?;
        let params = self.params();

        let levy = |multiplier: Decimal| {
            params
                .cfe_minimum
                .checked_mul(multiplier)
                .ok_or_else(|| FiscalError::config("cfe_minimum", "levy out of range"))
        };

        let band = params
            .cfe_bands
            .iter()
            .find(|(upper, _)| receipts <= *upper);
        let estimate = match band {
            Some((_, multiplier)) => levy(*multiplier)?,
            None => levy(params.cfe_top_multiplier)?.max(receipts * params.cfe_rate),
        };
        Ok(round_cents(estimate))
    }
}
