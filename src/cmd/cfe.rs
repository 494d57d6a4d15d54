//! CFE command - estimate the business property levy from receipts

use crate::core::money::format_eur;
use crate::core::FiscalEngine;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CfeCommand {
    /// Annual receipts
    #[arg(long, allow_negative_numbers = true)]
    receipts: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CfeOutput {
    receipts: Decimal,
    cfe_estimate: Decimal,
    cfe_minimum: Decimal,
}

impl CfeCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let estimate = engine.estimate_cfe(self.receipts)?;

        if self.json {
            let output = CfeOutput {
                receipts: self.receipts,
                cfe_estimate: estimate,
                cfe_minimum: engine.params().cfe_minimum,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "CFE estimate for {} of receipts: {} (minimum {})",
                format_eur(self.receipts),
                format_eur(estimate),
                format_eur(engine.params().cfe_minimum)
            );
        }
        Ok(())
    }
}
