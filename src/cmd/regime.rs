//! Regime command - micro-BIC versus real regime for given totals

use crate::core::money::{format_eur, format_eur_signed, format_pct};
use crate::core::{AdviceBasis, FiscalEngine, RegimeComparison};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct RegimeCommand {
    /// Total receipts for the year
    #[arg(long, allow_negative_numbers = true)]
    income: Decimal,

    /// Total deductible charges (expenses, loan costs and depreciation)
    #[arg(long, allow_negative_numbers = true)]
    charges: Decimal,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RegimeOutput<'a> {
    comparison: &'a RegimeComparison,
    advice: Vec<&'static str>,
}

impl RegimeCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let comparison = engine.compare_regimes(self.income, self.charges)?;
        let advice = engine.advise(&AdviceBasis {
            total_income: self.income,
            total_expenses: self.charges,
            result: self.income - self.charges,
        });
        let advice: Vec<&'static str> = advice.iter().map(|a| a.message()).collect();

        if self.json {
            let output = RegimeOutput {
                comparison: &comparison,
                advice,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!();
        println!(
            "REGIME COMPARISON (income {}, charges {})",
            format_eur(self.income),
            format_eur(self.charges)
        );
        println!();
        println!(
            "  Micro-BIC: {} | threshold {} | allowance {}",
            if comparison.micro_bic_eligible { "eligible" } else { "not eligible" },
            format_eur(comparison.micro_bic_threshold),
            format_pct(comparison.micro_bic_allowance)
        );
        println!("  Micro-BIC base: {}", format_eur(comparison.micro_bic_base));
        println!("  Real base: {}", format_eur_signed(comparison.real_base));
        println!(
            "  Recommended: {} | Estimated saving: {}",
            comparison.recommended,
            format_eur(comparison.estimated_saving)
        );
        println!();
        for message in advice {
            println!("  - {}", message);
        }
        println!();
        Ok(())
    }
}
