//! Split command - suggested land/building split for a postal code

use crate::core::money::format_pct;
use crate::core::FiscalEngine;
use clap::Args;

#[derive(Args, Debug)]
pub struct SplitCommand {
    /// Postal code of the property (e.g. 75011)
    postal_code: String,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl SplitCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let suggestion = engine.suggest_split(&self.postal_code);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
        } else {
            println!(
                "Suggested split for {} ({}): {} land, {} building",
                suggestion.postal_code,
                suggestion.region.display(),
                format_pct(suggestion.land_share),
                format_pct(suggestion.building_share)
            );
        }
        Ok(())
    }
}
