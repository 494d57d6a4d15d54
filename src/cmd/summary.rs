//! Summary command - results per property, totals, regime comparison, CFE
//! estimate and advice for a declaration

use crate::cmd::read_declaration;
use crate::core::money::{format_eur, format_eur_signed, format_pct};
use crate::core::{DeclarationSummary, FiscalEngine, FiscalResult};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// JSON or CSV declaration file ("-" for JSON on stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Tax year (defaults to the year in the declaration)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct ResultRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Loan")]
    loan: String,
    #[tabled(rename = "Before Depr.")]
    before: String,
    #[tabled(rename = "Depreciation")]
    depreciation: String,
    #[tabled(rename = "Result")]
    after: String,
}

impl From<&FiscalResult> for ResultRow {
    fn from(r: &FiscalResult) -> Self {
        ResultRow {
            property: r.property_id.clone(),
            income: format!("{:.2}", r.total_income),
            expenses: format!("{:.2}", r.total_expenses),
            loan: format!("{:.2}", r.total_loan_cost),
            before: format!("{:.2}", r.result_before_depreciation),
            depreciation: format!("{:.2}", r.depreciation_deducted),
            after: format!("{:.2}", r.result_after_depreciation),
        }
    }
}

/// JSON output: the summary plus readable advice
#[derive(Debug, Serialize)]
struct SummaryOutput<'a> {
    #[serde(flatten)]
    summary: &'a DeclarationSummary,
    advice_messages: Vec<&'static str>,
}

impl SummaryCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let declaration = read_declaration(&self.input)?.into_declaration(self.year, engine.params())?;
        let summary = engine.declaration_summary(&declaration)?;

        if self.json {
            let output = SummaryOutput {
                summary: &summary,
                advice_messages: summary.advice.iter().map(|a| a.message()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_summary(&summary);
        }
        Ok(())
    }

    fn print_summary(&self, summary: &DeclarationSummary) {
        let totals = &summary.totals;
        let regime = &summary.regime;

        println!();
        println!("LMNP SUMMARY ({})", summary.year);
        println!();

        let rows: Vec<ResultRow> = summary.results.iter().map(ResultRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        println!("TOTALS");
        println!("  Properties: {}", summary.results.len());
        println!(
            "  Income: {} | Expenses: {} | Loan: {}",
            format_eur(totals.total_income),
            format_eur(totals.total_expenses),
            format_eur(totals.total_loan_cost)
        );
        println!(
            "  Before depreciation: {} | Depreciation: {} | Result: {}",
            format_eur_signed(totals.result_before_depreciation),
            format_eur(totals.depreciation_deducted),
            format_eur_signed(totals.result_after_depreciation)
        );
        println!();

        println!("REGIME");
        if regime.micro_bic_eligible {
            println!(
                "  Micro-BIC base: {} ({} allowance)",
                format_eur(regime.micro_bic_base),
                format_pct(regime.micro_bic_allowance)
            );
        } else {
            println!(
                "  Micro-BIC: not available (income above {})",
                format_eur(regime.micro_bic_threshold)
            );
        }
        println!("  Real base: {}", format_eur_signed(regime.real_base));
        // Without micro-BIC there is nothing to compare against
        if regime.micro_bic_eligible {
            println!(
                "  Recommended: {} (saves {} of taxable base)",
                regime.recommended,
                format_eur(regime.estimated_saving)
            );
        } else {
            println!("  Recommended: {}", regime.recommended);
        }
        println!();

        println!("CFE ESTIMATE: {}", format_eur(summary.cfe_estimate));
        println!();

        if !summary.advice.is_empty() {
            println!("ADVICE");
            for advice in &summary.advice {
                println!("  - {}", advice);
            }
            println!();
        }
    }
}
