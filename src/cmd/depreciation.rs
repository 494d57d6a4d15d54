//! Depreciation command - straight-line schedule per property for a year

use crate::cmd::read_declaration;
use crate::core::money::format_eur;
use crate::core::{DepreciationSchedule, FiscalEngine};
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DepreciationCommand {
    /// JSON or CSV declaration file ("-" for JSON on stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Tax year (defaults to the year in the declaration)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Pro-rata")]
    factor: String,
    #[tabled(rename = "Building")]
    building: String,
    #[tabled(rename = "Notary")]
    notary: String,
    #[tabled(rename = "Agency")]
    agency: String,
    #[tabled(rename = "Annual")]
    total_annual: String,
    #[tabled(rename = "Deducted")]
    deducted: String,
}

impl From<&DepreciationSchedule> for ScheduleRow {
    fn from(s: &DepreciationSchedule) -> Self {
        let factor = if s.first_year {
            format!("{} d ({:.4})", s.elapsed_days, s.pro_rata_factor)
        } else {
            "full year".to_string()
        };
        ScheduleRow {
            property: s.property_id.clone(),
            factor,
            building: pair(s.building_annual, s.building_pro_rata, s.first_year),
            notary: pair(s.notary_annual, s.notary_pro_rata, s.first_year),
            agency: pair(s.agency_annual, s.agency_pro_rata, s.first_year),
            total_annual: format!("{:.2}", s.total_annual),
            deducted: format!("{:.2}", s.deductible()),
        }
    }
}

/// Annual amount, followed by the pro-rated one in the enrollment year.
fn pair(annual: Decimal, pro_rata: Decimal, first_year: bool) -> String {
    if first_year {
        format!("{:.2} ({:.2})", annual, pro_rata)
    } else {
        format!("{:.2}", annual)
    }
}

impl DepreciationCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let declaration = read_declaration(&self.input)?.into_declaration(self.year, engine.params())?;

        let schedules = declaration
            .entries
            .iter()
            .map(|entry| engine.depreciation(&entry.property, declaration.year))
            .collect::<Result<Vec<_>, _>>()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&schedules)?);
        } else {
            self.print_table(declaration.year, &schedules);
        }
        Ok(())
    }

    fn print_table(&self, year: i32, schedules: &[DepreciationSchedule]) {
        let rows: Vec<ScheduleRow> = schedules.iter().map(ScheduleRow::from).collect();
        let total: Decimal = schedules.iter().map(DepreciationSchedule::deductible).sum();

        println!();
        println!("DEPRECIATION ({})", year);
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!("Total deducted: {}", format_eur(total));
        println!();
    }
}
