//! Schema command - print expected input formats

use crate::core::{DeclarationInput, FiscalParameters, PropertyRecord};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a declaration document
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
    /// Default fiscal parameters, usable as a --params file
    Params,
    /// JSON Schema for a --params file
    ParamsSchema,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(DeclarationInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", PropertyRecord::csv_header()),
            SchemaFormat::CsvFields => self.print_csv_fields(),
            SchemaFormat::Params => {
                println!("{}", serde_json::to_string_pretty(&FiscalParameters::default())?);
            }
            SchemaFormat::ParamsSchema => {
                let schema = schema_for!(FiscalParameters);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
        }
        Ok(())
    }

    fn print_csv_fields(&self) {
        println!("CSV Input Format");
        println!("================");
        println!();
        for column in PropertyRecord::csv_columns() {
            let req = if column.required { "required" } else { "optional" };
            println!("{:22} ({:8})  {}", column.name, req, column.description);
        }
        println!();
        println!("Dates are YYYY-MM-DD. Leave both share columns empty to use the postal-code suggestion.");
        println!("Any loan column makes the row carry a loan; missing loan columns count as 0.");
    }
}
