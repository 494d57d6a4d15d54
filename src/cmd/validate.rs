//! Validate command - report every problem in a declaration without
//! producing results

use crate::cmd::read_declaration;
use crate::core::{Declaration, ErrorKind, FiscalEngine, FiscalError};
use clap::Args;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
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

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    message: String,
}

impl From<&FiscalError> for ValidationIssue {
    fn from(err: &FiscalError) -> Self {
        let issue_type = match err.kind() {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::InvalidInput => "InvalidInput",
        };
        ValidationIssue {
            issue_type,
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    property_count: usize,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self, engine: &FiscalEngine) -> anyhow::Result<()> {
        let input = read_declaration(&self.input)?;
        let year = self.year.or(input.year);
        let property_count = input.properties.len();

        let mut issues = Vec::new();
        if property_count == 0 {
            issues.push(ValidationIssue::from(&FiscalError::input(
                "properties",
                "a declaration needs at least one property",
            )));
        }
        if year.is_none() {
            issues.push(ValidationIssue::from(&FiscalError::input("year", "required")));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(property_count);
        for (i, outcome) in input.parse_entries(engine.params()).into_iter().enumerate() {
            let prefix = format!("properties[{i}]");
            let checked = outcome.and_then(|entry| {
                if !seen.insert(entry.property.id.clone()) {
                    return Err(FiscalError::input(
                        format!("{prefix}.id"),
                        format!("duplicate property id '{}'", entry.property.id),
                    ));
                }
                if let Some(year) = year {
                    // Runs the full calculation so configuration problems only
                    // visible at calculation time surface too
                    engine
                        .fiscal_result(&entry.property, &entry.income, &entry.expenses, entry.loan.as_ref(), year)
                        .map_err(|e| e.within(&prefix))?;
                }
                Ok(entry)
            });
            match checked {
                Ok(entry) => entries.push(entry),
                Err(err) => issues.push(ValidationIssue::from(&err)),
            }
        }

        // Totals across properties have their own limits
        if let Some(year) = year.filter(|_| issues.is_empty()) {
            let declaration = Declaration { year, entries };
            if let Err(err) = engine.declaration_summary(&declaration) {
                issues.push(ValidationIssue::from(&err));
            }
        }

        if self.json {
            let output = ValidationOutput {
                year,
                property_count,
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&issues, year, property_count);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[ValidationIssue], year: Option<i32>, property_count: usize) {
        let year_str = year.map_or("no year".to_string(), |y| y.to_string());

        println!();
        println!("VALIDATION RESULTS ({}, {} properties)", year_str, property_count);
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
        } else {
            println!("\u{26A0} {} issue(s) found:", issues.len());
            println!();
            for (i, issue) in issues.iter().enumerate() {
                println!("  {}. [{}] {}", i + 1, issue.issue_type, issue.message);
            }
            println!();
        }
    }
}
