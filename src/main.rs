use clap::{Parser, Subcommand};
use lmnpc::cmd::{
    self, cfe::CfeCommand, depreciation::DepreciationCommand, regime::RegimeCommand,
    schema::SchemaCommand, split::SplitCommand, summary::SummaryCommand,
    validate::ValidateCommand,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lmnpc", version, about = "LMNP furnished rental tax calculator")]
struct Cli {
    /// JSON file overriding the default fiscal parameters
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Depreciation schedule per property
    Depreciation(DepreciationCommand),
    /// Results, regime comparison, CFE estimate and advice for a declaration
    Summary(SummaryCommand),
    /// Compare micro-BIC and real regime for given totals
    Regime(RegimeCommand),
    /// Estimate the CFE from annual receipts
    Cfe(CfeCommand),
    /// Suggest a land/building split for a postal code
    Split(SplitCommand),
    /// Check a declaration and list every problem
    Validate(ValidateCommand),
    /// Print input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let engine = cmd::load_engine(cli.params.as_deref())?;

    match cli.command {
        Command::Depreciation(c) => c.exec(&engine),
        Command::Summary(c) => c.exec(&engine),
        Command::Regime(c) => c.exec(&engine),
        Command::Cfe(c) => c.exec(&engine),
        Command::Split(c) => c.exec(&engine),
        Command::Validate(c) => c.exec(&engine),
        Command::Schema(c) => c.exec(),
    }
}
