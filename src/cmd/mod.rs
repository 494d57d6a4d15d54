pub mod cfe;
pub mod depreciation;
pub mod regime;
pub mod schema;
pub mod split;
pub mod summary;
pub mod validate;

use crate::core::{read_declaration_csv, read_declaration_json, DeclarationInput, FiscalEngine, FiscalParameters};
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Build the engine from an optional parameters file (JSON); defaults
/// otherwise.
pub fn load_engine(params: Option<&Path>) -> anyhow::Result<FiscalEngine> {
    let params = match params {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameters {}", path.display()))?;
            let params = FiscalParameters::from_json(&json)
                .with_context(|| format!("parameters {}", path.display()))?;
            log::info!("Loaded fiscal parameters from {}", path.display());
            params
        }
        None => FiscalParameters::default(),
    };
    Ok(FiscalEngine::new(params)?)
}

/// Read a declaration (JSON, CSV when the extension is `.csv`, or JSON from
/// stdin with "-")
pub fn read_declaration(path: &Path) -> anyhow::Result<DeclarationInput> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let parsed = if is_csv {
        read_declaration_csv(reader)
    } else {
        read_declaration_json(reader)
    };
    let input = parsed.with_context(|| format!("reading {}", path.display()))?;
    log::info!("Read {} properties from {}", input.properties.len(), path.display());
    Ok(input)
}

fn read_from_stdin() -> anyhow::Result<DeclarationInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe a JSON declaration to stdin.");
    }

    Ok(read_declaration_json(io::Cursor::new(buffer))?)
}
