//! Adapt command: provider payload to canonical token file

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::adapter::{adapt_parsed, AdapterOptions};
use crate::models::StylePayload;

/// Run the adapt command
pub fn run_adapt(payload: &Path, output: Option<&Path>, options: &AdapterOptions) -> ExitCode {
    let parsed = match StylePayload::load(payload) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}: {}", payload.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let adapted = adapt_parsed(&parsed, options);
    for warning in &adapted.warnings {
        eprintln!("Warning: {}", warning);
    }

    let json = match adapted.tree.to_json_pretty() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", json)) {
                eprintln!("Error: failed to write {}: {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            println!(
                "Adapted {} tokens from {} records into {}",
                adapted.tree.token_count(),
                parsed.payload.record_count(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    ExitCode::from(EXIT_SUCCESS)
}
