use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use sleuth_core::generate_case;

pub fn run(seed: u64, at: DateTime<Utc>, output: Option<&Path>) -> Result<(), String> {
    let case = generate_case(seed, at);
    let json = serde_json::to_string_pretty(&case).map_err(|e| format!("JSON error: {e}"))?;

    match output {
        Some(path) => {
            fs::write(path, &json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            eprintln!("Wrote {} to {}", case.id, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
