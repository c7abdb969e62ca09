//! Verify command implementation.

use nitree_canonical::{HashSpec, Ni};
use nitree_forest::{verify, GrowResult, VerificationVerdict};
use serde_json::json;

use crate::input::read_input;
use crate::output::truncate;

pub fn run(
    input: Option<String>,
    root: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let tree: GrowResult =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid tree: {}", e))?;

    let root = match root {
        Some(r) => Ni::parse(r).map_err(|e| format!("Invalid root: {}", e))?,
        None => tree.root.clone(),
    };
    // Algorithm and authority are read off the published root.
    let spec = HashSpec::matching(&root)?;

    let verdict = verify(&root, &tree.revealed, &spec)
        .map_err(|e| format!("Verification failed: {}", e))?;

    if json_output {
        let output = match &verdict {
            VerificationVerdict::Ok => json!({ "root": root, "verdict": "Ok" }),
            VerificationVerdict::Mismatch {
                path,
                recorded,
                computed,
            } => json!({
                "root": root,
                "verdict": "Mismatch",
                "path": path,
                "recorded": recorded,
                "computed": computed
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &verdict {
            VerificationVerdict::Ok => println!("OK {}", root),
            VerificationVerdict::Mismatch {
                path,
                recorded,
                computed,
            } => {
                println!("{:<12} {:<44} {}", "PATH", "RECORDED", "COMPUTED");
                println!("{}", "-".repeat(100));
                println!(
                    "{:<12} {:<44} {}",
                    path,
                    truncate(recorded.as_str(), 44),
                    truncate(computed.as_str(), 44)
                );
            }
        }
    }

    if verdict != VerificationVerdict::Ok {
        std::process::exit(1);
    }
    Ok(())
}
