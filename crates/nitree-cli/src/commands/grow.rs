//! Grow command implementation.

use nitree_forest::{grow_json, ArrayMode};
use serde_json::Value;
use tracing::info;

use crate::input::{load_spec, read_input};
use crate::output::format_json;
use crate::SpecArgs;

pub fn run(
    spec_args: &SpecArgs,
    input: Option<String>,
    ordered_arrays: bool,
    no_salt: bool,
    root_only: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut spec = load_spec(spec_args)?;
    if no_salt {
        spec = spec.with_salt_leaves(false);
    }

    let json_str = read_input(input)?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let mode = if ordered_arrays {
        ArrayMode::Ordered
    } else {
        ArrayMode::Unordered
    };
    let tree = grow_json(&value, mode, &spec).map_err(|e| format!("Grow failed: {}", e))?;
    info!(root = %tree.root, "grew tree");

    if root_only {
        println!("{}", tree.root);
    } else {
        println!("{}", format_json(&tree, compact)?);
    }
    Ok(())
}
