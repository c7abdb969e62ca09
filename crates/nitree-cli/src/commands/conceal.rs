//! Conceal command implementation.

use nitree_forest::{conceal, disclose, parse_index_path, GrowResult};

use crate::input::read_input;
use crate::output::format_json;

pub fn run(
    input: Option<String>,
    paths: Vec<String>,
    keep: Vec<String>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let mut tree: GrowResult =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid tree: {}", e))?;

    let paths = paths
        .iter()
        .map(|p| parse_index_path(p))
        .collect::<Result<Vec<_>, _>>()?;
    let keep = keep
        .iter()
        .map(|p| parse_index_path(p))
        .collect::<Result<Vec<_>, _>>()?;

    if !keep.is_empty() {
        tree.revealed = disclose(&tree.revealed, &keep)?;
    }
    tree.revealed = conceal(&tree.revealed, &paths)?;

    println!("{}", format_json(&tree, compact)?);
    Ok(())
}
