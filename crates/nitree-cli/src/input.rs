//! Input loading: JSON documents and hash configuration.

use nitree_canonical::{DigestAlg, HashSpec, HashSpecConfig};
use std::io::{self, Read};

use crate::SpecArgs;

/// Reads a file, or stdin when no path is given.
pub fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        Ok(std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?)
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

/// Builds the hash configuration: config file first, then flag overrides.
pub fn load_config(args: &SpecArgs) -> Result<HashSpecConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {}: {}", path, e))?;
            serde_json::from_str::<HashSpecConfig>(&raw)
                .map_err(|e| format!("Invalid config {}: {}", path, e))?
        }
        None => HashSpecConfig::default(),
    };
    if let Some(alg) = &args.alg {
        config.algorithm = alg.parse::<DigestAlg>()?;
    }
    if let Some(authority) = &args.authority {
        config.authority = authority.clone();
    }
    Ok(config)
}

/// Builds a validated spec from the command-line configuration.
pub fn load_spec(args: &SpecArgs) -> Result<HashSpec, Box<dyn std::error::Error>> {
    Ok(HashSpec::try_from(&load_config(args)?)?)
}
