//! Digest command implementation.

use nitree_canonical::digest_of;

pub fn run(ni: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", digest_of(&ni)?);
    Ok(())
}
