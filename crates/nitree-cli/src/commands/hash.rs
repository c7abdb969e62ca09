//! Hash command implementation.

use nitree_canonical::hash_text;

use crate::input::load_spec;
use crate::SpecArgs;

pub fn run(spec_args: &SpecArgs, text: String) -> Result<(), Box<dyn std::error::Error>> {
    let spec = load_spec(spec_args)?;
    println!("{}", hash_text(&text, &spec));
    Ok(())
}
