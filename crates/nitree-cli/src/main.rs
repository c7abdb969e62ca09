//! NITree CLI - grow, verify and disclose named information trees.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;

use commands::{conceal, digest, grow, hash, verify};

#[derive(Parser)]
#[command(name = "nitree")]
#[command(about = "Named information trees over nested JSON data")]
struct Cli {
    #[command(flatten)]
    spec: SpecArgs,
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Hash configuration shared by all commands.
#[derive(Args)]
pub struct SpecArgs {
    /// JSON file with {"algorithm", "authority", "salt_leaves"}
    #[arg(long, global = true)]
    config: Option<String>,
    /// Hash algorithm (e.g. sha-256, sha-512)
    #[arg(long, global = true)]
    alg: Option<String>,
    /// Authority component embedded in every name
    #[arg(long, global = true)]
    authority: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the name of a text
    Hash {
        /// Text to name
        text: String,
    },
    /// Grow a tree from input JSON
    Grow {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Treat JSON arrays as ordered sequences
        #[arg(long)]
        ordered_arrays: bool,
        /// Do not salt text leaves (roots become reproducible)
        #[arg(long)]
        no_salt: bool,
        /// Print the root only
        #[arg(long)]
        root_only: bool,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Print the hex digest of a name
    Digest {
        /// Named information URI
        ni: String,
    },
    /// Verify a grown tree against a root
    Verify {
        /// Grown tree JSON file (or stdin if not provided)
        input: Option<String>,
        /// Published root (default: the root recorded in the input)
        #[arg(long)]
        root: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Conceal subtrees of a grown tree
    Conceal {
        /// Grown tree JSON file (or stdin if not provided)
        input: Option<String>,
        /// Dotted index path of a subtree to conceal (repeatable)
        #[arg(long = "path")]
        paths: Vec<String>,
        /// Dotted index path of a subtree to keep; everything else is concealed (repeatable)
        #[arg(long = "keep")]
        keep: Vec<String>,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Hash { text } => hash::run(&cli.spec, text),
        Commands::Grow {
            input,
            ordered_arrays,
            no_salt,
            root_only,
            compact,
        } => grow::run(&cli.spec, input, ordered_arrays, no_salt, root_only, compact),
        Commands::Digest { ni } => digest::run(ni),
        Commands::Verify { input, root, json } => verify::run(input, root, json),
        Commands::Conceal {
            input,
            paths,
            keep,
            compact,
        } => conceal::run(input, paths, keep, compact),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
