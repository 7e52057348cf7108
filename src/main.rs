use clap::Parser;
use sprite_curator::cli::{Args, run_cli};
use sprite_curator::output::OutputFormatter;

fn main() {
    // Exits with a usage error before touching the filesystem if no directory is given.
    let args = Args::parse();

    if let Err(e) = run_cli(&args.directory) {
        OutputFormatter::error(&format!("Error: {}", e));
    }
}
