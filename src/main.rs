//! Anime4K - Command-line tool for upscaling anime-style artwork

use std::process::ExitCode;

use anime4k::cli;

fn main() -> ExitCode {
    cli::run()
}
