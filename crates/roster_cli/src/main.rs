//! Roster CLI entry point.
//!
//! Parses arguments, loads the backing file and runs the interactive menu.
//! Errors that prevent the menu from starting are printed to stderr with a
//! non-zero exit code.

fn main() {
    if let Err(err) = roster_cli::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
