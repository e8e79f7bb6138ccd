//! Roster export CLI binary

use roster_export::cli;

fn main() -> anyhow::Result<()> {
    cli::main()
}
