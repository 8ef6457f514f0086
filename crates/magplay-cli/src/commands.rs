//! Subcommand definitions.

use clap::Subcommand;

/// Available subcommands. Running without one serves.
#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Commands {
    /// Run the loopback playback service (default)
    #[default]
    Serve,

    /// Check which playback tools can be found, then exit
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
