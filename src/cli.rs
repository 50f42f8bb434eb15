use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ru", version, about = "Parse problems, contests and run test.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse a problem
    Parse,

    /// Run tests
    Test {
        /// Copy the solution to the clipboard when every test passes
        #[arg(short, long)]
        copy: bool,
    },

    /// Setup compilation options
    Config,
}
