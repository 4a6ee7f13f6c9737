use anyhow::Result;
use clap::{Parser, Subcommand};
use outpost_radio::commands::range::{self, CommonOpts, RangeCommand};

#[derive(Parser, Debug)]
#[command(name = "outpost_radio", version, about = "Minimum radio range for outpost networks with satellite channels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve every test case in the input file
    Solve {
        #[command(flatten)]
        common: CommonOpts,
    },

    /// Print adjacency list, spanning tree and range for one test case
    Inspect {
        /// 1-based test number
        #[arg(long)]
        case: usize,
        #[command(flatten)]
        common: CommonOpts,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Solve { common } => range::cmd_range(common, RangeCommand::Solve),
        Commands::Inspect { case, common } => range::cmd_range(common, RangeCommand::Inspect { case }),
    }
}
