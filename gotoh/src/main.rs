mod align;
mod args;
mod random;
mod util;
mod validate;

use align::align;
use args::{Cli, SubCommands};
use random::random;
use util::{init_logging, set_threads};
use validate::validate;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        SubCommands::Align(args) => {
            align(&args)?;
        }
        SubCommands::Random(args) => {
            set_threads(args.thread_args.num_threads)?;
            random(&args)?;
        }
        SubCommands::Validate(args) => {
            validate(&args)?;
        }
    }
    Ok(())
}
