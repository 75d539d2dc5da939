use clap::Parser;
use mapconv::cli::{Cli, Commands};
use mapconv::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => mapconv::cli::convert::run(args, &printer)?,
        Commands::Show(args) => mapconv::cli::show::run(args, &printer)?,
        Commands::Completions(args) => mapconv::cli::completions::run(args)?,
    }

    Ok(())
}
