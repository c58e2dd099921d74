mod cli;
mod collect;
mod coverage;
mod credential;
mod extract;
mod params;
mod range;
mod sink;
mod source;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Collect(args) => match command::collect(args).await {
            Ok(filename) => println!("File saved to `{}`", filename),
            Err(e) => eprintln!("Error: {}", e),
        },
        Commands::Verify(args) => {
            if let Err(e) = command::verify(args) {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}
