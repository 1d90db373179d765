use clap::Parser;
use squidbet::adapter::inbound::cli::{self, command::Cli, output};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
