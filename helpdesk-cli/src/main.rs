//! helpdesk CLI: guest sends, staff replies, threads and inbox. Config from env and `.env`.

use anyhow::Result;
use clap::Parser;
use helpdesk::{HelpdeskComponents, HelpdeskConfig};
use helpdesk_cli::{run, Cli};
use helpdesk_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HelpdeskConfig::load()?;
    init_tracing(&config.log_file)?;

    let components = HelpdeskComponents::from_config(&config).await?;

    match run(&cli, &components).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
