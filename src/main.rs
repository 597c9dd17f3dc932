use anyhow::Result;
use clap::Parser;
use skyglass::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    skyglass::init_tracing();
    let cli = Cli::parse();
    skyglass::run(cli).await
}
