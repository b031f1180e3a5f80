use clap::Parser;
use presentation::cli::{Cli, CliApp};
use shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let cli = Cli::parse();
    let mut app = CliApp::new();
    app.run(cli).await?;
    Ok(())
}
