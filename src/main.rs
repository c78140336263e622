use anyhow::Result;
use famcal::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
