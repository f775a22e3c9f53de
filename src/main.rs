use anyhow::Result;
use tasklion::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    Cli::menu().await
}
