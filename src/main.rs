//! Binary entry point.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    carapace::cli::run().await
}
