use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    travel_mate_client::cli::run().await
}
