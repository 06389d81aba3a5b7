#[tokio::main]
async fn main() -> anyhow::Result<()> {
    assetlens_server::start().await
}
