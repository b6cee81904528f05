#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stepcards_backend::run().await
}
