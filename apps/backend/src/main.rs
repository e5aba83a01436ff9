#[tokio::main]
async fn main() -> anyhow::Result<()> {
    algorecall_backend::run().await
}
