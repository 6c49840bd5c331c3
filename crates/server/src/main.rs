#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fixrag_server::start().await
}
