#[tokio::main]
async fn main() -> anyhow::Result<()> {
    feedharvest_app::init_tracing();
    feedharvest_app::run().await
}
