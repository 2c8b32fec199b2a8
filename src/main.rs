#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clientes_api::axum().await
}
