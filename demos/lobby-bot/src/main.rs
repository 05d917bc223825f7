use parlor::prelude::*;
use tracing_subscriber::EnvFilter;

async fn build(config: GatewayConfig) -> Result<ParlorServer<StaticToken, DeferredRoles>, ParlorError> {
    ParlorServerBuilder::new()
        .bind(&config.bind_addr)
        .room_config(config.rooms)
        .build(StaticToken::new(config.bot_token))
        .await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        bind = %config.bind_addr,
        first_room_id = config.rooms.first_room_id,
        max_rooms = config.rooms.max_rooms,
        "starting lobby bot gateway"
    );

    let server = build(config).await?;
    server.run().await?;
    Ok(())
}
