use chatdesk::{AppState, Config, app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.login_url.is_none() {
        tracing::warn!("CHATDESK_LOGIN_URL is not set, the login page has nowhere to send people");
    }
    tracing::info!(
        bind = %config.bind,
        truncate = ?config.truncate,
        edit_confirmation = ?config.edit_confirmation,
        "starting"
    );

    let listener = tokio::net::TcpListener::bind(config.bind.as_str()).await?;
    axum::serve(listener, app(AppState::new(config))).await?;
    Ok(())
}
