use gofinances_core::{ReqwestTransport, TransactionsClient};
use gofinances_web::{build_router, config, error::Result, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(&settings)?)
        .init();

    let state = AppState::new(
        TransactionsClient::new(&settings.api_url),
        ReqwestTransport::new(),
    );
    let router = build_router(state);

    let listener = TcpListener::bind((settings.bind.as_str(), settings.port)).await?;
    tracing::info!(
        api_url = %settings.api_url,
        "GoFinances listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, router).await?;
    Ok(())
}
