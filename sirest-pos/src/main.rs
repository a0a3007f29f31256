use anyhow::Context;
use sirest_pos::logger::{cleanup_old_logs, init_logger_with_file};
use sirest_pos::{Console, PosConfig};
use sirest_client::SirestClient;
use tokio_util::sync::CancellationToken;

/// Rolled log files older than this are deleted at startup
const LOG_RETENTION_DAYS: u64 = 14;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PosConfig::from_env()?;
    init_logger_with_file(
        config.log_level.as_deref(),
        config.log_json,
        config.log_dir.as_deref(),
    )?;
    if let Some(dir) = &config.log_dir
        && let Err(e) = cleanup_old_logs(dir, LOG_RETENTION_DAYS)
    {
        tracing::warn!(error = %e, "Failed to clean up old logs");
    }

    let client = SirestClient::new(config.client.clone())?;
    tracing::info!(api = %config.client.base_url, "SIREST console starting");

    if config.seed_demo {
        let seeded = client.init_demo_data().await.context("demo data")?;
        tracing::info!(
            users = seeded.users_created,
            products = seeded.products_created,
            tables = seeded.tables_created,
            "Demo data checked"
        );
    }

    let session = client
        .login(&config.email, &config.password)
        .await
        .with_context(|| format!("login as {}", config.email))?;
    let view = config.view_for(session.role());

    let restaurant = match client.get_configuration(&session).await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "Configuration unavailable, using defaults");
            Default::default()
        }
    };

    let mut console = Console::start(
        &client,
        session.clone(),
        view,
        config.receipt_width,
        restaurant,
        config.client.poll_interval,
    )
    .clear_screen(true);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down");
            on_signal.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    console.run(&mut stdout, &cancel).await?;

    if let Err(e) = client.logout(session).await {
        tracing::warn!(error = %e, "Logout failed");
    }
    Ok(())
}
