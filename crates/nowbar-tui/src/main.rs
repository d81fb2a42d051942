mod app;
mod osa;
mod theme;
mod widgets;

use nowbar_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = nowbar_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("nowbar.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to info for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("nowbar log: {}", log_path.display());

    tracing::info!("nowbar starting…");

    let config = Config::load().unwrap_or_default();
    let channel = osa::OsaChannel::new(config.player.app_name.clone());

    let app = app::App::new(config, channel);
    app.run().await?;

    Ok(())
}
