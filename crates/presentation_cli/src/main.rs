//! inkboard daemon
//!
//! Renders the dashboard once at startup, then on a fixed schedule until
//! a termination signal arrives.

use std::path::Path;
use std::sync::Arc;

use application::DashboardService;
use application::ports::{CalendarPort, ScreenPort, WeatherPort};
use infrastructure::scheduler::every_minutes;
use infrastructure::{AppConfig, RenderScheduler, load_template};
use integration_ical::{IcalConfig, IcalFeedClient};
use integration_terminus::{TerminusClient, TerminusConfig};
use integration_weather::{OpenMeteoClient, WeatherConfig};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkboard=info,infrastructure=info,application=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("inkboard v{} starting", env!("CARGO_PKG_VERSION"));

    // Configuration problems are fatal at startup; a misconfigured daemon
    // publishing garbage on a schedule helps nobody.
    let settings = AppConfig::load()?.resolve()?;
    info!(
        timezone = %settings.timezone,
        location = %settings.location,
        interval_minutes = settings.interval_minutes,
        "configuration loaded"
    );

    let template = load_template(Path::new(&settings.template_path))?;

    let weather: Arc<dyn WeatherPort> = Arc::new(OpenMeteoClient::new(
        WeatherConfig {
            base_url: settings.weather_base_url.clone(),
            timeout_secs: settings.fetch_timeout_secs,
            timezone: settings.timezone.name().to_string(),
        },
        settings.location,
    )?);

    let calendar: Arc<dyn CalendarPort> = Arc::new(IcalFeedClient::new(
        IcalConfig {
            feed_url: settings.feed_url.clone(),
            timeout_secs: settings.fetch_timeout_secs,
        },
        settings.timezone,
    )?);

    let screen: Arc<dyn ScreenPort> = Arc::new(TerminusClient::new(TerminusConfig {
        base_url: settings.terminus_base_url.clone(),
        access_token: settings.terminus_access_token.clone(),
        timeout_secs: settings.fetch_timeout_secs,
    })?);

    let service = Arc::new(DashboardService::new(
        weather,
        calendar,
        screen,
        template,
        settings.target_date,
        settings.timezone,
    ));

    // First render right away; errors end the cycle, not the process
    if let Err(e) = service.run_cycle().await {
        error!(error = %e, "initial render failed");
    }

    let scheduler = RenderScheduler::new().await?;
    let task_service = Arc::clone(&service);
    scheduler
        .add_task(
            "dashboard_render",
            &every_minutes(settings.interval_minutes),
            move || {
                let service = Arc::clone(&task_service);
                async move { service.run_cycle().await.map(|_| ()).map_err(|e| e.to_string()) }
            },
        )
        .await?;

    shutdown_signal().await;
    scheduler.shutdown().await?;

    info!("inkboard shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log and keep waiting on the other branch; this is best-effort
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("received SIGTERM, shutting down");
        }
    }
}
