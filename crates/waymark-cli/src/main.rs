//! Waymark - Main Entry Point

mod cli;
mod console;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use smol::Timer;
use tracing_subscriber::EnvFilter;
use waymark_geo::{AlertRadius, Coordinate, Destination, Geolocation, LocationSource, RouteLocation};
use waymark_net::{AlertService, LocalAlertService, RemoteAlertClient};
use waymark_tracker::{TrackerConfig, TrackingController};

use cli::{Cli, Command};
use console::ConsoleView;
use settings::Settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::load(cli.config.as_deref())?.with_server(cli.server.as_deref());

    if cli.local {
        tracing::info!("Using in-process alert evaluation");
        smol::block_on(run(cli.command, settings.tracker, Arc::new(LocalAlertService::new())))
    } else {
        let client = RemoteAlertClient::with_config(settings.client.clone())
            .context("building alert service client")?;
        tracing::info!("Alert service: {}", client.base_url());
        smol::block_on(run(cli.command, settings.tracker, Arc::new(client)))
    }
}

async fn run<S: AlertService + 'static>(
    command: Command,
    tracker: TrackerConfig,
    service: Arc<S>,
) -> anyhow::Result<()> {
    match command {
        Command::Track {
            route,
            destination,
            radius,
            interval,
            duration,
            log_cycles,
        } => {
            let mut config = tracker;
            if let Some(ms) = interval {
                config.interval_ms = ms;
            }
            config.verbose_logging |= log_cycles;

            let options = TrackOptions {
                destination,
                radius,
                duration: duration.map(Duration::from_secs),
            };
            if route.is_empty() {
                // a terminal has no positioning hardware of its own
                track(config, Geolocation::unsupported(), service, options).await
            } else {
                track(config, RouteLocation::new(route), service, options).await
            }
        }

        Command::Destination {
            latitude,
            longitude,
            radius,
        } => {
            let coordinate = Coordinate::new(latitude, longitude)?;
            let destination = Destination::new(coordinate, radius.unwrap_or(tracker.default_radius));
            let status = service
                .submit_destination(destination)
                .await
                .context("submitting destination")?;
            println!("{status}");
            Ok(())
        }

        Command::Radius { meters } => {
            let status = service.update_radius(meters).await.context("updating alert radius")?;
            println!("{status}");
            Ok(())
        }

        Command::Status => {
            let status = service.status().await.context("probing alert service")?;
            println!("{status}");
            Ok(())
        }
    }
}

struct TrackOptions {
    destination: Option<Coordinate>,
    radius: Option<AlertRadius>,
    duration: Option<Duration>,
}

async fn track<L, S>(config: TrackerConfig, source: L, service: Arc<S>, options: TrackOptions) -> anyhow::Result<()>
where
    L: LocationSource + 'static,
    S: AlertService + 'static,
{
    let tracker = TrackingController::new(config, source, service, Arc::new(ConsoleView::new()));

    // first fix, before any destination exists
    tracker.locate().await;

    if let Some(radius) = options.radius {
        tracker.destinations().apply_alert_radius(radius);
    }
    if let Some(coordinate) = options.destination {
        tracker.destinations().set_destination(coordinate);
    }

    tracker.start();
    match options.duration {
        Some(duration) => {
            Timer::after(duration).await;
        }
        None => smol::future::pending::<()>().await,
    }
    tracker.stop();

    Ok(())
}
