pub mod app;
pub mod assets;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Result, bail};
use app::{
    session::{Session, SessionEvent, SessionMode},
    settings::{AppConfig, Services},
};
use assets::AssetCache;
use cli::Cli;
use domain::clock::Clock;
use tokio::sync::mpsc;

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let config = AppConfig::from_cli(&cli);
    let services = Services::from_config(&config);

    if cli.history {
        println!("{}", report::render_history(&services.history.list()?));
        return Ok(());
    }

    let clock = Arc::clone(&services.clock);
    let assets = AssetCache::new(&config.assets_dir);
    let (mut session, mut rx) = Session::new(services, config.units);

    start(&mut session, &cli)?;
    settle(&mut session, &mut rx).await;

    if session.mode == SessionMode::SelectingLocation {
        let Some(pick) = cli.pick else {
            println!("{}", report::render_candidates(&session.candidates));
            return Ok(());
        };
        let available = session.candidates.len();
        if !session.choose_candidate(pick.saturating_sub(1)) {
            bail!("no candidate {pick}; {available} available");
        }
        settle(&mut session, &mut rx).await;
    }

    session.pager.go_to(cli.hourly_page.saturating_sub(1));
    let Some(snapshot) = session
        .snapshot
        .as_ref()
        .filter(|_| session.mode == SessionMode::Ready)
    else {
        bail!(
            "{}",
            session.error_message().unwrap_or("No forecast available")
        );
    };

    println!(
        "{}",
        report::render_dashboard(
            snapshot,
            session.units,
            &session.pager,
            clock.now_utc(),
            &assets
        )
    );
    Ok(())
}

fn start(session: &mut Session, cli: &Cli) -> Result<()> {
    if cli.auto {
        session.auto_locate();
    } else if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        session.fetch_coordinates(lat, lon);
    } else if let Some(recent) = cli.recent {
        if !session.choose_history(recent.saturating_sub(1))? {
            bail!("no recent search {recent}");
        }
    } else if let Some(city) = cli.city.as_deref() {
        session.submit_query(city);
    } else {
        session.auto_locate();
    }
    Ok(())
}

/// Applies events until nothing is in flight.
pub async fn settle(session: &mut Session, rx: &mut mpsc::Receiver<SessionEvent>) {
    while session.is_busy() {
        match rx.recv().await {
            Some(event) => session.apply(event),
            None => break,
        }
    }
}
