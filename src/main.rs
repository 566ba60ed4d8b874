use std::rc::Rc;
use std::sync::Arc;

use gameboot::event::LoggingEventHandler;
use gameboot::host::HostSignal;
use gameboot::{EventDispatcher, Game, GameConfig, SimulatedHost, SimulatedSurface};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Signals replayed when no script path is given
fn default_script() -> Vec<HostSignal> {
    vec![
        HostSignal::MouseEnter,
        HostSignal::PointerDown,
        HostSignal::Blur,
        HostSignal::VisibilityChange { hidden: true },
        HostSignal::VisibilityChange { hidden: false },
        HostSignal::Focus,
        HostSignal::Pause,
        HostSignal::MouseLeave,
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameboot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GameConfig::default().with_env_overrides()?;

    let script = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading host signal script");
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<Vec<HostSignal>>(&raw)?
        }
        None => default_script(),
    };

    let host = Rc::new(SimulatedHost::new());
    let surface = Rc::new(SimulatedSurface::new());
    let mut game = Game::new(config, host.clone(), Some(surface.clone()));

    let mut dispatcher = EventDispatcher::new(game.events());
    dispatcher.add_handler(Arc::new(LoggingEventHandler));
    let dispatch = dispatcher.start_listening();

    let report = game.boot();
    info!(game_id = %game.id(), report = ?report, "Game booted on simulated host");

    for signal in &script {
        host.replay(Some(&surface), signal);
        tokio::task::yield_now().await;
    }

    info!(
        signals = script.len(),
        pointer_over = game.is_over(),
        focus_requests = host.focus_requests(),
        "Replay finished"
    );

    // Listeners hold bus handles; dropping the host side closes the bus
    drop(game);
    drop(surface);
    drop(host);
    dispatch.await?;

    Ok(())
}
