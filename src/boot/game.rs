use std::cell::Cell;
use std::rc::Rc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::visibility::{VisibilityHandler, VisibilityReport};
use crate::event::{EventBus, GameEvent};
use crate::host::{Host, RenderSurface};
use crate::shared::GameConfig;

/// A game instance as seen by its boot sequence
///
/// Owns the event bus every system publishes on and the handles onto the
/// host page. Host handles are single-threaded, so a `Game` stays on the
/// thread that created it.
pub struct Game {
    id: Uuid,
    config: GameConfig,
    events: EventBus,
    host: Rc<dyn Host>,
    canvas: Option<Rc<dyn RenderSurface>>,
    is_over: Rc<Cell<bool>>,
    booted: bool,
    visibility: Option<VisibilityReport>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        host: Rc<dyn Host>,
        canvas: Option<Rc<dyn RenderSurface>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            events: EventBus::with_default_capacity(),
            host,
            canvas,
            is_over: Rc::new(Cell::new(false)),
            booted: false,
            visibility: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }

    pub fn canvas(&self) -> Option<&Rc<dyn RenderSurface>> {
        self.canvas.as_ref()
    }

    /// Whether the pointer is currently over the rendering surface
    pub fn is_over(&self) -> bool {
        self.is_over.get()
    }

    pub(crate) fn pointer_over_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.is_over)
    }

    /// What the visibility handler wired up, `None` until it has been installed
    pub fn visibility(&self) -> Option<VisibilityReport> {
        self.visibility
    }

    pub(crate) fn set_visibility(&mut self, report: VisibilityReport) {
        self.visibility = Some(report);
    }

    /// Boot the game: announce `boot`, bridge the host signals, then announce `ready`
    ///
    /// Only the first call emits anything.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn boot(&mut self) -> VisibilityReport {
        if let Some(report) = self.visibility.filter(|_| self.booted) {
            warn!("Game already booted");
            return report;
        }
        self.booted = true;

        self.events.emit(GameEvent::Boot);
        let report = VisibilityHandler::install(self);
        self.events.emit(GameEvent::Ready);

        info!("Game booted");
        report
    }
}
