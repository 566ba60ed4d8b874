use std::rc::Rc;
use tokio::sync::broadcast;

use gameboot::{
    event::Emitted, Game, GameConfig, RenderSurface, SimulatedHost, SimulatedSurface,
    VisibilityApi, VisibilityHandler, VisibilityReport,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub host: Rc<SimulatedHost>,
    pub surface: Option<Rc<SimulatedSurface>>,
    pub game: Game,
    pub receiver: broadcast::Receiver<Emitted>,
    pub report: VisibilityReport,
}

impl TestSetup {
    pub fn surface(&self) -> &SimulatedSurface {
        self.surface
            .as_deref()
            .expect("setup was built without a surface")
    }
}

pub struct TestSetupBuilder {
    api: Option<VisibilityApi>,
    with_surface: bool,
    focus_supported: bool,
    config: GameConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            api: Some(VisibilityApi::Standard),
            with_surface: true,
            focus_supported: true,
            config: GameConfig::default(),
        }
    }

    pub fn with_api(mut self, api: Option<VisibilityApi>) -> Self {
        self.api = api;
        self
    }

    pub fn without_visibility_api(self) -> Self {
        self.with_api(None)
    }

    pub fn without_surface(mut self) -> Self {
        self.with_surface = false;
        self
    }

    pub fn without_focus_support(mut self) -> Self {
        self.focus_supported = false;
        self
    }

    pub fn with_auto_focus(mut self, auto_focus: bool) -> Self {
        self.config.auto_focus = auto_focus;
        self
    }

    /// Build the game and install the visibility handler
    pub fn build(self) -> TestSetup {
        let mut host = SimulatedHost::with_api(self.api);
        if !self.focus_supported {
            host = host.without_focus();
        }
        let host = Rc::new(host);

        let surface = self.with_surface.then(|| Rc::new(SimulatedSurface::new()));
        let canvas = surface
            .clone()
            .map(|surface| surface as Rc<dyn RenderSurface>);

        let mut game = Game::new(self.config, host.clone(), canvas);
        let receiver = game.events().subscribe();
        let report = VisibilityHandler::install(&mut game);

        TestSetup {
            host,
            surface,
            game,
            receiver,
            report,
        }
    }
}
