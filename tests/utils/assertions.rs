//! Test assertion helpers - fluent API for verifying emitted events
#![allow(dead_code)] // Test utilities may not all be used in every test

use gameboot::GameEvent;

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct EventAssertion<'a> {
    setup: &'a mut TestSetup,
}

impl<'a> EventAssertion<'a> {
    pub fn for_setup(setup: &'a mut TestSetup) -> Self {
        Self { setup }
    }

    /// Drain every event emitted since the last check
    pub fn drain(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(emitted) = self.setup.receiver.try_recv() {
            assert!(
                emitted.args.is_empty(),
                "{} should carry no arguments",
                emitted.event
            );
            events.push(emitted.event);
        }
        events
    }

    /// Assert exactly `expected` was emitted, in order
    pub fn emitted(mut self, expected: &[GameEvent]) {
        let events = self.drain();
        assert_eq!(events, expected, "unexpected events on the bus");
    }

    pub fn nothing_emitted(self) {
        self.emitted(&[]);
    }
}
