/// Voice capture coordination
///
/// Continuous voice notes are defined only inside an active assisted
/// trial, so capture runs exactly while both the operator's toggle
/// (`desired`) and the tracking gate are on. The underlying speech engine
/// ends sessions on its own (silence timeouts), so the coordinator
/// resubscribes whenever an engine-initiated end arrives while both flags
/// still hold, treating a redundant-start error as transient.

use anyhow::Result;

use crate::session::SessionEvent;

/// Narrow handle onto the speech-to-text collaborator. Recognition quality
/// and audio plumbing live outside the core; results and engine-initiated
/// ends come back through the event loop.
pub trait CaptureEngine {
    /// Begin streaming. May fail transiently if already streaming.
    fn start(&mut self) -> Result<()>;

    /// Stop streaming. Safe to call when already stopped.
    fn stop(&mut self);
}

pub struct VoiceCoordinator {
    /// Operator's continuous-notes toggle.
    desired: bool,
    /// Whether the engine is currently believed to be streaming.
    active: bool,
    /// Whether `desired` survives a trial boundary (see VoiceConfig).
    preserve_preference: bool,
    /// Redundant-start errors swallowed during resubscription.
    transient_failures: u64,
}

impl VoiceCoordinator {
    pub fn new(preserve_preference: bool) -> Self {
        VoiceCoordinator {
            desired: false,
            active: false,
            preserve_preference,
            transient_failures: 0,
        }
    }

    /// Operator toggled the continuous-notes button.
    pub fn set_desired(
        &mut self,
        engine: &mut dyn CaptureEngine,
        desired: bool,
        tracking_enabled: bool,
    ) {
        self.desired = desired;

        if desired && tracking_enabled {
            self.try_start(engine);
        } else if !desired {
            engine.stop();
            self.active = false;
        }
    }

    /// Tracking gate transition, delivered by the session controller.
    ///
    /// Disable forces capture off regardless of `desired`; the preference
    /// itself is kept so the operator's choice is recalled when the next
    /// assisted trial re-enables tracking.
    pub fn on_tracking_event(&mut self, engine: &mut dyn CaptureEngine, event: SessionEvent) {
        match event {
            SessionEvent::TrackingEnabled => {
                if self.desired {
                    self.try_start(engine);
                }
            }
            SessionEvent::TrackingDisabled => {
                engine.stop();
                self.active = false;
            }
        }
    }

    /// Trial boundary. Aborts any streaming left over from the previous
    /// trial; the operator preference resets unless configured to persist.
    pub fn begin_trial(&mut self, engine: &mut dyn CaptureEngine, voice_available: bool) {
        engine.stop();
        self.active = false;

        if !voice_available || !self.preserve_preference {
            self.desired = false;
        }
    }

    /// Engine-initiated end (silence timeout and similar). Resubscribe if
    /// the operator still wants capture and tracking is still live.
    pub fn on_engine_ended(&mut self, engine: &mut dyn CaptureEngine, tracking_enabled: bool) {
        if self.desired && tracking_enabled {
            self.try_start(engine);
        } else {
            self.active = false;
        }
    }

    fn try_start(&mut self, engine: &mut dyn CaptureEngine) {
        if let Err(_e) = engine.start() {
            // Redundant start: the engine kept streaming through what we
            // thought was an end. Defined as a recovered no-op.
            self.transient_failures += 1;
        }
        self.active = true;
    }

    pub fn is_desired(&self) -> bool {
        self.desired
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn transient_failures(&self) -> u64 {
        self.transient_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    /// Engine double that records calls and can fail its next start.
    struct FakeEngine {
        streaming: bool,
        starts: usize,
        stops: usize,
        fail_next_start: bool,
    }

    impl FakeEngine {
        fn new() -> Self {
            FakeEngine { streaming: false, starts: 0, stops: 0, fail_next_start: false }
        }
    }

    impl CaptureEngine for FakeEngine {
        fn start(&mut self) -> Result<()> {
            self.starts += 1;
            if self.fail_next_start {
                self.fail_next_start = false;
                bail!("recognition already started");
            }
            self.streaming = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
            self.streaming = false;
        }
    }

    #[test]
    fn test_capture_needs_both_flags() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        // Desired but tracking off: engine stays idle
        coordinator.set_desired(&mut engine, true, false);
        assert!(!coordinator.is_active());
        assert_eq!(engine.starts, 0);

        // Tracking comes up: the standing preference starts capture
        coordinator.on_tracking_event(&mut engine, SessionEvent::TrackingEnabled);
        assert!(coordinator.is_active());
        assert!(engine.streaming);
    }

    #[test]
    fn test_operator_toggle_off_stops_engine() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        assert!(engine.streaming);

        coordinator.set_desired(&mut engine, false, true);
        assert!(!coordinator.is_active());
        assert!(!engine.streaming);
    }

    #[test]
    fn test_tracking_disable_forces_stop_but_keeps_preference() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        coordinator.on_tracking_event(&mut engine, SessionEvent::TrackingDisabled);

        assert!(!coordinator.is_active());
        assert!(!engine.streaming);
        assert!(coordinator.is_desired());
    }

    #[test]
    fn test_engine_end_resubscribes_while_flags_hold() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        engine.streaming = false; // silence timeout

        coordinator.on_engine_ended(&mut engine, true);
        assert!(coordinator.is_active());
        assert!(engine.streaming);
        assert_eq!(engine.starts, 2);
    }

    #[test]
    fn test_engine_end_after_disable_goes_inactive() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        coordinator.on_tracking_event(&mut engine, SessionEvent::TrackingDisabled);

        coordinator.on_engine_ended(&mut engine, false);
        assert!(!coordinator.is_active());
        assert_eq!(engine.starts, 1);
    }

    #[test]
    fn test_resubscribe_swallows_redundant_start() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        engine.fail_next_start = true;

        coordinator.on_engine_ended(&mut engine, true);
        assert!(coordinator.is_active());
        assert_eq!(coordinator.transient_failures(), 1);
    }

    #[test]
    fn test_trial_boundary_resets_preference_by_default() {
        let mut coordinator = VoiceCoordinator::new(false);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        coordinator.begin_trial(&mut engine, true);

        assert!(!coordinator.is_desired());
        assert!(!coordinator.is_active());
        assert!(!engine.streaming);
    }

    #[test]
    fn test_trial_boundary_can_preserve_preference() {
        let mut coordinator = VoiceCoordinator::new(true);
        let mut engine = FakeEngine::new();

        coordinator.set_desired(&mut engine, true, true);
        coordinator.begin_trial(&mut engine, true);
        assert!(coordinator.is_desired());

        // A baseline trial still clears it: voice is unavailable there
        coordinator.set_desired(&mut engine, true, true);
        coordinator.begin_trial(&mut engine, false);
        assert!(!coordinator.is_desired());
    }
}
