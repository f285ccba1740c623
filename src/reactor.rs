/// Cooperative single-threaded reactor
///
/// All work happens in reaction to three external event sources: gaze
/// sample delivery, render ticks, and speech engine callbacks. Events are
/// handled synchronously in arrival order on one logical thread of
/// control, so the smoother, classifier, and debouncer run atomically per
/// sample and actuation start/stop never races a tick.
///
/// Collaborators (viewport surface, acquisition layer, speech engine) are
/// passed in by the caller per call; the reactor owns only the control
/// state itself.

use crate::actuator::ScrollSurface;
use crate::config::Config;
use crate::notes::{NoteLog, NoteSource};
use crate::session::{GazeAcquisition, SampleOutcome, SessionEvent, TrackingSession};
use crate::smoothing::GazeSample;
use crate::trial::TrialDirectives;
use crate::voice::{CaptureEngine, VoiceCoordinator};

/// Inbound event queue item.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// One raw sample from the tracker, roughly once per rendered frame.
    Gaze(GazeSample),
    /// Render tick; drives the live actuation, if any.
    RenderTick,
    /// Finalized transcript segment from the speech engine.
    SpeechResult(String),
    /// Engine-initiated end of a capture session (silence timeout etc.).
    SpeechEnded,
    /// Operator toggled the continuous-notes button.
    VoiceToggle(bool),
    /// Participant typed a note by hand.
    ManualNote(String),
}

pub struct SessionReactor {
    session: TrackingSession,
    voice: VoiceCoordinator,
    notes: NoteLog,
}

impl SessionReactor {
    pub fn new(config: &Config) -> Self {
        SessionReactor {
            session: TrackingSession::new(&config.gaze),
            voice: VoiceCoordinator::new(config.voice.preserve_preference),
            notes: NoteLog::new(),
        }
    }

    /// Lifecycle hook for the trial controller: open or close the whole
    /// loop. The session cascade runs first (gate, actuator, buffers),
    /// then acquisition is told to resume or pause, then the voice
    /// coordinator reacts to the transition.
    pub fn enable_tracking(
        &mut self,
        enabled: bool,
        acquisition: &mut dyn GazeAcquisition,
        engine: &mut dyn CaptureEngine,
    ) {
        let event = self.session.set_enabled(enabled);
        match event {
            SessionEvent::TrackingEnabled => acquisition.resume(),
            SessionEvent::TrackingDisabled => acquisition.pause(),
        }
        self.voice.on_tracking_event(engine, event);
    }

    /// Lifecycle hook for the trial controller: make continuous voice
    /// notes available (or not) for the upcoming trial. Aborts any capture
    /// left streaming from the previous trial.
    pub fn enable_voice(&mut self, available: bool, engine: &mut dyn CaptureEngine) {
        self.voice.begin_trial(engine, available);
    }

    /// Configure the loop for a new trial: notes cleared, voice preference
    /// handled per config, tracking gate set from the trial's directives.
    pub fn begin_trial(
        &mut self,
        directives: TrialDirectives,
        acquisition: &mut dyn GazeAcquisition,
        engine: &mut dyn CaptureEngine,
    ) {
        self.notes.clear();
        self.enable_voice(directives.voice_available, engine);
        self.enable_tracking(directives.tracking, acquisition, engine);
    }

    /// Handle one queued event. `elapsed_ms` is the running trial clock,
    /// used to timestamp notes.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        elapsed_ms: u64,
        surface: &mut dyn ScrollSurface,
        engine: &mut dyn CaptureEngine,
    ) -> Option<SampleOutcome> {
        match event {
            InputEvent::Gaze(sample) => {
                let height = surface.viewport_height();
                Some(self.session.process_sample(sample, height))
            }
            InputEvent::RenderTick => {
                self.session.tick(surface);
                None
            }
            InputEvent::SpeechResult(text) => {
                if self.voice.is_active() {
                    self.notes.add(&text, NoteSource::Voice, elapsed_ms);
                }
                None
            }
            InputEvent::SpeechEnded => {
                self.voice.on_engine_ended(engine, self.session.is_enabled());
                None
            }
            InputEvent::VoiceToggle(desired) => {
                self.voice.set_desired(engine, desired, self.session.is_enabled());
                None
            }
            InputEvent::ManualNote(text) => {
                self.notes.add(&text, NoteSource::Manual, elapsed_ms);
                None
            }
        }
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn voice(&self) -> &VoiceCoordinator {
        &self.voice
    }

    pub fn notes(&self) -> &NoteLog {
        &self.notes
    }
}
