/// Tracking session controller and the per-sample gaze pipeline
///
/// Owns the enabled gate and the three signal stages (smoother, classifier
/// thresholds, debouncer) plus the actuator they drive. Each delivered
/// sample runs the whole smooth -> classify -> debounce -> actuate chain
/// synchronously; there is no interleaving within one sample.
///
/// Collaborators never poll the gate. Transitions are reported as
/// `SessionEvent`s which the caller forwards to the acquisition layer and
/// the voice coordinator.

use crate::actuator::{ScrollActuator, ScrollSurface};
use crate::config::GazeConfig;
use crate::intent::{IntentDebouncer, IntentDecision, ScrollDirection};
use crate::smoothing::{GazeSample, GazeSmoother, SmoothedPoint};
use crate::zone::{Zone, ZoneThresholds};

/// Physical sampling collaborator (webcam capture + eye model). The
/// controller only pauses and resumes it around trials; calibration and
/// capture internals stay outside the core.
pub trait GazeAcquisition {
    fn resume(&mut self);
    fn pause(&mut self);
}

/// Emitted on every gate transition so collaborators can react without
/// reading the flag opportunistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    TrackingEnabled,
    TrackingDisabled,
}

/// What one delivered sample did to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Gate closed or sample malformed; nothing observable happened.
    Discarded,
    /// Sample ran the full chain. `started` is set when this very frame
    /// began a new actuation.
    Processed {
        smoothed: SmoothedPoint,
        zone: Zone,
        started: Option<ScrollDirection>,
    },
}

pub struct TrackingSession {
    enabled: bool,
    smoother: GazeSmoother,
    thresholds: ZoneThresholds,
    debouncer: IntentDebouncer,
    actuator: ScrollActuator,
}

impl TrackingSession {
    pub fn new(config: &GazeConfig) -> Self {
        TrackingSession {
            enabled: false,
            smoother: GazeSmoother::new(config.buffer_size),
            thresholds: ZoneThresholds {
                up: config.up_threshold,
                down: config.down_threshold,
            },
            debouncer: IntentDebouncer::new(config.intent_frames),
            actuator: ScrollActuator::new(config.scroll_speed_px),
        }
    }

    /// Open or close the sample-processing gate.
    ///
    /// Closing cascades synchronously: the actuator stops before this
    /// returns, and the smoothing window and intent streak are cleared so
    /// the next trial starts from a clean signal history.
    pub fn set_enabled(&mut self, enabled: bool) -> SessionEvent {
        self.enabled = enabled;

        if enabled {
            SessionEvent::TrackingEnabled
        } else {
            self.actuator.stop();
            self.smoother.reset();
            self.debouncer.reset();
            SessionEvent::TrackingDisabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run one raw sample through the pipeline.
    ///
    /// Samples arriving while the gate is closed, and samples with
    /// non-finite coordinates, are dropped with no observable effect.
    pub fn process_sample(
        &mut self,
        sample: GazeSample,
        viewport_height: f32,
    ) -> SampleOutcome {
        if !self.enabled || !sample.is_valid() {
            return SampleOutcome::Discarded;
        }

        let smoothed = self.smoother.ingest(sample);
        let zone = self.thresholds.classify(smoothed.y, viewport_height);

        let started = match self.debouncer.observe(zone) {
            IntentDecision::Confirmed(direction) => {
                if self.actuator.start(direction) {
                    Some(direction)
                } else {
                    None
                }
            }
            IntentDecision::None => {
                // A neutral frame lapses intent immediately; the actuator
                // must not coast through the reading band
                if zone == Zone::Neutral {
                    self.actuator.stop();
                }
                None
            }
        };

        SampleOutcome::Processed { smoothed, zone, started }
    }

    /// Apply one render tick's scroll displacement, if an actuation is live.
    pub fn tick(&mut self, surface: &mut dyn ScrollSurface) {
        self.actuator.tick(surface);
    }

    pub fn is_scrolling(&self) -> bool {
        self.actuator.is_active()
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.actuator.direction()
    }

    #[cfg(test)]
    pub(crate) fn buffered_samples(&self) -> usize {
        self.smoother.len()
    }
}
