/// Continuous scroll actuation
///
/// Once intent is confirmed the surface is nudged by a fixed signed delta
/// on every render tick until the actuation is stopped. The actuator owns
/// the only record of the in-flight animation; `tick` does nothing unless
/// an actuation is live, so a stop can never leave a stale ticker mutating
/// the surface behind the UI's back.

use crate::intent::ScrollDirection;

/// Narrow handle onto the scrollable document viewport. Rendering itself
/// is an external collaborator; the control loop only needs to displace
/// the scroll offset and read the visible height.
pub trait ScrollSurface {
    /// Displace the scroll offset by `delta_px` (negative scrolls up).
    fn scroll_by(&mut self, delta_px: f32);

    /// Height of the visible viewport in the same units as gaze samples.
    fn viewport_height(&self) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Actuation {
    direction: ScrollDirection,
    speed_px: f32,
}

/// Per-tick scroll driver. At most one actuation is live at a time.
pub struct ScrollActuator {
    active: Option<Actuation>,
    speed_px: f32,
}

impl ScrollActuator {
    pub fn new(speed_px: f32) -> Self {
        ScrollActuator {
            active: None,
            speed_px,
        }
    }

    /// Begin (or continue) actuating in `direction`.
    ///
    /// Calling with the direction already live is a no-op so the per-frame
    /// confirmation stream from the debouncer never restarts the animation.
    /// Calling with the opposite direction stops the live actuation first;
    /// two actuations never coexist. Returns true if a new actuation began.
    pub fn start(&mut self, direction: ScrollDirection) -> bool {
        if let Some(current) = self.active {
            if current.direction == direction {
                return false;
            }
            self.stop();
        }

        self.active = Some(Actuation {
            direction,
            speed_px: self.speed_px,
        });
        true
    }

    /// Cancel the live actuation, if any. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.active = None;
    }

    /// Apply one tick's displacement to the surface. No-op while stopped.
    pub fn tick(&mut self, surface: &mut dyn ScrollSurface) {
        if let Some(actuation) = self.active {
            let delta = match actuation.direction {
                ScrollDirection::Up => -actuation.speed_px,
                ScrollDirection::Down => actuation.speed_px,
            };
            surface.scroll_by(delta);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.active.map(|a| a.direction)
    }
}
