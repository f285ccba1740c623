/// Zone classification: maps a smoothed vertical gaze position onto the
/// scroll-up band, the scroll-down band, or the neutral reading band.

use crate::constants::gaze::{DOWN_THRESHOLD, UP_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Up,
    Down,
    Neutral,
}

/// Viewport-relative band boundaries. A normalized position strictly below
/// `up` classifies Up, strictly above `down` classifies Down; the boundary
/// values themselves are Neutral.
#[derive(Debug, Clone, Copy)]
pub struct ZoneThresholds {
    pub up: f32,
    pub down: f32,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        ZoneThresholds {
            up: UP_THRESHOLD,
            down: DOWN_THRESHOLD,
        }
    }
}

impl ZoneThresholds {
    pub fn classify(&self, smoothed_y: f32, viewport_height: f32) -> Zone {
        let normalized = smoothed_y / viewport_height;

        if normalized < self.up {
            Zone::Up
        } else if normalized > self.down {
            Zone::Down
        } else {
            Zone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let t = ZoneThresholds::default();

        assert_eq!(t.classify(100.0, 1000.0), Zone::Up);
        assert_eq!(t.classify(500.0, 1000.0), Zone::Neutral);
        assert_eq!(t.classify(900.0, 1000.0), Zone::Down);
    }

    #[test]
    fn test_boundaries_are_neutral() {
        let t = ZoneThresholds::default();

        // Exactly on a threshold is Neutral: inequalities are strict
        assert_eq!(t.classify(200.0, 1000.0), Zone::Neutral);
        assert_eq!(t.classify(800.0, 1000.0), Zone::Neutral);
        assert_eq!(t.classify(199.9, 1000.0), Zone::Up);
        assert_eq!(t.classify(800.1, 1000.0), Zone::Down);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = ZoneThresholds { up: 0.3, down: 0.7 };

        assert_eq!(t.classify(250.0, 1000.0), Zone::Up);
        assert_eq!(t.classify(750.0, 1000.0), Zone::Down);
        assert_eq!(t.classify(500.0, 1000.0), Zone::Neutral);
    }
}
