/// Scroll-intent debouncing
///
/// A single smoothed sample landing in a scroll band is not intent; a
/// glance at a header or a saccade overshoot would trigger spurious
/// scrolling. Intent is confirmed only after more than `intent_frames`
/// consecutive classifications in the same band, and any neutral frame
/// resets the count. This mirrors the silence-streak commit logic used
/// for utterance detection, applied to gaze instead of audio.

use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    fn from_zone(zone: Zone) -> Option<Self> {
        match zone {
            Zone::Up => Some(ScrollDirection::Up),
            Zone::Down => Some(ScrollDirection::Down),
            Zone::Neutral => None,
        }
    }
}

/// Outcome of observing one classified frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentDecision {
    /// Not enough evidence yet, or gaze is in the reading band.
    None,
    /// Dwell threshold exceeded; the caller should actuate in `direction`.
    /// Repeated every frame while the streak persists - the actuator's
    /// idempotent start absorbs the repetition.
    Confirmed(ScrollDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Neutral,
    Accumulating { direction: ScrollDirection, count: u32 },
}

/// Consecutive-frame intent confirmation state machine.
pub struct IntentDebouncer {
    state: DebounceState,
    intent_frames: u32,
}

impl IntentDebouncer {
    pub fn new(intent_frames: u32) -> Self {
        IntentDebouncer {
            state: DebounceState::Neutral,
            intent_frames,
        }
    }

    /// Observe one classified frame.
    ///
    /// A neutral frame resets the streak. A direction switch (Up straight
    /// to Down or back) restarts the count at 1 for the new direction; the
    /// old streak is never inherited.
    pub fn observe(&mut self, zone: Zone) -> IntentDecision {
        let Some(direction) = ScrollDirection::from_zone(zone) else {
            self.state = DebounceState::Neutral;
            return IntentDecision::None;
        };

        let count = match self.state {
            DebounceState::Accumulating { direction: prev, count } if prev == direction => {
                count + 1
            }
            _ => 1,
        };
        self.state = DebounceState::Accumulating { direction, count };

        if count > self.intent_frames {
            IntentDecision::Confirmed(direction)
        } else {
            IntentDecision::None
        }
    }

    /// Forget any accumulated streak. Called on session disable.
    pub fn reset(&mut self) {
        self.state = DebounceState::Neutral;
    }

    /// Current streak length, for diagnostics.
    pub fn streak(&self) -> u32 {
        match self.state {
            DebounceState::Neutral => 0,
            DebounceState::Accumulating { count, .. } => count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::gaze::SCROLL_INTENT_FRAMES;

    #[test]
    fn test_confirms_on_eleventh_frame() {
        let mut debouncer = IntentDebouncer::new(SCROLL_INTENT_FRAMES);

        for i in 1..=10 {
            assert_eq!(
                debouncer.observe(Zone::Up),
                IntentDecision::None,
                "frame {} should not confirm",
                i
            );
        }
        assert_eq!(
            debouncer.observe(Zone::Up),
            IntentDecision::Confirmed(ScrollDirection::Up)
        );
    }

    #[test]
    fn test_keeps_confirming_while_streak_holds() {
        let mut debouncer = IntentDebouncer::new(10);

        for _ in 0..11 {
            debouncer.observe(Zone::Down);
        }
        assert_eq!(
            debouncer.observe(Zone::Down),
            IntentDecision::Confirmed(ScrollDirection::Down)
        );
        assert_eq!(debouncer.streak(), 12);
    }

    #[test]
    fn test_neutral_resets_streak() {
        let mut debouncer = IntentDebouncer::new(10);

        for _ in 0..10 {
            debouncer.observe(Zone::Up);
        }
        assert_eq!(debouncer.observe(Zone::Neutral), IntentDecision::None);
        assert_eq!(debouncer.streak(), 0);

        // Streak starts over from scratch
        for i in 1..=10 {
            assert_eq!(debouncer.observe(Zone::Up), IntentDecision::None, "frame {}", i);
        }
        assert_eq!(
            debouncer.observe(Zone::Up),
            IntentDecision::Confirmed(ScrollDirection::Up)
        );
    }

    #[test]
    fn test_direction_switch_does_not_inherit_count() {
        let mut debouncer = IntentDebouncer::new(10);

        for _ in 0..10 {
            debouncer.observe(Zone::Up);
        }
        // Switching bands must restart at 1, not confirm on the next frame
        assert_eq!(debouncer.observe(Zone::Down), IntentDecision::None);
        assert_eq!(debouncer.streak(), 1);

        for i in 2..=10 {
            assert_eq!(debouncer.observe(Zone::Down), IntentDecision::None, "frame {}", i);
        }
        assert_eq!(
            debouncer.observe(Zone::Down),
            IntentDecision::Confirmed(ScrollDirection::Down)
        );
    }

    #[test]
    fn test_reset_clears_streak() {
        let mut debouncer = IntentDebouncer::new(10);
        for _ in 0..8 {
            debouncer.observe(Zone::Up);
        }
        debouncer.reset();
        assert_eq!(debouncer.streak(), 0);
    }
}
