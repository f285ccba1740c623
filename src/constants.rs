/// Application-wide constants for gaze smoothing, scroll intent, and trial scheduling

pub mod gaze {
    /// Number of raw samples kept in the smoothing window (FIFO)
    /// At tracker-native delivery of roughly one sample per rendered frame,
    /// 12 samples is about 200ms of history at 60Hz
    pub const BUFFER_SIZE: usize = 12;

    /// Gaze above this fraction of viewport height scrolls up
    pub const UP_THRESHOLD: f32 = 0.2;

    /// Gaze below this fraction of viewport height scrolls down
    pub const DOWN_THRESHOLD: f32 = 0.8;

    /// Pixels the surface moves per render tick while an actuation is live
    pub const SCROLL_SPEED_PX: f32 = 4.0;

    /// Consecutive same-zone frames that must be exceeded before a scroll
    /// actuation starts; strictly greater-than, so the 11th frame triggers
    pub const SCROLL_INTENT_FRAMES: u32 = 10;
}

pub mod experiment {
    /// Repetitions of each context x technique cell in a generated schedule
    pub const TRIALS_PER_CONDITION: usize = 1;
}
