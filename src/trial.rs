/// Trial scheduling and bookkeeping for the reading experiment
///
/// A schedule is the full cross of reading context x assistance technique,
/// repeated `trials_per_condition` times and shuffled. Each trial derives
/// directives for the control loop: multimodal trials run gaze tracking
/// and continuous voice notes, baseline trials run neither.

use std::fmt;
use std::time::Instant;

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::notes::NoteLog;

/// Reading posture / situational context factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingContext {
    Desktop,
    Supine,
    DualTask,
}

impl ReadingContext {
    pub const ALL: [ReadingContext; 3] = [
        ReadingContext::Desktop,
        ReadingContext::Supine,
        ReadingContext::DualTask,
    ];
}

impl fmt::Display for ReadingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadingContext::Desktop => "Desktop",
            ReadingContext::Supine => "Supine",
            ReadingContext::DualTask => "Dual-Task",
        };
        write!(f, "{}", name)
    }
}

/// Assistance technique factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technique {
    Multimodal,
    Baseline,
}

impl Technique {
    pub const ALL: [Technique; 2] = [Technique::Multimodal, Technique::Baseline];
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Technique::Multimodal => "Multimodal",
            Technique::Baseline => "Baseline",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialCondition {
    pub context: ReadingContext,
    pub technique: Technique,
    pub rep: usize,
}

/// What the control loop should do for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialDirectives {
    pub tracking: bool,
    pub voice_available: bool,
}

impl TrialCondition {
    pub fn directives(&self) -> TrialDirectives {
        let multimodal = self.technique == Technique::Multimodal;
        TrialDirectives {
            tracking: multimodal,
            voice_available: multimodal,
        }
    }
}

/// Full cross of factors x repetitions, shuffled with the caller's RNG.
pub fn generate_schedule<R: Rng>(trials_per_condition: usize, rng: &mut R) -> Vec<TrialCondition> {
    let mut schedule = Vec::with_capacity(
        ReadingContext::ALL.len() * Technique::ALL.len() * trials_per_condition,
    );

    for context in ReadingContext::ALL {
        for technique in Technique::ALL {
            for rep in 1..=trials_per_condition {
                schedule.push(TrialCondition { context, technique, rep });
            }
        }
    }

    schedule.shuffle(rng);
    schedule
}

/// One exported results row.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub participant: String,
    pub trial: usize,
    pub context: ReadingContext,
    pub technique: Technique,
    pub duration_ms: u64,
    pub notes_count: usize,
    pub notes_content: String,
}

/// Walks the schedule, times each trial, and harvests notes into records.
pub struct TrialRunner {
    participant: String,
    schedule: Vec<TrialCondition>,
    current: Option<usize>,
    started_at: Option<Instant>,
    records: Vec<TrialRecord>,
}

impl TrialRunner {
    pub fn new(participant: &str, schedule: Vec<TrialCondition>) -> Self {
        TrialRunner {
            participant: participant.to_string(),
            schedule,
            current: None,
            started_at: None,
            records: Vec::new(),
        }
    }

    /// Advance to the next trial and start its clock. Returns None when the
    /// schedule is exhausted.
    pub fn start_next(&mut self) -> Option<TrialCondition> {
        let next = self.current.map_or(0, |i| i + 1);
        if next >= self.schedule.len() {
            self.current = None;
            self.started_at = None;
            return None;
        }

        self.current = Some(next);
        self.started_at = Some(Instant::now());
        Some(self.schedule[next])
    }

    /// Close the running trial, harvesting the note log into a record.
    pub fn finish_current(&mut self, notes: &NoteLog) -> Result<&TrialRecord> {
        let (Some(index), Some(started_at)) = (self.current, self.started_at) else {
            bail!("No trial is running");
        };

        let condition = self.schedule[index];
        self.records.push(TrialRecord {
            participant: self.participant.clone(),
            trial: index + 1,
            context: condition.context,
            technique: condition.technique,
            duration_ms: started_at.elapsed().as_millis() as u64,
            notes_count: notes.len(),
            notes_content: notes.joined_content(),
        });
        self.started_at = None;

        Ok(self.records.last().expect("record just pushed"))
    }

    pub fn current_condition(&self) -> Option<TrialCondition> {
        self.current.map(|i| self.schedule[i])
    }

    /// Milliseconds since the running trial started, for note timestamps.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.records.len() == self.schedule.len()
    }

    pub fn total_trials(&self) -> usize {
        self.schedule.len()
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_schedule_covers_full_cross() {
        let mut rng = StdRng::seed_from_u64(7);
        let schedule = generate_schedule(2, &mut rng);

        assert_eq!(schedule.len(), 12);
        for context in ReadingContext::ALL {
            for technique in Technique::ALL {
                let cell: Vec<_> = schedule
                    .iter()
                    .filter(|t| t.context == context && t.technique == technique)
                    .collect();
                assert_eq!(cell.len(), 2, "{} / {}", context, technique);
            }
        }
    }

    #[test]
    fn test_directives_follow_technique() {
        let multimodal = TrialCondition {
            context: ReadingContext::Supine,
            technique: Technique::Multimodal,
            rep: 1,
        };
        assert_eq!(
            multimodal.directives(),
            TrialDirectives { tracking: true, voice_available: true }
        );

        let baseline = TrialCondition {
            context: ReadingContext::Desktop,
            technique: Technique::Baseline,
            rep: 1,
        };
        assert_eq!(
            baseline.directives(),
            TrialDirectives { tracking: false, voice_available: false }
        );
    }

    #[test]
    fn test_runner_walks_schedule_and_records() {
        let mut rng = StdRng::seed_from_u64(1);
        let schedule = generate_schedule(1, &mut rng);
        let total = schedule.len();
        let mut runner = TrialRunner::new("P01", schedule);
        let mut notes = NoteLog::new();

        let mut seen = 0;
        while let Some(condition) = runner.start_next() {
            seen += 1;
            notes.clear();
            if condition.technique == Technique::Multimodal {
                notes.add("observation", NoteSource::Voice, runner.elapsed_ms());
            }
            let record = runner.finish_current(&notes).unwrap();
            assert_eq!(record.trial, seen);
            assert_eq!(record.participant, "P01");
        }

        assert_eq!(seen, total);
        assert!(runner.is_complete());
        assert_eq!(runner.records().len(), total);
    }

    #[test]
    fn test_finish_without_running_trial_fails() {
        let mut runner = TrialRunner::new("P02", Vec::new());
        let notes = NoteLog::new();
        assert!(runner.finish_current(&notes).is_err());
    }
}
