mod actuator;
mod config;
mod constants;
mod intent;
mod notes;
mod reactor;
mod results;
mod session;
mod smoothing;
mod trial;
mod voice;
mod zone;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use actuator::ScrollSurface;
use config::Config;
use reactor::{InputEvent, SessionReactor};
use session::GazeAcquisition;
use smoothing::GazeSample;
use trial::{generate_schedule, Technique, TrialRunner};
use voice::CaptureEngine;

#[derive(Parser)]
#[command(name = "gaze-study")]
#[command(about = "Gaze-controlled reading experiment runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and print a shuffled trial schedule for a participant
    Schedule {
        /// Participant identifier (e.g. P01)
        participant: String,
        /// Trials per context x technique cell; defaults to the configured value
        #[arg(short, long)]
        trials_per: Option<usize>,
    },
    /// Replay a recorded gaze trace through the scroll pipeline
    Replay {
        /// Trace file: one "x,y" pair per line, one line per frame
        trace: PathBuf,
        /// Viewport height the trace was recorded against
        #[arg(long, default_value = "1000")]
        viewport_height: f32,
    },
    /// Run a small synthetic session and export its results CSV
    ExportDemo {
        /// Participant identifier for the demo records
        #[arg(default_value = "DEMO")]
        participant: String,
        /// Output path; defaults to <participant>_results.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_create()?;

    match cli.command {
        Commands::Schedule { participant, trials_per } => {
            schedule_command(&config, &participant, trials_per)
        }
        Commands::Replay { trace, viewport_height } => {
            replay_command(&config, &trace, viewport_height)
        }
        Commands::ExportDemo { participant, output } => {
            export_demo_command(&config, &participant, output)
        }
    }
}

// ── Binary-side collaborator stand-ins ──
//
// The real deployment wires these traits to the document viewport, the
// webcam acquisition layer, and the speech engine. The CLI substitutes
// simulations so pipeline behavior can be inspected offline.

struct SimulatedSurface {
    offset: f32,
    height: f32,
}

impl ScrollSurface for SimulatedSurface {
    fn scroll_by(&mut self, delta_px: f32) {
        self.offset = (self.offset + delta_px).max(0.0);
    }
    fn viewport_height(&self) -> f32 {
        self.height
    }
}

#[derive(Default)]
struct SilentAcquisition;

impl GazeAcquisition for SilentAcquisition {
    fn resume(&mut self) {}
    fn pause(&mut self) {}
}

#[derive(Default)]
struct SimulatedEngine {
    streaming: bool,
}

impl CaptureEngine for SimulatedEngine {
    fn start(&mut self) -> Result<()> {
        self.streaming = true;
        Ok(())
    }
    fn stop(&mut self) {
        self.streaming = false;
    }
}

fn schedule_command(config: &Config, participant: &str, trials_per: Option<usize>) -> Result<()> {
    let trials_per = trials_per.unwrap_or(config.experiment.trials_per_condition);
    let mut rng = rand::thread_rng();
    let schedule = generate_schedule(trials_per, &mut rng);

    println!("📋 Schedule for {} ({} trials)", participant, schedule.len());
    for (i, condition) in schedule.iter().enumerate() {
        println!(
            "  Trial {:2}: {:9} / {:10} (rep {})",
            i + 1,
            condition.context.to_string(),
            condition.technique.to_string(),
            condition.rep
        );
    }
    Ok(())
}

/// Parse a trace file into samples. Malformed lines are dropped, matching
/// the tracker contract (absence of data is a defined no-op, not an error).
fn parse_trace(contents: &str) -> (Vec<GazeSample>, usize) {
    let mut samples = Vec::new();
    let mut dropped = 0;

    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = line.split_once(',').and_then(|(x, y)| {
            let x: f32 = x.trim().parse().ok()?;
            let y: f32 = y.trim().parse().ok()?;
            Some(GazeSample { x, y, timestamp_ms: (i as u64) * 16 })
        });
        match parsed {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }

    (samples, dropped)
}

fn replay_command(config: &Config, trace: &PathBuf, viewport_height: f32) -> Result<()> {
    let contents = fs::read_to_string(trace)
        .with_context(|| format!("Failed to read trace file {}", trace.display()))?;
    let (samples, dropped) = parse_trace(&contents);
    if dropped > 0 {
        eprintln!("⚠️  Dropped {} malformed trace lines", dropped);
    }

    println!("🔄 Replaying {} frames against a {:.0}px viewport", samples.len(), viewport_height);

    let mut reactor = SessionReactor::new(config);
    let mut surface = SimulatedSurface { offset: 0.0, height: viewport_height };
    let mut acquisition = SilentAcquisition;
    let mut engine = SimulatedEngine::default();

    reactor.enable_tracking(true, &mut acquisition, &mut engine);

    let mut was_scrolling = false;
    for (frame, sample) in samples.iter().enumerate() {
        reactor.handle_event(InputEvent::Gaze(*sample), 0, &mut surface, &mut engine);
        reactor.handle_event(InputEvent::RenderTick, 0, &mut surface, &mut engine);

        let scrolling = reactor.session().is_scrolling();
        if scrolling != was_scrolling {
            if let Some(direction) = reactor.session().scroll_direction() {
                println!(
                    "  Frame {:4}: ▶️  scroll {:?} (offset {:.0}px)",
                    frame + 1,
                    direction,
                    surface.offset
                );
            } else {
                println!("  Frame {:4}: ⏹️  scroll stopped (offset {:.0}px)", frame + 1, surface.offset);
            }
            was_scrolling = scrolling;
        }
    }

    reactor.enable_tracking(false, &mut acquisition, &mut engine);
    println!("✅ Replay complete. Final offset: {:.0}px", surface.offset);
    Ok(())
}

/// Drives one multimodal and one baseline trial with scripted events, then
/// writes the results CSV. Useful for validating the export pipeline
/// without hardware attached.
fn export_demo_command(config: &Config, participant: &str, output: Option<PathBuf>) -> Result<()> {
    let mut rng = rand::thread_rng();
    let schedule = generate_schedule(config.experiment.trials_per_condition, &mut rng);
    let mut runner = TrialRunner::new(participant, schedule);

    let mut reactor = SessionReactor::new(config);
    let mut surface = SimulatedSurface { offset: 0.0, height: 1000.0 };
    let mut acquisition = SilentAcquisition;
    let mut engine = SimulatedEngine::default();

    while let Some(condition) = runner.start_next() {
        reactor.begin_trial(condition.directives(), &mut acquisition, &mut engine);

        if condition.technique == Technique::Multimodal {
            reactor.handle_event(
                InputEvent::VoiceToggle(true),
                runner.elapsed_ms(),
                &mut surface,
                &mut engine,
            );
            reactor.handle_event(
                InputEvent::SpeechResult(format!("voice note during {}", condition.context)),
                runner.elapsed_ms(),
                &mut surface,
                &mut engine,
            );
        } else {
            reactor.handle_event(
                InputEvent::ManualNote(format!("manual note during {}", condition.context)),
                runner.elapsed_ms(),
                &mut surface,
                &mut engine,
            );
        }

        let record = runner.finish_current(reactor.notes())?;
        println!(
            "✅ Trial {}: {} / {} ({} notes)",
            record.trial, record.context, record.technique, record.notes_count
        );
    }

    let path = output.unwrap_or_else(|| PathBuf::from(results::results_filename(participant)));
    results::write_csv(runner.records(), &path)?;
    println!("💾 Results written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace_skips_comments_and_malformed() {
        let (samples, dropped) = parse_trace("# header\n400,100\n\nnot a line\n400,bad\n500,900\n");
        assert_eq!(samples.len(), 2);
        assert_eq!(dropped, 2);
        assert_eq!(samples[0].x, 400.0);
        assert_eq!(samples[1].y, 900.0);
    }
}
