//! Stage progress reporting.
//!
//! The pipeline reports stage start/finish events to an injected
//! [`ProgressReporter`]. Reporters only observe; whether one is attached
//! never changes the pixels a run produces.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use anime4k::progress::{ActivityTracker, ConsoleProgress};
//!
//! let tracker = Arc::new(ActivityTracker::new());
//! let mut upscaler = Anime4k::new(w, h, rgba, w * 2, h * 2)?.with_reporter(tracker.clone());
//! upscaler.run()?;
//! eprint!("{}", tracker.summary());
//! ```

use crate::pipeline::Strength;
use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const STAGE_COUNT: usize = 7;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// RGBA bytes to float RGB
    Decode,
    /// Bilinear enlargement
    Linear,
    /// Luminance map (runs twice per pass)
    Luminance,
    /// Line thinning
    ThinLines,
    /// Inverted Sobel magnitude
    Gradient,
    /// Gradient-driven push
    Refine,
    /// Float RGB to RGBA bytes
    Encode,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Decode,
        Stage::Linear,
        Stage::Luminance,
        Stage::ThinLines,
        Stage::Gradient,
        Stage::Refine,
        Stage::Encode,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Decode => write!(f, "decode"),
            Stage::Linear => write!(f, "linear"),
            Stage::Luminance => write!(f, "luminance"),
            Stage::ThinLines => write!(f, "thin_lines"),
            Stage::Gradient => write!(f, "gradient"),
            Stage::Refine => write!(f, "refine"),
            Stage::Encode => write!(f, "encode"),
        }
    }
}

/// Events emitted by a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// A run is starting
    RunStarted {
        /// Source width and height
        source: (u32, u32),
        /// Target width and height
        target: (u32, u32),
        /// Blend strengths for this run
        strength: Strength,
    },
    /// A stage started
    StageStarted(Stage),
    /// A stage finished, including its border extension
    StageFinished {
        /// Which stage
        stage: Stage,
        /// Wall time spent in the stage
        duration: Duration,
    },
    /// The run completed and its result is available
    RunFinished {
        /// Total wall time of the run
        duration: Duration,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: StageEvent);

    /// Check if this reporter wants verbose output.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: StageEvent) {}
}

/// Writes one line per run to stderr, plus one per stage when verbose.
pub struct ConsoleProgress {
    verbose: bool,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress").field("verbose", &self.verbose).finish()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { verbose: false, output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { verbose: false, output: Mutex::new(Box::new(output)) }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: StageEvent) {
        match event {
            StageEvent::RunStarted { source, target, strength } => {
                self.writeln(&format!(
                    "[anime4k] {}x{} -> {}x{} (thin {:.3}, refine {:.3})",
                    source.0, source.1, target.0, target.1, strength.thin, strength.refine
                ));
            }
            StageEvent::StageStarted(_) => {}
            StageEvent::StageFinished { stage, duration } => {
                if self.verbose {
                    self.writeln(&format!("[anime4k]   {} {}", stage, format_duration(duration)));
                }
            }
            StageEvent::RunFinished { duration } => {
                self.writeln(&format!("[anime4k] done in {}", format_duration(duration)));
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug)]
struct Activity {
    started: Instant,
    per_stage: [Duration; STAGE_COUNT],
    runs: usize,
}

/// Accumulates wall time per stage across any number of runs.
///
/// [`ActivityTracker::summary`] renders a table of milliseconds and share of
/// the elapsed time per stage, plus the untracked remainder.
#[derive(Debug)]
pub struct ActivityTracker {
    inner: Mutex<Activity>,
}

impl ActivityTracker {
    /// Start tracking now.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Activity {
                started: Instant::now(),
                per_stage: [Duration::ZERO; STAGE_COUNT],
                runs: 0,
            }),
        }
    }

    /// Clear all totals and restart the elapsed clock.
    pub fn reset(&self) {
        if let Ok(mut a) = self.inner.lock() {
            a.started = Instant::now();
            a.per_stage = [Duration::ZERO; STAGE_COUNT];
            a.runs = 0;
        }
    }

    /// Number of completed runs observed.
    pub fn runs(&self) -> usize {
        self.inner.lock().map(|a| a.runs).unwrap_or(0)
    }

    /// Render the timing table.
    pub fn summary(&self) -> String {
        let Ok(a) = self.inner.lock() else {
            return String::new();
        };
        let elapsed = a.started.elapsed().as_secs_f64().max(f64::EPSILON);
        let mut unknown = elapsed;
        let mut out = String::new();

        for stage in Stage::ALL {
            let secs = a.per_stage[stage.slot()].as_secs_f64();
            if secs == 0.0 {
                continue;
            }
            unknown -= secs;
            out.push_str(&table_row(secs, elapsed, &stage.to_string()));
        }
        out.push_str(&table_row(unknown.max(0.0), elapsed, "unknown"));
        out.push_str(&table_row(elapsed, elapsed, "elapsed"));
        out
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ActivityTracker {
    fn report(&self, event: StageEvent) {
        let Ok(mut a) = self.inner.lock() else {
            return;
        };
        match event {
            StageEvent::StageFinished { stage, duration } => a.per_stage[stage.slot()] += duration,
            StageEvent::RunFinished { .. } => a.runs += 1,
            StageEvent::RunStarted { .. } | StageEvent::StageStarted(_) => {}
        }
    }
}

fn table_row(secs: f64, elapsed: f64, name: &str) -> String {
    format!("    {:>8} ms    {:>5.1} %    {}\n", (secs * 1000.0) as u64, secs / elapsed * 100.0, name)
}

/// Format a duration for display.
fn format_duration(d: Duration) -> String {
    let ms = d.as_millis() as u64;
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone)]
    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn strength() -> Strength {
        Strength { thin: 0.5, refine: 1.0 }
    }

    #[test]
    fn test_stage_display() {
        let names: Vec<String> = Stage::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec!["decode", "linear", "luminance", "thin_lines", "gradient", "refine", "encode"]
        );
    }

    #[test]
    fn test_null_progress() {
        let reporter = NullProgress::new();
        // Should not panic
        reporter.report(StageEvent::StageStarted(Stage::Decode));
        assert!(!reporter.is_verbose());
    }

    #[test]
    fn test_console_progress_run_lines() {
        let output = Arc::new(Mutex::new(Vec::new()));
        let reporter = ConsoleProgress::with_output(TestWriter(Arc::clone(&output)));

        reporter.report(StageEvent::RunStarted { source: (2, 3), target: (6, 9), strength: strength() });
        reporter.report(StageEvent::StageFinished {
            stage: Stage::Gradient,
            duration: Duration::from_millis(12),
        });
        reporter.report(StageEvent::RunFinished { duration: Duration::from_millis(150) });

        let output = output.lock().unwrap();
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains("2x3 -> 6x9"));
        assert!(text.contains("thin 0.500"));
        assert!(text.contains("done in 150ms"));
        // stage lines only when verbose
        assert!(!text.contains("gradient"));
    }

    #[test]
    fn test_console_progress_verbose_stage_lines() {
        let output = Arc::new(Mutex::new(Vec::new()));
        let reporter =
            ConsoleProgress::with_output(TestWriter(Arc::clone(&output))).with_verbose(true);
        assert!(reporter.is_verbose());

        reporter.report(StageEvent::StageFinished {
            stage: Stage::ThinLines,
            duration: Duration::from_millis(1500),
        });

        let output = output.lock().unwrap();
        let text = String::from_utf8_lossy(&output);
        assert!(text.contains("thin_lines 1.5s"));
    }

    #[test]
    fn test_activity_tracker_accumulates() {
        let tracker = ActivityTracker::new();
        for _ in 0..3 {
            tracker.report(StageEvent::StageFinished {
                stage: Stage::Refine,
                duration: Duration::from_millis(10),
            });
            tracker.report(StageEvent::RunFinished { duration: Duration::from_millis(10) });
        }
        assert_eq!(tracker.runs(), 3);

        let summary = tracker.summary();
        let refine = summary.lines().find(|l| l.ends_with("refine")).unwrap();
        assert!(refine.contains(" 30 ms"), "row: {}", refine);
        assert!(!summary.lines().any(|l| l.ends_with("decode")));

        tracker.reset();
        assert_eq!(tracker.runs(), 0);
        assert!(!tracker.summary().lines().any(|l| l.ends_with("refine")));
    }

    #[test]
    fn test_activity_summary_rows() {
        let tracker = ActivityTracker::new();
        tracker.report(StageEvent::StageFinished {
            stage: Stage::Linear,
            duration: Duration::from_millis(5),
        });
        let summary = tracker.summary();
        assert!(summary.contains("linear"));
        assert!(summary.contains("unknown"));
        assert!(summary.contains("elapsed"));
        // stages that never ran are omitted
        assert!(!summary.contains("decode"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_millis(125_000)), "2m 5s");
    }
}
