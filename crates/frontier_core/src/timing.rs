//! Named phase timing for profiling a run
//!
//! A [`Stopwatch`] records how long each named phase of a run took. Phases
//! that were started but never stopped stay visible in the report instead
//! of silently disappearing.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::TimingError;

const NAME_WIDTH: usize = 30;

#[derive(Debug, Clone)]
struct PhaseEntry {
    name: String,
    started: Instant,
    elapsed: Option<Duration>,
}

/// Records start and stop instants of named phases, in first-start order
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    phases: Vec<PhaseEntry>,
}

impl Stopwatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing `phase`. Restarting a known phase discards its previous timing.
    pub fn start(&mut self, phase: impl Into<String>) {
        let name = phase.into();
        let now = Instant::now();
        match self.phases.iter_mut().find(|p| p.name == name) {
            Some(entry) => {
                entry.started = now;
                entry.elapsed = None;
            }
            None => self.phases.push(PhaseEntry {
                name,
                started: now,
                elapsed: None,
            }),
        }
    }

    /// Stop timing `phase` and return its elapsed time
    pub fn stop(&mut self, phase: &str) -> Result<Duration, TimingError> {
        let entry = self
            .phases
            .iter_mut()
            .find(|p| p.name == phase)
            .ok_or_else(|| TimingError::UnknownPhase(phase.to_string()))?;
        let elapsed = entry.started.elapsed();
        entry.elapsed = Some(elapsed);
        Ok(elapsed)
    }

    /// Run `f` as phase `phase`
    pub fn time<T>(&mut self, phase: &str, f: impl FnOnce() -> T) -> T {
        self.start(phase);
        let out = f();
        // The phase was started just above
        let _ = self.stop(phase);
        out
    }

    /// Elapsed time of a completed phase
    pub fn elapsed(&self, phase: &str) -> Result<Duration, TimingError> {
        let entry = self
            .phases
            .iter()
            .find(|p| p.name == phase)
            .ok_or_else(|| TimingError::UnknownPhase(phase.to_string()))?;
        entry
            .elapsed
            .ok_or_else(|| TimingError::IncompletePhase(phase.to_string()))
    }

    /// Summarize every phase. Available at any point of a run.
    #[must_use]
    pub fn report(&self) -> TimingReport {
        let total: Duration = self.phases.iter().filter_map(|p| p.elapsed).sum();
        let total_secs = total.as_secs_f64();

        let mut completed: Vec<PhaseTiming> = self
            .phases
            .iter()
            .filter_map(|p| {
                p.elapsed.map(|elapsed| PhaseTiming {
                    name: p.name.clone(),
                    elapsed,
                    share: if total_secs > 0.0 {
                        elapsed.as_secs_f64() / total_secs * 100.0
                    } else {
                        0.0
                    },
                })
            })
            .collect();
        // Stable, so equal durations keep start order
        completed.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));

        let incomplete = self
            .phases
            .iter()
            .filter(|p| p.elapsed.is_none())
            .map(|p| p.name.clone())
            .collect();

        TimingReport {
            completed,
            incomplete,
            total,
        }
    }

    /// Compare two completed phases
    pub fn compare(&self, a: &str, b: &str) -> Result<PhaseComparison, TimingError> {
        let a_time = self.elapsed(a)?;
        let b_time = self.elapsed(b)?;

        let ((faster, fast_time), (slower, slow_time)) = if a_time < b_time {
            ((a, a_time), (b, b_time))
        } else {
            ((b, b_time), (a, a_time))
        };

        let fast_secs = nonzero_secs(fast_time);
        let slow_secs = nonzero_secs(slow_time);

        Ok(PhaseComparison {
            faster: faster.to_string(),
            slower: slower.to_string(),
            percent_faster: ((slow_secs - fast_secs) / slow_secs * 100.0).abs(),
            percent_slower: ((slow_secs - fast_secs) / fast_secs * 100.0).abs(),
        })
    }
}

/// A zero duration would make the percentages meaningless
fn nonzero_secs(d: Duration) -> f64 {
    let secs = d.as_secs_f64();
    if secs > 0.0 { secs } else { f64::MIN_POSITIVE }
}

/// Timing of one completed phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTiming {
    pub name: String,
    pub elapsed: Duration,
    /// Share of the total of completed phases, in percent
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingReport {
    /// Completed phases, slowest first
    pub completed: Vec<PhaseTiming>,
    /// Phases that were started but never stopped, in start order
    pub incomplete: Vec<String>,
    /// Sum of completed phases
    pub total: Duration,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "-".repeat(NAME_WIDTH + 40);
        let mid = format!("|{}+{}+{}|", "-".repeat(NAME_WIDTH + 2), "-".repeat(12), "-".repeat(22));

        writeln!(f, "~~~ Phase Timing Report ~~~")?;
        writeln!(f)?;
        writeln!(f, "{sep}")?;
        writeln!(
            f,
            "| {:^w$} | {:^10} | {:^20} |",
            "PHASE",
            "SHARE (%)",
            "RUNTIME (ms)",
            w = NAME_WIDTH
        )?;
        writeln!(f, "{mid}")?;
        for phase in &self.completed {
            writeln!(
                f,
                "| {:<w$} | {:>10.1} | {:>20.3} |",
                truncate(&phase.name),
                phase.share,
                phase.elapsed.as_secs_f64() * 1000.0,
                w = NAME_WIDTH
            )?;
        }
        writeln!(f, "{mid}")?;
        let total_share = if self.completed.is_empty() { 0.0 } else { 100.0 };
        writeln!(
            f,
            "| {:>w$} | {:>10.1} | {:>20.3} |",
            "TOTAL",
            total_share,
            self.total.as_secs_f64() * 1000.0,
            w = NAME_WIDTH
        )?;
        write!(f, "{sep}")?;

        if !self.incomplete.is_empty() {
            writeln!(f)?;
            write!(f, "Incomplete phases: {}", self.incomplete.join(", "))?;
        }
        Ok(())
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Relative speed of two phases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseComparison {
    pub faster: String,
    pub slower: String,
    /// How much less time the faster phase took, relative to the slower one
    pub percent_faster: f64,
    /// How much more time the slower phase took, relative to the faster one
    pub percent_slower: f64,
}

impl fmt::Display for PhaseComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "~~~ Comparing {} to {} ~~~", self.faster, self.slower)?;
        writeln!(f, "{} is {:.0}% faster", self.faster, self.percent_faster)?;
        write!(f, "{} is {:.0}% slower", self.slower, self.percent_slower)
    }
}
