// pacing.rs - Turns a run into a paced animation
//
// The driver pulls one step at a time from a run, hands the snapshot to the
// renderer's sink, fires the tone (sorting only) and then suspends for a
// fixed interval. The stop token is checked before every step and also cuts
// a suspension short.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::config::VizConfig;
use crate::error::{RunError, SinkClosed};
use crate::run::StopToken;
use crate::sorting::{SortRun, SortStep};
use crate::tone::{ToneMapper, ToneSink};
use crate::traversal::{GridStep, TraversalOutcome, TraversalRun};

/// Receives every published snapshot, in order.
pub trait SnapshotSink<S> {
    fn publish(&mut self, snapshot: S) -> Result<(), SinkClosed>;
}

impl<S> SnapshotSink<S> for Vec<S> {
    fn publish(&mut self, snapshot: S) -> Result<(), SinkClosed> {
        self.push(snapshot);
        Ok(())
    }
}

impl<S> SnapshotSink<S> for crossbeam_channel::Sender<S> {
    fn publish(&mut self, snapshot: S) -> Result<(), SinkClosed> {
        self.send(snapshot).map_err(|_| SinkClosed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome<O> {
    Completed { outcome: O, steps: usize },
    Cancelled { steps: usize },
}

impl<O> RunOutcome<O> {
    pub fn steps(&self) -> usize {
        match self {
            RunOutcome::Completed { steps, .. } | RunOutcome::Cancelled { steps } => *steps,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled { .. })
    }
}

enum Paced {
    Done(usize),
    Stopped(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_config(config: &VizConfig) -> Self {
        Self::new(config.step_delay())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn drive_traversal<S>(
        &self,
        run: &mut TraversalRun,
        sink: &mut S,
        stop: &mut StopToken,
    ) -> Result<RunOutcome<TraversalOutcome>, RunError>
    where
        S: SnapshotSink<GridStep>,
    {
        let kind = run.kind();
        let paced = self.pace(&mut *run, stop, |step| sink.publish(step)).await?;
        let outcome = match paced {
            Paced::Done(steps) => RunOutcome::Completed {
                outcome: run.outcome().unwrap_or(TraversalOutcome::NotFound),
                steps,
            },
            Paced::Stopped(steps) => RunOutcome::Cancelled { steps },
        };
        debug!(%kind, ?outcome, "traversal driven");
        Ok(outcome)
    }

    pub async fn drive_sort<S, T>(
        &self,
        run: SortRun,
        sink: &mut S,
        tones: &mut T,
        mapper: &ToneMapper,
        stop: &mut StopToken,
    ) -> Result<RunOutcome<()>, RunError>
    where
        S: SnapshotSink<SortStep>,
        T: ToneSink,
    {
        let algorithm = run.algorithm();
        let mut tone_failed = false;
        let paced = self
            .pace(run, stop, |step| {
                let tone = mapper.tone(step.tone);
                sink.publish(step)?;
                // Audio trouble never holds up the animation
                if let Err(err) = tones.play(tone) {
                    if tone_failed {
                        trace!(%err, "tone dropped");
                    } else {
                        warn!(%err, "tone playback failed, continuing without audio");
                        tone_failed = true;
                    }
                }
                Ok(())
            })
            .await?;
        let outcome = match paced {
            Paced::Done(steps) => RunOutcome::Completed { outcome: (), steps },
            Paced::Stopped(steps) => RunOutcome::Cancelled { steps },
        };
        debug!(%algorithm, ?outcome, "sort driven");
        Ok(outcome)
    }

    async fn pace<I, F>(&self, mut steps: I, stop: &mut StopToken, mut publish: F) -> Result<Paced, RunError>
    where
        I: Iterator,
        F: FnMut(I::Item) -> Result<(), SinkClosed>,
    {
        let mut published = 0;
        loop {
            if stop.is_stopped() {
                info!(published, "run cancelled");
                return Ok(Paced::Stopped(published));
            }
            let Some(step) = steps.next() else {
                return Ok(Paced::Done(published));
            };
            publish(step).map_err(|SinkClosed| RunError::SinkClosed { published })?;
            published += 1;

            if self.interval.is_zero() {
                tokio::task::yield_now().await;
                continue;
            }
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = stop.stopped() => {
                    info!(published, "run cancelled mid-pause");
                    return Ok(Paced::Stopped(published));
                }
            }
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}

#[cfg(test)]
#[path = "tests/pacing_tests.rs"]
mod tests;
