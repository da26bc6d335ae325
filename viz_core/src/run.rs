// run.rs - Run-scoped stop tokens and the single-run guard

use tokio::sync::watch;
use tracing::info;

pub type RunId = u64;

/// Owning side of a stop signal. Dropping it also stops every token.
#[derive(Debug)]
pub struct StopSource {
    tx: watch::Sender<bool>,
}

impl StopSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> StopToken {
        StopToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for StopSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Checked by the pacing driver at every suspension point.
#[derive(Debug, Clone)]
pub struct StopToken {
    rx: watch::Receiver<bool>,
}

impl StopToken {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once a stop is requested or the source is gone.
    pub async fn stopped(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Holds at most one in-flight run. Starting a new run cancels the previous one.
#[derive(Debug, Default)]
pub struct RunSlot {
    active: Option<(RunId, StopSource)>,
    next_id: RunId,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> (RunId, StopToken) {
        if let Some(replaced) = self.cancel() {
            info!(run = replaced, "run replaced by a new one");
        }
        self.next_id += 1;
        let id = self.next_id;
        let source = StopSource::new();
        let token = source.token();
        self.active = Some((id, source));
        (id, token)
    }

    /// Stops the in-flight run, if any, and returns its id.
    pub fn cancel(&mut self) -> Option<RunId> {
        let (id, source) = self.active.take()?;
        source.stop();
        Some(id)
    }

    /// Releases the slot when run `id` completes on its own.
    pub fn finish(&mut self, id: RunId) -> bool {
        if self.is_current(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn current_id(&self) -> Option<RunId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn is_current(&self, id: RunId) -> bool {
        self.current_id() == Some(id)
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
#[path = "tests/run_tests.rs"]
mod tests;
