// bridge.rs - Sinks that carry a run's snapshots and tones back to the UI thread

use crossbeam_channel::Sender;
use viz_core::{GridStep, RunId, SinkClosed, SnapshotSink, SortStep, Tone, ToneError, ToneSink};

pub enum UiEvent {
    Grid { run: RunId, step: GridStep },
    Sort { run: RunId, step: SortStep },
    Tone { run: RunId, tone: Tone },
    Finished { run: RunId, summary: String },
}

impl UiEvent {
    pub fn run(&self) -> RunId {
        match self {
            UiEvent::Grid { run, .. }
            | UiEvent::Sort { run, .. }
            | UiEvent::Tone { run, .. }
            | UiEvent::Finished { run, .. } => *run,
        }
    }
}

pub struct UiSink {
    run: RunId,
    tx: Sender<UiEvent>,
}

impl UiSink {
    pub fn new(run: RunId, tx: Sender<UiEvent>) -> Self {
        Self { run, tx }
    }

    pub fn finish(self, summary: String) {
        // UI may already be gone on shutdown
        let _ = self.tx.send(UiEvent::Finished {
            run: self.run,
            summary,
        });
    }
}

impl SnapshotSink<GridStep> for UiSink {
    fn publish(&mut self, step: GridStep) -> Result<(), SinkClosed> {
        self.tx
            .send(UiEvent::Grid { run: self.run, step })
            .map_err(|_| SinkClosed)
    }
}

impl SnapshotSink<SortStep> for UiSink {
    fn publish(&mut self, step: SortStep) -> Result<(), SinkClosed> {
        self.tx
            .send(UiEvent::Sort { run: self.run, step })
            .map_err(|_| SinkClosed)
    }
}

/// Plays each tone on the audio device and mirrors it to the UI's tone readout.
/// Muted speakers swallow tones.
pub struct Speaker {
    run: RunId,
    tx: Sender<UiEvent>,
    enabled: bool,
    audio: Option<Sender<Tone>>,
}

impl Speaker {
    pub fn new(run: RunId, tx: Sender<UiEvent>, enabled: bool, audio: Option<Sender<Tone>>) -> Self {
        Self {
            run,
            tx,
            enabled,
            audio,
        }
    }
}

impl ToneSink for Speaker {
    fn play(&mut self, tone: Tone) -> Result<(), ToneError> {
        if !self.enabled {
            return Ok(());
        }
        self.tx
            .send(UiEvent::Tone { run: self.run, tone })
            .map_err(|err| ToneError::Rejected(err.to_string()))?;
        match self.audio.as_mut() {
            Some(device) => device.play(tone),
            None => Err(ToneError::Unavailable),
        }
    }
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
