// main.rs - Graph traversal and sorting visualizer
// Runs are paced on a tokio runtime and stream their snapshots back over a channel

use std::path::Path;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender, unbounded};
use eframe::egui;
use egui::Color32;
use tracing::{debug, info, warn};
use viz_core::{
    GridBoard, Pacer, Position, RunOutcome, RunSlot, SortAlgorithm, SortBoard, Tone,
    ToneMapper, TraversalKind, TraversalOutcome, VizConfig,
};

mod audio;     // Sine output on the default device
mod bridge;    // Channel-backed sinks handed to each run
mod ui;        // egui rendering and input

use audio::Audio;
use bridge::{Speaker, UiEvent, UiSink};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            warn!("{err:#}; falling back to defaults");
            VizConfig::default()
        }
    };

    // A missing device only silences the sort page
    let audio = Audio::open().ok();
    let app = Visualizer::new(config, audio).context("failed to build the run runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Algorithm Visualizer",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("window closed with an error: {err}"))
}

fn load_config() -> anyhow::Result<VizConfig> {
    let path = Path::new(viz_core::config::CONFIG_FILE);
    let config = VizConfig::load(path)
        .with_context(|| format!("could not load {}", path.display()))?;
    info!(?config, "configuration loaded");
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Graph,
    Sort,
}

pub struct Visualizer {
    pub config: VizConfig,
    pub view: View,
    pub board: GridBoard,
    pub bars: SortBoard,
    pub status: String,
    pub last_tone: Option<Tone>,
    pub step_delay_ms: u64,

    pub empty_color: Color32,
    pub visited_color: Color32,
    pub start_color: Color32,
    pub end_color: Color32,
    pub bar_color: Color32,

    slot: RunSlot,
    audio: Option<Audio>,
    runtime: tokio::runtime::Runtime,
    ui_tx: Sender<UiEvent>,
    ui_rx: Receiver<UiEvent>,
}

impl Visualizer {
    pub fn new(config: VizConfig, audio: Option<Audio>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        // Unbounded so a run never blocks on a slow frame
        let (ui_tx, ui_rx) = unbounded();

        let mut bars = SortBoard::new(config.array_len as u32);
        bars.shuffle();

        Ok(Self {
            view: View::Graph,
            board: GridBoard::new(config.grid_rows, config.grid_cols),
            bars,
            status: "Click a cell to place the start, then another for the end".to_string(),
            last_tone: None,
            step_delay_ms: config.step_delay_ms,
            empty_color: Color32::WHITE,
            visited_color: Color32::from_rgb(59, 130, 246),
            start_color: Color32::from_rgb(34, 197, 94),
            end_color: Color32::from_rgb(239, 68, 68),
            bar_color: Color32::from_rgb(37, 99, 235),
            config,
            slot: RunSlot::new(),
            audio,
            runtime,
            ui_tx,
            ui_rx,
        })
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_busy()
    }

    fn pacer(&self) -> Pacer {
        Pacer::new(std::time::Duration::from_millis(self.step_delay_ms))
    }
}

/// Everything the UI layer asks of the app
pub trait VisualizerInterface {
    fn select_cell(&mut self, pos: Position);
    fn start_traversal(&mut self, kind: TraversalKind);
    fn start_sort(&mut self, algorithm: SortAlgorithm);
    fn stop_run(&mut self);
    fn reset_grid(&mut self);
    fn shuffle(&mut self);
    fn drain_events(&mut self);
}

impl VisualizerInterface for Visualizer {
    fn select_cell(&mut self, pos: Position) {
        if self.is_running() {
            return;
        }
        if let Some(marker) = self.board.select(pos) {
            debug!(%pos, ?marker, "marker placed");
            self.status = if self.board.is_ready() {
                "Ready: start BFS or DFS".to_string()
            } else {
                "Now pick the end cell".to_string()
            };
        }
    }

    fn start_traversal(&mut self, kind: TraversalKind) {
        let mut run = match self.board.traversal(kind) {
            Ok(run) => run,
            Err(err) => {
                debug!(%kind, %err, "traversal not started");
                self.status = err.to_string();
                return;
            }
        };
        let (id, mut stop) = self.slot.begin();
        let pacer = self.pacer();
        let mut sink = UiSink::new(id, self.ui_tx.clone());
        self.status = format!("{kind} running...");

        self.runtime.spawn(async move {
            let summary = match pacer.drive_traversal(&mut run, &mut sink, &mut stop).await {
                Ok(RunOutcome::Completed { outcome: TraversalOutcome::Found, steps }) => {
                    format!("{kind}: end reached after {steps} steps")
                }
                Ok(RunOutcome::Completed { outcome: TraversalOutcome::NotFound, steps }) => {
                    format!("{kind}: no path, {steps} cells explored")
                }
                Ok(RunOutcome::Cancelled { steps }) => format!("{kind}: stopped after {steps} steps"),
                Err(err) => format!("{kind}: {err}"),
            };
            sink.finish(summary);
        });
    }

    fn start_sort(&mut self, algorithm: SortAlgorithm) {
        let run = match self.bars.run(algorithm) {
            Ok(run) => run,
            Err(err) => {
                debug!(%algorithm, %err, "sort not started");
                self.status = err.to_string();
                return;
            }
        };
        let (id, mut stop) = self.slot.begin();
        let pacer = self.pacer();
        let mapper = ToneMapper::from_config(&self.config);
        let mut sink = UiSink::new(id, self.ui_tx.clone());
        let mut speaker = Speaker::new(
            id,
            self.ui_tx.clone(),
            self.config.audio_enabled,
            self.audio.as_ref().map(Audio::sender),
        );
        self.status = format!("{algorithm} running...");

        self.runtime.spawn(async move {
            let summary = match pacer
                .drive_sort(run, &mut sink, &mut speaker, &mapper, &mut stop)
                .await
            {
                Ok(RunOutcome::Completed { steps, .. }) => format!("{algorithm}: sorted in {steps} steps"),
                Ok(RunOutcome::Cancelled { steps }) => format!("{algorithm}: stopped after {steps} steps"),
                Err(err) => format!("{algorithm}: {err}"),
            };
            sink.finish(summary);
        });
    }

    fn stop_run(&mut self) {
        if let Some(id) = self.slot.cancel() {
            info!(run = id, "run stopped by user");
            self.status = "Stopped".to_string();
        }
    }

    fn reset_grid(&mut self) {
        self.slot.cancel();
        self.board.reset();
        self.status = "Click a cell to place the start, then another for the end".to_string();
    }

    fn shuffle(&mut self) {
        self.slot.cancel();
        self.bars.shuffle();
        self.last_tone = None;
        self.status = "Shuffled".to_string();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            // Late events from a stopped or replaced run are dropped
            if !self.slot.is_current(event.run()) {
                continue;
            }
            match event {
                UiEvent::Grid { step, .. } => self.board.apply(step.snapshot),
                UiEvent::Sort { step, .. } => self.bars.apply(step.snapshot),
                UiEvent::Tone { tone, .. } => self.last_tone = Some(tone),
                UiEvent::Finished { run, summary } => {
                    self.slot.finish(run);
                    info!("{summary}");
                    self.status = summary;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
