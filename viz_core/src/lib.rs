//! Step-by-step execution engine for a grid traversal and sorting visualizer.
//!
//! Runs ([`TraversalRun`], [`SortRun`]) own a copy of the state they work on
//! and yield one snapshot per visible mutation. A [`Pacer`] drives a run into
//! a renderer's [`SnapshotSink`] with a fixed pause after each step, fires
//! [`Tone`]s for sorting, and stops early when the run's [`StopToken`] trips.

pub mod config;
pub mod error;
pub mod grid;
pub mod pacing;
pub mod run;
pub mod shuffle;
pub mod sorting;
pub mod tone;
pub mod traversal;

pub use config::VizConfig;
pub use error::{ConfigError, PreconditionError, RunError, SinkClosed, ToneError};
pub use grid::{CellState, Grid, GridBoard, Position};
pub use pacing::{Pacer, RunOutcome, SnapshotSink};
pub use run::{RunId, RunSlot, StopSource, StopToken};
pub use shuffle::SortBoard;
pub use sorting::{SortAlgorithm, SortRun, SortStep};
pub use tone::{NullTone, Tone, ToneMapper, ToneSink};
pub use traversal::{GridEvent, GridStep, TraversalKind, TraversalOutcome, TraversalRun};
