// tone.rs - Maps sorted values to short audible tones

use std::time::Duration;

use crate::config::VizConfig;
use crate::error::ToneError;

const BASE_HZ: f32 = 200.0;
const SPAN_HZ: f32 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub value: u32,
    pub frequency_hz: f32,
    pub duration: Duration,
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMapper {
    range: u32,
    duration: Duration,
    volume: f32,
}

impl ToneMapper {
    /// `range` is the largest value in play (the array length for a 1..N permutation).
    pub fn new(range: u32) -> Self {
        Self {
            range,
            duration: Duration::from_millis(50),
            volume: 0.1,
        }
    }

    pub fn from_config(config: &VizConfig) -> Self {
        Self {
            range: config.array_len as u32,
            duration: config.tone_duration(),
            volume: config.tone_volume,
        }
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn frequency(&self, value: u32) -> f32 {
        if self.range == 0 {
            return BASE_HZ;
        }
        BASE_HZ + (value as f32 / self.range as f32) * SPAN_HZ
    }

    pub fn tone(&self, value: u32) -> Tone {
        Tone {
            value,
            frequency_hz: self.frequency(value),
            duration: self.duration,
            volume: self.volume,
        }
    }
}

/// Receives tone events. Implementations must not block.
pub trait ToneSink {
    fn play(&mut self, tone: Tone) -> Result<(), ToneError>;
}

/// Sink for when audio is switched off or missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTone;

impl ToneSink for NullTone {
    fn play(&mut self, _tone: Tone) -> Result<(), ToneError> {
        Ok(())
    }
}

impl ToneSink for Vec<Tone> {
    fn play(&mut self, tone: Tone) -> Result<(), ToneError> {
        self.push(tone);
        Ok(())
    }
}

impl ToneSink for crossbeam_channel::Sender<Tone> {
    fn play(&mut self, tone: Tone) -> Result<(), ToneError> {
        self.try_send(tone)
            .map_err(|err| ToneError::Rejected(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/tone_tests.rs"]
mod tests;
