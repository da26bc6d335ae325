// audio.rs - Sine tone output on a dedicated audio thread
//
// The UI hands tones to a channel; the audio thread owns the cpal stream and
// forwards them into the output callback, which mixes a few short sines.

use std::f32::consts::TAU;
use std::thread;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use tracing::{debug, info, warn};
use viz_core::{Tone, ToneError};

/// Tones allowed to ring at once; the oldest is cut when another starts.
const MAX_VOICES: usize = 8;

/// Handle to the output device. Dropping it and every sender from
/// [`Audio::sender`] shuts the audio thread down.
pub struct Audio {
    tx: Sender<Tone>,
}

impl Audio {
    /// Opens the default output device, or `Unavailable` if there is none.
    pub fn open() -> Result<Self, ToneError> {
        let (tx, rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || run_output(rx, ready_tx))
            .map_err(|err| {
                warn!(%err, "could not spawn the audio thread");
                ToneError::Unavailable
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(reason)) => {
                warn!(%reason, "audio output unavailable");
                Err(ToneError::Unavailable)
            }
            Err(_) => Err(ToneError::Unavailable),
        }
    }

    /// Tone sink feeding this device.
    pub fn sender(&self) -> Sender<Tone> {
        self.tx.clone()
    }
}

fn run_output(tones: Receiver<Tone>, ready: Sender<Result<(), String>>) {
    let (voice_tx, voice_rx) = unbounded();
    let stream = match open_stream(voice_rx) {
        Ok(stream) => stream,
        Err(reason) => {
            let _ = ready.send(Err(reason));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    while let Ok(tone) = tones.recv() {
        if voice_tx.send(tone).is_err() {
            break;
        }
    }
    drop(stream);
    debug!("audio thread exiting");
}

fn open_stream(voices: Receiver<Tone>) -> Result<cpal::Stream, String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no default output device".to_string())?;
    let supported = device.default_output_config().map_err(|err| err.to_string())?;
    let format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();

    let stream = match format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, voices),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, voices),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, voices),
        other => return Err(format!("unsupported sample format {other:?}")),
    }
    .map_err(|err| err.to_string())?;

    stream.play().map_err(|err| err.to_string())?;
    info!(
        device = %device.name().unwrap_or_default(),
        sample_rate = config.sample_rate.0,
        channels = config.channels,
        "audio output opened"
    );
    Ok(stream)
}

fn build_stream<S>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voices: Receiver<Tone>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    S: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = usize::from(config.channels.max(1));
    let mut mixer = Mixer::new(config.sample_rate.0 as f32);

    device.build_output_stream(
        config,
        move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
            while let Ok(tone) = voices.try_recv() {
                mixer.start(&tone);
            }
            for frame in data.chunks_mut(channels) {
                let value = <S as cpal::Sample>::from_sample(mixer.next_sample());
                frame.fill(value);
            }
        },
        |err| warn!(%err, "audio stream error"),
        None,
    )
}

#[derive(Debug, Clone, PartialEq)]
struct Voice {
    // position within the current cycle, 0..1
    phase: f32,
    step: f32,
    remaining: usize,
    volume: f32,
}

/// Sums the ringing sines into one mono sample stream.
#[derive(Debug)]
pub struct Mixer {
    sample_rate: f32,
    voices: Vec<Voice>,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    pub fn start(&mut self, tone: &Tone) {
        let remaining = (tone.duration.as_secs_f32() * self.sample_rate) as usize;
        if remaining == 0 {
            return;
        }
        if self.voices.len() == MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice {
            phase: 0.0,
            step: tone.frequency_hz / self.sample_rate,
            remaining,
            volume: tone.volume,
        });
    }

    pub fn next_sample(&mut self) -> f32 {
        let mut sum = 0.0;
        for voice in &mut self.voices {
            sum += (voice.phase * TAU).sin() * voice.volume;
            voice.phase = (voice.phase + voice.step).fract();
            voice.remaining -= 1;
        }
        self.voices.retain(|voice| voice.remaining > 0);
        sum.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
#[path = "tests/audio_tests.rs"]
mod tests;
