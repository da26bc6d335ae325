use std::time::Duration;

use super::{NullTone, Tone, ToneMapper, ToneSink};
use crate::config::VizConfig;
use crate::error::ToneError;

#[test]
fn frequency_spans_200_to_1000_hz() {
    let mapper = ToneMapper::new(100);
    assert_eq!(mapper.frequency(0), 200.0);
    assert_eq!(mapper.frequency(50), 600.0);
    assert_eq!(mapper.frequency(100), 1000.0);
}

#[test]
fn tone_uses_fixed_duration_and_volume() {
    let tone = ToneMapper::new(4).tone(1);
    assert_eq!(tone.value, 1);
    assert_eq!(tone.frequency_hz, 400.0);
    assert_eq!(tone.duration, Duration::from_millis(50));
    assert_eq!(tone.volume, 0.1);
}

#[test]
fn empty_range_falls_back_to_base_frequency() {
    assert_eq!(ToneMapper::new(0).frequency(7), 200.0);
}

#[test]
fn mapper_follows_config() {
    let config = VizConfig {
        array_len: 10,
        tone_duration_ms: 80,
        tone_volume: 0.5,
        ..VizConfig::default()
    };
    let tone = ToneMapper::from_config(&config).tone(5);
    assert_eq!(tone.frequency_hz, 600.0);
    assert_eq!(tone.duration, Duration::from_millis(80));
    assert_eq!(tone.volume, 0.5);
}

#[test]
fn channel_sink_reports_a_full_queue() {
    let (mut tx, rx) = crossbeam_channel::bounded::<Tone>(1);
    let mapper = ToneMapper::new(10);
    assert_eq!(tx.play(mapper.tone(1)), Ok(()));
    assert!(matches!(tx.play(mapper.tone(2)), Err(ToneError::Rejected(_))));
    assert_eq!(rx.try_recv().map(|tone| tone.value), Ok(1));
}

#[test]
fn null_sink_accepts_everything() {
    let mut sink = NullTone;
    assert_eq!(sink.play(ToneMapper::new(1).tone(1)), Ok(()));
}
