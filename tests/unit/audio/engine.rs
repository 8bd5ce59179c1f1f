use super::*;
use crate::foundation::core::Millis;

fn audible() -> SceneConfig {
    SceneConfig {
        volume: 0.5,
        turn_duration: Millis(1000),
        ..SceneConfig::default()
    }
}

#[test]
fn plays_into_sink() {
    let sink = MemorySink::new();
    let mut engine = AudioEngine::with_memory_sink(sink.clone()).with_sample_rate(8_000);
    assert!(engine.play(Cue::Fold, &audible()));
    assert!(engine.play(Cue::Thud, &audible()));
    assert_eq!(sink.cues(), vec![Cue::Fold, Cue::Thud]);
    assert_eq!(engine.stats().synthesized, 2);
}

#[test]
fn muted_or_zero_volume_never_synthesizes() {
    let sink = MemorySink::new();
    let mut engine = AudioEngine::with_memory_sink(sink.clone()).with_sample_rate(8_000);

    let muted = SceneConfig {
        is_muted: true,
        ..audible()
    };
    let silent = SceneConfig {
        volume: 0.0,
        ..audible()
    };
    for cue in Cue::ALL {
        assert!(!engine.play(cue, &muted));
        assert!(!engine.play(cue, &silent));
    }
    assert_eq!(engine.stats(), AudioStats::default());
    assert!(sink.is_empty());
}

#[test]
fn device_opens_lazily_once() {
    use std::cell::Cell;
    use std::rc::Rc;

    let opens = Rc::new(Cell::new(0));
    let counter = opens.clone();
    let mut engine = AudioEngine::new(move || {
        counter.set(counter.get() + 1);
        Ok(Box::new(MemorySink::new()) as Box<dyn AudioSink>)
    })
    .with_sample_rate(8_000);

    assert_eq!(opens.get(), 0);
    let muted = SceneConfig {
        is_muted: true,
        ..audible()
    };
    engine.play(Cue::Turn, &muted);
    assert_eq!(opens.get(), 0);

    engine.play(Cue::Turn, &audible());
    engine.play(Cue::Rustle, &audible());
    assert_eq!(opens.get(), 1);

    engine.shutdown();
    engine.play(Cue::Turn, &audible());
    assert_eq!(opens.get(), 2);
}

#[test]
fn missing_device_is_silent() {
    let mut engine = AudioEngine::new(|| Err(anyhow::anyhow!("no audio context")));
    assert!(!engine.play(Cue::Thud, &audible()));
    assert!(!engine.is_available());
    assert_eq!(engine.stats().synthesized, 0);

    let mut none = AudioEngine::unavailable();
    assert!(!none.play(Cue::Thud, &audible()));
}

#[test]
fn failing_sink_is_counted_not_raised() {
    struct Broken;
    impl AudioSink for Broken {
        fn play(&mut self, _burst: SoundBurst) -> anyhow::Result<()> {
            anyhow::bail!("device lost")
        }
    }
    let mut engine =
        AudioEngine::new(|| Ok(Box::new(Broken) as Box<dyn AudioSink>)).with_sample_rate(8_000);
    assert!(!engine.play(Cue::Fold, &audible()));
    assert_eq!(engine.stats().dropped, 1);
    assert_eq!(engine.stats().synthesized, 1);
}
