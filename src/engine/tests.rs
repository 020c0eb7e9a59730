use super::*;
use crate::config::EngineSettings;

#[test]
fn clamp_unit_bounds_volume() {
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(0.0), 0.0);
    assert_eq!(clamp_unit(0.42), 0.42);
    assert_eq!(clamp_unit(1.7), 1.0);
}

#[test]
fn play_with_nothing_loaded_rejects() {
    let (mut engine, _events) = RodioEngine::spawn(EngineSettings::default());
    assert!(matches!(engine.play(), Err(EngineError::NothingLoaded)));
    engine.shutdown();
}

#[test]
fn engine_error_messages_name_the_source() {
    let err = EngineError::Decode {
        path: std::path::PathBuf::from("/music/broken.mp3"),
    };
    assert_eq!(err.to_string(), "failed to decode /music/broken.mp3");
    assert_eq!(EngineError::NothingLoaded.to_string(), "no track loaded");
}
