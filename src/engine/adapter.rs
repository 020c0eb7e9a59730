use crate::track::TrackDescriptor;

use super::types::EngineError;

/// Imperative side of the playback engine.
///
/// The session controller is the only caller; it owns exactly one engine
/// instance for its lifetime and pairs it with the event receiver obtained at
/// construction. All methods are fire-and-forget except `play`, which can
/// reject synchronously when nothing is loaded.
pub trait PlaybackEngine: Send {
    /// Point the engine at a new source. Any in-flight load is superseded;
    /// its remaining events still carry the old track's id.
    fn load(&mut self, track: &TrackDescriptor);

    /// Start or resume playback. Completion is signaled by engine events;
    /// failures after this returns arrive as `EngineEvent::Error`.
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    /// Effective volume in `[0, 1]`; the caller folds mute into this value.
    fn set_volume(&mut self, volume: f32);

    /// Drop the engine's hold on the current source without loading another.
    fn unload(&mut self);

    /// Stop playback and release the output device.
    fn shutdown(&mut self) {}
}
