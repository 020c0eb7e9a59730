//! Playback engine adapter.
//!
//! One native audio-output resource, wrapped behind the `PlaybackEngine`
//! trait. Commands go in over a channel to a dedicated playback thread; an
//! event stream comes back out (metadata ready, time updates, track ended,
//! errors, buffering). Every event is tagged with the `TrackId` that was
//! loaded when it was produced so consumers can discard stale ones.

mod adapter;
mod player;
mod sink;
mod thread;
mod types;

pub use adapter::*;
pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;
