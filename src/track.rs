//! Track descriptors and ingestion.
//!
//! A `TrackDescriptor` is the normalized representation of an audio file that
//! entered the playlist. Descriptors are produced by the ingestion path in
//! `track::ingest` and consumed by the playback session.

mod ingest;
mod model;

pub use ingest::*;
pub use model::*;

#[cfg(test)]
mod tests;
