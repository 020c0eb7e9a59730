//! The playback session state machine.
//!
//! One `SessionState` value, owned by one `SessionController`, mutated only
//! through the pure reducer in `session::reducer`. User intents and engine
//! events travel through the same action channel, so every surface observes
//! the same canonical state.

mod action;
mod controller;
mod reducer;
mod state;

pub use action::*;
pub use controller::*;
pub use reducer::*;
pub use state::*;
