//! BPM-synchronized harmonic motion for Stewart platforms.
//!
//! A [`Move`] describes a repeating motion pattern: each of the six pose
//! degrees of freedom carries three sine harmonics locked to the beat (full,
//! half and quarter rate) plus a constant bias. A [`Playback`] clock turns
//! wall time and BPM into oscillator phases, a [`MoveLibrary`] stores a bank
//! of moves with factory presets, and a [`Mixer`] crossfades two library
//! slots DJ-deck style. Evaluation produces pose offsets around zero; add a
//! geometry's home height to `ty` to get an absolute platform target.

pub mod errors;

mod library;
mod mixer;
mod motion;
mod playback;

pub use errors::*;
pub use library::*;
pub use mixer::*;
pub use motion::*;
pub use playback::*;
