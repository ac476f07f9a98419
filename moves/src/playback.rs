use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The shared playback clock. All moves evaluated against the same clock
/// stay locked to the same beat grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    /// Elapsed time in seconds.
    pub t: f32,
    /// Beats per minute.
    pub bpm: f32,
    /// Global phase offset in radians, added to every harmonic.
    pub master_phase: f32,
    /// Scales every evaluated pose component. 1.0 is unity.
    pub master_volume: f32,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.t += dt;
    }

    /// Rewinds the clock to zero. Tempo, phase and volume stay put.
    pub fn reset(&mut self) {
        self.t = 0.0;
    }

    /// Changes tempo. Non-positive values are ignored.
    pub fn set_bpm(&mut self, bpm: f32) {
        if bpm > 0.0 {
            self.bpm = bpm;
        }
    }

    /// Phase in radians of an oscillator running at `multiplier` times the
    /// beat rate, wrapped to one turn.
    pub fn phase(&self, multiplier: f32) -> f32 {
        let beats_per_second = self.bpm / 60.0;
        (TAU * self.t * beats_per_second * multiplier + self.master_phase) % TAU
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            t: 0.0,
            bpm: 120.0,
            master_phase: 0.0,
            master_volume: 1.0,
        }
    }
}
