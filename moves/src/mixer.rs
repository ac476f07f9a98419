use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use stewart_kin::Pose;

use crate::library::{MoveLibrary, LIBRARY_SIZE};
use crate::motion::{Move, MoveLimits};
use crate::playback::Playback;

/// A two-deck crossfading mixer over a [`MoveLibrary`].
///
/// Deck A and deck B each point at a library slot. The crossfader blends
/// their evaluated poses: fully A at 0, fully B at 1. Deck B can run at a
/// phase offset against the shared clock, which lets one pattern chase or
/// mirror another.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    pub deck_a: usize,
    pub deck_b: usize,
    pub crossfader: f32,
    pub volume_a: f32,
    pub volume_b: f32,
    /// Deck B's phase lead in beats, 0 to 1.
    pub phase_offset_b: f32,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points deck A at a library slot. Out-of-range indices are ignored.
    pub fn set_deck_a(&mut self, slot: usize) {
        if slot < LIBRARY_SIZE {
            self.deck_a = slot;
        }
    }

    /// Points deck B at a library slot. Out-of-range indices are ignored.
    pub fn set_deck_b(&mut self, slot: usize) {
        if slot < LIBRARY_SIZE {
            self.deck_b = slot;
        }
    }

    /// Moves the crossfader, clamped to 0 to 1.
    pub fn set_crossfade(&mut self, position: f32) {
        self.crossfader = position.clamp(0.0, 1.0);
    }

    /// Sets deck B's phase lead, wrapped into 0 to 1.
    pub fn set_phase_offset(&mut self, beats: f32) {
        let mut wrapped = beats % 1.0;
        if wrapped < 0.0 {
            wrapped += 1.0;
        }
        self.phase_offset_b = wrapped;
    }

    /// Exchanges the decks without changing what is playing: slots and
    /// volumes swap and the crossfader mirrors.
    pub fn swap_decks(&mut self) {
        std::mem::swap(&mut self.deck_a, &mut self.deck_b);
        std::mem::swap(&mut self.volume_a, &mut self.volume_b);
        self.crossfader = 1.0 - self.crossfader;
    }

    /// Evaluates both decks against the clock and blends them.
    ///
    /// Deck A sees the clock as-is; deck B sees it with the phase offset
    /// folded into the master phase. Empty deck slots contribute nothing.
    pub fn evaluate(
        &self,
        library: &MoveLibrary,
        playback: &Playback,
        limits: &MoveLimits,
    ) -> Pose {
        let cleared = Move::default();
        let move_a = library.get(self.deck_a).unwrap_or(&cleared);
        let move_b = library.get(self.deck_b).unwrap_or(&cleared);

        let mut playback_b = *playback;
        playback_b.master_phase += TAU * self.phase_offset_b;

        let pose_a = move_a.evaluate(playback, limits);
        let pose_b = move_b.evaluate(&playback_b, limits);

        let fade_a = (1.0 - self.crossfader) * self.volume_a;
        let fade_b = self.crossfader * self.volume_b;
        Pose::new(
            fade_a * pose_a.rx + fade_b * pose_b.rx,
            fade_a * pose_a.ry + fade_b * pose_b.ry,
            fade_a * pose_a.rz + fade_b * pose_b.rz,
            fade_a * pose_a.tx + fade_b * pose_b.tx,
            fade_a * pose_a.ty + fade_b * pose_b.ty,
            fade_a * pose_a.tz + fade_b * pose_b.tz,
        )
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            deck_a: 0,
            deck_b: 1,
            crossfader: 0.0,
            volume_a: 1.0,
            volume_b: 1.0,
            phase_offset_b: 0.0,
        }
    }
}
