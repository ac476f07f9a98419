use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::motion::{
    Harmonic, Move, DOF_RX, DOF_RY, DOF_RZ, DOF_TX, DOF_TY, DOF_TZ, FLAG_LOOPABLE, FLAG_PRESET,
};
use crate::MoveError;

/// Number of slots in a library. Deck indices and slot indices share this
/// bound.
pub const LIBRARY_SIZE: usize = 100;

/// A fixed bank of [`Move`] slots. Every slot always holds a move; an
/// unused slot holds a cleared one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveLibrary {
    moves: Vec<Move>,
}

impl MoveLibrary {
    /// A library of cleared slots.
    pub fn new() -> Self {
        let mut moves = Vec::with_capacity(LIBRARY_SIZE);
        moves.resize_with(LIBRARY_SIZE, Move::default);
        Self { moves }
    }

    /// A library with the ten built-in patterns in slots 0 through 9.
    pub fn with_presets() -> Self {
        let mut library = Self::new();

        let mut still = Move::new("still");
        still.flags = FLAG_PRESET;
        library.moves[0] = still;

        let mut nod = preset("nod");
        nod.dofs[DOF_RX].harmonics[0] = Harmonic::new(0.6, 0.0);
        library.moves[1] = nod;

        let mut tilt = preset("tilt");
        tilt.dofs[DOF_RY].harmonics[0] = Harmonic::new(0.5, 0.0);
        library.moves[2] = tilt;

        let mut twist = preset("twist");
        twist.dofs[DOF_RZ].harmonics[1] = Harmonic::new(0.4, 0.0);
        library.moves[3] = twist;

        let mut bounce = preset("bounce");
        bounce.dofs[DOF_TY].harmonics[0] = Harmonic::new(0.7, 0.0);
        library.moves[4] = bounce;

        let mut sway = preset("sway");
        sway.dofs[DOF_TX].harmonics[0] = Harmonic::new(0.5, 0.0);
        library.moves[5] = sway;

        let mut circle = preset("circle");
        circle.dofs[DOF_TX].harmonics[0] = Harmonic::new(0.5, 0.0);
        circle.dofs[DOF_TZ].harmonics[0] = Harmonic::new(0.5, 0.25);
        library.moves[6] = circle;

        let mut complex = preset("complex");
        complex.dofs[DOF_RX].harmonics[0] = Harmonic::new(0.4, 0.0);
        complex.dofs[DOF_RY].harmonics[1] = Harmonic::new(0.3, 0.25);
        complex.dofs[DOF_TY].harmonics[0] = Harmonic::new(0.5, 0.0);
        complex.dofs[DOF_TY].harmonics[2] = Harmonic::new(0.2, 0.5);
        library.moves[7] = complex;

        let mut wave = preset("wave");
        wave.dofs[DOF_RX].harmonics[0] = Harmonic::new(0.4, 0.0);
        wave.dofs[DOF_RY].harmonics[0] = Harmonic::new(0.4, 0.33);
        wave.dofs[DOF_RZ].harmonics[0] = Harmonic::new(0.3, 0.66);
        library.moves[8] = wave;

        let mut pulse = preset("pulse");
        pulse.dofs[DOF_TY].harmonics[0] = Harmonic::new(0.5, 0.0);
        pulse.dofs[DOF_TY].harmonics[1] = Harmonic::new(0.25, 0.0);
        pulse.dofs[DOF_TY].harmonics[2] = Harmonic::new(0.125, 0.0);
        library.moves[9] = pulse;

        library
    }

    pub fn get(&self, slot: usize) -> Option<&Move> {
        self.moves.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Move> {
        self.moves.get_mut(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Clears one slot back to an unnamed, motionless move. Out-of-range
    /// slots are ignored.
    pub fn clear(&mut self, slot: usize) {
        if let Some(slot) = self.moves.get_mut(slot) {
            *slot = Move::default();
        }
    }

    /// Clears every slot.
    pub fn clear_all(&mut self) {
        for slot in self.moves.iter_mut() {
            *slot = Move::default();
        }
    }

    /// Writes the whole library to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MoveError> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| MoveError::Serialization(e.to_string()))?;
        fs::write(path, serialized).map_err(|e| MoveError::Io(e.to_string()))
    }

    /// Reads a library back from a JSON file. Short files pad out with
    /// cleared slots and long files truncate, so the slot count is always
    /// [`LIBRARY_SIZE`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, MoveError> {
        let contents = fs::read_to_string(path).map_err(|e| MoveError::Io(e.to_string()))?;
        let mut library: MoveLibrary =
            serde_json::from_str(&contents).map_err(|e| MoveError::Serialization(e.to_string()))?;
        library.moves.resize_with(LIBRARY_SIZE, Move::default);
        Ok(library)
    }
}

impl Default for MoveLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn preset<T: Into<String>>(name: T) -> Move {
    let mut preset = Move::new(name);
    preset.flags = FLAG_PRESET | FLAG_LOOPABLE;
    preset
}
