use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use stewart_kin::geometry::Geometry;
use stewart_kin::packets::Packet;
use stewart_kin::Pose;

use crate::playback::Playback;
use crate::MoveError;

pub const NUM_DOFS: usize = 6;
pub const NUM_HARMONICS: usize = 3;
pub const PARAMS_PER_DOF: usize = NUM_HARMONICS * 2 + 1;
pub const TOTAL_PARAMS: usize = NUM_DOFS * PARAMS_PER_DOF;

/// Beat-rate multipliers of the three harmonics: full, half and quarter.
pub const BEAT_MULTIPLIERS: [f32; NUM_HARMONICS] = [1.0, 0.5, 0.25];

/// Indices into [`Move::dofs`], rotations first.
pub const DOF_RX: usize = 0;
pub const DOF_RY: usize = 1;
pub const DOF_RZ: usize = 2;
pub const DOF_TX: usize = 3;
pub const DOF_TY: usize = 4;
pub const DOF_TZ: usize = 5;

/// Metadata flags carried by a move.
pub const FLAG_SYMMETRIC: u8 = 1 << 0;
pub const FLAG_LOOPABLE: u8 = 1 << 1;
pub const FLAG_TRANSITION: u8 = 1 << 2;
pub const FLAG_PRESET: u8 = 1 << 3;

/// A single sine oscillator. Amplitude runs 0 to 1 and is scaled by the
/// limit for its channel; phase runs 0 to 1 for a full turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    pub amplitude: f32,
    pub phase: f32,
}

impl Harmonic {
    pub fn new(amplitude: f32, phase: f32) -> Self {
        Self { amplitude, phase }
    }
}

impl Default for Harmonic {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            phase: 0.0,
        }
    }
}

/// Motion of one degree of freedom: three beat-locked harmonics plus a
/// constant bias. Bias is stored 0 to 1 with 0.5 neutral, so a cleared
/// (all-zero-amplitude) DOF with neutral bias contributes nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DofMotion {
    pub harmonics: [Harmonic; NUM_HARMONICS],
    pub bias: f32,
}

impl DofMotion {
    fn evaluate(&self, phases: &[f32; NUM_HARMONICS], max_amp: f32, max_bias: f32) -> f32 {
        let mut value = 0.0;
        for (harmonic, phase) in self.harmonics.iter().zip(phases.iter()) {
            value += max_amp * harmonic.amplitude * (phase + TAU * harmonic.phase).sin();
        }
        value + max_bias * (self.bias - 0.5)
    }
}

impl Default for DofMotion {
    fn default() -> Self {
        Self {
            harmonics: [Harmonic::default(); NUM_HARMONICS],
            bias: 0.5,
        }
    }
}

/// Scaling limits that map normalized move parameters onto physical
/// degrees and millimeters. [`from_geometry`](MoveLimits::from_geometry)
/// ties them to a robot's motion envelope; the default is a conservative
/// desk-test set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MoveLimits {
    pub max_rotation_amplitude: f32,
    pub max_rotation_bias: f32,
    pub max_translation_amplitude: f32,
    pub max_translation_bias: f32,
}

impl MoveLimits {
    pub fn from_geometry(geometry: &Geometry) -> Self {
        Self {
            max_rotation_amplitude: geometry.max_rotation_amplitude,
            max_rotation_bias: geometry.max_rotation_bias,
            max_translation_amplitude: geometry.max_translation_amplitude,
            max_translation_bias: geometry.max_translation_bias,
        }
    }
}

impl Default for MoveLimits {
    fn default() -> Self {
        Self {
            max_rotation_amplitude: 15.0,
            max_rotation_bias: 10.0,
            max_translation_amplitude: 25.0,
            max_translation_bias: 15.0,
        }
    }
}

/// A complete motion pattern: six [`DofMotion`] channels in
/// rx ry rz tx ty tz order plus a name and metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Move {
    pub name: String,
    pub dofs: [DofMotion; NUM_DOFS],
    pub flags: u8,
    pub category: u8,
}

impl Move {
    /// A cleared move with the given name: every amplitude zero, every
    /// bias neutral.
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Resets all motion parameters, keeping the name and metadata.
    pub fn clear(&mut self) {
        self.dofs = [DofMotion::default(); NUM_DOFS];
    }

    /// Evaluates the move at the playback clock's current position.
    ///
    /// The result is a pose offset centered on zero; callers add their
    /// geometry's home height to `ty` before feeding it to a solver.
    pub fn evaluate(&self, playback: &Playback, limits: &MoveLimits) -> Pose {
        let phases = [
            playback.phase(BEAT_MULTIPLIERS[0]),
            playback.phase(BEAT_MULTIPLIERS[1]),
            playback.phase(BEAT_MULTIPLIERS[2]),
        ];
        let volume = playback.master_volume;
        let rotation = |dof: usize| {
            volume
                * self.dofs[dof].evaluate(
                    &phases,
                    limits.max_rotation_amplitude,
                    limits.max_rotation_bias,
                )
        };
        let translation = |dof: usize| {
            volume
                * self.dofs[dof].evaluate(
                    &phases,
                    limits.max_translation_amplitude,
                    limits.max_translation_bias,
                )
        };
        Pose::new(
            rotation(DOF_RX),
            rotation(DOF_RY),
            rotation(DOF_RZ),
            translation(DOF_TX),
            translation(DOF_TY),
            translation(DOF_TZ),
        )
    }

    /// Blends the motion parameters of two moves. `t` runs 0 (all `a`) to
    /// 1 (all `b`). The result carries no name or metadata of its own.
    pub fn interpolate(a: &Move, b: &Move, t: f32) -> Move {
        let inv_t = 1.0 - t;
        let mut blended = Move::default();
        for dof in 0..NUM_DOFS {
            for h in 0..NUM_HARMONICS {
                blended.dofs[dof].harmonics[h].amplitude = inv_t
                    * a.dofs[dof].harmonics[h].amplitude
                    + t * b.dofs[dof].harmonics[h].amplitude;
                blended.dofs[dof].harmonics[h].phase =
                    inv_t * a.dofs[dof].harmonics[h].phase + t * b.dofs[dof].harmonics[h].phase;
            }
            blended.dofs[dof].bias = inv_t * a.dofs[dof].bias + t * b.dofs[dof].bias;
        }
        blended
    }

    /// Flattens the motion parameters into amplitude/phase pairs followed
    /// by bias, one block of seven per DOF.
    pub fn to_floats(&self) -> [f32; TOTAL_PARAMS] {
        let mut out = [0.0f32; TOTAL_PARAMS];
        let mut idx = 0;
        for dof in self.dofs.iter() {
            for harmonic in dof.harmonics.iter() {
                out[idx] = harmonic.amplitude;
                out[idx + 1] = harmonic.phase;
                idx += 2;
            }
            out[idx] = dof.bias;
            idx += 1;
        }
        out
    }

    /// Rebuilds motion parameters from a flat array produced by
    /// [`to_floats`](Move::to_floats). The move comes back unnamed.
    pub fn from_floats(values: &[f32]) -> Result<Move, MoveError> {
        if values.len() < TOTAL_PARAMS {
            return Err(MoveError::Serialization(format!(
                "expected {} floats, got {}",
                TOTAL_PARAMS,
                values.len()
            )));
        }
        let mut blended = Move::default();
        let mut idx = 0;
        for dof in blended.dofs.iter_mut() {
            for harmonic in dof.harmonics.iter_mut() {
                harmonic.amplitude = values[idx];
                harmonic.phase = values[idx + 1];
                idx += 2;
            }
            dof.bias = values[idx];
            idx += 1;
        }
        Ok(blended)
    }
}

impl Default for Move {
    fn default() -> Self {
        Self {
            name: String::new(),
            dofs: [DofMotion::default(); NUM_DOFS],
            flags: 0,
            category: 0,
        }
    }
}

impl Packet for Move {}
