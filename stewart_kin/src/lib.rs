use int_enum::IntEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod drivers;
pub mod errors;
pub mod geometry;
pub mod kinematics;
pub mod math;
pub mod packets;

#[cfg(feature = "nalgebra-support")]
pub mod transforms;

pub use errors::*;

/// A six-degree-of-freedom pose of the platform top plate.
///
/// Rotations are in degrees about the world X/Y/Z axes, applied in
/// Z-then-Y-then-X order. Translations are absolute world coordinates in
/// millimeters, Y up, so a platform resting at its neutral height has
/// `ty` equal to the geometry's home height rather than zero. A pose is a
/// pure coordinate and carries no reference to any particular geometry.
///
/// # Examples
///
/// ```
/// use stewart_kin::Pose;
///
/// let pose = Pose::home(205.0);
/// assert_eq!(pose.ty, 205.0);
/// assert_eq!(pose.rx, 0.0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
}

impl Pose {
    pub fn new(rx: f32, ry: f32, rz: f32, tx: f32, ty: f32, tz: f32) -> Self {
        Self { rx, ry, rz, tx, ty, tz }
    }

    /// The neutral pose for a platform whose home height is `home_height`:
    /// no rotation, centered, resting at that height.
    pub fn home(home_height: f32) -> Self {
        Self {
            ty: home_height,
            ..Self::default()
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            rx: 0.0,
            ry: 0.0,
            rz: 0.0,
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rotation: rx={:.2}° ry={:.2}° rz={:.2}°", self.rx, self.ry, self.rz)?;
        write!(f, "Position: tx={:.2} ty={:.2} tz={:.2} mm", self.tx, self.ty, self.tz)
    }
}

/// Identifies which physical robot variant a geometry or packet refers to.
///
/// # Variants
///
/// * `Mx64` - The larger platform built on Dynamixel MX-64 servos;
///   202.42 mm pushrods, 205 mm home height, actuator arms pointing
///   outward.
/// * `Ax18` - The smaller platform built on Dynamixel AX-18 servos;
///   137.5 mm pushrods, 140 mm home height, actuator arms pointing
///   inward.
///
/// The discriminants are fixed because they travel inside visualization
/// packets; see [`packets::PosePacket`].
#[repr(u32)]
#[derive(Debug, Serialize, Deserialize, IntEnum, Clone, Copy, PartialEq, Eq)]
pub enum RobotType {
    Mx64 = 0,
    Ax18 = 1,
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RobotType::Mx64 => write!(f, "MX-64"),
            RobotType::Ax18 => write!(f, "AX-18"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_pose_sits_at_the_given_height() {
        let pose = Pose::home(140.0);
        assert_eq!(pose, Pose::new(0.0, 0.0, 0.0, 0.0, 140.0, 0.0));
    }

    #[test]
    fn robot_type_round_trips_through_its_discriminant() {
        assert_eq!(u32::from(RobotType::Mx64), 0);
        assert_eq!(u32::from(RobotType::Ax18), 1);
        assert_eq!(RobotType::try_from(1), Ok(RobotType::Ax18));
        assert_eq!(RobotType::try_from(7), Err(7));
    }

    #[test]
    fn pose_serializes_with_plain_field_names() {
        let pose = Pose::new(1.0, 2.0, 3.0, 4.0, 205.0, -6.0);
        let json = serde_json::to_string(&pose).unwrap();
        assert!(json.contains("\"rx\":1.0"));
        assert!(json.contains("\"ty\":205.0"));
        let back: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pose);
    }
}
