//! Coordinate transformation utilities.
//!
//! This module provides conversions between [`Pose`] and nalgebra geometric
//! types when the `nalgebra-support` feature is enabled.
//!
//! # Feature Flag
//!
//! Enable nalgebra support in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! stewart_kin = { version = "0.5", features = ["nalgebra-support"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use stewart_kin::Pose;
//! use nalgebra::Isometry3;
//!
//! // Convert a pose to an Isometry3
//! let pose = Pose::new(10.0, 0.0, -5.0, 0.0, 205.0, 0.0);
//! let iso: Isometry3<f32> = pose.into();
//!
//! // Convert an Isometry3 back to a pose
//! let pose2: Pose = iso.into();
//! ```
//!
//! # Notes
//!
//! - Rotations map onto nalgebra's roll-pitch-yaw Euler angles, which apply
//!   X first, then Y, then Z, matching the pose convention used by the
//!   solvers
//! - Pose angles are degrees; nalgebra works in radians
//! - Euler extraction is ambiguous when pitch reaches ±90°, so round trips
//!   are only exact away from that singularity

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use crate::Pose;

/// Convert a Pose to an nalgebra Isometry3.
///
/// The translation is taken directly from tx, ty, tz. The rotation is
/// constructed from rx, ry, rz interpreted as roll-pitch-yaw in degrees.
impl From<Pose> for Isometry3<f32> {
    fn from(pose: Pose) -> Self {
        let translation = Translation3::new(pose.tx, pose.ty, pose.tz);

        let rotation = UnitQuaternion::from_euler_angles(
            pose.rx.to_radians(), // Roll (around X)
            pose.ry.to_radians(), // Pitch (around Y)
            pose.rz.to_radians(), // Yaw (around Z)
        );

        Isometry3::from_parts(translation, rotation)
    }
}

/// Convert an nalgebra Isometry3 to a Pose.
///
/// The translation becomes tx, ty, tz. The rotation is extracted as Euler
/// angles and converted to degrees.
impl From<Isometry3<f32>> for Pose {
    fn from(iso: Isometry3<f32>) -> Self {
        let (roll, pitch, yaw) = iso.rotation.euler_angles();

        Pose {
            rx: roll.to_degrees(),
            ry: pitch.to_degrees(),
            rz: yaw.to_degrees(),
            tx: iso.translation.x,
            ty: iso.translation.y,
            tz: iso.translation.z,
        }
    }
}

/// Convert a reference to a Pose to an Isometry3.
impl From<&Pose> for Isometry3<f32> {
    fn from(pose: &Pose) -> Self {
        (*pose).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{deg_to_rad, Mat3, Vec3};
    use nalgebra::Point3;

    #[test]
    fn translation_carries_over_directly() {
        let pose = Pose::new(0.0, 0.0, 0.0, 12.5, 205.0, -3.25);
        let iso: Isometry3<f32> = pose.into();
        assert!((iso.translation.x - 12.5).abs() < 1e-6);
        assert!((iso.translation.y - 205.0).abs() < 1e-6);
        assert!((iso.translation.z + 3.25).abs() < 1e-6);
    }

    #[test]
    fn round_trip_preserves_a_typical_pose() {
        let original = Pose::new(12.0, -8.0, 25.0, 4.0, 218.0, -6.0);
        let iso: Isometry3<f32> = original.into();
        let converted: Pose = iso.into();

        assert!((converted.rx - original.rx).abs() < 1e-3);
        assert!((converted.ry - original.ry).abs() < 1e-3);
        assert!((converted.rz - original.rz).abs() < 1e-3);
        assert!((converted.tx - original.tx).abs() < 1e-4);
        assert!((converted.ty - original.ty).abs() < 1e-4);
        assert!((converted.tz - original.tz).abs() < 1e-4);
    }

    #[test]
    fn quaternion_rotation_matches_the_solver_matrices() {
        let pose = Pose::new(20.0, -35.0, 50.0, 3.0, 210.0, -4.0);
        let iso: Isometry3<f32> = (&pose).into();

        let local = Vec3::new(74.91, 0.0, 69.65);
        let rotated = Mat3::rotation_zyx(
            deg_to_rad(pose.rx),
            deg_to_rad(pose.ry),
            deg_to_rad(pose.rz),
        )
        .transform(&local);

        let point = iso.transform_point(&Point3::new(local.x, local.y, local.z));
        assert!((point.x - (rotated.x + pose.tx)).abs() < 1e-2);
        assert!((point.y - (rotated.y + pose.ty)).abs() < 1e-2);
        assert!((point.z - (rotated.z + pose.tz)).abs() < 1e-2);
    }
}
