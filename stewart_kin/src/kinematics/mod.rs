mod forward;
mod inverse;

pub use forward::{solve_forward, solve_forward_step, ForwardConfig, ForwardResult, ForwardSolution};
pub use inverse::{solve_inverse, InverseResult};

use crate::geometry::Geometry;
use crate::math::{deg_to_rad, Mat3, Vec3};
use crate::Pose;

/// Motor pairing table. Motors are mounted in mirrored pairs on shared
/// brackets (0/1, 2/3, 4/5), and each motor's swing plane is oriented along
/// the line to its partner's base point.
pub const MOTOR_PAIR: [usize; 6] = [1, 0, 3, 2, 5, 4];

/// Moves the six platform attachment points from their home-pose definition
/// into world coordinates for `pose`.
///
/// Platform points are stored at the home pose, so each is first re-centered
/// by subtracting the home height, then rotated by the pose's Z-Y-X rotation,
/// then translated by the pose's absolute position.
pub fn transform_platform_points(geometry: &Geometry, pose: &Pose) -> [Vec3; 6] {
    let rotation = Mat3::rotation_zyx(
        deg_to_rad(pose.rx),
        deg_to_rad(pose.ry),
        deg_to_rad(pose.rz),
    );
    let mut points = [Vec3::zero(); 6];
    for (i, home_point) in geometry.platform_home_points.iter().enumerate() {
        let local = Vec3::new(
            home_point.x,
            home_point.y - geometry.home_height,
            home_point.z,
        );
        let rotated = rotation.transform(&local);
        points[i] = Vec3::new(
            rotated.x + pose.tx,
            rotated.y + pose.ty,
            rotated.z + pose.tz,
        );
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairing_is_an_involution() {
        for motor in 0..6 {
            assert_eq!(MOTOR_PAIR[MOTOR_PAIR[motor]], motor);
            assert_ne!(MOTOR_PAIR[motor], motor);
        }
    }

    #[test]
    fn home_pose_reproduces_the_stored_platform_points() {
        let geometry = Geometry::mx64();
        let points = transform_platform_points(&geometry, &Pose::home(geometry.home_height));
        for (point, home) in points.iter().zip(geometry.platform_home_points.iter()) {
            assert!(point.distance_to(home) < 1e-3, "{:?} vs {:?}", point, home);
        }
    }

    #[test]
    fn pure_translation_shifts_every_point_equally() {
        let geometry = Geometry::ax18();
        let home = transform_platform_points(&geometry, &Pose::home(geometry.home_height));
        let shifted_pose = Pose::new(0.0, 0.0, 0.0, 5.0, geometry.home_height + 12.0, -3.0);
        let shifted = transform_platform_points(&geometry, &shifted_pose);
        for (a, b) in home.iter().zip(shifted.iter()) {
            assert!((b.x - a.x - 5.0).abs() < 1e-4);
            assert!((b.y - a.y - 12.0).abs() < 1e-4);
            assert!((b.z - a.z + 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn yaw_preserves_point_heights() {
        let geometry = Geometry::mx64();
        let pose = Pose::new(0.0, 30.0, 0.0, 0.0, geometry.home_height, 0.0);
        let points = transform_platform_points(&geometry, &pose);
        for point in points.iter() {
            assert!((point.y - geometry.home_height).abs() < 1e-3);
        }
    }
}
