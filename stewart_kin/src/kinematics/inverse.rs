use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use super::{transform_platform_points, MOTOR_PAIR};
use crate::geometry::Geometry;
use crate::math::{
    deg_to_rad, distance_point_to_plane, project_point_onto_plane, rad_to_deg, soft_clamp, Mat3,
    Vec3,
};
use crate::Pose;

/// Sign applied to the law-of-cosines swing term, indexed by
/// `[motor parity][arms outward]`. Even and odd motors are mirrored, and
/// flipping the arm mount direction flips which side of the target ray the
/// arm folds toward, so all four combinations are distinct.
const ARM_SIGN: [[f32; 2]; 2] = [
    [-1.0, 1.0], // even motors: inward, outward
    [1.0, -1.0], // odd motors: inward, outward
];

/// Output of one inverse solve.
///
/// The error flag is set when the pose is not exactly reachable: a platform
/// point drifted past the pushrod's reach, a triangle inequality failed
/// strictly, an angle landed outside its hard motor limits before soft
/// clamping, or a computation produced a non-finite value. Angles are still
/// reported for every motor so a caller can drive the mechanism toward the
/// nearest reachable shape; a non-finite angle is left in its slot rather
/// than silently replaced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InverseResult {
    pub motor_angles_deg: [f32; 6],
    pub knee_points: [Vec3; 6],
    pub platform_points: [Vec3; 6],
    pub error: bool,
}

/// Solves the actuator angles that realize `pose`.
///
/// Each motor swings its short arm in a vertical plane through its base
/// point, oriented along the line to its paired motor. The transformed
/// platform point is projected into that plane, the pushrod sphere is
/// intersected with the plane to get a reach circle, and the arm angle
/// follows from the triangle formed by the arm, the in-plane distance and
/// the circle radius. Knee positions are reconstructed from the final
/// (soft-clamped) angles, so the returned knees always describe a shape the
/// motors can actually take.
pub fn solve_inverse(geometry: &Geometry, pose: &Pose) -> InverseResult {
    let platform_points = transform_platform_points(geometry, pose);
    let mut motor_angles_deg = [0.0f32; 6];
    let mut knee_points = [Vec3::zero(); 6];
    let mut error = false;

    let arm = geometry.short_leg_length;
    let rod = geometry.long_leg_length;
    let y_axis = Vec3::new(0.0, 1.0, 0.0);

    for motor in 0..6 {
        let base = geometry.base_points[motor];
        let pair = geometry.base_points[MOTOR_PAIR[motor]];
        let x_axis = if motor % 2 == 0 {
            pair.sub(&base).normalized()
        } else {
            base.sub(&pair).normalized()
        };
        let normal = x_axis.cross(&y_axis);

        let plane_distance = distance_point_to_plane(&platform_points[motor], &base, &normal);
        let in_plane = project_point_onto_plane(&platform_points[motor], &base, &normal);
        let rel = in_plane.sub(&base);
        let reach_x = rel.dot(&x_axis);
        let reach_y = rel.y;
        let dist = (reach_x * reach_x + reach_y * reach_y).sqrt();
        let target = reach_y.atan2(reach_x);

        // Radius of the circle where the pushrod sphere meets the swing
        // plane. Compared squared so an out-of-reach point flags instead of
        // feeding sqrt a negative.
        let radius = if plane_distance * plane_distance >= rod * rod {
            if plane_distance * plane_distance > rod * rod {
                error = true;
            }
            0.0
        } else {
            (rod * rod - plane_distance * plane_distance).sqrt()
        };

        let (swing, degenerate) = solve_swing_angle(arm, dist, radius);
        if degenerate {
            error = true;
        }

        let sign = ARM_SIGN[motor % 2][geometry.arms_outward as usize];
        let mut angle_deg = rad_to_deg(FRAC_PI_2 + target + sign * swing);

        let (min, max) = geometry.angle_limits(motor);
        if angle_deg < min || angle_deg > max {
            error = true;
        }
        let (squeezed, _) = soft_clamp(angle_deg, min, max, geometry.clamp_margin_deg);
        angle_deg = squeezed;
        if !angle_deg.is_finite() {
            error = true;
        }

        motor_angles_deg[motor] = angle_deg;
        knee_points[motor] = knee_point(geometry, motor, angle_deg);
    }

    InverseResult {
        motor_angles_deg,
        knee_points,
        platform_points,
        error,
    }
}

/// Law-of-cosines solve for the angle between the arm and the target ray.
/// The two triangle-collapse cases map to the exact boundary angles; the
/// flag is raised only when the inequality fails strictly, so a pose sitting
/// exactly on the reach boundary still counts as reachable.
fn solve_swing_angle(arm: f32, dist: f32, radius: f32) -> (f32, bool) {
    if dist >= arm + radius {
        // Fully stretched, arm pointing straight at the target.
        (0.0, dist > arm + radius)
    } else if radius >= dist + arm {
        // Fully folded back.
        (PI, radius > dist + arm)
    } else {
        let arg = (arm * arm + dist * dist - radius * radius) / (2.0 * arm * dist);
        let degenerate = !arg.is_finite() || arg > 1.0;
        (arg.clamp(-1.0, 1.0).acos(), degenerate)
    }
}

/// World position of a motor's knee (arm tip) for a given final angle.
/// The arm hangs straight down at zero degrees, swings in its bracket plane
/// by the motor angle, and the bracket itself is rotated about Y to its
/// azimuth on the base ring. Paired motors share a bracket azimuth.
fn knee_point(geometry: &Geometry, motor: usize, angle_deg: f32) -> Vec3 {
    let azimuth = if motor % 2 == 0 {
        -30.0 + (motor / 2) as f32 * 120.0
    } else {
        -30.0 + ((motor - 1) / 2) as f32 * 120.0
    };
    let arm = Vec3::new(0.0, -geometry.short_leg_length, 0.0);
    let swung = Mat3::rotation_x(deg_to_rad(angle_deg)).transform(&arm);
    let aligned = Mat3::rotation_y(deg_to_rad(azimuth)).transform(&swung);
    aligned.add(&geometry.base_points[motor])
}
