use serde::{Deserialize, Serialize};

use super::{transform_platform_points, InverseResult};
use crate::geometry::Geometry;
use crate::math::Vec3;
use crate::Pose;

/// Tuning for the spring-relaxation forward solver. Every knob the solver
/// reads comes through here; [`solve_forward_step`] keeps no state of its
/// own between calls.
///
/// * `spring_constant` - restoring force per millimeter of leg length error.
/// * `damping` - per-step decay multiplied into the whole trial pose.
/// * `timestep` - integration step applied to force and moment sums.
/// * `max_iterations` - iteration budget for [`solve_forward`].
/// * `force_tolerance` / `moment_tolerance` - convergence thresholds on the
///   magnitudes of the summed force and moment.
///
/// Damping acts on the absolute pose, not on a velocity, so equilibrium is
/// reached where spring forces balance the decay. That leaves a residual
/// total force proportional to the pose magnitude (roughly
/// `|pose| * (1 - damping) / timestep`); a `force_tolerance` below that
/// floor can never be met. Moments integrate straight into the degree-valued
/// rotation channels, which multiplies their effect by the radian-to-degree
/// factor, so the default timestep is kept small enough that both shipped
/// geometries contract instead of oscillating.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForwardConfig {
    pub spring_constant: f32,
    pub damping: f32,
    pub timestep: f32,
    pub max_iterations: u32,
    pub force_tolerance: f32,
    pub moment_tolerance: f32,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            spring_constant: 0.6,
            damping: 0.9999,
            timestep: 0.001,
            max_iterations: 2000,
            force_tolerance: 25.0,
            moment_tolerance: 2.0,
        }
    }
}

/// Measurements and outcome of a single relaxation step.
///
/// `platform_points` are the attachment points of the trial pose the step
/// was evaluated at; `pose` is the integrated and damped pose to feed into
/// the next step. Length errors are actual length minus rest length, so a
/// stretched leg reads positive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForwardResult {
    pub leg_forces: [Vec3; 6],
    pub total_force: Vec3,
    pub total_moment: Vec3,
    pub leg_lengths: [f32; 6],
    pub leg_length_errors: [f32; 6],
    pub platform_points: [Vec3; 6],
    pub pose: Pose,
}

/// A finished forward solve: the last step taken, how many steps it took,
/// and whether the tolerances were met within the iteration budget.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ForwardSolution {
    pub result: ForwardResult,
    pub iterations: u32,
    pub converged: bool,
}

/// Advances the trial pose by one spring-relaxation step.
///
/// Each leg is a spring between its knee (fixed by the measured motor
/// angles in `inverse`) and the platform point of the trial pose. The
/// deviation of the knee-to-platform distance from the pushrod rest length
/// produces a force along the leg; forces and their moments about the
/// origin are summed, integrated into the pose, and the whole pose is then
/// damped. The caller owns the loop: feed `result.pose` back in as the next
/// trial pose, or use [`solve_forward`] for the standard tolerance loop.
pub fn solve_forward_step(
    geometry: &Geometry,
    trial_pose: &Pose,
    inverse: &InverseResult,
    config: &ForwardConfig,
) -> ForwardResult {
    let platform_points = transform_platform_points(geometry, trial_pose);
    let mut leg_forces = [Vec3::zero(); 6];
    let mut leg_lengths = [0.0f32; 6];
    let mut leg_length_errors = [0.0f32; 6];
    let mut total_force = Vec3::zero();
    let mut total_moment = Vec3::zero();

    for leg in 0..6 {
        let leg_vector = platform_points[leg].sub(&inverse.knee_points[leg]);
        let length = leg_vector.length();
        let length_error = length - geometry.long_leg_length;
        let force = leg_vector
            .normalized()
            .scaled(-config.spring_constant * length_error);

        total_force = total_force.add(&force);
        total_moment = total_moment.add(&platform_points[leg].cross(&force));
        leg_forces[leg] = force;
        leg_lengths[leg] = length;
        leg_length_errors[leg] = length_error;
    }

    let mut pose = *trial_pose;
    pose.tx += total_force.x * config.timestep;
    pose.ty += total_force.y * config.timestep;
    pose.tz += total_force.z * config.timestep;
    pose.rx += total_moment.x * config.timestep;
    pose.ry += total_moment.y * config.timestep;
    pose.rz += total_moment.z * config.timestep;

    pose.rx *= config.damping;
    pose.ry *= config.damping;
    pose.rz *= config.damping;
    pose.tx *= config.damping;
    pose.ty *= config.damping;
    pose.tz *= config.damping;

    ForwardResult {
        leg_forces,
        total_force,
        total_moment,
        leg_lengths,
        leg_length_errors,
        platform_points,
        pose,
    }
}

/// Runs [`solve_forward_step`] from `start_pose` until both tolerance
/// thresholds are met, a non-finite force or moment appears, or the
/// iteration budget runs out. At least one step is always taken.
///
/// The returned iteration count is the number of steps actually performed,
/// so callers can watch how hard different poses are to settle.
pub fn solve_forward(
    geometry: &Geometry,
    start_pose: &Pose,
    inverse: &InverseResult,
    config: &ForwardConfig,
) -> ForwardSolution {
    let mut pose = *start_pose;
    let mut iterations = 0u32;

    loop {
        let result = solve_forward_step(geometry, &pose, inverse, config);
        pose = result.pose;
        iterations += 1;

        if !result.total_force.is_finite() || !result.total_moment.is_finite() {
            return ForwardSolution {
                result,
                iterations,
                converged: false,
            };
        }
        if result.total_force.length() <= config.force_tolerance
            && result.total_moment.length() <= config.moment_tolerance
        {
            return ForwardSolution {
                result,
                iterations,
                converged: true,
            };
        }
        if iterations >= config.max_iterations {
            return ForwardSolution {
                result,
                iterations,
                converged: false,
            };
        }
    }
}
