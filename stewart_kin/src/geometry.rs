use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::Vec3;
use crate::RobotType;

/// Physical dimensions and limits of one platform variant.
///
/// All points are measured in millimeters in world coordinates, Y up, with
/// the origin centered on the base plate at actuator-axle height. Base
/// points sit at `y = 0`; platform points are given at the home pose, so
/// their `y` equals [`home_height`](Geometry::home_height). Angle limits are
/// split by actuator group because even motors (0, 2, 4) and odd motors
/// (1, 3, 5) are mirrored and sweep opposite ranges.
///
/// The two shipped variants are available through [`Geometry::mx64`] and
/// [`Geometry::ax18`]; a custom rig can be described by filling the fields
/// directly and checking it with [`Geometry::validate`].
///
/// ```rust,ignore
/// let geometry = Geometry::mx64();
/// geometry.validate()?;
/// let (min, max) = geometry.angle_limits(0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Geometry {
    pub base_points: [Vec3; 6],
    pub platform_home_points: [Vec3; 6],
    pub home_height: f32,
    pub short_leg_length: f32,
    pub long_leg_length: f32,
    pub arms_outward: bool,
    pub min_angle_even_deg: f32,
    pub max_angle_even_deg: f32,
    pub min_angle_odd_deg: f32,
    pub max_angle_odd_deg: f32,
    pub clamp_margin_deg: f32,
    pub max_rotation_amplitude: f32,
    pub max_rotation_bias: f32,
    pub max_translation_amplitude: f32,
    pub max_translation_bias: f32,
}

impl Geometry {
    /// The MX-64 platform: 70 mm actuator arms, 202.42 mm pushrods,
    /// 205 mm home height, arms pointing outward.
    pub fn mx64() -> Self {
        Self {
            base_points: [
                Vec3::new(59.24, 0.0, 62.49),
                Vec3::new(83.74, 0.0, 20.06),
                Vec3::new(24.50, 0.0, -82.55),
                Vec3::new(-24.50, 0.0, -82.55),
                Vec3::new(-83.74, 0.0, 20.06),
                Vec3::new(-59.24, 0.0, 62.49),
            ],
            platform_home_points: [
                Vec3::new(74.91, 205.0, 69.65),
                Vec3::new(97.77, 205.0, 30.05),
                Vec3::new(22.86, 205.0, -99.70),
                Vec3::new(-22.86, 205.0, -99.70),
                Vec3::new(-97.77, 205.0, 30.05),
                Vec3::new(-74.91, 205.0, 69.65),
            ],
            home_height: 205.0,
            short_leg_length: 70.0,
            long_leg_length: 202.42,
            arms_outward: true,
            min_angle_even_deg: 190.027,
            max_angle_even_deg: 301.348,
            min_angle_odd_deg: 58.45,
            max_angle_odd_deg: 169.98,
            clamp_margin_deg: 5.0,
            max_rotation_amplitude: 20.0,
            max_rotation_bias: 20.0,
            max_translation_amplitude: 20.0,
            max_translation_bias: 20.0,
        }
    }

    /// The AX-18 platform: 36 mm actuator arms, 137.5 mm pushrods,
    /// 140 mm home height, arms pointing inward.
    pub fn ax18() -> Self {
        Self {
            base_points: [
                Vec3::new(33.29, 0.0, 74.87),
                Vec3::new(81.48, 0.0, -8.61),
                Vec3::new(48.19, 0.0, -66.26),
                Vec3::new(-48.19, 0.0, -66.26),
                Vec3::new(-81.48, 0.0, -8.61),
                Vec3::new(-33.29, 0.0, 74.87),
            ],
            platform_home_points: [
                Vec3::new(5.50, 140.0, 74.72),
                Vec3::new(67.46, 140.0, -32.60),
                Vec3::new(61.96, 140.0, -42.12),
                Vec3::new(-61.96, 140.0, -42.12),
                Vec3::new(-67.46, 140.0, -32.60),
                Vec3::new(-5.50, 140.0, 74.72),
            ],
            home_height: 140.0,
            short_leg_length: 36.0,
            long_leg_length: 137.5,
            arms_outward: false,
            min_angle_even_deg: 73.9453125,
            max_angle_even_deg: 176.484375,
            min_angle_odd_deg: 183.515625,
            max_angle_odd_deg: 286.0546875,
            clamp_margin_deg: 5.0,
            max_rotation_amplitude: 15.0,
            max_rotation_bias: 15.0,
            max_translation_amplitude: 15.0,
            max_translation_bias: 15.0,
        }
    }

    pub fn from_robot(robot: RobotType) -> Self {
        match robot {
            RobotType::Mx64 => Self::mx64(),
            RobotType::Ax18 => Self::ax18(),
        }
    }

    /// Checks the geometry for values the solvers cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.home_height <= 0.0 {
            return Err("Home height must be greater than 0.".to_string());
        }
        if self.short_leg_length <= 0.0 {
            return Err("Short leg length must be greater than 0.".to_string());
        }
        if self.long_leg_length <= 0.0 {
            return Err("Long leg length must be greater than 0.".to_string());
        }
        if self.max_angle_even_deg <= self.min_angle_even_deg {
            return Err("Even motor angle limits must satisfy max > min.".to_string());
        }
        if self.max_angle_odd_deg <= self.min_angle_odd_deg {
            return Err("Odd motor angle limits must satisfy max > min.".to_string());
        }
        if self.clamp_margin_deg < 0.0 {
            return Err("Clamp margin cannot be negative.".to_string());
        }
        let motion_limits = [
            self.max_rotation_amplitude,
            self.max_rotation_bias,
            self.max_translation_amplitude,
            self.max_translation_bias,
        ];
        if motion_limits.iter().any(|limit| *limit < 0.0) {
            return Err("Motion limits cannot be negative.".to_string());
        }
        let even_span = self.max_angle_even_deg - self.min_angle_even_deg;
        let odd_span = self.max_angle_odd_deg - self.min_angle_odd_deg;
        if 2.0 * self.clamp_margin_deg >= even_span.min(odd_span) {
            return Err("Clamp margin must be less than half the angle span.".to_string());
        }
        Ok(())
    }

    /// The (min, max) angle limits in degrees for the given motor index.
    pub fn angle_limits(&self, motor: usize) -> (f32, f32) {
        if motor % 2 == 0 {
            (self.min_angle_even_deg, self.max_angle_even_deg)
        } else {
            (self.min_angle_odd_deg, self.max_angle_odd_deg)
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::mx64()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometry:")?;
        writeln!(f, "  Home height: {:.2} mm", self.home_height)?;
        writeln!(f, "  Short leg: {:.2} mm", self.short_leg_length)?;
        writeln!(f, "  Long leg: {:.2} mm", self.long_leg_length)?;
        writeln!(f, "  Max rotation amp: {:.2} deg", self.max_rotation_amplitude)?;
        writeln!(f, "  Max translation amp: {:.2} mm", self.max_translation_amplitude)?;
        writeln!(f, "  Base points:")?;
        for (i, p) in self.base_points.iter().enumerate() {
            writeln!(f, "    [{}]: ({:.2}, {:.2}, {:.2})", i, p.x, p.y, p.z)?;
        }
        writeln!(f, "  Platform points (home):")?;
        for (i, p) in self.platform_home_points.iter().enumerate() {
            writeln!(f, "    [{}]: ({:.2}, {:.2}, {:.2})", i, p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
