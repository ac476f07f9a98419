use serde::{Deserialize, Serialize};

use super::Vec3;

/// A 3x3 matrix stored column-major: element (row, col) lives at
/// `m[col * 3 + row]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Mat3 {
    pub fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation about the world X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [
                1.0, 0.0, 0.0, //
                0.0, cos, sin, //
                0.0, -sin, cos,
            ],
        }
    }

    /// Rotation about the world Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [
                cos, 0.0, -sin, //
                0.0, 1.0, 0.0, //
                sin, 0.0, cos,
            ],
        }
    }

    /// Rotation about the world Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [
                cos, sin, 0.0, //
                -sin, cos, 0.0, //
                0.0, 0.0, 1.0,
            ],
        }
    }

    /// Combined rotation `Rz * Ry * Rx`: X applied first, then Y, then Z.
    /// All angles in radians.
    pub fn rotation_zyx(rx: f32, ry: f32, rz: f32) -> Self {
        Mat3::identity().rotated_z(rz).rotated_y(ry).rotated_x(rx)
    }

    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let mut out = [0.0f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.m[k * 3 + row] * other.m[col * 3 + k];
                }
                out[col * 3 + row] = sum;
            }
        }
        Mat3 { m: out }
    }

    pub fn rotated_x(&self, angle: f32) -> Mat3 {
        self.multiply(&Mat3::rotation_x(angle))
    }

    pub fn rotated_y(&self, angle: f32) -> Mat3 {
        self.multiply(&Mat3::rotation_y(angle))
    }

    pub fn rotated_z(&self, angle: f32) -> Mat3 {
        self.multiply(&Mat3::rotation_z(angle))
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.m;
        Mat3 {
            m: [
                m[0], m[3], m[6], //
                m[1], m[4], m[7], //
                m[2], m[5], m[8],
            ],
        }
    }

    pub fn transform(&self, v: &Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[3] * v.y + m[6] * v.z,
            m[1] * v.x + m[4] * v.y + m[7] * v.z,
            m[2] * v.x + m[5] * v.y + m[8] * v.z,
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: &Vec3, b: &Vec3) {
        assert!(a.distance_to(b) < 1e-5, "expected {:?}, got {:?}", b, a);
    }

    #[test]
    fn identity_leaves_vector_unchanged() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        assert_vec_close(&Mat3::identity().transform(&v), &v);
    }

    #[test]
    fn rotation_x_quarter_turn_maps_y_to_z() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        let v = Mat3::rotation_x(half_pi).transform(&Vec3::new(0.0, 1.0, 0.0));
        assert_vec_close(&v, &Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotation_y_quarter_turn_maps_z_to_x() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        let v = Mat3::rotation_y(half_pi).transform(&Vec3::new(0.0, 0.0, 1.0));
        assert_vec_close(&v, &Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_z_quarter_turn_maps_x_to_y() {
        let half_pi = std::f32::consts::FRAC_PI_2;
        let v = Mat3::rotation_z(half_pi).transform(&Vec3::new(1.0, 0.0, 0.0));
        assert_vec_close(&v, &Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn zyx_composition_matches_explicit_product() {
        let (rx, ry, rz) = (0.3, -0.7, 1.1);
        let composed = Mat3::rotation_zyx(rx, ry, rz);
        let explicit = Mat3::rotation_z(rz)
            .multiply(&Mat3::rotation_y(ry))
            .multiply(&Mat3::rotation_x(rx));
        for i in 0..9 {
            assert!((composed.m[i] - explicit.m[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn transpose_inverts_a_rotation() {
        let rot = Mat3::rotation_zyx(0.4, 0.2, -0.9);
        let product = rot.multiply(&rot.transpose());
        let identity = Mat3::identity();
        for i in 0..9 {
            assert!((product.m[i] - identity.m[i]).abs() < 1e-5);
        }
    }
}
