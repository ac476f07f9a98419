mod mat3;
mod plane;
mod scalar;
mod vec3;

pub use mat3::Mat3;
pub use plane::{distance_point_to_plane, project_point_onto_plane};
pub use scalar::{deg_to_rad, rad_to_deg, soft_clamp};
pub use vec3::Vec3;
