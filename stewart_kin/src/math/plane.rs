use super::Vec3;

/// Signed distance from `point` to the plane through `plane_point` with unit
/// `normal`. Positive on the side the normal points toward.
pub fn distance_point_to_plane(point: &Vec3, plane_point: &Vec3, normal: &Vec3) -> f32 {
    point.sub(plane_point).dot(normal)
}

/// Orthogonal projection of `point` onto the plane through `plane_point` with
/// unit `normal`.
pub fn project_point_onto_plane(point: &Vec3, plane_point: &Vec3, normal: &Vec3) -> Vec3 {
    let distance = distance_point_to_plane(point, plane_point, normal);
    point.sub(&normal.scaled(distance))
}
