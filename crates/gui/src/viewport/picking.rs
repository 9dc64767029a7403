use glam::Vec3;

/// A ray in world space. The direction is not required to be normalized,
/// so `t` is measured in units of `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` passing through `target`
    pub fn through(origin: Vec3, target: Vec3) -> Self {
        Self {
            origin,
            direction: target - origin,
        }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box containing nothing; the identity for `include`
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    /// Compute AABB from a set of points
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::EMPTY, |mut aabb, p| {
            aabb.include(p);
            aabb
        })
    }

    /// Grow the box to contain `p`
    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Box grown by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// The 8 corners. Bit 0 selects max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }
}

/// Corner index pairs forming the 12 edges of a box from `Aabb::corners`
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7),
    (0, 2), (1, 3), (4, 6), (5, 7),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Ray-AABB intersection using the slab method.
/// Returns the ray parameter of the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if aabb.is_empty() {
        return None;
    }

    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the ray parameter if hit, or None if no intersection.
///
/// Barycentric bounds carry a small tolerance so that a ray through the
/// diagonal shared by the two triangles of a quad hits at least one of them.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    const BARY_TOLERANCE: f32 = 1e-5;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle, or the triangle is degenerate
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(-BARY_TOLERANCE..=1.0 + BARY_TOLERANCE).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < -BARY_TOLERANCE || u + v > 1.0 + BARY_TOLERANCE {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Ray-quad intersection. The quad is split into triangles (0,1,2) and (0,2,3).
pub fn ray_quad_intersect(ray: &Ray, corners: &[Vec3; 4]) -> Option<f32> {
    let [a, b, c, d] = *corners;
    match (
        ray_triangle_intersect(ray, a, b, c),
        ray_triangle_intersect(ray, a, c, d),
    ) {
        (Some(t0), Some(t1)) => Some(t0.min(t1)),
        (hit, None) | (None, hit) => hit,
    }
}

/// Result of picking a face of a quad mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceHit {
    /// Index of the face in the mesh
    pub face: usize,
    /// World-space hit point
    pub point: Vec3,
    /// Ray parameter of the hit
    pub distance: f32,
}

/// Closest point on the line `point + s * direction` to `ray`.
///
/// Used to slide a point along a fixed axis under the cursor. Returns None when
/// the line and the ray are (nearly) parallel.
pub fn closest_point_on_line(point: Vec3, direction: Vec3, ray: &Ray) -> Option<Vec3> {
    let n = direction.cross(ray.direction);
    let n2 = ray.direction.cross(n);
    let denom = direction.dot(n2);
    if denom.abs() < 1e-9 {
        return None;
    }
    let s = (ray.origin - point).dot(n2) / denom;
    Some(point + direction * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = unit_box();
        let hit = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray_aabb(&hit, &aabb), Some(4.0));

        let miss = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray_aabb(&miss, &aabb), None);

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(ray_aabb(&behind, &aabb), None);
    }

    #[test]
    fn test_ray_aabb_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray_aabb(&ray, &unit_box()), Some(1.0));
    }

    #[test]
    fn test_empty_aabb_never_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray_aabb(&ray, &Aabb::EMPTY), None);
    }

    #[test]
    fn test_aabb_corners_and_center() {
        let aabb = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 1.0)]);
        assert_eq!(aabb.center(), Vec3::new(0.0, 1.0, 2.0));
        let corners = aabb.corners();
        assert_eq!(corners[0], aabb.min);
        assert_eq!(corners[7], aabb.max);
        assert!(corners
            .iter()
            .all(|c| c.cmpge(aabb.min).all() && c.cmple(aabb.max).all()));
        for (a, b) in BOX_EDGES {
            // Box edges differ in exactly one coordinate
            let d = corners[a] - corners[b];
            let nonzero = [d.x, d.y, d.z].iter().filter(|v| **v != 0.0).count();
            assert_eq!(nonzero, 1);
        }
    }

    #[test]
    fn test_triangle_hit_reports_parameter() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 2.0), Vec3::new(0.0, 0.0, -2.0));
        let t = ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
        assert!((ray.at(t) - Vec3::new(0.2, 0.2, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_triangle_miss_outside_and_parallel() {
        let outside = Ray::new(Vec3::new(1.0, 1.0, 1.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersect(&outside, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());

        let parallel = Ray::new(Vec3::new(0.1, 0.1, 1.0), Vec3::X);
        assert!(ray_triangle_intersect(&parallel, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_quad_hit_on_shared_diagonal() {
        let quad = [
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        // The centroid lies exactly on the 0-2 diagonal
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray_quad_intersect(&ray, &quad).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_point_on_line() {
        // Line along +Z through the origin, ray along -X at height 2
        let ray = Ray::new(Vec3::new(5.0, 0.0, 2.0), Vec3::NEG_X);
        let p = closest_point_on_line(Vec3::ZERO, Vec3::Z, &ray).unwrap();
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);

        let parallel = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z);
        assert!(closest_point_on_line(Vec3::ZERO, Vec3::Z, &parallel).is_none());
    }
}
