//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Interval, Ray, Vec3};

/// Placeholder material for HitRecord::default(). A populated record
/// always overwrites this reference.
static PLACEHOLDER_MATERIAL: Material = Material::Lambertian { albedo: Vec3::ZERO };

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &PLACEHOLDER_MATERIAL,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    /// `outward_normal` must be a unit vector.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given open interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_front() {
        // Ray direction opposes the outward normal: front face, normal kept
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let n = Vec3::new(0.0, 0.0, 1.0);

        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, n);

        assert!(rec.front_face);
        assert_eq!(rec.normal, n);
    }

    #[test]
    fn test_face_normal_back() {
        // Ray direction along the outward normal: back face, normal flipped
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let n = Vec3::new(0.0, 0.0, 1.0);

        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, n);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -n);
    }
}
