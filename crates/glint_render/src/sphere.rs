//! Sphere primitive and the scalar sphere list.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive owning its material.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.material = &self.material;

        true
    }
}

/// An append-only list of spheres, the "world" of a scene.
#[derive(Debug, Clone, Default)]
pub struct SphereList {
    spheres: Vec<Sphere>,
}

impl SphereList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere to the list.
    pub fn add(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Iterate over the spheres in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sphere> {
        self.spheres.iter()
    }
}

impl Hittable for SphereList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if sphere.hit(ray, interval, rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}
