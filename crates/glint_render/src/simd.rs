//! SIMD-packed sphere list.
//!
//! Spheres are packed four at a time into lane structure-of-arrays groups
//! so a whole group can be intersection-tested in one vectorized pass.
//! Behind the `Hittable` contract this is purely a performance variant of
//! `SphereList`; results must match the scalar scan.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SphereList,
};
use glint_math::{Interval, Ray, Vec3};
use wide::{f32x4, CmpGe};

const LANES: usize = 4;

/// Four sphere centers and radii in lane structure-of-arrays form.
#[derive(Debug, Clone, Copy)]
struct SphereGroup {
    cx: f32x4,
    cy: f32x4,
    cz: f32x4,
    radius: f32x4,
}

impl SphereGroup {
    /// A group with no valid lanes. Zero-radius lanes can never hit, but
    /// lane validity is still bounded by the list's logical length.
    fn empty() -> Self {
        Self {
            cx: f32x4::ZERO,
            cy: f32x4::ZERO,
            cz: f32x4::ZERO,
            radius: f32x4::ZERO,
        }
    }
}

/// Write a single lane of a 4-wide value.
#[inline]
fn set_lane(v: f32x4, x: f32, lane: usize) -> f32x4 {
    let mut a = v.to_array();
    a[lane] = x;
    f32x4::from(a)
}

/// An append-only sphere list packed in groups of four for vectorized
/// hit testing. The last group may be partially filled; `len` tracks the
/// logical sphere count separately from group capacity.
///
/// Materials live in a parallel owned vector indexed by insertion order,
/// giving each one a stable address the hit record can borrow.
#[derive(Debug, Clone, Default)]
pub struct SphereList4 {
    groups: Vec<SphereGroup>,
    materials: Vec<Material>,
    len: usize,
}

impl SphereList4 {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            materials: Vec::new(),
            len: 0,
        }
    }

    /// Append a sphere, writing its center and radius into the next free
    /// lane of the current (or a newly allocated) group.
    pub fn add(&mut self, center: Vec3, radius: f32, material: Material) {
        let lane = self.len % LANES;
        if lane == 0 {
            self.groups.push(SphereGroup::empty());
        }

        let group_idx = self.len / LANES;
        let group = &mut self.groups[group_idx];
        group.cx = set_lane(group.cx, center.x, lane);
        group.cy = set_lane(group.cy, center.y, lane);
        group.cz = set_lane(group.cz, center.z, lane);
        group.radius = set_lane(group.radius, radius.max(0.0), lane);

        self.materials.push(material);
        self.len += 1;
    }

    /// Pack an existing scalar list.
    pub fn from_list(list: &SphereList) -> Self {
        let mut packed = Self::new();
        for sphere in list.iter() {
            packed.add(sphere.center(), sphere.radius(), sphere.material().clone());
        }
        packed
    }

    /// Get the logical number of spheres.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Center of the sphere at `index`.
    fn center(&self, index: usize) -> Vec3 {
        let group = &self.groups[index / LANES];
        let lane = index % LANES;
        Vec3::new(
            group.cx.to_array()[lane],
            group.cy.to_array()[lane],
            group.cz.to_array()[lane],
        )
    }

    /// Radius of the sphere at `index`.
    fn radius(&self, index: usize) -> f32 {
        self.groups[index / LANES].radius.to_array()[index % LANES]
    }
}

impl Hittable for SphereList4 {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let a = ray.direction.length_squared();
        let va = f32x4::splat(a);
        let ox = f32x4::splat(ray.origin.x);
        let oy = f32x4::splat(ray.origin.y);
        let oz = f32x4::splat(ray.origin.z);
        let dx = f32x4::splat(ray.direction.x);
        let dy = f32x4::splat(ray.direction.y);
        let dz = f32x4::splat(ray.direction.z);

        let mut closest = ray_t.max;
        let mut best: Option<(usize, f32)> = None;

        for (g, group) in self.groups.iter().enumerate() {
            let ocx = ox - group.cx;
            let ocy = oy - group.cy;
            let ocz = oz - group.cz;

            // Same operation order as the scalar test, so lane results are
            // bit-identical to four independent scalar evaluations
            let half_b = ocx * dx + ocy * dy + ocz * dz;
            let c = ocx * ocx + ocy * ocy + ocz * ocz - group.radius * group.radius;
            let discriminant = half_b * half_b - va * c;

            // Fast reject: no lane in this group can intersect
            if !discriminant.cmp_ge(f32x4::ZERO).any() {
                continue;
            }

            let sqrtd = discriminant.max(f32x4::ZERO).sqrt();
            let near = (-half_b - sqrtd) / va;
            let far = (-half_b + sqrtd) / va;

            let discriminant = discriminant.to_array();
            let near = near.to_array();
            let far = far.to_array();

            // Lanes past the logical count must never report a hit
            let lanes = LANES.min(self.len - g * LANES);
            for lane in 0..lanes {
                if discriminant[lane] < 0.0 {
                    continue;
                }

                let window = Interval::new(ray_t.min, closest);
                let mut root = near[lane];
                if !window.surrounds(root) {
                    root = far[lane];
                    if !window.surrounds(root) {
                        continue;
                    }
                }

                closest = root;
                best = Some((g * LANES + lane, root));
            }
        }

        let Some((index, root)) = best else {
            return false;
        };

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center(index)) / self.radius(index);
        rec.set_face_normal(ray, outward_normal);
        rec.material = &self.materials[index];

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::random_unit_vector;
    use crate::{gen_f32, Sphere};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn five_sphere_world() -> SphereList {
        // Five spheres: one full group plus a partial group of one
        let mut list = SphereList::new();
        list.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Vec3::new(0.1, 0.2, 0.5)),
        ));
        list.add(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Material::lambertian(Vec3::new(0.8, 0.8, 0.0)),
        ));
        list.add(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Material::dielectric(1.5),
        ));
        list.add(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.1),
        ));
        list.add(Sphere::new(
            Vec3::new(0.3, 0.8, -2.0),
            0.7,
            Material::metal(Vec3::new(0.9, 0.9, 0.9), 0.0),
        ));
        list
    }

    #[test]
    fn test_packing_tracks_logical_count() {
        let packed = SphereList4::from_list(&five_sphere_world());
        assert_eq!(packed.len(), 5);
        assert_eq!(packed.groups.len(), 2);
        assert_eq!(packed.materials.len(), 5);
    }

    #[test]
    fn test_empty_list_never_hits() {
        let packed = SphereList4::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(!packed.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_differential_against_scalar_scan() {
        let scalar = five_sphere_world();
        let packed = SphereList4::from_list(&scalar);

        let mut rng = SmallRng::seed_from_u64(99);
        let interval = Interval::new(0.001, f32::INFINITY);

        for _ in 0..1000 {
            let origin = Vec3::new(
                gen_f32(&mut rng) * 6.0 - 3.0,
                gen_f32(&mut rng) * 6.0 - 3.0,
                gen_f32(&mut rng) * 6.0 - 3.0,
            );
            let ray = Ray::new(origin, random_unit_vector(&mut rng));

            let mut scalar_rec = HitRecord::default();
            let mut packed_rec = HitRecord::default();
            let scalar_hit = scalar.hit(&ray, interval, &mut scalar_rec);
            let packed_hit = packed.hit(&ray, interval, &mut packed_rec);

            assert_eq!(scalar_hit, packed_hit, "hit disagreement for {ray:?}");
            if scalar_hit {
                let tolerance = 1e-3 * scalar_rec.t.abs().max(1.0);
                assert!(
                    (scalar_rec.t - packed_rec.t).abs() < tolerance,
                    "t mismatch: {} vs {}",
                    scalar_rec.t,
                    packed_rec.t
                );
                assert_eq!(scalar_rec.front_face, packed_rec.front_face);
                assert_eq!(scalar_rec.material, packed_rec.material);
            }
        }
    }

    #[test]
    fn test_partial_group_lane_hits() {
        // The fifth sphere sits alone in the second group; aim right at it
        let packed = SphereList4::from_list(&five_sphere_world());
        let ray = Ray::new(
            Vec3::new(0.3, 0.8, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
        );

        let mut rec = HitRecord::default();
        assert!(packed.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 3.3).abs() < 1e-3);
    }
}
