//! Surface scattering materials.

use crate::hittable::HitRecord;
use crate::sampling::random_unit_vector;
use crate::gen_f32;
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Fractional color multiplier applied to light through this event
    pub attenuation: Color,
    /// The outgoing ray
    pub ray: Ray,
}

/// Surface material, a closed set of scattering behaviors.
///
/// Scattering is one stochastic outcome per shading event; effects like
/// partial reflection emerge from averaging many samples per pixel.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Diffuse surface scattering around the normal
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` perturbs the mirror direction
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive surface (glass, water)
    Dielectric { refractive_index: f32 },
}

impl Material {
    /// Create a Lambertian (diffuse) material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material.
    ///
    /// `fuzz` is the roughness, 0.0 = perfect mirror; values above 1.0
    /// are silently clamped to 1.0.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a Dielectric material.
    ///
    /// `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond.
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray at a hit point.
    ///
    /// Returns Some(Scatter) if the ray scatters, or None if it is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(direction) {
                    direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: *albedo,
                    ray: Ray::new(rec.p, direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction.normalize(), rec.normal);
                let direction = reflected + *fuzz * random_unit_vector(rng);

                // Fuzzed rays that dip below the surface are not filtered
                // here; they die on the next bounce inside the sphere.
                Some(Scatter {
                    attenuation: *albedo,
                    ray: Ray::new(rec.p, direction),
                })
            }
            Material::Dielectric { refractive_index } => {
                let relative_index = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    *refractive_index
                };

                let unit_direction = ray_in.direction.normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = relative_index * sin_theta > 1.0;
                let direction = if cannot_refract
                    || reflectance(cos_theta, relative_index) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, relative_index)
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    ray: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with the given relative index.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// True if every component is below 1e-8 in magnitude.
#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn hit_at(normal: Vec3, front_face: bool) -> HitRecord<'static> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face,
            ..HitRecord::default()
        }
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        let mat = Material::metal(Color::ONE, 1.5);
        match mat {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => panic!("expected metal"),
        }

        let mat = Material::metal(Color::ONE, 0.3);
        match mat {
            Material::Metal { fuzz, .. } => assert_eq!(fuzz, 0.3),
            _ => panic!("expected metal"),
        }
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-9, 1e-7)));
    }

    #[test]
    fn test_lambertian_never_scatters_near_zero() {
        let mat = Material::lambertian(Color::new(0.5, 0.5, 0.5));
        let rec = hit_at(Vec3::new(0.0, 0.0, 1.0), true);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));

        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(scatter.ray.direction.length_squared() > 1e-8);
            assert_eq!(scatter.attenuation, Color::new(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn test_metal_always_scatters() {
        // Fully fuzzed metal at grazing incidence can produce directions
        // below the horizon; those still scatter (die on the next bounce)
        let mat = Material::metal(Color::ONE, 1.0);
        let rec = hit_at(Vec3::new(0.0, 0.0, 1.0), true);
        let ray = Ray::new(
            Vec3::new(-1.0, 0.0, 0.01),
            Vec3::new(1.0, 0.0, -0.01),
        );

        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..1000 {
            assert!(mat.scatter(&ray, &rec, &mut rng).is_some());
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Material::metal(Color::ONE, 0.0);
        let rec = hit_at(Vec3::new(0.0, 0.0, 1.0), true);
        // 45 degree incidence in the xz plane
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));

        let mut rng = SmallRng::seed_from_u64(17);
        let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((scatter.ray.direction.normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn test_dielectric_refraction_obeys_snell() {
        let mat = Material::dielectric(1.5);
        let n = Vec3::new(0.0, 0.0, 1.0);
        let rec = hit_at(n, true);
        let dir = Vec3::new(1.0, 0.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), dir);

        // A draw close to 1.0 never triggers the Schlick reflection branch
        let mut rng = StepRng::new(u64::MAX, 0);
        let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();

        let out = scatter.ray.direction.normalize();
        // sin(theta') = (1/1.5) * sin(theta)
        let sin_in = (1.0f32 - dir.dot(n).powi(2)).sqrt();
        let expected_sin = sin_in / 1.5;
        let sin_out = (out - out.dot(n) * n).length();
        assert!((sin_out - expected_sin).abs() < 1e-4);
        // Refracted ray continues into the surface
        assert!(out.z < 0.0);
        assert_eq!(scatter.attenuation, Color::ONE);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Material::dielectric(1.5);
        let n = Vec3::new(0.0, 0.0, 1.0);
        // Exiting glass: relative index 1.5, sin(theta) = 0.8 exceeds the
        // critical angle, so the ray must reflect even on a high draw
        let rec = hit_at(n, false);
        let dir = Vec3::new(0.8, 0.0, -0.6);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), dir);

        let mut rng = StepRng::new(u64::MAX, 0);
        let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();

        let expected = Vec3::new(0.8, 0.0, 0.6);
        assert!((scatter.ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_dielectric_schlick_reflection_on_low_draw() {
        let mat = Material::dielectric(1.5);
        let n = Vec3::new(0.0, 0.0, 1.0);
        let rec = hit_at(n, true);
        let dir = Vec3::new(1.0, 0.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), dir);

        // A zero draw always loses to the reflectance probability
        let mut rng = StepRng::new(0, 0);
        let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();

        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((scatter.ray.direction.normalize() - expected).length() < 1e-5);
    }
}
