//! Glint renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over sphere scenes with diffuse, metallic and
//! dielectric materials. Rendering is row-parallel with an independent,
//! seedable random stream per row, so output is deterministic for a given
//! seed regardless of thread count.

mod camera;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sampling;
mod simd;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, Material, Scatter};
pub use ppm::{encode_color, write_ppm, OutputError};
pub use renderer::{linear_to_gamma, ray_color, render, ImageBuffer};
pub use simd::SphereList4;
pub use sphere::{Sphere, SphereList};

/// Re-export math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};

use rand::RngCore;

/// Draw a uniform f32 in [0, 1) from the given stream.
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    use rand::Rng;
    rng.gen()
}
