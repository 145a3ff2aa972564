//! Light transport and the parallel render scheduler.

use crate::{Camera, Color, HitRecord, Hittable};
use glint_math::{Interval, Ray};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// Shadow-acne epsilon: scattered rays ignore intersections closer than
/// this to their origin.
const T_MIN: f32 = 0.001;

/// SplitMix64 increment, used to decorrelate per-row seeds.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Compute the color seen by a ray.
///
/// Bounces the ray through scattering events until absorption, escape to
/// the background, or depth exhaustion. The bounce loop is explicit
/// rather than recursive so arbitrary depths cannot overflow the stack.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..max_depth {
        let mut rec = HitRecord::default();

        if !world.hit(&current, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
            // Escaped to the background
            return throughput * sky_gradient(&current);
        }

        match rec.material.scatter(&current, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                current = scatter.ray;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    // Depth exhausted: no light gathered
    Color::ZERO
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Image buffer of linear-light pixel colors, row-major from the top left.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// Render the scene, splitting rows across the rayon thread pool.
///
/// Each row is an exclusively owned slice of the output buffer, so no
/// synchronization is needed, and each row seeds its own random stream
/// from `seed`. Output is therefore identical for a given seed no matter
/// how many threads run.
pub fn render(camera: &mut Camera, world: &dyn Hittable, seed: u64) -> ImageBuffer {
    camera.initialize();

    let width = camera.image_width;
    let height = camera.image_height();
    info!(
        "rendering {}x{} at {} spp, max depth {}",
        width, height, camera.samples_per_pixel, camera.max_depth
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);
    let camera = &*camera;

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(j, row)| {
            let mut rng = SmallRng::seed_from_u64(
                seed ^ (j as u64).wrapping_mul(SEED_MIX),
            );

            for (i, pixel) in row.iter_mut().enumerate() {
                let mut color = Color::ZERO;
                for _ in 0..camera.samples_per_pixel {
                    let ray = camera.get_ray(i as u32, j as u32, &mut rng);
                    color += ray_color(&ray, world, camera.max_depth, &mut rng);
                }
                *pixel = color * camera.samples_scale();
            }
        });

    debug!("render finished in {:.2?}", start.elapsed());
    image
}
