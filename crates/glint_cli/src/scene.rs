//! Reference scenes.

use clap::ValueEnum;
use glint_render::{Camera, Material, Sphere, SphereList, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Which reference scene to build.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneKind {
    /// Ground plane sphere plus a lambertian/dielectric/metal trio
    Simple,
    /// The 22x22 random-sphere field with three feature spheres
    Cover,
}

/// Build the world and a camera positioned for it.
///
/// The camera carries view and lens settings only; image size and
/// quality are applied by the caller before rendering.
pub fn build(kind: SceneKind, seed: u64) -> (SphereList, Camera) {
    match kind {
        SceneKind::Simple => simple(),
        SceneKind::Cover => cover(seed),
    }
}

fn simple() -> (SphereList, Camera) {
    let mut world = SphereList::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Material::lambertian(Vec3::new(0.8, 0.8, 0.0)),
    ));
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.2),
        0.5,
        Material::lambertian(Vec3::new(0.1, 0.2, 0.5)),
    ));
    world.add(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        Material::dielectric(1.5),
    ));
    world.add(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.3),
    ));

    let camera = Camera::new()
        .with_view(
            Vec3::new(-2.0, 2.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
        )
        .with_lens(20.0, 0.0, 3.4);

    (world, camera)
}

fn cover(seed: u64) -> (SphereList, Camera) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut world = SphereList::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Vec3::new(0.5, 0.5, 0.5)),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large feature spheres
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(&mut rng) * random_color(&mut rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = Vec3::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                Material::metal(albedo, 0.5 * rng.gen::<f32>())
            } else {
                Material::dielectric(1.5)
            };

            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::dielectric(1.5),
    ));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Vec3::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Vec3::new(0.7, 0.6, 0.5), 0.0),
    ));

    let camera = Camera::new()
        .with_view(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    (world, camera)
}

fn random_color(rng: &mut SmallRng) -> Vec3 {
    Vec3::new(rng.gen(), rng.gen(), rng.gen())
}
