//! Simple path tracer example.
//!
//! Renders a field of random spheres (one of them motion blurred) behind a
//! BVH and saves it to PPM.

use lumen_renderer::{
    output, render, BvhNode, CameraSettings, Color, Material, MovingSphere, Primitive,
    RenderContext, RenderSettings, Scene, Sphere, TileGrid, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let settings = RenderSettings {
        image_width: 800,
        image_height: 450,
        samples_per_pixel: 50,
        max_depth: 10,
        background: Color::new(0.7, 0.8, 1.0),
        tiles: TileGrid::for_workers(8, 800, 450)?,
        seed: Some(2024),
    };

    let camera = CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(800.0 / 450.0)
        .with_shutter(0.0, 1.0)
        .build();

    let image = render(&RenderContext::new(scene, camera, settings))?;

    let filename = "output.ppm";
    output::save_image(filename, &image)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    let mut primitives: Vec<Primitive> = Vec::new();

    // Ground
    let ground = scene.add_material(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    primitives.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground).into());

    // Three main spheres
    let glass = scene.add_material(Material::dielectric(1.5));
    let brown = scene.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let steel = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    primitives.push(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass).into());
    primitives.push(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown).into());
    primitives.push(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, steel).into());

    // Small random spheres
    let mut rng = StdRng::seed_from_u64(7);

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            if choose_mat < 0.8 {
                // Diffuse, bouncing during the shutter
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                let material = scene.add_material(Material::lambertian(albedo));
                let lifted = center + Vec3::new(0.0, 0.5 * rng.gen::<f32>(), 0.0);
                primitives.push(MovingSphere::new((center, 0.0), (lifted, 1.0), 0.2, material).into());
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                    0.5 + 0.5 * rng.gen::<f32>(),
                );
                let material = scene.add_material(Material::metal(albedo, 0.5 * rng.gen::<f32>()));
                primitives.push(Sphere::new(center, 0.2, material).into());
            } else {
                // Glass
                primitives.push(Sphere::new(center, 0.2, glass).into());
            }
        }
    }

    println!("Created {} objects", primitives.len());
    scene.add(BvhNode::build(primitives, 0.0, 1.0));
    scene
}
