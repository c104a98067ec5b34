//! Built-in scenes and named material presets.

use crate::{AaRect, Culling, Material, MeshGeometry, MovingSphere, Scene, Sphere};
use lumen_core::{MaterialPreset, Mesh, SceneKind};
use lumen_math::{Color, Vec3};

/// Material for a named preset.
pub fn material_for_preset(preset: MaterialPreset) -> Material {
    match preset {
        MaterialPreset::Diffuse => Material::lambertian(Color::splat(0.73)),
        MaterialPreset::Metal => Material::metal(Color::splat(0.8), 0.3),
        MaterialPreset::Mirror => Material::metal(Color::splat(0.8), 0.0),
        MaterialPreset::Glass => Material::dielectric(1.5),
        MaterialPreset::Light => Material::diffuse_light(Color::splat(15.0)),
    }
}

/// Add the built-in geometry for `kind`. Moving objects span `[time0, time1]`.
pub fn populate(scene: &mut Scene, kind: SceneKind, time0: f32, time1: f32) {
    match kind {
        SceneKind::Cornell => cornell_box(scene),
        SceneKind::Spheres => spheres(scene, time0, time1),
        SceneKind::Empty => {}
    }
    log::info!("Scene '{:?}': {} objects", kind, scene.object_count());
}

/// Add a loaded mesh with a preset material. Returns its triangle count.
pub fn add_mesh(scene: &mut Scene, mesh: &Mesh, preset: MaterialPreset, culling: Culling) -> usize {
    let material = scene.add_material(material_for_preset(preset));
    let geometry = MeshGeometry::new(mesh, material, culling);
    let count = geometry.triangle_count();
    scene.add(geometry);
    count
}

/// The Cornell room, shifted so the camera at (0, 0, -800) looks at its center.
///
/// x and y span [-278, 277], z spans [-300, 255]; the opening faces -z.
pub fn cornell_box(scene: &mut Scene) {
    let red = scene.add_material(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = scene.add_material(Material::lambertian(Color::splat(0.73)));
    let green = scene.add_material(Material::lambertian(Color::new(0.12, 0.45, 0.15)));
    let light = scene.add_material(Material::diffuse_light(Color::splat(15.0)));

    let (lo, hi) = (-278.0, 277.0);
    let (back, front) = (-300.0, 255.0);

    scene.add(AaRect::yz(lo, hi, back, front, hi, green));
    scene.add(AaRect::yz(lo, hi, back, front, lo, red));
    scene.add(AaRect::xz(-65.0, 65.0, -123.0, 82.0, 276.0, light));
    scene.add(AaRect::xz(lo, hi, back, front, hi, white));
    scene.add(AaRect::xz(lo, hi, back, front, lo, white));
    scene.add(AaRect::xy(lo, hi, lo, hi, front, white));
}

/// Three spheres (glass, diffuse, metal) on a ground sphere, plus one moving sphere.
pub fn spheres(scene: &mut Scene, time0: f32, time1: f32) {
    let ground = scene.add_material(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    let glass = scene.add_material(Material::dielectric(1.5));
    let diffuse = scene.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    let metal = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    let blurred = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let light = scene.add_material(Material::diffuse_light(Color::splat(4.0)));

    scene.add(Sphere::new(Vec3::new(0.0, -10_100.0, 0.0), 10_000.0, ground));
    scene.add(Sphere::new(Vec3::new(-220.0, 0.0, 0.0), 100.0, glass));
    scene.add(Sphere::new(Vec3::ZERO, 100.0, diffuse));
    scene.add(Sphere::new(Vec3::new(220.0, 0.0, 0.0), 100.0, metal));
    scene.add(MovingSphere::new(
        (Vec3::new(-110.0, -60.0, -150.0), time0),
        (Vec3::new(-110.0, -20.0, -150.0), time1),
        40.0,
        blurred,
    ));
    scene.add(Sphere::new(Vec3::new(0.0, 600.0, -200.0), 250.0, light));
}
