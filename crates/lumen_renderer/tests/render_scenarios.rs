//! End-to-end renders through the tiled driver.
//!
//! Colors are chosen so every averaged sample is exact in f32, making the
//! expected pixels exact as well.

use lumen_renderer::{
    color_to_rgb, render, scenes, AaRect, BvhNode, CameraSettings, Color, Material, Primitive,
    RenderContext, RenderError, RenderSettings, Scene, Sphere, TileGrid, Vec3,
};

fn settings(width: u32, height: u32, tiles: TileGrid) -> RenderSettings {
    RenderSettings {
        image_width: width,
        image_height: height,
        samples_per_pixel: 4,
        max_depth: 8,
        background: Color::ZERO,
        tiles,
        seed: Some(42),
    }
}

#[test]
fn full_frame_light_gives_quantized_emission() {
    let emission = Color::new(0.25, 0.5, 1.0);
    let mut scene = Scene::new();
    let light = scene.add_material(Material::diffuse_light(emission));
    scene.add(AaRect::xy(-10.0, 10.0, -10.0, 10.0, -1.0, light));

    let camera = CameraSettings::new().with_lens(90.0, 0.0, 1.0).build();
    let ctx = RenderContext::new(scene, camera, settings(8, 8, TileGrid::new(2, 2)));

    let image = render(&ctx).unwrap();
    let expected = color_to_rgb(emission);
    assert_eq!(expected, [128, 181, 255]);
    assert!(image.pixels().iter().all(|&p| p == expected));
}

#[test]
fn empty_scene_gives_quantized_background() {
    let background = Color::new(0.25, 0.0, 1.0);
    let camera = CameraSettings::new().build();
    let mut settings = settings(12, 6, TileGrid::new(3, 2));
    settings.background = background;

    let image = render(&RenderContext::new(Scene::new(), camera, settings)).unwrap();
    assert_eq!((image.width(), image.height()), (12, 6));
    assert!(image.pixels().iter().all(|&p| p == [128, 0, 255]));
}

#[test]
fn sky_background_with_lens_and_shutter() {
    let background = Color::new(0.5, 0.7, 1.0);
    let camera = CameraSettings::new()
        .with_position(Vec3::new(3.0, 2.0, 4.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(30.0, 0.5, 5.0)
        .with_aspect_ratio(2.0)
        .with_shutter(0.25, 0.75)
        .build();
    let mut settings = settings(16, 8, TileGrid::new(4, 2));
    settings.background = background;

    let image = render(&RenderContext::new(Scene::new(), camera, settings)).unwrap();
    assert!(image.pixels().iter().all(|&p| p == [181, 214, 255]));
}

fn mirror_scene() -> Scene {
    let mut scene = Scene::new();
    let mirror = scene.add_material(Material::metal(Color::splat(0.5), 0.0));
    let light = scene.add_material(Material::diffuse_light(Color::new(1.0, 0.5, 0.25)));
    scene.add(Sphere::new(Vec3::ZERO, 1.0, mirror));
    scene.add(AaRect::xy(-100.0, 100.0, -100.0, 100.0, 10.0, light));
    scene
}

fn mirror_context(seed: u64) -> RenderContext {
    let camera = CameraSettings::new()
        .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 5.0)
        .build();
    let mut settings = settings(9, 9, TileGrid::new(3, 3));
    settings.seed = Some(seed);
    RenderContext::new(mirror_scene(), camera, settings)
}

#[test]
fn mirror_sphere_reflects_light_behind_camera() {
    let image = render(&mirror_context(7)).unwrap();

    let expected = color_to_rgb(Color::splat(0.5) * Color::new(1.0, 0.5, 0.25));
    assert_eq!(image.get(4, 4), expected);
}

#[test]
fn fixed_seed_is_reproducible() {
    let first = render(&mirror_context(11)).unwrap();
    let second = render(&mirror_context(11)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cornell_box_renders_light() {
    let mut scene = Scene::new();
    scenes::cornell_box(&mut scene);
    let camera = CameraSettings::new()
        .with_position(Vec3::new(0.0, 0.0, -800.0), Vec3::ZERO, Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .build();

    let image = render(&RenderContext::new(scene, camera, settings(16, 16, TileGrid::new(4, 4))))
        .unwrap();

    // The light is visible near the top edge of the frame
    let top_rows = &image.pixels()[..16 * 3];
    assert!(top_rows.iter().any(|&p| p == [255, 255, 255]));
}

#[test]
fn bvh_scene_matches_list_scene() {
    // Spheres far apart: every camera ray hits at most one, so the traversal
    // order cannot change the random stream
    let build = |use_bvh: bool| {
        let mut scene = Scene::new();
        let light = scene.add_material(Material::diffuse_light(Color::new(0.5, 0.25, 1.0)));
        let spheres: Vec<Primitive> = (0..4)
            .map(|i| Sphere::new(Vec3::new(-3.0 + 2.0 * i as f32, 0.0, -6.0), 0.5, light).into())
            .collect();
        if use_bvh {
            scene.add(BvhNode::build(spheres, 0.0, 1.0));
        } else {
            for sphere in spheres {
                scene.add(sphere);
            }
        }
        let camera = CameraSettings::new().with_aspect_ratio(2.0).build();
        RenderContext::new(scene, camera, settings(16, 8, TileGrid::new(2, 2)))
    };

    assert_eq!(render(&build(true)).unwrap(), render(&build(false)).unwrap());
}

#[test]
fn uneven_tiles_fail_before_rendering() {
    let ctx = RenderContext::new(
        Scene::new(),
        CameraSettings::new().build(),
        settings(10, 10, TileGrid::new(3, 3)),
    );
    let err = render(&ctx).unwrap_err();
    assert!(matches!(err, RenderError::TileGrid { columns: 3, rows: 3, .. }));
}
