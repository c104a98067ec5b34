//! Turning a render job (config file plus CLI overrides) into renderer inputs.

use anyhow::{Context, Result};
use lumen_core::{load_object, RenderConfigFile};
use lumen_math::Vec3;
use lumen_renderer::{scenes, Camera, CameraSettings, Color, Culling, RenderSettings, Scene, TileGrid};

/// Render settings for a job.
pub fn render_settings(config: &RenderConfigFile) -> RenderSettings {
    let image = &config.image;
    let [columns, rows] = image.tiles;

    RenderSettings {
        samples_per_pixel: image.samples_per_pixel,
        max_depth: image.max_depth,
        background: Color::from_array(config.background),
        tiles: TileGrid::new(columns, rows),
        seed: image.seed,
        ..RenderSettings::with_aspect(image.width, image.aspect_ratio)
    }
}

/// Camera for a job, matching the image's aspect ratio.
pub fn camera(config: &RenderConfigFile) -> Camera {
    let cam = &config.camera;
    let [time0, time1] = cam.shutter;

    CameraSettings::new()
        .with_position(
            Vec3::from_array(cam.look_from),
            Vec3::from_array(cam.look_at),
            Vec3::from_array(cam.vup),
        )
        .with_lens(cam.vfov, cam.aperture, cam.focus_dist)
        .with_aspect_ratio(config.image.aspect_ratio)
        .with_shutter(time0, time1)
        .build()
}

/// Built-in scene plus every listed object.
pub fn build_scene(config: &RenderConfigFile) -> Result<Scene> {
    let [time0, time1] = config.camera.shutter;
    let mut scene = Scene::new();
    scenes::populate(&mut scene, config.scene, time0, time1);

    for object in &config.objects {
        let mesh = load_object(object)
            .with_context(|| format!("failed to load object {}", object.mesh.display()))?;
        let culling = if object.double_sided {
            Culling::DoubleSided
        } else {
            Culling::BackFace
        };
        let triangles = scenes::add_mesh(&mut scene, &mesh, object.material, culling);
        log::info!(
            "Added {} ({} triangles, {})",
            object.mesh.display(),
            triangles,
            object.material
        );
    }

    Ok(scene)
}
