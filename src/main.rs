//! Shadowcast demo entry point
//!
//! Loads a scene (JSON path as first argument, built-in sandbox otherwise),
//! builds one frame of shadow geometry and logs what each light pass would
//! draw.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shadowcast::renderer::{Compositor, LightPassRenderer};
    use shadowcast::{DebugRecorder, Light, Scene, ShadowGeometry, ShadowSettings};

    /// Stands in for the GPU: reports each pass instead of drawing it
    struct LoggingRenderer;

    impl LightPassRenderer for LoggingRenderer {
        fn draw_shadow_mask(&mut self, light_index: usize, light: &Light, geometry: &ShadowGeometry) {
            let counts = geometry.counts();
            log::info!(
                "Light {} at ({:.2}, {:.2}) h={:.2}: {} shadow vertices, {} blur vertices",
                light_index,
                light.position.x,
                light.position.y,
                light.height,
                counts.vertices,
                counts.blur_vertices
            );
        }

        fn composite(&mut self, lights: &[Light]) {
            log::info!("Compositing {} lights", lights.len());
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Shadowcast starting...");

    let scene = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Scene::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(scene) => scene,
                Err(e) => {
                    log::error!("Failed to load scene {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => Scene::demo(),
    };

    let settings = ShadowSettings::default();
    let mut compositor = Compositor::new(settings.clone());
    let stats = compositor.render_frame(&scene, &mut LoggingRenderer);
    log::info!(
        "Frame done: {} lights, {} vertices, {} blur vertices",
        stats.lights,
        stats.vertices,
        stats.blur_vertices
    );

    if let Some(light) = scene.lights.first() {
        let mut recorder = DebugRecorder::new();
        ShadowGeometry::new().recompute_recorded(light, &scene.occluders, &settings, &mut recorder);
        for line in recorder.lines() {
            log::debug!("{}", line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
