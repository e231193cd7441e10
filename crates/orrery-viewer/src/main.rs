use anyhow::Result;
use winit::dpi::LogicalSize;

use orrery_engine::camera::{CameraMatrix, OrbitPath, compute_view_basis};
use orrery_engine::core::{App, AppControl, FrameCtx};
use orrery_engine::device::GpuInit;
use orrery_engine::logging::{LoggingConfig, init_logging};
use orrery_engine::render::{FrameUniforms, QuadRenderer};
use orrery_engine::window::{Runtime, RuntimeConfig};

// The shader pair is opaque content as far as the engine is concerned; the
// viewer owns it and hands it over as plain text.
const VERTEX_SHADER: &str = include_str!("shaders/vertex.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/fragment.wgsl");

/// The application: an orbiting camera over a raymarched scene.
struct OrbitViewer {
    orbit: OrbitPath,
    /// Reused output buffer; fully overwritten every frame.
    camera: CameraMatrix,
    /// Built on the first frame, once the device exists.
    renderer: Option<QuadRenderer>,
}

impl OrbitViewer {
    fn new() -> Self {
        Self {
            orbit: OrbitPath::default(),
            camera: CameraMatrix::default(),
            renderer: None,
        }
    }
}

impl App for OrbitViewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.renderer.is_none() {
            match QuadRenderer::new(
                ctx.gpu.device(),
                ctx.gpu.surface_format(),
                VERTEX_SHADER,
                FRAGMENT_SHADER,
            ) {
                Ok(renderer) => {
                    log::info!("shader program linked, bindings: {:?}", renderer.bindings());
                    self.renderer = Some(renderer);
                }
                Err(e) => {
                    // Fatal to startup: surface the full diagnostic to main.
                    ctx.runtime.abort(e.into());
                    return AppControl::Continue;
                }
            }
        }

        let viewport = ctx.viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to draw this frame.
            return AppControl::Continue;
        }

        let timestamp = ctx.time.timestamp_millis();
        let params = self.orbit.parameters_at(timestamp, viewport.aspect_ratio());
        if let Err(e) = compute_view_basis(&params, &mut self.camera) {
            // Unreachable on the built-in orbit path; skip the frame rather
            // than upload a stale matrix.
            log::error!("camera basis rejected: {e}");
            return AppControl::Continue;
        }

        let uniforms = FrameUniforms::new(
            self.camera,
            [viewport.width, viewport.height],
            timestamp as i32,
        );

        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };
        ctx.render(wgpu::Color::BLACK, |rctx, target| {
            renderer.draw(rctx, target, &uniforms);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "orrery".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
        },
        GpuInit::default(),
        OrbitViewer::new(),
    )
}
