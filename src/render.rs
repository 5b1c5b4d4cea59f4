use crate::dom;
use hero_core::{
    BufferSize, DrawSurface, FrameView, MaterialConfig, ParticleField, SurfaceError,
    SurfaceOptions, Viewport,
};
use web_sys as web;

mod helpers;
mod points;

use helpers::MsaaTarget;
use points::{PointGeometry, PointResources, PointUniforms};

// ===================== WebGPU drawable surface =====================

pub struct GpuSurface {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // sRGB view of the swapchain format; pipeline and MSAA target use it
    view_format: wgpu::TextureFormat,
    sample_count: u32,
    msaa: Option<MsaaTarget>,
    points: PointResources,
    geometry: Option<PointGeometry>,
    material: MaterialConfig,
    clear_color: wgpu::Color,
    // reused upload staging for positions
    scratch: Vec<[f32; 3]>,
    released: bool,
}

impl GpuSurface {
    /// Creates a detached canvas and a WebGPU context for it, or WebGL2 where
    /// WebGPU is missing.
    pub async fn new(options: &SurfaceOptions) -> Result<Self, SurfaceError> {
        Self::acquire(options)
            .await
            .map_err(|e| SurfaceError::ContextCreation(format!("{:#}", e)))
    }

    async fn acquire(options: &SurfaceOptions) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas = dom::create_canvas(&document)?;
        dom::sync_canvas_size(&canvas, &options.viewport);
        let size = options.viewport.buffer_size();

        // Drops the WebGPU backend when the browser lacks it, leaving WebGL2.
        let instance =
            wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default())
                .await;
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU or WebGL2 adapter"))?;
        let limits =
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("hero_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;

        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = helpers::pick_alpha_mode(&caps.alpha_modes, options.alpha)
            .ok_or_else(|| anyhow::anyhow!("surface reports no alpha modes"))?;
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if options.antialias {
            options.material.msaa_samples.max(1)
        } else {
            1
        };
        let msaa = helpers::create_msaa_target(&device, view_format, size, sample_count);
        let points = points::create_point_resources(&device, view_format, sample_count);
        let clear_color = if options.alpha {
            wgpu::Color::TRANSPARENT
        } else {
            wgpu::Color::BLACK
        };
        log::info!(
            "[gpu] {:?} (view {:?}) {}x{} msaa={} alpha={:?}",
            format,
            view_format,
            size.width,
            size.height,
            sample_count,
            alpha_mode
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            view_format,
            sample_count,
            msaa,
            points,
            geometry: None,
            material: options.material.clone(),
            clear_color,
            scratch: Vec::new(),
            released: false,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn size(&self) -> BufferSize {
        BufferSize {
            width: self.config.width,
            height: self.config.height,
        }
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.released {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            if let Some(old) = self.msaa.take() {
                old.texture.destroy();
            }
            self.msaa = helpers::create_msaa_target(
                &self.device,
                self.view_format,
                BufferSize { width, height },
                self.sample_count,
            );
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }
}

impl DrawSurface for GpuSurface {
    fn load_field(&mut self, field: &ParticleField) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        self.geometry = Some(points::create_geometry(&self.device, field));
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        dom::sync_canvas_size(&self.canvas, viewport);
        let size = viewport.buffer_size();
        self.resize_if_needed(size.width, size.height);
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        let Some(geometry) = &self.geometry else {
            return Err(SurfaceError::Draw("no geometry loaded".into()));
        };
        if geometry.count == 0 {
            return Ok(());
        }

        if frame.positions_dirty {
            frame.field.positions_into(&mut self.scratch);
            self.queue
                .write_buffer(&geometry.positions, 0, bytemuck::cast_slice(&self.scratch));
        }
        let uniforms = PointUniforms {
            view_proj: frame.view_projection.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            model: frame.model.to_cols_array_2d(),
            resolution: [self.config.width as f32, self.config.height as f32],
            point_size: self.material.point_size,
            opacity: self.material.opacity,
            fog_density: self.material.fog_density,
            _pad: [0.0; 3],
        };
        self.queue.write_buffer(
            &self.points.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one renders into the fresh swapchain.
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(SurfaceError::Draw(format!("{:?}", e))),
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let (target, resolve_target, store) = match &self.msaa {
            Some(msaa) => (&msaa.view, Some(&view), wgpu::StoreOp::Discard),
            None => (&view, None, wgpu::StoreOp::Store),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("points_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.points.pipeline);
            rpass.set_bind_group(0, &self.points.bind_group, &[]);
            rpass.set_vertex_buffer(0, geometry.positions.slice(..));
            rpass.set_vertex_buffer(1, geometry.colors.slice(..));
            rpass.draw(0..6, 0..geometry.count);
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(geometry) = self.geometry.take() {
            geometry.positions.destroy();
            geometry.colors.destroy();
        }
        if let Some(msaa) = self.msaa.take() {
            msaa.texture.destroy();
        }
        self.points.uniform_buffer.destroy();
        log::debug!("[gpu] resources released");
    }
}
