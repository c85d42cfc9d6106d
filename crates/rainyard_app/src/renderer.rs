//! wgpu renderer
//!
//! Draws the rain as instanced point sprites over the scene's clear color.
//! Sizes handed in by the viewport synchronizer are logical; the frame is
//! rendered at `logical size * pixel ratio`. When that differs from the
//! window's physical size (the pixel ratio was clamped) the frame goes to an
//! offscreen texture that is scaled onto the surface.

use crate::error::AppError;
use crate::shaders::{BLIT_SHADER, RAIN_SHADER};
use bytemuck::{Pod, Zeroable};
use rainyard_runtime::{RenderError, Renderer};
use rainyard_scene::{Color, ParticleField, PerspectiveCamera, Scene};
use std::sync::Arc;
use winit::window::Window as WinitWindow;

/// Bytes per particle in the position buffer
const PARTICLE_STRIDE: u64 = 3 * std::mem::size_of::<f32>() as u64;

/// Uniforms for the rain shader (matches `RainUniforms` in WGSL)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
struct RainUniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    rain_color: [f32; 4],
    fog_color: [f32; 4],
    fog: [f32; 4],
    viewport: [f32; 4],
}

impl RainUniforms {
    fn new(
        scene: &Scene,
        camera: &PerspectiveCamera,
        target_size: (u32, u32),
        pixel_ratio: f32,
        linear_output: bool,
    ) -> Self {
        let color = |c: Color| {
            if linear_output {
                c.to_linear().to_array()
            } else {
                c.to_array()
            }
        };
        let p = camera.position;
        let (fog_color, fog) = match scene.fog {
            Some(fog) => (color(fog.color), [fog.near, fog.far, 1.0, 0.0]),
            None => ([0.0; 4], [0.0; 4]),
        };

        Self {
            view_proj: camera.view_projection().cols,
            camera_position: [p.x, p.y, p.z, 1.0],
            rain_color: color(scene.rain_color),
            fog_color,
            fog,
            viewport: [
                target_size.0 as f32,
                target_size.1 as f32,
                scene.rain_size * pixel_ratio,
                0.0,
            ],
        }
    }
}

/// Physical render target size for a logical size and pixel ratio
fn render_target_size(logical: (u32, u32), pixel_ratio: f32, max_dimension: u32) -> (u32, u32) {
    let scale = |v: u32| ((v as f32 * pixel_ratio).round() as u32).clamp(1, max_dimension.max(1));
    (scale(logical.0), scale(logical.1))
}

/// Byte size of a position buffer for `count` particles, if the device can bind it
fn position_buffer_size(count: usize, limits: &wgpu::Limits) -> Result<u64, RenderError> {
    let limit = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
    // Bindings cannot be empty
    let size = (count.max(1) as u64).saturating_mul(PARTICLE_STRIDE);
    if size > limit {
        return Err(RenderError::BufferTooLarge { size, limit });
    }
    Ok(size)
}

fn surface_error(err: wgpu::SurfaceError) -> RenderError {
    match err {
        wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
        other => RenderError::Surface(other.to_string()),
    }
}

/// Offscreen color target used when the render size differs from the surface
struct Offscreen {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
}

impl Offscreen {
    fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// wgpu renderer for a desktop window
pub struct GpuRenderer {
    window: Arc<WinitWindow>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    device: wgpu::Device,
    queue: wgpu::Queue,

    rain_pipeline: wgpu::RenderPipeline,
    rain_layout: wgpu::BindGroupLayout,
    rain_bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    position_buffer: wgpu::Buffer,
    /// Particles the position buffer can hold
    position_capacity: usize,
    /// Particles uploaded to the position buffer
    uploaded_count: usize,

    blit_pipeline: wgpu::RenderPipeline,
    blit_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    offscreen: Option<Offscreen>,

    logical_size: (u32, u32),
    pixel_ratio: f32,
}

impl GpuRenderer {
    /// Create a renderer drawing into `window`
    pub fn new(window: Arc<WinitWindow>) -> Result<Self, AppError> {
        pollster::block_on(Self::with_window(window))
    }

    /// Create a renderer drawing into `window`
    pub async fn with_window(window: Arc<WinitWindow>) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| AppError::GpuInit(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| AppError::GpuInit("No suitable GPU adapter found".to_string()))?;

        let info = adapter.get_info();
        tracing::info!("Using GPU adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Rainyard Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await
            .map_err(|e| AppError::GpuInit(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        tracing::debug!("Surface capabilities - formats: {:?}", surface_caps.formats);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| AppError::GpuInit("Surface reports no texture formats".to_string()))?;
        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::Opaque)
        {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        tracing::debug!("Selected texture format: {:?}", format);

        let physical = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: physical.width.max(1),
            height: physical.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Rain pipeline
        let rain_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rain Shader"),
            source: wgpu::ShaderSource::Wgsl(RAIN_SHADER.into()),
        });

        let rain_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Rain Bind Group Layout"),
            entries: &[
                // Positions (storage, read-only)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let rain_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Rain Pipeline Layout"),
            bind_group_layouts: &[&rain_layout],
            push_constant_ranges: &[],
        });

        let rain_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rain Render Pipeline"),
            layout: Some(&rain_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &rain_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &rain_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // Sprites face the screen
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Rain Uniforms"),
            size: std::mem::size_of::<RainUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let position_buffer = create_position_buffer(&device, PARTICLE_STRIDE);
        let rain_bind_group =
            create_rain_bind_group(&device, &rain_layout, &position_buffer, &uniform_buffer);

        // Blit pipeline
        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER.into()),
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Render Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blit Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let scale = window.scale_factor();
        Ok(Self {
            window,
            surface,
            surface_config,
            device,
            queue,
            rain_pipeline,
            rain_layout,
            rain_bind_group,
            uniform_buffer,
            position_buffer,
            position_capacity: 0,
            uploaded_count: 0,
            blit_pipeline,
            blit_layout,
            sampler,
            offscreen: None,
            logical_size: (
                ((physical.width as f64 / scale).round() as u32).max(1),
                ((physical.height as f64 / scale).round() as u32).max(1),
            ),
            pixel_ratio: scale as f32,
        })
    }

    /// Size of the frame being rendered, in physical pixels
    pub fn render_size(&self) -> (u32, u32) {
        self.offscreen.as_ref().map_or(
            (self.surface_config.width, self.surface_config.height),
            Offscreen::size,
        )
    }

    /// Match the surface to the window and the render target to the
    /// requested logical size and pixel ratio
    fn sync_targets(&mut self) {
        let physical = self.window.inner_size();
        let surface_size = (physical.width.max(1), physical.height.max(1));
        if surface_size != (self.surface_config.width, self.surface_config.height) {
            self.surface_config.width = surface_size.0;
            self.surface_config.height = surface_size.1;
            self.surface.configure(&self.device, &self.surface_config);
            tracing::debug!("Surface reconfigured to {}x{}", surface_size.0, surface_size.1);
        }

        let target = render_target_size(
            self.logical_size,
            self.pixel_ratio,
            self.device.limits().max_texture_dimension_2d,
        );
        if target == surface_size {
            self.offscreen = None;
        } else if self.offscreen.as_ref().map(Offscreen::size) != Some(target) {
            tracing::debug!(
                "Rendering offscreen at {}x{} for a {}x{} surface",
                target.0,
                target.1,
                surface_size.0,
                surface_size.1
            );
            self.offscreen = Some(self.create_offscreen(target));
        }
    }

    fn create_offscreen(&self, (width, height): (u32, u32)) -> Offscreen {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Rainyard Offscreen Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.surface_config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &self.blit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        Offscreen {
            texture,
            view,
            bind_group,
        }
    }

    /// Upload rain positions when they changed or the buffer had to grow
    ///
    /// Fails without touching the GPU when the device cannot bind a buffer
    /// that large.
    fn upload_rain(&mut self, rain: &ParticleField) -> Result<(), RenderError> {
        let count = rain.count();
        let mut stale = rain.needs_update() || count != self.uploaded_count;

        if count > self.position_capacity {
            let size = position_buffer_size(count, &self.device.limits())?;
            self.position_buffer = create_position_buffer(&self.device, size);
            self.rain_bind_group = create_rain_bind_group(
                &self.device,
                &self.rain_layout,
                &self.position_buffer,
                &self.uniform_buffer,
            );
            self.position_capacity = count;
            stale = true;
        }

        if stale && count > 0 {
            self.queue
                .write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(rain.positions()));
        }
        self.uploaded_count = count;
        Ok(())
    }
}

fn create_position_buffer(device: &wgpu::Device, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Rain Positions"),
        size,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_rain_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    positions: &wgpu::Buffer,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Rain Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: positions.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}

impl Renderer for GpuRenderer {
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        rain: &ParticleField,
    ) -> Result<(), RenderError> {
        self.sync_targets();
        self.upload_rain(rain)?;

        let linear_output = self.surface_config.format.is_srgb();
        let uniforms = RainUniforms::new(
            scene,
            camera,
            self.render_size(),
            self.pixel_ratio,
            linear_output,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture().map_err(surface_error)?
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("Timed out waiting for a surface texture, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(surface_error(e)),
        };
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let clear = if linear_output {
            scene.clear_color.to_linear()
        } else {
            scene.clear_color
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Rainyard Frame Encoder"),
            });

        {
            let target = self
                .offscreen
                .as_ref()
                .map_or(&surface_view, |offscreen| &offscreen.view);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Rain Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.uploaded_count > 0 {
                render_pass.set_pipeline(&self.rain_pipeline);
                render_pass.set_bind_group(0, &self.rain_bind_group, &[]);
                // 6 vertices per sprite, one instance per particle
                render_pass.draw(0..6, 0..self.uploaded_count as u32);
            }
        }

        if let Some(offscreen) = &self.offscreen {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &offscreen.bind_group, &[]);
            blit_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.logical_size = (width.max(1), height.max(1));
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainyard_scene::{Fog, Vec3};

    #[test]
    fn test_render_target_size_scales_logical_size() {
        assert_eq!(render_target_size((800, 600), 2.0, 8192), (1600, 1200));
        assert_eq!(render_target_size((801, 601), 1.5, 8192), (1202, 902));
    }

    #[test]
    fn test_render_target_size_is_bounded() {
        assert_eq!(render_target_size((0, 0), 1.0, 8192), (1, 1));
        assert_eq!(render_target_size((6000, 100), 2.0, 8192), (8192, 200));
    }

    #[test]
    fn test_position_buffer_fits_device_limits() {
        let limits = wgpu::Limits {
            max_storage_buffer_binding_size: 1200,
            ..wgpu::Limits::default()
        };
        assert_eq!(position_buffer_size(0, &limits).unwrap(), PARTICLE_STRIDE);
        assert_eq!(position_buffer_size(100, &limits).unwrap(), 1200);
        assert!(matches!(
            position_buffer_size(101, &limits),
            Err(RenderError::BufferTooLarge {
                size: 1212,
                limit: 1200
            })
        ));
    }

    #[test]
    fn test_oversized_rain_is_an_error_not_a_panic() {
        // 20M particles need 240 MB, past the 128 MiB default binding limit
        let err = position_buffer_size(20_000_000, &wgpu::Limits::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferTooLarge {
                size: 240_000_000,
                ..
            }
        ));
        let most = position_buffer_size(rainyard_scene::MAX_PARTICLES, &wgpu::Limits::default());
        assert!(most.is_ok());
    }

    #[test]
    fn test_uniforms_layout_matches_wgsl() {
        // mat4 + five vec4
        assert_eq!(std::mem::size_of::<RainUniforms>(), 64 + 5 * 16);
    }

    #[test]
    fn test_uniforms_point_size_in_physical_pixels() {
        let scene = Scene::default().with_rain_style(Color::WHITE, 3.0);
        let camera = PerspectiveCamera::default();
        let uniforms = RainUniforms::new(&scene, &camera, (1600, 1200), 2.0, false);
        assert_eq!(uniforms.viewport, [1600.0, 1200.0, 6.0, 0.0]);
    }

    #[test]
    fn test_uniforms_fog() {
        let camera = PerspectiveCamera::default().with_position(Vec3::new(1.0, 2.0, 3.0));
        let foggy = Scene::default().with_fog(Some(Fog::new(Color::BLACK, 1.0, 15.0)));
        let uniforms = RainUniforms::new(&foggy, &camera, (10, 10), 1.0, false);
        assert_eq!(uniforms.fog, [1.0, 15.0, 1.0, 0.0]);
        assert_eq!(uniforms.camera_position, [1.0, 2.0, 3.0, 1.0]);

        let clear = Scene::default().with_fog(None);
        let uniforms = RainUniforms::new(&clear, &camera, (10, 10), 1.0, false);
        assert_eq!(uniforms.fog[2], 0.0);
    }

    #[test]
    fn test_uniforms_convert_colors_for_srgb_targets() {
        let scene = Scene::default().with_rain_style(Color::rgb(0.5, 0.5, 0.5), 2.0);
        let camera = PerspectiveCamera::default();
        let srgb = RainUniforms::new(&scene, &camera, (10, 10), 1.0, true);
        let plain = RainUniforms::new(&scene, &camera, (10, 10), 1.0, false);
        assert_eq!(plain.rain_color[0], 0.5);
        assert!((srgb.rain_color[0] - 0.214).abs() < 1e-3);
        assert_eq!(srgb.rain_color[3], 1.0);
    }
}
