//! WebGPU render pipeline for the confetti overlay

use wgpu::util::DeviceExt;

use super::vertex::Vertex;
use crate::error::{CardError, Result};

/// Confetti overlay render state
pub struct ConfettiRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Backing size in physical pixels
    pub size: (u32, u32),
    /// Layout size in CSS pixels (the space particles live in)
    pub css_size: (f32, f32),
}

impl ConfettiRenderer {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        css_size: (f32, f32),
    ) -> Result<Self> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("valentine-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = pick_surface_format(&surface_caps.formats)?;
        let alpha_mode = pick_alpha_mode(&surface_caps.alpha_modes)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("confetti_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("confetti_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("confetti_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    // Shader outputs premultiplied color
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Create initial vertex buffer (will be updated each frame)
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("confetti_vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [0.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        log::info!(
            "Confetti renderer ready ({}x{}, {:?}, {:?})",
            width,
            height,
            surface_format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            css_size,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32, css_size: (f32, f32)) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.css_size = css_size;
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload vertices (CSS pixels) and draw them over a cleared, transparent frame
    pub fn render(&mut self, vertices: &[Vertex]) -> std::result::Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = css_to_ndc(self.css_size, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // Recreate buffer if needed (simple approach; could optimize)
        if !ndc_vertices.is_empty() {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("confetti_vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("confetti_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("confetti_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Surface format for the overlay. Palette colors are authored in sRGB, so a
/// non-sRGB format is preferred to skip the implicit conversion.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(CardError::SurfaceUnsupported("texture formats"))
}

/// Premultiplied alpha when available, so the page shows through
pub fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> Result<wgpu::CompositeAlphaMode> {
    if modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        return Ok(wgpu::CompositeAlphaMode::PreMultiplied);
    }
    modes
        .first()
        .copied()
        .ok_or(CardError::SurfaceUnsupported("alpha modes"))
}

/// Map CSS pixels (origin top left, y down) to normalized device coordinates
pub fn css_to_ndc(css_size: (f32, f32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = css_size;
    if w <= 0.0 || h <= 0.0 {
        return (0.0, 0.0);
    }
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_to_ndc_corners() {
        let size = (800.0, 600.0);
        assert_eq!(css_to_ndc(size, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(css_to_ndc(size, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(css_to_ndc(size, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_css_to_ndc_empty_viewport() {
        assert_eq!(css_to_ndc((0.0, 600.0), 10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_pick_surface_format() {
        use wgpu::TextureFormat;
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats).ok(), Some(TextureFormat::Bgra8Unorm));
        let srgb_only = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(pick_surface_format(&srgb_only).ok(), Some(TextureFormat::Rgba8UnormSrgb));
    }

    #[test]
    fn test_pick_alpha_mode() {
        use wgpu::CompositeAlphaMode;
        let modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(pick_alpha_mode(&modes).ok(), Some(CompositeAlphaMode::PreMultiplied));
        assert_eq!(
            pick_alpha_mode(&[CompositeAlphaMode::Opaque]).ok(),
            Some(CompositeAlphaMode::Opaque)
        );
    }

    #[test]
    fn test_empty_capabilities_are_an_error() {
        assert!(matches!(
            pick_surface_format(&[]),
            Err(CardError::SurfaceUnsupported(_))
        ));
        assert!(matches!(
            pick_alpha_mode(&[]),
            Err(CardError::SurfaceUnsupported(_))
        ));
    }
}
