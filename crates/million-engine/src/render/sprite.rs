use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::assets::DecodedImage;
use crate::device::{GpuFrame, WgpuBackend, WgpuContext};

use super::{Orientation, Position, Projection, TextureHandle, TextureStore};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteUniform {
    projection: [[f32; 4]; 4],
    origin: [f32; 2],
    size: [f32; 2],
    uv_flip: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CornerVertex {
    corner: [f32; 2], // 0..1
}

impl CornerVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [CornerVertex; 4] = [
    CornerVertex { corner: [0.0, 0.0] },
    CornerVertex { corner: [1.0, 0.0] },
    CornerVertex { corner: [1.0, 1.0] },
    CornerVertex { corner: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

fn uv_flip(orientation: Orientation) -> [f32; 2] {
    match orientation {
        Orientation::Normal => [0.0, 0.0],
        Orientation::FlipHorizontal => [1.0, 0.0],
        Orientation::FlipVertical => [0.0, 1.0],
    }
}

/// Whether a `width` x `height` texture can be created on a device whose
/// 2D dimension limit is `max`.
fn fits_texture_limits(width: u32, height: u32, max: u32) -> bool {
    width > 0 && height > 0 && width <= max && height <= max
}

struct Sprite {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    size: [f32; 2],
}

/// Texture store drawing installed images as textured quads.
///
/// Each sprite owns its uniform buffer, so a sprite is drawn at most once per
/// submitted frame.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    sprites: HashMap<TextureHandle, Sprite>,
    next_id: u32,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_layout(&mut self, device: &wgpu::Device) {
        if self.bind_group_layout.is_some() {
            return;
        }

        let min_binding_size = wgpu::BufferSize::new(std::mem::size_of::<SpriteUniform>() as u64);

        self.bind_group_layout = Some(device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("million sprite bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            },
        ));
    }

    fn ensure_sampler(&mut self, device: &wgpu::Device) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("million sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_static_buffers(&mut self, device: &wgpu::Device) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("million sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("million sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }
        self.ensure_layout(device);
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("million sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("million sprite pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("million sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CornerVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Straight alpha: src * a + dst * (1 - a).
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
    }
}

impl TextureStore<WgpuBackend> for SpriteRenderer {
    fn install(&mut self, context: &WgpuContext, image: &DecodedImage) -> Option<TextureHandle> {
        if !image.is_consistent() {
            log::warn!(
                "refusing to install {}x{} image with {} bytes",
                image.width,
                image.height,
                image.pixels.len()
            );
            return None;
        }

        let device = &context.device;
        let max = device.limits().max_texture_dimension_2d;
        if !fits_texture_limits(image.width, image.height, max) {
            log::warn!(
                "image {}x{} exceeds the device texture limit of {max}",
                image.width,
                image.height
            );
            return None;
        }

        self.ensure_layout(device);
        self.ensure_sampler(device);
        let (Some(bgl), Some(sampler)) = (self.bind_group_layout.as_ref(), self.sampler.as_ref())
        else {
            return None;
        };

        let extent = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("million sprite texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.to_rgba8(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("million sprite ubo"),
            size: std::mem::size_of::<SpriteUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("million sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        let handle = TextureHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.sprites.insert(
            handle,
            Sprite {
                _texture: texture,
                uniform,
                bind_group,
                size: [image.width as f32, image.height as f32],
            },
        );

        Some(handle)
    }

    fn draw(
        &mut self,
        context: &WgpuContext,
        frame: &mut GpuFrame,
        projection: &Projection,
        handle: TextureHandle,
        orientation: Orientation,
        position: Position,
    ) {
        let device = &context.device;
        self.ensure_static_buffers(device);
        self.ensure_pipeline(device, frame.format);

        let Some(sprite) = self.sprites.get(&handle) else {
            log::debug!("draw of unknown texture {handle:?} ignored");
            return;
        };

        let u = SpriteUniform {
            projection: projection.matrix,
            origin: [position.x, position.y],
            size: sprite.size,
            uv_flip: uv_flip(orientation),
            _pad: [0.0; 2],
        };
        context.queue.write_buffer(&sprite.uniform, 0, bytemuck::bytes_of(&u));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("million sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &sprite.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..1);
    }

    fn destroy(&mut self) {
        if !self.sprites.is_empty() {
            log::debug!("destroying {} sprite texture(s)", self.sprites.len());
        }
        self.sprites.clear();
        // Pipeline objects belong to the device that created them.
        self.pipeline = None;
        self.pipeline_format = None;
        self.bind_group_layout = None;
        self.sampler = None;
        self.quad_vbo = None;
        self.quad_ibo = None;
    }
}
