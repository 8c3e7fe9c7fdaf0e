use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::device::{Gpu, GpuContext};

use super::common::{
    clamp_viewport, viewport_ubo_min_binding_size, QuadVertex, ViewportUniform, QUAD_INDICES,
    QUAD_VERTICES,
};
use super::{Bitmap, Canvas, PresentationSurface};

/// A recorded `draw_bitmap` call.
#[derive(Debug, Clone)]
pub struct QueuedDraw {
    pub bitmap: Bitmap,
    pub origin: Vec2,
}

/// Canvas of a [`BitmapSurface`]: records draws until the next flush.
#[derive(Debug, Default)]
pub struct BitmapCanvas {
    queued: Vec<QueuedDraw>,
}

impl BitmapCanvas {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    fn take(&mut self) -> Vec<QueuedDraw> {
        std::mem::take(&mut self.queued)
    }
}

impl Canvas<Bitmap> for BitmapCanvas {
    #[inline]
    fn draw_bitmap(&mut self, bitmap: Bitmap, x: f32, y: f32) {
        self.queued.push(QueuedDraw {
            bitmap,
            origin: Vec2::new(x, y),
        });
    }
}

/// wgpu presentation surface for bitmaps.
///
/// Every queued draw becomes one textured quad instance. Consecutive draws of
/// the same bitmap share an instanced draw call; paint order is preserved.
pub struct BitmapSurface {
    device: wgpu::Device,
    queue: wgpu::Queue,

    pipeline: wgpu::RenderPipeline,
    bitmap_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    viewport_ubo: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,

    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    canvas: BitmapCanvas,
}

impl BitmapSurface {
    /// Creates the surface's GPU resources for the context's surface format.
    pub fn new(gpu: &Gpu) -> Result<Self> {
        let device = gpu.device().clone();
        let queue = gpu.queue().clone();
        let format = gpu.surface_format();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("layerloop bitmap shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/bitmap.wgsl").into()),
        });

        let viewport_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("layerloop viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: viewport_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let bitmap_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("layerloop bitmap bgl"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("layerloop bitmap pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &bitmap_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("layerloop bitmap pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), BitmapInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Bitmaps are uploaded with straight alpha.
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("layerloop bitmap sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("layerloop viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("layerloop viewport bind group"),
            layout: &viewport_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("layerloop quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("layerloop quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("bitmap surface created for {format:?}");

        Ok(Self {
            device,
            queue,
            pipeline,
            bitmap_bgl,
            sampler,
            viewport_ubo,
            viewport_bind_group,
            quad_vbo,
            quad_ibo,
            instance_vbo: None,
            instance_capacity: 0,
            canvas: BitmapCanvas::default(),
        })
    }

    /// Uploads `image` to a GPU texture and returns a handle for drawing.
    pub fn create_bitmap(&self, image: &RgbaImage) -> Result<Bitmap> {
        let (width, height) = image.dimensions();
        anyhow::ensure!(
            width > 0 && height > 0,
            "bitmap has zero size ({width}x{height})"
        );

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("layerloop bitmap"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("layerloop bitmap bind group"),
            layout: &self.bitmap_bgl,
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

        Ok(Bitmap::new(width, height, texture, bind_group))
    }

    fn ensure_instance_capacity(&mut self, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<BitmapInstance>()) as u64;

        self.instance_vbo = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("layerloop bitmap instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

impl PresentationSurface for BitmapSurface {
    type Bitmap = Bitmap;
    type Context = Gpu;
    type Canvas = BitmapCanvas;

    fn flush(&mut self, gpu: &mut Gpu) {
        if self.canvas.is_empty() {
            return;
        }
        let draws = self.canvas.take();

        let viewport = gpu.viewport();
        let Some(frame) = gpu.frame_mut() else {
            log::trace!("no frame acquired; dropping {} queued draws", draws.len());
            return;
        };

        let (target_w, target_h) = frame.target_size();
        let Some(vp) = clamp_viewport(viewport, target_w, target_h) else {
            return;
        };

        let instances: Vec<BitmapInstance> = draws
            .iter()
            .map(|d| BitmapInstance {
                origin: [d.origin.x, d.origin.y],
                size: [d.bitmap.width() as f32, d.bitmap.height() as f32],
            })
            .collect();

        self.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                size: [vp.width as f32, vp.height as f32],
                _pad: [0.0; 2],
            }),
        );

        self.ensure_instance_capacity(instances.len());
        let Some(instance_vbo) = self.instance_vbo.as_ref() else {
            return;
        };
        self.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("layerloop bitmap pass"),
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

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.viewport_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.set_viewport(
            vp.x as f32,
            vp.y as f32,
            vp.width as f32,
            vp.height as f32,
            0.0,
            1.0,
        );

        // One instanced call per run of consecutive draws sharing a bitmap.
        let mut i = 0usize;
        while i < draws.len() {
            let bitmap = &draws[i].bitmap;
            let mut j = i + 1;
            while j < draws.len() && draws[j].bitmap.same_texture(bitmap) {
                j += 1;
            }
            rpass.set_bind_group(1, bitmap.bind_group(), &[]);
            rpass.draw_indexed(0..6, 0, i as u32..j as u32);
            i = j;
        }
    }

    #[inline]
    fn canvas(&mut self) -> &mut BitmapCanvas {
        &mut self.canvas
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct BitmapInstance {
    origin: [f32; 2],
    size: [f32; 2],
}

impl BitmapInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2  // size
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BitmapInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
