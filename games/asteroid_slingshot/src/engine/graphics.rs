use glam::{Mat4, Vec2, Vec4};
use log::warn;
use sokol::gfx as sg;
use std::mem;

use crate::engine::{DecodedImage, TextureManager};

// u16 indices cap a frame at this many vertices
const MAX_VERTICES: usize = 16_384;
const MAX_INDICES: usize = MAX_VERTICES * 3 / 2;

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 4],
    uv: [f32; 2],
}

#[repr(C)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

#[derive(Copy, Clone)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec4,
    pub segments: u32, // Number of triangles to approximate the circle
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32, color: Vec4) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
            color,
            segments: 32,
        }
    }
}

/// Run of indices that share one texture
struct Batch {
    image: sg::Image,
    first_index: usize,
    index_count: usize,
}

/// Batched 2D renderer in screen pixels, top-left origin, y pointing down.
///
/// Every primitive is a textured triangle list. Untextured shapes sample a
/// 1x1 white texture so a single pipeline covers shapes, images and glyphs.
pub struct Renderer {
    pipeline: sg::Pipeline,
    bind: sg::Bindings,
    sampler: sg::Sampler,
    textures: TextureManager,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    batches: Vec<Batch>,
    viewport: Vec2,
    overflowed: bool,
}

/// Implementation for new, init, flush.
/// Handles the pipeline, shaders and buffers
impl Renderer {
    pub fn new() -> Self {
        Self {
            pipeline: sg::Pipeline::default(),
            bind: sg::Bindings::default(),
            sampler: sg::Sampler::default(),
            textures: TextureManager::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
            viewport: Vec2::new(800.0, 800.0),
            overflowed: false,
        }
    }

    pub fn init(&mut self) {
        let vs_source = "
cbuffer uniforms : register(b0) {
    float4x4 mvp;
};

struct vs_in {
    float2 position : POSITION;
    float4 color    : COLOR;
    float2 uv       : TEXCOORD;
};

struct vs_out {
    float4 position : SV_Position;
    float4 color    : COLOR;
    float2 uv       : TEXCOORD;
};
vs_out main(vs_in inp) {
    vs_out outp;
    outp.position = mul(mvp, float4(inp.position, 0.0, 1.0));
    outp.color = inp.color;
    outp.uv = inp.uv;
    return outp;
}
\0";

        let fs_source = "
Texture2D<float4> tex : register(t0);
SamplerState smp : register(s0);

struct ps_in {
    float4 position : SV_Position;
    float4 color : COLOR;
    float2 uv : TEXCOORD;
};

float4 main(ps_in inp) : SV_Target0 {
    return tex.Sample(smp, inp.uv) * inp.color;
}
\0";

        let mut shader_desc = sg::ShaderDesc {
            vertex_func: sg::ShaderFunction {
                source: vs_source.as_ptr() as *const i8,
                ..Default::default()
            },
            fragment_func: sg::ShaderFunction {
                source: fs_source.as_ptr() as *const i8,
                ..Default::default()
            },
            ..Default::default()
        };
        shader_desc.attrs[0] = sg::ShaderVertexAttr {
            hlsl_sem_name: "POSITION\0".as_ptr() as *const i8,
            hlsl_sem_index: 0,
            ..Default::default()
        };
        shader_desc.attrs[1] = sg::ShaderVertexAttr {
            hlsl_sem_name: "COLOR\0".as_ptr() as *const i8,
            hlsl_sem_index: 0,
            ..Default::default()
        };
        shader_desc.attrs[2] = sg::ShaderVertexAttr {
            hlsl_sem_name: "TEXCOORD\0".as_ptr() as *const i8,
            hlsl_sem_index: 0,
            ..Default::default()
        };
        shader_desc.uniform_blocks[0] = sg::ShaderUniformBlock {
            stage: sg::ShaderStage::Vertex,
            size: mem::size_of::<Uniforms>() as u32,
            hlsl_register_b_n: 0, // matches "register(b0)" in shader
            ..Default::default()
        };
        shader_desc.images[0] = sg::ShaderImage {
            stage: sg::ShaderStage::Fragment,
            image_type: sg::ImageType::Dim2,
            sample_type: sg::ImageSampleType::Float,
            hlsl_register_t_n: 0,
            ..Default::default()
        };
        shader_desc.samplers[0] = sg::ShaderSampler {
            stage: sg::ShaderStage::Fragment,
            sampler_type: sg::SamplerType::Filtering,
            hlsl_register_s_n: 0,
            ..Default::default()
        };
        shader_desc.image_sampler_pairs[0] = sg::ShaderImageSamplerPair {
            stage: sg::ShaderStage::Fragment,
            image_slot: 0,
            sampler_slot: 0,
            ..Default::default()
        };
        let shader = sg::make_shader(&shader_desc);

        let mut pipeline_desc = sg::PipelineDesc {
            shader,
            index_type: sg::IndexType::Uint16,
            ..Default::default()
        };
        pipeline_desc.layout.attrs[0] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 0,
            format: sg::VertexFormat::Float2,
        }; // position
        pipeline_desc.layout.attrs[1] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 8, // 2 floats
            format: sg::VertexFormat::Float4,
        }; // color
        pipeline_desc.layout.attrs[2] = sg::VertexAttrState {
            buffer_index: 0,
            offset: 24, // 2 + 4 floats
            format: sg::VertexFormat::Float2,
        }; // uv
        pipeline_desc.layout.buffers[0] = sg::VertexBufferLayoutState {
            stride: mem::size_of::<Vertex>() as i32,
            step_func: sg::VertexStep::PerVertex,
            step_rate: 1,
        };
        pipeline_desc.colors[0].blend = sg::BlendState {
            enabled: true,
            src_factor_rgb: sg::BlendFactor::SrcAlpha,
            dst_factor_rgb: sg::BlendFactor::OneMinusSrcAlpha,
            ..Default::default()
        };
        self.pipeline = sg::make_pipeline(&pipeline_desc);

        let vbuf = sg::make_buffer(&sg::BufferDesc {
            size: MAX_VERTICES * mem::size_of::<Vertex>(),
            usage: sg::BufferUsage {
                vertex_buffer: true,
                stream_update: true,
                ..Default::default()
            },
            ..Default::default()
        });

        let ibuf = sg::make_buffer(&sg::BufferDesc {
            size: MAX_INDICES * mem::size_of::<u16>(),
            usage: sg::BufferUsage {
                index_buffer: true,
                stream_update: true,
                ..Default::default()
            },
            ..Default::default()
        });

        self.sampler = sg::make_sampler(&sg::SamplerDesc {
            min_filter: sg::Filter::Linear,
            mag_filter: sg::Filter::Linear,
            wrap_u: sg::Wrap::ClampToEdge,
            wrap_v: sg::Wrap::ClampToEdge,
            ..Default::default()
        });

        self.bind.vertex_buffers[0] = vbuf;
        self.bind.index_buffer = ibuf;
        self.bind.samplers[0] = self.sampler;

        self.textures.init();

        log::info!("Renderer initialized with shaders and buffers");
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn load_texture(&mut self, name: &str, image: &DecodedImage) -> sg::Image {
        self.textures.upload(name, image)
    }

    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.overflowed = false;
    }

    pub fn flush(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        sg::update_buffer(
            self.bind.vertex_buffers[0],
            &sg::Range {
                ptr: self.vertices.as_ptr() as *const _,
                size: self.vertices.len() * mem::size_of::<Vertex>(),
            },
        );

        sg::update_buffer(
            self.bind.index_buffer,
            &sg::Range {
                ptr: self.indices.as_ptr() as *const _,
                size: self.indices.len() * mem::size_of::<u16>(),
            },
        );

        // Pixel space, y down, same as pointer coordinates
        let ortho = Mat4::orthographic_rh(0.0, self.viewport.x, self.viewport.y, 0.0, -1.0, 1.0);
        let uniforms = Uniforms {
            mvp: ortho.to_cols_array_2d(),
        };

        sg::apply_pipeline(self.pipeline);
        sg::apply_uniforms(0, &sg::Range {
            ptr: &uniforms as *const _ as *const _,
            size: mem::size_of::<Uniforms>(),
        });

        for batch in &self.batches {
            self.bind.images[0] = batch.image;
            sg::apply_bindings(&self.bind);
            sg::draw(batch.first_index, batch.index_count, 1);
        }

        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
    }

    /// Reserve room for a primitive and route its indices into the right batch.
    /// Returns the first vertex index, or None when the frame is full.
    fn reserve(&mut self, image: sg::Image, vertex_count: usize, index_count: usize) -> Option<u16> {
        if self.vertices.len() + vertex_count > MAX_VERTICES || self.indices.len() + index_count > MAX_INDICES {
            if !self.overflowed {
                warn!("Renderer frame buffer full, dropping primitives");
                self.overflowed = true;
            }
            return None;
        }

        match self.batches.last_mut() {
            Some(batch) if batch.image.id == image.id => batch.index_count += index_count,
            _ => self.batches.push(Batch {
                image,
                first_index: self.indices.len(),
                index_count,
            }),
        }

        Some(self.vertices.len() as u16)
    }

    fn push_quad(&mut self, image: sg::Image, corners: [Vec2; 4], uv: Vec4, color: Vec4) {
        let Some(start) = self.reserve(image, 4, 6) else {
            return;
        };

        let color = color.to_array();
        let (u0, v0, u1, v1) = (uv.x, uv.y, uv.x + uv.z, uv.y + uv.w);
        let uvs = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];

        for (corner, uv) in corners.iter().zip(uvs) {
            self.vertices.push(Vertex {
                pos: [corner.x, corner.y],
                color,
                uv,
            });
        }

        self.indices.extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
    }
}

/// Implementation for drawing to the screen used by the game
impl Renderer {
    pub fn draw_circle(&mut self, circle: &Circle) {
        let segments = circle.segments as usize;
        let white = self.textures.get_white_texture();
        let Some(center_vertex) = self.reserve(white, segments + 1, segments * 3) else {
            return;
        };
        let color = circle.color.to_array();

        self.vertices.push(Vertex {
            pos: [circle.center.x, circle.center.y],
            color,
            uv: [0.5, 0.5],
        });

        for i in 0..circle.segments {
            let angle = (i as f32 / circle.segments as f32) * std::f32::consts::TAU;
            let x = circle.center.x + angle.cos() * circle.radius;
            let y = circle.center.y + angle.sin() * circle.radius;

            self.vertices.push(Vertex { pos: [x, y], color, uv: [0.5, 0.5] });
        }

        // Triangles from center to each edge
        for i in 0..circle.segments {
            let next = (i + 1) % circle.segments;
            self.indices.extend_from_slice(&[
                center_vertex,
                center_vertex + 1 + i as u16,
                center_vertex + 1 + next as u16,
            ]);
        }
    }

    /// Segment drawn as a quad `thickness` pixels wide
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Vec4) {
        let direction = end - start;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        let half = direction.perp().normalize() * (thickness * 0.5);
        let white = self.textures.get_white_texture();

        self.push_quad(
            white,
            [start + half, end + half, end - half, start - half],
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            color,
        );
    }

    /// Draw a region of a loaded texture. `uv` is (u, v, width, height) in texture space.
    pub fn draw_texture_region(&mut self, texture_name: &str, top_left: Vec2, size: Vec2, uv: Vec4, color: Vec4) {
        let Some(image) = self.textures.get_texture(texture_name) else {
            return;
        };
        let bottom_right = top_left + size;

        self.push_quad(
            image,
            [
                top_left,
                Vec2::new(bottom_right.x, top_left.y),
                bottom_right,
                Vec2::new(top_left.x, bottom_right.y),
            ],
            uv,
            color,
        );
    }

    pub fn draw_texture(&mut self, texture_name: &str, top_left: Vec2, size: Vec2) {
        self.draw_texture_region(texture_name, top_left, size, Vec4::new(0.0, 0.0, 1.0, 1.0), Vec4::ONE);
    }
}
