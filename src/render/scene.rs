use super::helpers;
use crate::constants::*;
use crate::core::{
    surface_for, BodyPose, DecodedImage, MeshData, MeshRange, OrbitalBody, Rgb, SunConfig,
    Surface, TextureError, TextureSlot, Vertex, ORBIT_GUIDE_OPACITY, RING_OPACITY,
};
use glam::{Mat4, Quat, Vec3};
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) camera_pos: [f32; 4],
    // ambient, sun intensity, sun range, unused
    pub(crate) light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // emissive gain, lit flag, textured flag, unused
    params: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Blend {
    Opaque,
    Translucent,
}

/// One mesh draw for this frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DrawItem {
    pub(crate) mesh: MeshRange,
    pub(crate) model: Mat4,
    pub(crate) color: [f32; 4],
    pub(crate) emissive: f32,
    pub(crate) lit: bool,
    pub(crate) texture: Option<usize>,
    pub(crate) blend: Blend,
}

/// Mesh ranges for every shape in the scene, in body order.
pub(crate) struct SceneMeshes {
    pub(crate) sphere: MeshRange,
    pub(crate) rings: Vec<Option<MeshRange>>,
    pub(crate) guides: Vec<MeshRange>,
}

impl SceneMeshes {
    pub(crate) fn build(bodies: &[OrbitalBody]) -> (MeshData, Self) {
        let mut data = MeshData::default();
        let sphere = data.push_uv_sphere(SPHERE_SEGMENTS, SPHERE_STACKS);
        let rings = bodies
            .iter()
            .map(|b| {
                b.ring_radii()
                    .map(|(inner, outer)| data.push_annulus(inner, outer, RING_SEGMENTS))
            })
            .collect();
        let guides = bodies
            .iter()
            .map(|b| {
                let (inner, outer) = b.orbit_guide_radii();
                data.push_annulus(inner, outer, RING_SEGMENTS)
            })
            .collect();
        (
            data,
            Self {
                sphere,
                rings,
                guides,
            },
        )
    }
}

/// Texture slot index for the sun; planet `i` uses `i + 1`.
pub(crate) const SUN_TEXTURE: usize = 0;

#[inline]
pub(crate) fn planet_texture(i: usize) -> usize {
    i + 1
}

/// Fill `out` with this frame's draws: opaque spheres first, then orbit guides and rings.
pub(crate) fn build_draws(
    out: &mut Vec<DrawItem>,
    meshes: &SceneMeshes,
    sun: &SunConfig,
    sun_spin: f32,
    bodies: &[OrbitalBody],
    poses: &[BodyPose],
) {
    out.clear();
    out.push(DrawItem {
        mesh: meshes.sphere,
        model: Mat4::from_scale_rotation_translation(
            Vec3::splat(sun.radius),
            Quat::from_rotation_y(sun_spin),
            Vec3::ZERO,
        ),
        color: Rgb::from_hex_or_white(sun.color).with_alpha(1.0),
        emissive: sun.emissive_intensity,
        lit: false,
        texture: Some(SUN_TEXTURE),
        blend: Blend::Opaque,
    });
    for (i, (body, pose)) in bodies.iter().zip(poses).enumerate() {
        out.push(DrawItem {
            mesh: meshes.sphere,
            model: Mat4::from_scale_rotation_translation(
                Vec3::splat(body.size),
                Quat::from_rotation_y(pose.spin),
                pose.position,
            ),
            color: Rgb::from_hex_or_white(body.color).with_alpha(1.0),
            emissive: 1.0,
            lit: true,
            texture: Some(planet_texture(i)),
            blend: Blend::Opaque,
        });
    }
    for guide in &meshes.guides {
        out.push(DrawItem {
            mesh: *guide,
            model: Mat4::IDENTITY,
            color: [
                ORBIT_GUIDE_COLOR[0],
                ORBIT_GUIDE_COLOR[1],
                ORBIT_GUIDE_COLOR[2],
                ORBIT_GUIDE_OPACITY,
            ],
            emissive: 1.0,
            lit: false,
            texture: None,
            blend: Blend::Translucent,
        });
    }
    for ((body, pose), ring) in bodies.iter().zip(poses).zip(&meshes.rings) {
        let (Some(mesh), Some(style)) = (ring, body.ring) else {
            continue;
        };
        out.push(DrawItem {
            mesh: *mesh,
            model: Mat4::from_rotation_translation(Quat::from_rotation_y(pose.spin), pose.position),
            color: Rgb::from_hex_or_white(style.color).with_alpha(RING_OPACITY),
            emissive: 1.0,
            lit: true,
            texture: None,
            blend: Blend::Translucent,
        });
    }
    out.truncate(MAX_DRAWS);
}

pub(crate) struct BodyTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct SceneResources {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    scene_uniforms: wgpu::Buffer,
    draw_uniforms: wgpu::Buffer,
    draw_stride: usize,
    staging: Vec<u8>,
    bind_group: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: BodyTexture,
    textures: Vec<TextureSlot<BodyTexture>>,
}

fn body_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: Blend,
) -> wgpu::RenderPipeline {
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
    };
    let (cull_mode, depth_write_enabled, depth_compare, color_blend, label) = match blend {
        Blend::Opaque => (
            Some(wgpu::Face::Back),
            true,
            wgpu::CompareFunction::Less,
            None,
            "bodies_opaque",
        ),
        Blend::Translucent => (
            None,
            false,
            wgpu::CompareFunction::LessEqual,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            "bodies_translucent",
        ),
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: color_blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl SceneResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        hdr_format: wgpu::TextureFormat,
        mesh: &MeshData,
        texture_count: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let align = device.limits().min_uniform_buffer_offset_alignment as usize;
        let draw_size = std::mem::size_of::<DrawUniforms>();
        let draw_stride = draw_size.div_ceil(align) * align;

        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl0"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(draw_size as u64),
                    },
                    count: None,
                },
            ],
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl1"),
            entries: &helpers::texture_sampler_entries(),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl0, &texture_bgl],
            push_constant_ranges: &[],
        });
        let opaque_pipeline = body_pipeline(device, &layout, &shader, hdr_format, Blend::Opaque);
        let translucent_pipeline =
            body_pipeline(device, &layout, &shader, hdr_format, Blend::Translucent);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let scene_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let draw_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw_uniforms"),
            size: (draw_stride * MAX_DRAWS) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg0"),
            layout: &bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &draw_uniforms,
                        offset: 0,
                        size: wgpu::BufferSize::new(draw_size as u64),
                    }),
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        // 1x1 white: flat-colored bodies sample this and keep their tint
        let (white, white_view) =
            helpers::create_rgba_texture(device, queue, "fallback_tex", 1, 1, &[255; 4]);
        let fallback = BodyTexture {
            bind_group: helpers::texture_bind_group(
                device,
                "fallback_bg",
                &texture_bgl,
                &white_view,
                &sampler,
            ),
            _texture: white,
        };

        Self {
            opaque_pipeline,
            translucent_pipeline,
            vertex_buffer,
            index_buffer,
            scene_uniforms,
            draw_uniforms,
            draw_stride,
            staging: vec![0; draw_stride * MAX_DRAWS],
            bind_group,
            texture_bgl,
            sampler,
            fallback,
            textures: (0..texture_count).map(|_| TextureSlot::Pending).collect(),
        }
    }

    /// Settle texture slot `index` with a load outcome. Returns `false` if the
    /// slot does not exist or already settled.
    pub(crate) fn install_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        index: usize,
        label: &str,
        outcome: Result<DecodedImage, TextureError>,
    ) -> bool {
        let Some(slot) = self.textures.get_mut(index) else {
            return false;
        };
        if slot.is_settled() {
            return false;
        }
        let uploaded = outcome.map(|img| {
            let (texture, view) =
                helpers::create_rgba_texture(device, queue, label, img.width, img.height, &img.rgba);
            BodyTexture {
                bind_group: helpers::texture_bind_group(
                    device,
                    label,
                    &self.texture_bgl,
                    &view,
                    &self.sampler,
                ),
                _texture: texture,
            }
        });
        slot.resolve(uploaded)
    }

    pub(crate) fn write_uniforms(
        &mut self,
        queue: &wgpu::Queue,
        scene: &SceneUniforms,
        items: &[DrawItem],
    ) {
        queue.write_buffer(&self.scene_uniforms, 0, bytemuck::bytes_of(scene));
        for (i, item) in items.iter().take(MAX_DRAWS).enumerate() {
            let flat = [item.color[0], item.color[1], item.color[2]];
            let surface = item
                .texture
                .and_then(|t| self.textures.get(t))
                .map(|slot| surface_for(slot, flat));
            let (rgb, textured) = match surface {
                // A resolved texture replaces the flat color; the sun keeps its emissive tint
                Some(Surface::Textured(_)) => (if item.lit { [1.0; 3] } else { flat }, true),
                Some(Surface::Flat(c)) => (c, false),
                None => (flat, false),
            };
            let color = [rgb[0], rgb[1], rgb[2], item.color[3]];
            let u = DrawUniforms {
                model: item.model.to_cols_array_2d(),
                color,
                params: [
                    item.emissive,
                    if item.lit { 1.0 } else { 0.0 },
                    if textured { 1.0 } else { 0.0 },
                    0.0,
                ],
            };
            let off = i * self.draw_stride;
            self.staging[off..off + std::mem::size_of::<DrawUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(&u));
        }
        let used = items.len().min(MAX_DRAWS) * self.draw_stride;
        if used > 0 {
            queue.write_buffer(&self.draw_uniforms, 0, &self.staging[..used]);
        }
    }

    pub(crate) fn encode(&self, rpass: &mut wgpu::RenderPass<'_>, items: &[DrawItem]) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for pass in [Blend::Opaque, Blend::Translucent] {
            rpass.set_pipeline(match pass {
                Blend::Opaque => &self.opaque_pipeline,
                Blend::Translucent => &self.translucent_pipeline,
            });
            for (i, item) in items.iter().take(MAX_DRAWS).enumerate() {
                if item.blend != pass {
                    continue;
                }
                let tex = item
                    .texture
                    .and_then(|t| self.textures.get(t))
                    .and_then(|slot| slot.texture())
                    .unwrap_or(&self.fallback);
                rpass.set_bind_group(0, &self.bind_group, &[(i * self.draw_stride) as u32]);
                rpass.set_bind_group(1, &tex.bind_group, &[]);
                let r = item.mesh;
                rpass.draw_indexed(r.first_index..r.first_index + r.index_count, r.base_vertex, 0..1);
            }
        }
    }
}
