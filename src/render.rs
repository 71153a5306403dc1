use crate::constants::*;
use crate::core::{DecodedImage, OrbitCamera, TextureError};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod sky;
mod targets;

pub(crate) use scene::{build_draws, planet_texture, DrawItem, SceneMeshes, SUN_TEXTURE};
use targets::{RenderTargets, HDR_FORMAT};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,
    sky: sky::SkyResources,
    scene: scene::SceneResources,
    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        mesh: &crate::core::MeshData,
        texture_count: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let sky = sky::create_sky_resources(&device, HDR_FORMAT);
        let scene = scene::SceneResources::new(&device, &queue, HDR_FORMAT, mesh, texture_count);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let post_groups = post::create_bind_groups(&device, &post, &linear_sampler, &targets);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            post_groups,
            sky,
            scene,
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = post::create_bind_groups(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets,
            );
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Hand a finished texture load to the renderer.
    pub fn install_texture(
        &mut self,
        index: usize,
        label: &str,
        outcome: Result<DecodedImage, TextureError>,
    ) -> bool {
        self.scene
            .install_texture(&self.device, &self.queue, index, label, outcome)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        camera: &OrbitCamera,
        draws: &[DrawItem],
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let view_proj = camera.view_proj(self.aspect());
        let eye: Vec3 = camera.eye();

        self.queue.write_buffer(
            &self.sky.uniform_buffer,
            0,
            bytemuck::bytes_of(&sky::SkyUniforms {
                inv_view_proj: view_proj.inverse().to_cols_array_2d(),
                density: STAR_DENSITY,
                time: self.time_accum,
                _pad: [0.0; 2],
            }),
        );
        self.scene.write_uniforms(
            &self.queue,
            &scene::SceneUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                camera_pos: eye.extend(1.0).to_array(),
                light: [AMBIENT_LIGHT, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE, 0.0],
            },
            draws,
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let clear = wgpu::Color {
            r: CLEAR_COLOR[0],
            g: CLEAR_COLOR[1],
            b: CLEAR_COLOR[2],
            a: 1.0,
        };

        // Pass 1: starfield into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sky_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.sky.pipeline);
            rpass.set_bind_group(0, &self.sky.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        // Pass 2: sun, planets, rings and orbit guides
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bodies_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene.encode(&mut rpass, draws);
        }

        let (bw, bh) = targets::bloom_size(self.width, self.height);
        let uniforms = |blur_dir: [f32; 2]| post::PostUniforms {
            resolution: [bw as f32, bh as f32],
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            exposure: 1.0,
            _pad: 0.0,
        };
        post::write_post_uniforms(&self.queue, &self.post, post::PASS_BRIGHT, uniforms([0.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post, post::PASS_BLUR_H, uniforms([1.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post, post::PASS_BLUR_V, uniforms([0.0, 1.0]));
        post::write_post_uniforms(
            &self.queue,
            &self.post,
            post::PASS_COMPOSITE,
            uniforms([0.0, 0.0]),
        );

        // Pass 3: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright_from_hdr,
            None,
        );
        // Pass 4: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h_from_a,
            None,
        );
        // Pass 5: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v_from_b,
            None,
        );
        // Pass 6: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            clear,
            &self.post.composite_pipeline,
            &self.post_groups.composite_hdr,
            Some(&self.post_groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
