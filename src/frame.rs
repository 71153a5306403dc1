use crate::constants::PICK_MIN_RADIUS;
use crate::core::{pick_nearest, AnimationClock, OrbitAnimator, OrbitCamera, SUN};
use crate::events::PointerState;
use crate::overlay;
use crate::render::{self, build_draws, DrawItem, SceneMeshes};
use crate::textures::TextureLoader;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,

    pub animator: OrbitAnimator,
    pub clock: AnimationClock,
    pub camera: OrbitCamera,
    pub meshes: SceneMeshes,
    pub draws: Vec<DrawItem>,
    pub textures: TextureLoader,

    pub pointer: PointerState,
    pub hover: Option<usize>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let elapsed = self.clock.advance(dt_sec);
        if !self.clock.is_paused() {
            self.animator.step(elapsed, dt_sec);
        }

        self.install_loaded_textures();
        self.update_hover();

        build_draws(
            &mut self.draws,
            &self.meshes,
            &SUN,
            self.animator.sun_spin(),
            self.animator.bodies(),
            self.animator.poses(),
        );

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(dt_sec, &self.camera, &self.draws) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
    }

    fn install_loaded_textures(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let before = self.textures.pending();
        self.textures.drain(|loaded| {
            match &loaded.outcome {
                Ok(img) => log::info!(
                    "[texture] {} ready {}x{}",
                    loaded.name,
                    img.width,
                    img.height
                ),
                Err(e) => log::error!("[texture] {} failed: {}", loaded.name, e),
            }
            gpu.install_texture(loaded.slot, loaded.name, loaded.outcome);
        });
        if before > 0 && self.textures.pending() == 0 {
            log::info!("[texture] all loads settled");
        }
    }

    fn update_hover(&mut self) {
        let w = self.canvas.width() as f32;
        let h = self.canvas.height() as f32;
        let hit = if self.pointer.inside && !self.pointer.down {
            let (ro, rd) = self
                .camera
                .screen_to_world_ray(w, h, self.pointer.x, self.pointer.y);
            pick_nearest(
                ro,
                rd,
                self.animator
                    .bodies()
                    .iter()
                    .zip(self.animator.poses())
                    .map(|(b, p)| (p.position, b.size.max(PICK_MIN_RADIUS))),
            )
        } else {
            None
        };
        if hit == self.hover && hit.is_none() {
            return;
        }
        self.hover = hit;
        let label = hit.and_then(|i| {
            let body = self.animator.bodies().get(i)?;
            let pose = self.animator.poses().get(i)?;
            let top = pose.position + glam::Vec3::Y * body.size;
            let px = self.camera.world_to_screen(top, w, h)?;
            Some((body.name, px.x, px.y))
        });
        let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
        overlay::show_hover(&self.document, label, dpr);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    meshes: &crate::core::MeshData,
    texture_count: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, meshes, texture_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Ok(mut f) = frame_ctx.try_borrow_mut() {
            f.frame();
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
