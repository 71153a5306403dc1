#![cfg(target_arch = "wasm32")]
use crate::core::SOLAR_SYSTEM;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod textures;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::add_window_listener("resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

fn wire_mute_button(document: &web::Document, ambient: &audio::SharedAmbient) {
    overlay::update_mute_button(document, true);
    let ambient = ambient.clone();
    let doc = document.clone();
    dom::add_click_listener(document, overlay::MUTE_BUTTON_ID, move || {
        events::toggle_ambient(&ambient, &doc);
    });
}

// The page owns the ambient engine; unloading the page disposes it exactly once.
fn wire_ambient_disposal(ambient: &audio::SharedAmbient) {
    let ambient = ambient.clone();
    dom::add_window_listener("pagehide", move |ev: web::PageTransitionEvent| {
        if let Ok(mut engine) = ambient.try_borrow_mut() {
            if engine.page_hidden(ev.persisted()) {
                log::info!("[audio] disposed");
            }
        }
    });
}

// In-flight loads survive a back/forward cache hide and land after restore.
fn wire_texture_cancel(frame_ctx: &Rc<RefCell<frame::FrameContext<'static>>>) {
    let frame_ctx = frame_ctx.clone();
    dom::add_window_listener("pagehide", move |ev: web::PageTransitionEvent| {
        if ev.persisted() {
            return;
        }
        if let Ok(mut f) = frame_ctx.try_borrow_mut() {
            f.textures.cancel_all();
        }
    });
}

fn request_textures(loader: &mut textures::TextureLoader) {
    if let Some(url) = core::SUN.texture_url {
        loader.request(render::SUN_TEXTURE, "Sun", url);
    }
    for (i, body) in SOLAR_SYSTEM.iter().enumerate() {
        if let Some(url) = body.texture_url {
            loader.request(render::planet_texture(i), body.name, url);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orrery starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // Audio stays silent until the first user toggle
    let ambient = audio::new_ambient(js_sys::Date::now() as u64);
    wire_mute_button(&document, &ambient);
    wire_ambient_disposal(&ambient);

    let (mesh, meshes) = render::SceneMeshes::build(&SOLAR_SYSTEM);
    let gpu = frame::init_gpu(&canvas, &mesh, SOLAR_SYSTEM.len() + 1).await;
    overlay::hide_loading(&document);

    let mut textures = textures::TextureLoader::new();
    if gpu.is_some() {
        request_textures(&mut textures);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas: canvas.clone(),
        document: document.clone(),
        gpu,
        animator: core::OrbitAnimator::new(&SOLAR_SYSTEM),
        clock: core::AnimationClock::default(),
        camera: core::OrbitCamera::default(),
        meshes,
        draws: Vec::with_capacity(constants::MAX_DRAWS),
        textures,
        pointer: events::PointerState::default(),
        hover: None,
        last_instant: Instant::now(),
    }));
    wire_texture_cancel(&frame_ctx);

    let handles = events::AppHandles {
        document,
        canvas,
        frame: frame_ctx.clone(),
        ambient,
    };
    events::wire_global_keydown(handles.clone());
    events::wire_input_handlers(&handles);

    frame::start_loop(frame_ctx);
    Ok(())
}
