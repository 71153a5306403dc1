use crate::audio::SharedAmbient;
use crate::frame::FrameContext;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_input_handlers, PointerState};

/// Everything an input handler may touch.
#[derive(Clone)]
pub struct AppHandles {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub frame: Rc<RefCell<FrameContext<'static>>>,
    pub ambient: SharedAmbient,
}

/// Flip the ambient engine between muted and audible and refresh the button.
pub fn toggle_ambient(ambient: &SharedAmbient, document: &web::Document) {
    let muted = match ambient.try_borrow_mut() {
        Ok(mut engine) => {
            engine.toggle_mute();
            log::info!("[audio] state={:?} muted={}", engine.state(), engine.is_muted());
            engine.is_muted()
        }
        Err(_) => return,
    };
    overlay::update_mute_button(document, muted);
}
