use super::AppHandles;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Last known pointer position in canvas pixels, plus drag bookkeeping.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub inside: bool,
    pub down: bool,
    last_client: Option<(i32, i32)>,
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

pub fn wire_input_handlers(app: &AppHandles) {
    wire_pointermove(app);
    wire_pointerdown(app);
    wire_pointerup(app);
    wire_pointerleave(app);
    wire_wheel(app);
}

fn wire_pointermove(app: &AppHandles) {
    let app = app.clone();
    crate::dom::add_window_listener("pointermove", move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &app.canvas);
        let Ok(mut f) = app.frame.try_borrow_mut() else {
            return;
        };
        let w = app.canvas.width() as f32;
        let h = app.canvas.height() as f32;
        let client = (ev.client_x(), ev.client_y());
        let p = &mut f.pointer;
        p.x = pos.x;
        p.y = pos.y;
        p.inside = pos.x >= 0.0 && pos.y >= 0.0 && pos.x < w && pos.y < h;
        let drag = match (p.down, p.last_client) {
            (true, Some((lx, ly))) => Some(((client.0 - lx) as f32, (client.1 - ly) as f32)),
            _ => None,
        };
        p.last_client = Some(client);
        if let Some((dx, dy)) = drag {
            f.camera.rotate(dx, dy);
        }
    });
}

fn wire_pointerdown(app: &AppHandles) {
    let canvas = app.canvas.clone();
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Ok(mut f) = app.frame.try_borrow_mut() {
            f.pointer.down = true;
            f.pointer.last_client = Some((ev.client_x(), ev.client_y()));
        }
        _ = app.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(app: &AppHandles) {
    let app = app.clone();
    crate::dom::add_window_listener("pointerup", move |_ev: web::PointerEvent| {
        if let Ok(mut f) = app.frame.try_borrow_mut() {
            f.pointer.down = false;
        }
    });
}

fn wire_pointerleave(app: &AppHandles) {
    let canvas = app.canvas.clone();
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Ok(mut f) = app.frame.try_borrow_mut() {
            f.pointer.inside = false;
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(app: &AppHandles) {
    let canvas = app.canvas.clone();
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if let Ok(mut f) = app.frame.try_borrow_mut() {
            f.camera.zoom(ev.delta_y() as f32);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
