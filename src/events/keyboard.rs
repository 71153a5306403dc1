use super::AppHandles;
use crate::constants::KEY_ZOOM_DELTA;
use crate::core::{action_for_key, KeyAction, OrbitCamera};
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &AppHandles) {
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    if ev.repeat() && !matches!(action, KeyAction::ZoomIn | KeyAction::ZoomOut) {
        return;
    }
    match action {
        KeyAction::ToggleMute => super::toggle_ambient(&app.ambient, &app.document),
        KeyAction::TogglePause => {
            if let Ok(mut f) = app.frame.try_borrow_mut() {
                let paused = f.clock.toggle_pause();
                log::info!("[keys] paused={}", paused);
            }
            ev.prevent_default();
        }
        KeyAction::ResetCamera => {
            if let Ok(mut f) = app.frame.try_borrow_mut() {
                f.camera = OrbitCamera::default();
                log::info!("[camera] reset to start view");
            }
        }
        KeyAction::ZoomIn | KeyAction::ZoomOut => {
            let delta = if action == KeyAction::ZoomIn {
                -KEY_ZOOM_DELTA
            } else {
                KEY_ZOOM_DELTA
            };
            if let Ok(mut f) = app.frame.try_borrow_mut() {
                f.camera.zoom(delta);
            }
        }
        KeyAction::ToggleFullscreen => {
            if app.document.fullscreen_element().is_some() {
                app.document.exit_fullscreen();
            } else {
                _ = app.canvas.request_fullscreen();
            }
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if app.document.fullscreen_element().is_some() {
                app.document.exit_fullscreen();
            }
        }
    }
}

pub fn wire_global_keydown(app: AppHandles) {
    crate::dom::add_window_listener("keydown", move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &app);
    });
}
