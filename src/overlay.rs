use crate::core::{mute_button_icon, mute_button_label};
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const MUTE_BUTTON_ID: &str = "ambient-toggle";
const MUTE_ICON_ID: &str = "ambient-icon";
const MUTE_LABEL_ID: &str = "ambient-label";
const HOVER_LABEL_ID: &str = "hover-label";
const LOADING_ID: &str = "loading";

/// Reflect the engine's muted flag on the toggle button.
pub fn update_mute_button(document: &web::Document, muted: bool) {
    dom::set_text(document, MUTE_ICON_ID, mute_button_icon(muted));
    dom::set_text(document, MUTE_LABEL_ID, mute_button_label(muted));
    if let Some(el) = document.get_element_by_id(MUTE_BUTTON_ID) {
        _ = el.class_list().toggle_with_force("playing", !muted);
    }
}

/// Show `name` next to canvas pixel (`x`, `y`), or hide the label with `None`.
pub fn show_hover(document: &web::Document, hover: Option<(&str, f32, f32)>, dpr: f64) {
    let Some(el) = document
        .get_element_by_id(HOVER_LABEL_ID)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    match hover {
        Some((name, x, y)) => {
            el.set_text_content(Some(name));
            let style = el.style();
            let dpr = dpr.max(1.0);
            _ = style.set_property("left", &format!("{:.0}px", x as f64 / dpr));
            _ = style.set_property("top", &format!("{:.0}px", y as f64 / dpr));
            _ = el.class_list().remove_1("hidden");
        }
        None => {
            _ = el.class_list().add_1("hidden");
        }
    }
}

#[inline]
pub fn hide_loading(document: &web::Document) {
    dom::set_hidden(document, LOADING_ID, true);
}
