// Host-side tests for keyboard mapping and button labels.

#![allow(dead_code)]
mod controls {
    include!("../src/core/controls.rs");
}

use controls::*;

#[test]
fn maps_documented_keys() {
    assert_eq!(action_for_key("m"), Some(KeyAction::ToggleMute));
    assert_eq!(action_for_key("M"), Some(KeyAction::ToggleMute));
    assert_eq!(action_for_key(" "), Some(KeyAction::TogglePause));
    assert_eq!(action_for_key("r"), Some(KeyAction::ResetCamera));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::ExitFullscreen));
    assert_eq!(action_for_key("="), Some(KeyAction::ZoomIn));
    assert_eq!(action_for_key("-"), Some(KeyAction::ZoomOut));
}

#[test]
fn ignores_other_keys() {
    for key in ["a", "h", "Tab", "ArrowUp", "1", ""] {
        assert_eq!(action_for_key(key), None, "{:?}", key);
    }
}

#[test]
fn mute_button_text_follows_flag() {
    assert_eq!(mute_button_label(true), "Play Space Ambient");
    assert_eq!(mute_button_label(false), "Space Music Playing");
    assert_ne!(mute_button_icon(true), mute_button_icon(false));
}
