/// Keyboard commands understood by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMute,
    TogglePause,
    ResetCamera,
    ToggleFullscreen,
    ExitFullscreen,
    ZoomIn,
    ZoomOut,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "m" | "M" => Some(KeyAction::ToggleMute),
        " " => Some(KeyAction::TogglePause),
        "r" | "R" => Some(KeyAction::ResetCamera),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        "+" | "=" => Some(KeyAction::ZoomIn),
        "-" | "_" => Some(KeyAction::ZoomOut),
        _ => None,
    }
}

pub const MUTED_LABEL: &str = "Play Space Ambient";
pub const PLAYING_LABEL: &str = "Space Music Playing";

/// Text for the ambient toggle button.
#[inline]
pub fn mute_button_label(muted: bool) -> &'static str {
    if muted {
        MUTED_LABEL
    } else {
        PLAYING_LABEL
    }
}

#[inline]
pub fn mute_button_icon(muted: bool) -> &'static str {
    if muted {
        "\u{1F507}"
    } else {
        "\u{1F3B5}"
    }
}
