//! Adapter to convert DOM `KeyboardEvent.key` values to our KeyCode type

use super::types::KeyCode;

/// Convert a DOM key name (`KeyboardEvent.key`) to a KeyCode
///
/// Returns None if the key cannot be mapped (e.g., "F5", "Dead", "Unidentified")
pub fn key_from_dom(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match c {
            ' ' => Some(KeyCode::Space),
            c if c.is_control() => None,
            // Character keys - normalize to lowercase
            c => Some(KeyCode::char(c)),
        };
    }

    match key {
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Escape),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        "Spacebar" => Some(KeyCode::Space),

        "ArrowUp" | "Up" => Some(KeyCode::Up),
        "ArrowDown" | "Down" => Some(KeyCode::Down),
        "ArrowLeft" | "Left" => Some(KeyCode::Left),
        "ArrowRight" | "Right" => Some(KeyCode::Right),

        "Shift" => Some(KeyCode::Shift),
        "Control" => Some(KeyCode::Control),
        "Alt" | "AltGraph" => Some(KeyCode::Alt),
        // Older engines report the Windows/Cmd key as "OS"
        "Meta" | "OS" | "Super" => Some(KeyCode::Meta),

        _ => None,
    }
}
