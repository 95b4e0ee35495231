//! Text frames for the pin screen and the connected view
//!
//! Frames use `\r\n` line endings since they are drawn in raw mode.

use pinpad_core::{KeypadKey, RenderState};

const TITLE: &str = "Enter Pin to Connect to Assurance";
const CONNECTED: &str = "Assurance Connected";

/// Frame for the current render state
pub fn frame(state: &RenderState, target: &str) -> String {
    if state.unlocked {
        connected_frame(target)
    } else {
        pin_frame(state)
    }
}

fn pin_frame(state: &RenderState) -> String {
    let mut lines = vec![TITLE.to_string(), String::new()];

    let dots: Vec<&str> = state
        .indicators()
        .iter()
        .map(|filled| if *filled { "●" } else { "○" })
        .collect();
    lines.push(format!("   {}", dots.join(" ")));
    lines.push(state.message().unwrap_or_default().to_string());
    lines.push(String::new());

    for row in KeypadKey::layout() {
        let cells: Vec<String> = row.iter().map(|k| format!("[{:^3}]", key_face(k))).collect();
        lines.push(cells.join(" "));
    }

    lines.push(String::new());
    lines.push("0-9 digit  Backspace/d delete  Enter/c connect  q quit".to_string());
    lines.join("\r\n")
}

fn connected_frame(target: &str) -> String {
    [CONNECTED, "", target, "", "q quit"].join("\r\n")
}

fn key_face(key: &KeypadKey) -> String {
    match key {
        KeypadKey::Digit(d) => d.to_string(),
        KeypadKey::Delete => "<-".to_string(),
        KeypadKey::Connect => "@".to_string(),
    }
}
