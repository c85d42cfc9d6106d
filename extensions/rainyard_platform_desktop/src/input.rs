//! Desktop input conversion (winit -> rainyard_platform)

use rainyard_platform::{InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Pixels per scroll "line" when the device reports pixel deltas
const PIXELS_PER_LINE: f32 = 10.0;

/// Convert winit mouse button to platform MouseButton
pub fn convert_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(n) => MouseButton::Other(n),
    }
}

/// Convert winit element state to KeyState
pub fn convert_key_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

/// Convert winit key to platform Key
pub fn convert_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Character(c) => c.chars().next().map(Key::Char).unwrap_or(Key::Unknown),
        _ => Key::Unknown,
    }
}

/// Convert winit keyboard input to an InputEvent
pub fn convert_keyboard_event(key: &WinitKey, state: ElementState) -> InputEvent {
    InputEvent::Keyboard(KeyboardEvent {
        key: convert_key(key),
        state: convert_key_state(state),
    })
}

/// Mouse move
pub fn mouse_moved(x: f32, y: f32) -> InputEvent {
    InputEvent::Mouse(MouseEvent::Moved { x, y })
}

/// Mouse button press or release at the last known cursor position
pub fn mouse_button(button: WinitMouseButton, state: ElementState, x: f32, y: f32) -> InputEvent {
    let button = convert_mouse_button(button);
    let event = match state {
        ElementState::Pressed => MouseEvent::ButtonPressed { button, x, y },
        ElementState::Released => MouseEvent::ButtonReleased { button, x, y },
    };
    InputEvent::Mouse(event)
}

/// Normalize a wheel delta to lines
pub fn scroll_event(delta: MouseScrollDelta) -> InputEvent {
    let (delta_x, delta_y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(pos) => (
            pos.x as f32 / PIXELS_PER_LINE,
            pos.y as f32 / PIXELS_PER_LINE,
        ),
    };
    InputEvent::Scroll { delta_x, delta_y }
}
