//! Keyboard-backed trigger source using polled key state from `device_query`.

use super::{Signal, TriggerSource};
use device_query::{DeviceQuery, DeviceState, Keycode};

/// Maps a configured key name to a keycode (case-insensitive).
pub fn parse_key_name(name: &str) -> Option<Keycode> {
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "capslock" | "caps lock" | "caps" => Keycode::CapsLock,
        "lshift" | "left shift" => Keycode::LShift,
        "rshift" | "right shift" => Keycode::RShift,
        "lcontrol" | "lctrl" | "left ctrl" => Keycode::LControl,
        "rcontrol" | "rctrl" | "right ctrl" => Keycode::RControl,
        "lalt" | "left alt" => Keycode::LAlt,
        "ralt" | "right alt" => Keycode::RAlt,
        "tab" => Keycode::Tab,
        "escape" | "esc" => Keycode::Escape,
        "insert" => Keycode::Insert,
        "home" => Keycode::Home,
        "end" => Keycode::End,
        "pageup" => Keycode::PageUp,
        "pagedown" => Keycode::PageDown,
        "f1" => Keycode::F1,
        "f2" => Keycode::F2,
        "f3" => Keycode::F3,
        "f4" => Keycode::F4,
        "f5" => Keycode::F5,
        "f6" => Keycode::F6,
        "f7" => Keycode::F7,
        "f8" => Keycode::F8,
        "f9" => Keycode::F9,
        "f10" => Keycode::F10,
        "f11" => Keycode::F11,
        "f12" => Keycode::F12,
        _ => return None,
    };
    Some(key)
}

/// Polls the global keyboard state for the two configured bindings.
pub struct KeyboardTrigger {
    device: DeviceState,
    toggle: Keycode,
    capture_one: Keycode,
}

impl KeyboardTrigger {
    /// Connects to the platform keyboard state.
    ///
    /// Returns `None` when that is not possible: no X display on Linux, or
    /// missing accessibility permission on macOS.
    pub fn new(toggle: Keycode, capture_one: Keycode) -> Option<Self> {
        let device = DeviceState::checked_new()?;
        Some(Self {
            device,
            toggle,
            capture_one,
        })
    }
}

impl TriggerSource for KeyboardTrigger {
    fn is_triggered(&self, signal: Signal) -> bool {
        let key = match signal {
            Signal::Toggle => self.toggle,
            Signal::CaptureOne => self.capture_one,
        };
        self.device.get_keys().contains(&key)
    }
}
