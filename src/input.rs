//! Input handling for the simulation window.
//!
//! [`Input`] turns raw winit window events into per-frame state: keys that
//! went down this frame, keys held, and where the pointer is.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the controls care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    M,
    P,
    R,
    S,
    BracketLeft,
    BracketRight,
    Minus,
    Equal,
    Escape,
    Shift,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::BracketLeft => KeyCode::BracketLeft,
            WinitKeyCode::BracketRight => KeyCode::BracketRight,
            WinitKeyCode::Minus | WinitKeyCode::NumpadSubtract => KeyCode::Minus,
            WinitKeyCode::Equal | WinitKeyCode::NumpadAdd => KeyCode::Equal,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => KeyCode::Shift,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Keyboard and pointer state for the current frame.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    /// Keys that went down this frame, including OS auto-repeat.
    keys_pressed: HashSet<KeyCode>,

    /// Pointer in window pixels, `None` while outside the window.
    pointer: Option<Vec2>,

    window_size: (u32, u32),
}

impl Input {
    pub fn new() -> Self {
        Self {
            window_size: (1, 1),
            ..Default::default()
        }
    }

    /// Check if a key went down this frame (auto-repeat counts).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Keys that went down this frame, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    /// Pointer position in window pixels.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Pointer position mapped onto a `width` × `height` canvas that is
    /// stretched over the whole window.
    pub fn pointer_on(&self, width: u32, height: u32) -> Option<Vec2> {
        let (ww, wh) = self.window_size;
        if ww == 0 || wh == 0 {
            return None;
        }
        self.pointer.map(|p| {
            Vec2::new(
                p.x * width as f32 / ww as f32,
                p.y * height as f32 / wh as f32,
            )
        })
    }

    /// Called at the start of each frame to clear per-frame state.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Update window size for pointer mapping.
    pub(crate) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    pub(crate) fn press(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
        self.keys_held.insert(key);
    }

    pub(crate) fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => self.press(key),
                        ElementState::Released => self.release(key),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
            }

            WindowEvent::Focused(false) => {
                self.keys_held.clear();
            }

            _ => {}
        }
    }
}
