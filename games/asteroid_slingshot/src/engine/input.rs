use glam::Vec2;
use slingshot::{InputEvent, InputSource};
use sokol::app as sapp;

/// Collects raw sokol events between frames and exposes them as
/// simulation input: a queue of discrete events plus the pointer position.
pub struct InputManager {
    keys_down: [bool; 512],
    keys_pressed: [bool; 512],

    mouse_position: Vec2,
    mouse_buttons_down: [bool; 8],

    events: Vec<InputEvent>,
}

/// Implementation for engine
impl InputManager {
    pub fn new() -> Self {
        Self {
            keys_down: [false; 512],
            keys_pressed: [false; 512],
            mouse_position: Vec2::ZERO,
            mouse_buttons_down: [false; 8],
            events: Vec::new(),
        }
    }

    pub fn new_frame(&mut self) {
        // Clear one-frame states. Queued events survive until a tick drains them.
        self.keys_pressed.fill(false);
    }

    pub fn handle_key_down(&mut self, key: sapp::Keycode) {
        let key_idx = key as usize;
        if key_idx < self.keys_down.len() {
            if !self.keys_down[key_idx] {
                self.keys_pressed[key_idx] = true;
                if matches!(key, sapp::Keycode::Escape) {
                    self.events.push(InputEvent::CancelLaunch);
                }
            }
            self.keys_down[key_idx] = true;
        }
    }

    pub fn handle_key_up(&mut self, key: sapp::Keycode) {
        let key_idx = key as usize;
        if key_idx < self.keys_down.len() {
            self.keys_down[key_idx] = false;
        }
    }

    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    pub fn handle_mouse_button_down(&mut self, button: sapp::Mousebutton, x: f32, y: f32) {
        // Clicks can arrive before any move event
        self.mouse_position = Vec2::new(x, y);

        let btn_idx = button as usize;
        if btn_idx < self.mouse_buttons_down.len() {
            if !self.mouse_buttons_down[btn_idx] && matches!(button, sapp::Mousebutton::Left) {
                self.events.push(InputEvent::PrimaryActionAt(self.mouse_position));
            }
            self.mouse_buttons_down[btn_idx] = true;
        }
    }

    pub fn handle_mouse_button_up(&mut self, button: sapp::Mousebutton) {
        let btn_idx = button as usize;
        if btn_idx < self.mouse_buttons_down.len() {
            self.mouse_buttons_down[btn_idx] = false;
        }
    }

    pub fn handle_quit_requested(&mut self) {
        self.events.push(InputEvent::Quit);
    }
}

/// Public functions for Game interface
impl InputManager {
    pub fn is_key_pressed(&self, key: sapp::Keycode) -> bool {
        let key_idx = key as usize;
        key_idx < self.keys_pressed.len() && self.keys_pressed[key_idx]
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}

impl InputSource for InputManager {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn pointer_position(&self) -> Vec2 {
        self.mouse_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_without_prior_move_uses_event_position() {
        let mut input = InputManager::new();
        input.handle_mouse_button_down(sapp::Mousebutton::Left, 120.0, 40.0);

        assert_eq!(input.poll_events(), vec![InputEvent::PrimaryActionAt(Vec2::new(120.0, 40.0))]);
        assert_eq!(input.pointer_position(), Vec2::new(120.0, 40.0));
    }

    #[test]
    fn held_button_does_not_repeat_the_action() {
        let mut input = InputManager::new();
        input.handle_mouse_button_down(sapp::Mousebutton::Left, 10.0, 10.0);
        input.handle_mouse_button_down(sapp::Mousebutton::Left, 30.0, 10.0);
        input.handle_mouse_button_up(sapp::Mousebutton::Left);

        assert_eq!(input.poll_events().len(), 1);
        assert_eq!(input.mouse_position(), Vec2::new(30.0, 10.0));
    }

    #[test]
    fn right_click_is_not_a_primary_action() {
        let mut input = InputManager::new();
        input.handle_mouse_button_down(sapp::Mousebutton::Right, 5.0, 5.0);
        assert!(input.poll_events().is_empty());
    }
}
