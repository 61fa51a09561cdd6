//! Seam between the simulation and whatever draws it.
//!
//! The simulation only ever talks to a [`Canvas`], an [`InputSource`] and a
//! [`WallClock`]. A windowed frontend implements them on top of its renderer,
//! tests implement them with [`DrawList`] and scripted input.

use glam::{Vec2, Vec4};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const SILVER: Rgb = Rgb::new(192, 192, 192);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const SANDY_BROWN: Rgb = Rgb::new(244, 164, 96);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized, fully opaque color for vertex data
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        )
    }
}

/// Images the simulation asks to be drawn. The frontend owns the actual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Background,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PrimaryActionAt(Vec2),
    CancelLaunch,
}

pub trait Canvas {
    fn draw_filled_circle(&mut self, color: Rgb, center: Vec2, radius: f32);
    fn draw_line(&mut self, color: Rgb, start: Vec2, end: Vec2, thickness: f32);
    fn draw_image(&mut self, image: ImageKind, top_left: Vec2, size: Vec2);
    fn draw_text(&mut self, text: &str, position: Vec2, color: Rgb);
    fn present(&mut self);
}

pub trait InputSource {
    /// Drain pending events. Never blocks.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn pointer_position(&self) -> Vec2;
}

pub trait WallClock {
    fn now_millis(&self) -> u64;
}

/// Milliseconds since construction, like a game library's tick counter
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle { color: Rgb, center: Vec2, radius: f32 },
    Line { color: Rgb, start: Vec2, end: Vec2, thickness: f32 },
    Image { image: ImageKind, top_left: Vec2, size: Vec2 },
    Text { text: String, position: Vec2, color: Rgb },
}

/// Canvas that records draw calls instead of rasterizing them.
///
/// Commands accumulate in a pending buffer; `present` swaps it into the
/// presented frame so a renderer can replay the last complete frame as often
/// as it needs to.
#[derive(Debug, Default)]
pub struct DrawList {
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames_presented: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> &[DrawCommand] {
        &self.presented
    }

    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Canvas for DrawList {
    fn draw_filled_circle(&mut self, color: Rgb, center: Vec2, radius: f32) {
        self.pending.push(DrawCommand::Circle { color, center, radius });
    }

    fn draw_line(&mut self, color: Rgb, start: Vec2, end: Vec2, thickness: f32) {
        self.pending.push(DrawCommand::Line { color, start, end, thickness });
    }

    fn draw_image(&mut self, image: ImageKind, top_left: Vec2, size: Vec2) {
        self.pending.push(DrawCommand::Image { image, top_left, size });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Rgb) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            color,
        });
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_moves_pending_commands() {
        let mut list = DrawList::new();
        list.draw_filled_circle(Rgb::RED, Vec2::new(1.0, 2.0), 3.0);
        assert_eq!(list.pending().len(), 1);
        assert!(list.presented().is_empty());

        list.present();
        assert!(list.pending().is_empty());
        assert_eq!(list.presented().len(), 1);
        assert_eq!(list.frames_presented(), 1);
    }

    #[test]
    fn rgb_normalizes_channels() {
        let c = Rgb::SANDY_BROWN.to_vec4();
        assert!((c.x - 244.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.w, 1.0);
    }
}
