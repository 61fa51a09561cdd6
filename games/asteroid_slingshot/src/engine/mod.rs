pub mod app;
pub mod debug;
pub mod graphics;
pub mod input;
pub mod text;
pub mod texture;

use sokol::gfx as sg;
pub use app::*;
pub use debug::*;
pub use graphics::*;
pub use input::*;
pub use text::*;
pub use texture::*;

#[derive(Clone)]
pub struct GameConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub background_color: sg::Color,
    pub sample_count: i32,
    pub high_dpi: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Asteroid Slingshot".to_string(),
            window_width: 800,
            window_height: 800,
            background_color: sg::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 },
            sample_count: 1,
            high_dpi: false,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.window_title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_background(mut self, color: sg::Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_samples(mut self, samples: i32) -> Self {
        self.sample_count = samples;
        self
    }

    pub fn with_high_dpi(mut self, high_dpi: bool) -> Self {
        self.high_dpi = high_dpi;
        self
    }
}

// Trait that games must implement
pub trait Game {
    fn config(&self) -> GameConfig;

    fn init(&mut self, config: &GameConfig, renderer: &mut Renderer);
    fn update(&mut self, dt: f32, input: &mut InputManager);
    fn render(&mut self, renderer: &mut Renderer);

    fn handle_event(&mut self, event: &sokol::app::Event);

    /// Checked after every frame. Returning true closes the window.
    fn wants_quit(&self) -> bool {
        false
    }
}
