use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use glam::{Vec2, Vec4};
use log::{info, warn};
use slingshot::{
    DrawCommand, DrawList, ImageKind, LoopControl, SimConfig, SimulationLoop, SystemClock, WallClock,
};
use sokol::{app as sapp, gfx as sg};

use crate::debug_print;
use crate::engine::{
    debug_flags, load_image, toggle_debug_overlay, toggle_debug_text, Circle, DecodedImage, Game, GameConfig,
    InputManager, Renderer, TextRenderer,
};

const BACKGROUND_TEXTURE: &str = "background";
const BODY_TEXTURE: &str = "body";
const FONT_TEXTURE: &str = "font";

/// Images decoded before the window opens so a missing file fails fast
pub struct GameAssets {
    background: DecodedImage,
    body: DecodedImage,
    font: DecodedImage,
}

impl GameAssets {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let background = load_image(&dir.join("stars.jpg")).context("background image")?;
        let body = load_image(&dir.join("earth.png")).context("planet image")?;
        let font = load_image(&dir.join("font.png")).context("font atlas")?;

        Ok(Self { background, body, font })
    }
}

pub struct SlingshotGame {
    sim: SimulationLoop,
    frame: DrawList,
    clock: SystemClock,
    assets: Option<GameAssets>,
    text: TextRenderer,
    quit: bool,
}

impl SlingshotGame {
    pub fn new(config: SimConfig, assets: GameAssets) -> Self {
        Self {
            sim: SimulationLoop::new(config),
            frame: DrawList::new(),
            clock: SystemClock::new(),
            assets: Some(assets),
            text: TextRenderer::new(FONT_TEXTURE, 16.0, 16.0, 16, 6).with_spacing(-4.0),
            quit: false,
        }
    }

    fn texture_name(image: ImageKind) -> &'static str {
        match image {
            ImageKind::Background => BACKGROUND_TEXTURE,
            ImageKind::Body => BODY_TEXTURE,
        }
    }

    /// Replay the last presented simulation frame into the renderer
    fn draw_simulation_frame(&self, renderer: &mut Renderer) {
        for command in self.frame.presented() {
            match command {
                DrawCommand::Circle { color, center, radius } => {
                    renderer.draw_circle(&Circle::new(center.x, center.y, *radius, color.to_vec4()));
                }
                DrawCommand::Line { color, start, end, thickness } => {
                    renderer.draw_line(*start, *end, *thickness, color.to_vec4());
                }
                DrawCommand::Image { image, top_left, size } => {
                    renderer.draw_texture(Self::texture_name(*image), *top_left, *size);
                }
                DrawCommand::Text { text, position, color } => {
                    self.text.draw_text(renderer, *position, text, color.to_vec4());
                }
            }
        }
    }

    fn draw_hud(&self, renderer: &mut Renderer) {
        let state = self.sim.state();
        let now = self.clock.now_millis();

        let lines = [
            format!("tick {}", state.tick_count),
            format!("asteroids {}", state.projectiles.len()),
            format!("marks {}", state.tracker.active_marks(now).count()),
            format!("aiming {}", state.pending_launch.is_some()),
        ];

        let color = Vec4::new(1.0, 1.0, 0.0, 1.0);
        let mut pos = Vec2::new(8.0, 8.0);
        for line in &lines {
            self.text.draw_text(renderer, pos, line, color);
            pos.y += self.text.line_height();
        }
    }
}

impl Game for SlingshotGame {
    fn config(&self) -> GameConfig {
        let sim = &self.sim.state().config;
        GameConfig::new()
            .with_title("Asteroid Slingshot")
            .with_size(sim.width as i32, sim.height as i32)
            .with_background(sg::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 })
            .with_samples(4)
            .with_high_dpi(false)
    }

    fn init(&mut self, config: &GameConfig, renderer: &mut Renderer) {
        // Pixels are only needed until they are on the GPU
        if let Some(assets) = self.assets.take() {
            renderer.load_texture(BACKGROUND_TEXTURE, &assets.background);
            renderer.load_texture(BODY_TEXTURE, &assets.body);
            renderer.load_texture(FONT_TEXTURE, &assets.font);
        }

        info!("{} initialized at {}x{}", config.window_title, config.window_width, config.window_height);
    }

    fn update(&mut self, dt: f32, input: &mut InputManager) {
        if input.is_key_pressed(sapp::Keycode::F1) {
            toggle_debug_overlay();
        }
        if input.is_key_pressed(sapp::Keycode::F2) {
            toggle_debug_text();
        }
        if self.quit {
            return;
        }

        let ticks_before = self.sim.state().tick_count;
        let elapsed = Duration::from_secs_f32(dt.max(0.0));
        if self.sim.advance(elapsed, input, &mut self.frame, self.clock.now_millis()) == LoopControl::Quit {
            self.quit = true;
            return;
        }

        let due = self.sim.state().tick_count - ticks_before;
        if due > 0 {
            debug_print!("{} ticks this frame, pointer at {}", due, input.mouse_position());
        }
    }

    fn render(&mut self, renderer: &mut Renderer) {
        self.draw_simulation_frame(renderer);

        if debug_flags().is_overlay_visible() {
            self.draw_hud(renderer);
        }
    }

    fn handle_event(&mut self, event: &sapp::Event) {
        match event._type {
            sapp::EventType::Focused => debug_print!("Window focused"),
            sapp::EventType::Unfocused => debug_print!("Window unfocused"),
            sapp::EventType::Resized => {
                warn!(
                    "Window resized to {}x{}, the simulation field stays {}x{}",
                    event.window_width,
                    event.window_height,
                    self.sim.state().config.width,
                    self.sim.state().config.height
                );
            }
            _ => {}
        }
    }

    fn wants_quit(&self) -> bool {
        self.quit
    }
}
