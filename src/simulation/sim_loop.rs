use log::info;
use std::time::Duration;

use crate::render::{Canvas, InputSource, WallClock};
use crate::simulation::{
    clock::TickClock,
    config::SimConfig,
    projectile::ProjectileFactory,
    state::{LoopControl, SimulationState},
};

/// Drives one run: input, physics, collision bookkeeping and drawing, once per tick
pub struct SimulationLoop {
    state: SimulationState,
    clock: TickClock,
}

impl SimulationLoop {
    pub fn new(config: SimConfig) -> Self {
        let factory = ProjectileFactory::new(&config);
        Self::with_factory(config, factory)
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        let factory = ProjectileFactory::with_seed(&config, seed);
        Self::with_factory(config, factory)
    }

    fn with_factory(config: SimConfig, factory: ProjectileFactory) -> Self {
        let clock = TickClock::new(config.tick_rate);
        Self {
            state: SimulationState::new(config, factory),
            clock,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Run a single tick and present the resulting frame.
    /// Returns `Quit` as soon as a quit event is seen, without drawing.
    pub fn tick(&mut self, input: &mut impl InputSource, canvas: &mut impl Canvas, now_ms: u64) -> LoopControl {
        self.state.tick_count += 1;

        let pointer = input.pointer_position().as_dvec2();
        for event in input.poll_events() {
            if self.state.handle_event(event, pointer) == LoopControl::Quit {
                info!("Quit requested after {} ticks", self.state.tick_count);
                return LoopControl::Quit;
            }
        }

        self.state.draw_backdrop(canvas, pointer);
        self.state.update_projectiles(canvas, now_ms);
        self.state.draw_body(canvas);

        self.state.sweep_marks(now_ms);
        self.state.draw_marks(canvas, now_ms);

        canvas.present();
        LoopControl::Continue
    }

    /// Feed `elapsed` real time into the tick clock and run every tick that
    /// falls due. Stops early on `Quit`.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        input: &mut impl InputSource,
        canvas: &mut impl Canvas,
        now_ms: u64,
    ) -> LoopControl {
        for _ in 0..self.clock.advance(elapsed) {
            if self.tick(input, canvas, now_ms) == LoopControl::Quit {
                return LoopControl::Quit;
            }
        }
        LoopControl::Continue
    }

    /// Tick at the configured rate until a quit event arrives
    pub fn run(&mut self, input: &mut impl InputSource, canvas: &mut impl Canvas, clock: &impl WallClock) {
        info!(
            "Simulation running at {} ticks/s on a {}x{} field",
            self.state.config.tick_rate, self.state.config.width, self.state.config.height
        );

        loop {
            let elapsed = self.clock.wait_for_next_tick();
            if self.advance(elapsed, input, canvas, clock.now_millis()) == LoopControl::Quit {
                break;
            }
        }
    }
}
