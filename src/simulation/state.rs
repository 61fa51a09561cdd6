use glam::DVec2;
use log::debug;

use crate::render::{Canvas, ImageKind, InputEvent, Rgb};
use crate::simulation::{
    body::CelestialBody,
    collision::{CollisionTracker, ProjectileFate},
    config::SimConfig,
    gravity::GravityIntegrator,
    projectile::{Projectile, ProjectileFactory},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// First click of a launch gesture, waiting for the second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLaunch {
    pub anchor: DVec2,
}

/// Everything one simulation run owns
pub struct SimulationState {
    pub config: SimConfig,
    pub body: CelestialBody,
    pub projectiles: Vec<Projectile>,
    pub tracker: CollisionTracker,
    pub pending_launch: Option<PendingLaunch>,
    pub factory: ProjectileFactory,
    pub integrator: GravityIntegrator,
    pub tick_count: u64,
}

impl SimulationState {
    pub fn new(config: SimConfig, factory: ProjectileFactory) -> Self {
        let body = CelestialBody::new(config.center(), config.body_radius, config.body_mass);

        Self {
            body,
            projectiles: Vec::new(),
            tracker: CollisionTracker::new(&config),
            pending_launch: None,
            factory,
            integrator: GravityIntegrator::new(&config),
            tick_count: 0,
            config,
        }
    }

    /// Apply one input event. `pointer` is where the pointer is this tick.
    pub fn handle_event(&mut self, event: InputEvent, pointer: DVec2) -> LoopControl {
        match event {
            InputEvent::Quit => return LoopControl::Quit,
            InputEvent::PrimaryActionAt(at) => match self.pending_launch.take() {
                Some(pending) => {
                    self.launch(pending.anchor, pointer);
                }
                None => {
                    self.pending_launch = Some(PendingLaunch { anchor: at.as_dvec2() });
                }
            },
            InputEvent::CancelLaunch => {
                if self.pending_launch.take().is_some() {
                    debug!("Launch cancelled");
                }
            }
        }
        LoopControl::Continue
    }

    pub fn launch(&mut self, anchor: DVec2, target: DVec2) {
        let projectile = self.factory.generate(anchor, target);
        debug!(
            "Launched {} from ({:.1}, {:.1}) with velocity ({:.3}, {:.3})",
            projectile.label(),
            anchor.x,
            anchor.y,
            projectile.velocity.x,
            projectile.velocity.y
        );
        self.projectiles.push(projectile);
    }

    pub fn draw_backdrop(&self, canvas: &mut impl Canvas, pointer: DVec2) {
        let size = DVec2::new(self.config.width as f64, self.config.height as f64);
        canvas.draw_image(ImageKind::Background, glam::Vec2::ZERO, size.as_vec2());

        if let Some(pending) = self.pending_launch {
            canvas.draw_line(
                Rgb::WHITE,
                pending.anchor.as_vec2(),
                pointer.as_vec2(),
                self.config.aim_line_thickness,
            );
            canvas.draw_filled_circle(
                Rgb::RED,
                pending.anchor.as_vec2(),
                self.config.max_projectile_radius as f32,
            );
        }
    }

    /// Draw, step and classify every live projectile, then drop the ones
    /// that hit the body or left the screen.
    pub fn update_projectiles(&mut self, canvas: &mut impl Canvas, now_ms: u64) {
        let mut fates = Vec::with_capacity(self.projectiles.len());

        for projectile in self.projectiles.iter_mut() {
            draw_projectile(canvas, projectile);
            self.integrator.step(projectile, &self.body);

            let fate = self.tracker.classify(projectile, &self.body);
            match fate {
                ProjectileFate::Collided => {
                    debug!(
                        "{} hit the body at ({:.1}, {:.1})",
                        projectile.label(),
                        projectile.position.x,
                        projectile.position.y
                    );
                    self.tracker.record(projectile.position, now_ms);
                }
                ProjectileFate::OffScreen => {
                    debug!("{} left the screen", projectile.label());
                }
                ProjectileFate::Flying => {}
            }
            fates.push(fate);
        }

        // retain visits in order, so fates line up with projectiles
        let mut fates = fates.into_iter();
        self.projectiles.retain(|_| fates.next() == Some(ProjectileFate::Flying));
    }

    pub fn draw_body(&self, canvas: &mut impl Canvas) {
        let diameter = self.body.radius() * 2.0;
        canvas.draw_image(
            ImageKind::Body,
            self.body.top_left().as_vec2(),
            DVec2::splat(diameter).as_vec2(),
        );
    }

    pub fn sweep_marks(&mut self, now_ms: u64) {
        let expired = self.tracker.expire(now_ms);
        if expired > 0 {
            debug!("{} collision mark(s) expired", expired);
        }
    }

    pub fn draw_marks(&self, canvas: &mut impl Canvas, now_ms: u64) {
        for mark in self.tracker.active_marks(now_ms) {
            canvas.draw_filled_circle(Rgb::RED, mark.position.as_vec2(), self.config.collision_mark_radius);
        }
    }

    /// Draw the current state without advancing anything
    pub fn render(&self, canvas: &mut impl Canvas, pointer: DVec2, now_ms: u64) {
        self.draw_backdrop(canvas, pointer);
        for projectile in &self.projectiles {
            draw_projectile(canvas, projectile);
        }
        self.draw_body(canvas);
        self.draw_marks(canvas, now_ms);
    }
}

fn draw_projectile(canvas: &mut impl Canvas, projectile: &Projectile) {
    canvas.draw_filled_circle(projectile.color, projectile.position.as_vec2(), projectile.radius as f32);
    canvas.draw_text(&projectile.label(), projectile.label_position().as_vec2(), Rgb::WHITE);
}
