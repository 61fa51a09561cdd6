
/// Newtonian gravitational constant
pub const G: f64 = 6.67428e-11;
/// Mass of the central body in kg
pub const PLANET_MASS: f64 = 6.0e24;
/// Upper bound of a projectile's physical radius in km
pub const MAXIMUM_ASTEROID_SIZE: u32 = 10;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 800;

/// Physical distance units per pixel
pub const DISTANCE_SCALE: f64 = 100_000.0;
/// Simulated seconds per tick (30 minutes)
pub const TIME_STEP: f64 = 60.0 * 30.0;

pub const MIN_ASTEROID_RADIUS: f64 = 3.0;
pub const MAX_ASTEROID_RADIUS: f64 = 5.0;
pub const PLANET_RADIUS: f64 = 50.0;

pub const TICK_RATE: u32 = 60;
pub const COLLISION_COOLDOWN_MS: u64 = 3000;
pub const COLLISION_SIZE: f32 = 3.0;
pub const AIM_LINE_THICKNESS: f32 = 2.0;

/// Every tunable constant of one simulation run, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    pub tick_rate: u32,

    pub gravitational_constant: f64,
    pub distance_scale: f64,
    pub time_step: f64,

    pub body_radius: f64,
    pub body_mass: f64,

    pub min_projectile_radius: f64,
    pub max_projectile_radius: f64,
    pub max_size_km: u32,

    pub collision_cooldown_ms: u64,
    pub collision_mark_radius: f32,
    pub aim_line_thickness: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tick_rate: TICK_RATE,
            gravitational_constant: G,
            distance_scale: DISTANCE_SCALE,
            time_step: TIME_STEP,
            body_radius: PLANET_RADIUS,
            body_mass: PLANET_MASS,
            min_projectile_radius: MIN_ASTEROID_RADIUS,
            max_projectile_radius: MAX_ASTEROID_RADIUS,
            max_size_km: MAXIMUM_ASTEROID_SIZE,
            collision_cooldown_ms: COLLISION_COOLDOWN_MS,
            collision_mark_radius: COLLISION_SIZE,
            aim_line_thickness: AIM_LINE_THICKNESS,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate.max(1);
        self
    }

    pub fn with_body(mut self, radius: f64, mass: f64) -> Self {
        self.body_radius = radius;
        self.body_mass = mass;
        self
    }

    pub fn with_projectile_radius(mut self, min: f64, max: f64) -> Self {
        self.min_projectile_radius = min.min(max);
        self.max_projectile_radius = max.max(min);
        self
    }

    pub fn with_collision_cooldown(mut self, cooldown_ms: u64) -> Self {
        self.collision_cooldown_ms = cooldown_ms;
        self
    }

    /// Converts physical acceleration into pixel velocity per tick
    pub fn velocity_scale(&self) -> f64 {
        self.time_step / self.distance_scale
    }

    pub fn center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_velocity_scale() {
        let config = SimConfig::default();
        assert!((config.velocity_scale() - 0.018).abs() < 1e-12);
    }

    #[test]
    fn builder_keeps_radius_range_ordered() {
        let config = SimConfig::new().with_projectile_radius(8.0, 2.0);
        assert_eq!(config.min_projectile_radius, 2.0);
        assert_eq!(config.max_projectile_radius, 8.0);
    }

    #[test]
    fn center_of_reference_window() {
        let config = SimConfig::default();
        assert_eq!(config.center(), glam::DVec2::new(400.0, 400.0));
    }
}
