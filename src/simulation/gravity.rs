use glam::DVec2;

use crate::simulation::{
    body::{CelestialBody, Positioned},
    config::SimConfig,
    projectile::Projectile,
};

/// Newtonian pull of one body on a projectile, advanced one tick at a time.
///
/// Positions live in pixel space. They are scaled into physical distance
/// before the force is evaluated, and the resulting acceleration is scaled
/// back into pixels per tick through the velocity scale.
#[derive(Debug, Clone)]
pub struct GravityIntegrator {
    pub gravitational_constant: f64,
    pub distance_scale: f64,
    pub velocity_scale: f64,
    /// Floor on the physical separation, keeps the force finite at the center
    pub min_distance: f64,
}

impl GravityIntegrator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gravitational_constant: config.gravitational_constant,
            distance_scale: config.distance_scale,
            velocity_scale: config.velocity_scale(),
            min_distance: config.body_radius * config.distance_scale,
        }
    }

    pub fn force(&self, projectile: &Projectile, body: &CelestialBody) -> f64 {
        let distance = self.physical_distance(projectile.position, body);
        self.gravitational_constant * body.mass() * projectile.mass / (distance * distance)
    }

    /// Physical acceleration (distance units / s^2) felt at `position`.
    /// Independent of the falling object's own mass.
    pub fn acceleration(&self, position: DVec2, body: &CelestialBody) -> DVec2 {
        let scaled = position * self.distance_scale;
        let scaled_body = body.position() * self.distance_scale;

        let distance = self.physical_distance(position, body);
        let magnitude = self.gravitational_constant * body.mass() / (distance * distance);

        // atan2(0, 0) is 0, so a projectile sitting on the center is pulled along +x
        let to_body = scaled_body - scaled;
        let angle = to_body.y.atan2(to_body.x);

        DVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn step(&self, projectile: &mut Projectile, body: &CelestialBody) {
        let acceleration = self.acceleration(projectile.position, body);
        projectile.velocity += acceleration * self.velocity_scale;
        projectile.position += projectile.velocity;
    }

    fn physical_distance(&self, position: DVec2, body: &CelestialBody) -> f64 {
        let raw = (position * self.distance_scale).distance(body.position() * self.distance_scale);
        raw.max(self.min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet() -> CelestialBody {
        CelestialBody::new(DVec2::new(400.0, 400.0), 50.0, 6.0e24)
    }

    #[test]
    fn acceleration_points_at_body() {
        let integrator = GravityIntegrator::new(&SimConfig::default());
        let a = integrator.acceleration(DVec2::new(100.0, 400.0), &planet());
        assert!(a.x > 0.0);
        assert!(a.y.abs() < a.x * 1e-12);
    }

    #[test]
    fn coincident_position_is_clamped() {
        let config = SimConfig::default();
        let integrator = GravityIntegrator::new(&config);
        let body = planet();
        let a = integrator.acceleration(body.position(), &body);

        let surface = config.body_radius * config.distance_scale;
        let ceiling = config.gravitational_constant * config.body_mass / (surface * surface);
        assert!(a.is_finite());
        assert!((a.length() - ceiling).abs() <= ceiling * 1e-12);
        assert!(a.x > 0.0);
    }

    #[test]
    fn step_moves_by_updated_velocity() {
        let integrator = GravityIntegrator::new(&SimConfig::default());
        let body = planet();
        let mut factory = crate::simulation::projectile::ProjectileFactory::with_seed(&SimConfig::default(), 5);
        let mut p = factory.generate(DVec2::new(100.0, 100.0), DVec2::new(100.0, 100.0));
        let start = p.position;

        integrator.step(&mut p, &body);
        assert!(p.velocity.length() > 0.0);
        assert_eq!(p.position, start + p.velocity);
    }
}
