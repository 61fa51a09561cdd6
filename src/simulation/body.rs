use glam::DVec2;

/// Anything the frontend places on screen by its center
pub trait Positioned {
    fn position(&self) -> DVec2;
}

/// The single fixed, massive body everything falls towards
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    position: DVec2, // pixel space
    radius: f64,     // pixels
    mass: f64,       // kg
}

impl CelestialBody {
    pub fn new(position: DVec2, radius: f64, mass: f64) -> Self {
        Self { position, radius, mass }
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Top-left corner of the body's bounding square, for image placement
    pub fn top_left(&self) -> DVec2 {
        self.position - DVec2::splat(self.radius)
    }
}

impl Positioned for CelestialBody {
    fn position(&self) -> DVec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_offsets_by_radius() {
        let body = CelestialBody::new(DVec2::new(400.0, 400.0), 50.0, 1.0);
        assert_eq!(body.top_left(), DVec2::new(350.0, 350.0));
    }

    #[test]
    fn set_position_moves_body() {
        let mut body = CelestialBody::new(DVec2::ZERO, 10.0, 1.0);
        body.set_position(DVec2::new(3.0, 4.0));
        assert_eq!(body.position(), DVec2::new(3.0, 4.0));
    }
}
