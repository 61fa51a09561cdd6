use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use crate::render::Rgb;
use crate::simulation::{body::Positioned, config::SimConfig};

/// Physical class of an asteroid. Drawn with a 75/17/8 percent weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidClass {
    /// Carbonaceous
    CType,
    /// Silicaceous
    SType,
    /// Metallic
    MType,
}

impl AsteroidClass {
    /// Map a roll in `0..100` onto the cumulative 75 / 92 / 100 bins
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=74 => Self::CType,
            75..=91 => Self::SType,
            _ => Self::MType,
        }
    }

    /// kg per cubic km
    pub fn density(self) -> f64 {
        match self {
            Self::CType => 1.38e12,
            Self::SType => 2.70e12,
            Self::MType => 5.32e12,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::CType => Rgb::GRAY,
            Self::SType => Rgb::SANDY_BROWN,
            Self::MType => Rgb::SILVER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CType => "C-Type",
            Self::SType => "S-Type",
            Self::MType => "M-Type",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: DVec2, // pixels
    pub velocity: DVec2, // pixels per tick
    pub radius: f64,     // display pixels
    pub mass: f64,       // kg
    pub class: AsteroidClass,
    pub size_km: u32,
    pub color: Rgb,
}

impl Projectile {
    /// Text shown under the projectile, e.g. `C-Type(3 km)`
    pub fn label(&self) -> String {
        format!("{}({} km)", self.class.name(), self.size_km)
    }

    /// Where the label is anchored
    pub fn label_position(&self) -> DVec2 {
        self.position + DVec2::new(0.0, self.radius)
    }
}

impl Positioned for Projectile {
    fn position(&self) -> DVec2 {
        self.position
    }
}

/// Rolls the physical properties of new asteroids and launches them
pub struct ProjectileFactory {
    rng: StdRng,
    max_size_km: u32,
    min_radius: f64,
    max_radius: f64,
    velocity_scale: f64,
}

impl ProjectileFactory {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: &SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SimConfig, rng: StdRng) -> Self {
        Self {
            rng,
            max_size_km: config.max_size_km.max(1),
            min_radius: config.min_projectile_radius,
            max_radius: config.max_projectile_radius,
            velocity_scale: config.velocity_scale(),
        }
    }

    /// Build a projectile at `anchor` thrown towards `target`
    pub fn generate(&mut self, anchor: DVec2, target: DVec2) -> Projectile {
        let class = AsteroidClass::from_roll(self.rng.random_range(0..100));
        let size_km = self.rng.random_range(1..=self.max_size_km);

        let volume = (4.0 / 3.0) * PI * (size_km as f64).powi(3);
        let mass = class.density() * volume;

        Projectile {
            position: anchor,
            velocity: self.launch_velocity(anchor, target),
            radius: self.display_radius(size_km),
            mass,
            class,
            size_km,
            color: class.color(),
        }
    }

    pub fn launch_velocity(&self, anchor: DVec2, target: DVec2) -> DVec2 {
        (target - anchor) * self.velocity_scale
    }

    /// Linear, purely cosmetic mapping of `[0, max_size_km]` onto the pixel radius range
    pub fn display_radius(&self, size_km: u32) -> f64 {
        let t = size_km as f64 / self.max_size_km as f64;
        (self.min_radius + t * (self.max_radius - self.min_radius)).clamp(self.min_radius, self.max_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_bins_match_cumulative_weights() {
        assert_eq!(AsteroidClass::from_roll(0), AsteroidClass::CType);
        assert_eq!(AsteroidClass::from_roll(74), AsteroidClass::CType);
        assert_eq!(AsteroidClass::from_roll(75), AsteroidClass::SType);
        assert_eq!(AsteroidClass::from_roll(91), AsteroidClass::SType);
        assert_eq!(AsteroidClass::from_roll(92), AsteroidClass::MType);
        assert_eq!(AsteroidClass::from_roll(99), AsteroidClass::MType);
    }

    #[test]
    fn display_radius_spans_configured_range() {
        let factory = ProjectileFactory::with_seed(&SimConfig::default(), 1);
        assert_eq!(factory.display_radius(0), 3.0);
        assert_eq!(factory.display_radius(5), 4.0);
        assert_eq!(factory.display_radius(10), 5.0);
    }

    #[test]
    fn mass_follows_density_and_volume() {
        let mut factory = ProjectileFactory::with_seed(&SimConfig::default(), 99);
        for _ in 0..100 {
            let p = factory.generate(DVec2::ZERO, DVec2::ONE);
            let volume = (4.0 / 3.0) * PI * (p.size_km as f64).powi(3);
            assert!((p.mass - p.class.density() * volume).abs() <= p.mass * 1e-12);
            assert!(p.mass > 0.0);
            assert!((1..=10).contains(&p.size_km));
            assert_eq!(p.color, p.class.color());
        }
    }

    #[test]
    fn label_names_class_and_size() {
        let mut factory = ProjectileFactory::with_seed(&SimConfig::default(), 3);
        let mut p = factory.generate(DVec2::ZERO, DVec2::ZERO);
        p.class = AsteroidClass::SType;
        p.size_km = 7;
        assert_eq!(p.label(), "S-Type(7 km)");
    }
}
