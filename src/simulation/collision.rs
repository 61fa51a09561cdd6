use glam::DVec2;

use crate::simulation::{
    body::{CelestialBody, Positioned},
    config::SimConfig,
    projectile::Projectile,
};

/// Where a projectile stands after its latest step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    Flying,
    Collided,
    /// Left the visible area. Removed silently, no mark.
    OffScreen,
}

/// Red dot left behind where a projectile hit the body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionMark {
    pub position: DVec2,
    pub created_at_ms: u64,
}

impl CollisionMark {
    pub fn is_expired(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        now_ms >= self.created_at_ms.saturating_add(cooldown_ms)
    }
}

/// Turns impacts into timed marks and retires them after the cooldown
#[derive(Debug, Clone)]
pub struct CollisionTracker {
    marks: Vec<CollisionMark>,
    cooldown_ms: u64,
    bounds: DVec2,
}

impl CollisionTracker {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            marks: Vec::new(),
            cooldown_ms: config.collision_cooldown_ms,
            bounds: DVec2::new(config.width as f64, config.height as f64),
        }
    }

    pub fn is_off_screen(&self, position: DVec2) -> bool {
        position.x < 0.0 || position.x > self.bounds.x || position.y < 0.0 || position.y > self.bounds.y
    }

    pub fn has_collided(&self, projectile: &Projectile, body: &CelestialBody) -> bool {
        projectile.position.distance(body.position()) <= body.radius()
    }

    /// Leaving the screen wins over a hit on the same tick
    pub fn classify(&self, projectile: &Projectile, body: &CelestialBody) -> ProjectileFate {
        if self.is_off_screen(projectile.position) {
            ProjectileFate::OffScreen
        } else if self.has_collided(projectile, body) {
            ProjectileFate::Collided
        } else {
            ProjectileFate::Flying
        }
    }

    pub fn record(&mut self, position: DVec2, now_ms: u64) {
        self.marks.push(CollisionMark {
            position,
            created_at_ms: now_ms,
        });
    }

    /// Drop every mark whose cooldown has run out, returning how many went
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let cooldown = self.cooldown_ms;
        let before = self.marks.len();
        self.marks.retain(|mark| !mark.is_expired(now_ms, cooldown));
        before - self.marks.len()
    }

    pub fn active_marks(&self, now_ms: u64) -> impl Iterator<Item = &CollisionMark> + '_ {
        let cooldown = self.cooldown_ms;
        self.marks.iter().filter(move |mark| !mark.is_expired(now_ms, cooldown))
    }

    /// All stored marks, including ones not yet swept by `expire`
    pub fn marks(&self) -> &[CollisionMark] {
        &self.marks
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let tracker = CollisionTracker::new(&SimConfig::default());
        assert!(!tracker.is_off_screen(DVec2::new(0.0, 0.0)));
        assert!(!tracker.is_off_screen(DVec2::new(800.0, 800.0)));
        assert!(tracker.is_off_screen(DVec2::new(-0.01, 400.0)));
        assert!(tracker.is_off_screen(DVec2::new(400.0, 800.01)));
    }

    #[test]
    fn expire_reports_removed_count() {
        let mut tracker = CollisionTracker::new(&SimConfig::default());
        tracker.record(DVec2::ZERO, 0);
        tracker.record(DVec2::ONE, 1000);

        assert_eq!(tracker.expire(2999), 0);
        assert_eq!(tracker.expire(3000), 1);
        assert_eq!(tracker.marks().len(), 1);
        assert_eq!(tracker.marks()[0].created_at_ms, 1000);
    }
}
