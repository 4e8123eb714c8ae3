//! The player's ship and its life-cycle state machine
//!
//! `Alive → Breaking → (Respawning → Alive | GameOver)`. A life is only taken
//! once the shatter animation has finished playing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::Shatter;
use super::tick::TickInput;
use super::torus::WorldBounds;
use crate::consts::REFERENCE_FPS;
use crate::tuning::Tuning;
use crate::{direction_from_angle, normalize_angle};

/// Hull outline as a unit-box line strip, nose at +y
pub const HULL: [Vec2; 6] = [
    Vec2::new(-0.4, -0.5),
    Vec2::new(-0.2, -0.4),
    Vec2::new(0.2, -0.4),
    Vec2::new(0.4, -0.5),
    Vec2::new(0.0, 0.5),
    Vec2::new(-0.4, -0.5),
];

/// Exhaust flame appended to the hull strip while thrusting
pub const FLAME: [Vec2; 3] = [
    Vec2::new(-0.2, -0.4),
    Vec2::new(0.0, -0.7),
    Vec2::new(0.2, -0.4),
];

/// Ship life-cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShipState {
    /// Controllable and vulnerable
    Alive,
    /// Hit; shatter animation plays until `until_ms`
    Breaking { shatter: Shatter, until_ms: u64 },
    /// Controllable, asteroid contact ignored until `until_ms`
    Respawning { until_ms: u64 },
    /// Out of lives
    GameOver,
}

/// Timer-driven transitions reported by [`Ship::update_timers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipTransition {
    /// Breaking finished and a life was spent; the ship respawned
    LifeLost { lives_left: u8 },
    /// Breaking finished on the last life
    GameOver,
    /// Respawn grace expired
    Vulnerable,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Unit heading, kept in sync with `angle`
    pub dir: Vec2,
    /// Heading angle (radians, 0 = +y)
    pub angle: f32,
    /// Bounding box edge length
    pub size: f32,
    pub lives: u8,
    pub state: ShipState,
    /// Thrust was applied this frame (drives the flame)
    pub thrusting: bool,
}

impl Ship {
    pub fn new(pos: Vec2, size: f32, lives: u8) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            dir: direction_from_angle(0.0),
            angle: 0.0,
            size,
            lives,
            state: ShipState::Alive,
            thrusting: false,
        }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }

    /// Bullet spawn point at the nose
    #[inline]
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.dir * (self.size / 2.0)
    }

    /// Accepts steering and fire input
    pub fn is_controllable(&self) -> bool {
        matches!(self.state, ShipState::Alive | ShipState::Respawning { .. })
    }

    /// Can be destroyed by asteroid contact
    pub fn is_vulnerable(&self) -> bool {
        matches!(self.state, ShipState::Alive)
    }

    fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.dir = direction_from_angle(self.angle);
    }

    /// Apply rotation and thrust input
    pub fn steer(&mut self, input: &TickInput, dt: f32, tuning: &Tuning) {
        self.thrusting = false;
        if !self.is_controllable() {
            return;
        }
        if input.rotate_left {
            self.set_angle(self.angle - tuning.ship_turn_rate * dt);
        } else if input.rotate_right {
            self.set_angle(self.angle + tuning.ship_turn_rate * dt);
        }
        if input.thrust {
            self.vel += self.dir * tuning.ship_thrust * dt;
            self.thrusting = true;
        }
    }

    /// Drag, position integration and wrap
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning, bounds: &WorldBounds) {
        if !self.is_controllable() {
            return;
        }
        self.vel *= (1.0 - tuning.ship_drag).powf(dt * REFERENCE_FPS);
        self.pos = bounds.wrap(self.pos + self.vel * dt);
    }

    /// Asteroid contact: freeze and start the shatter animation
    pub fn shatter(&mut self, now_ms: u64, tuning: &Tuning) {
        if !self.is_vulnerable() {
            return;
        }
        self.vel = Vec2::ZERO;
        self.thrusting = false;
        self.state = ShipState::Breaking {
            shatter: Shatter {
                origin: self.pos,
                angle: self.angle,
                since_ms: now_ms,
            },
            until_ms: now_ms + tuning.breaking_ms,
        };
    }

    /// Advance deadline-based transitions
    pub fn update_timers(
        &mut self,
        now_ms: u64,
        tuning: &Tuning,
        spawn_point: Vec2,
    ) -> Option<ShipTransition> {
        match self.state {
            ShipState::Breaking { until_ms, .. } if now_ms > until_ms => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.state = ShipState::GameOver;
                    return Some(ShipTransition::GameOver);
                }
                self.respawn(now_ms, tuning, spawn_point);
                Some(ShipTransition::LifeLost {
                    lives_left: self.lives,
                })
            }
            ShipState::Respawning { until_ms } if now_ms > until_ms => {
                self.state = ShipState::Alive;
                Some(ShipTransition::Vulnerable)
            }
            _ => None,
        }
    }

    fn respawn(&mut self, now_ms: u64, tuning: &Tuning, spawn_point: Vec2) {
        self.pos = spawn_point;
        self.vel = Vec2::ZERO;
        self.set_angle(0.0);
        self.state = if tuning.respawn_grace_ms == 0 {
            ShipState::Alive
        } else {
            ShipState::Respawning {
                until_ms: now_ms + tuning.respawn_grace_ms,
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Ship {
        Ship::new(Vec2::new(640.0, 360.0), 40.0, 3)
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let tuning = Tuning::default();
        let mut ship = ship();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        ship.steer(&input, 0.1, &tuning);
        assert!(ship.thrusting);
        assert!(ship.vel.y > 0.0);
        assert!(ship.vel.x.abs() < 1e-3);
    }

    #[test]
    fn test_drag_decays_exponentially() {
        let tuning = Tuning::default();
        let bounds = tuning.bounds();
        let mut ship = ship();
        ship.vel = Vec2::new(100.0, 0.0);
        ship.integrate(1.0 / 60.0, &tuning, &bounds);
        assert!((ship.vel.x - 100.0 * (1.0 - tuning.ship_drag)).abs() < 1e-2);
        let before = ship.vel.x;
        ship.integrate(1.0 / 60.0, &tuning, &bounds);
        assert!((ship.vel.x / before - (1.0 - tuning.ship_drag)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_left_wins_over_right() {
        let tuning = Tuning::default();
        let mut ship = ship();
        let input = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        ship.steer(&input, 0.01, &tuning);
        assert!(ship.angle < 0.0);
        assert!((ship.dir - direction_from_angle(ship.angle)).length() < 1e-6);
    }

    #[test]
    fn test_shatter_defers_life_loss() {
        let tuning = Tuning::default();
        let mut ship = ship();
        ship.vel = Vec2::new(50.0, 50.0);
        ship.shatter(1000, &tuning);
        assert!(matches!(ship.state, ShipState::Breaking { .. }));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.lives, 3);

        let center = tuning.bounds().center();
        assert_eq!(ship.update_timers(1000 + tuning.breaking_ms, &tuning, center), None);
        let t = ship.update_timers(1001 + tuning.breaking_ms, &tuning, center);
        assert_eq!(t, Some(ShipTransition::LifeLost { lives_left: 2 }));
        assert!(matches!(ship.state, ShipState::Respawning { .. }));
        assert_eq!(ship.pos, center);
        assert_eq!(ship.angle, 0.0);
    }

    #[test]
    fn test_respawn_grace_blocks_shatter() {
        let tuning = Tuning::default();
        let mut ship = ship();
        ship.state = ShipState::Respawning { until_ms: 500 };
        ship.shatter(100, &tuning);
        assert!(matches!(ship.state, ShipState::Respawning { .. }));
        assert_eq!(
            ship.update_timers(501, &tuning, Vec2::ZERO),
            Some(ShipTransition::Vulnerable)
        );
        assert!(ship.is_vulnerable());
    }

    #[test]
    fn test_last_life_ends_game() {
        let tuning = Tuning::default();
        let mut ship = Ship::new(Vec2::ZERO, 40.0, 1);
        ship.shatter(0, &tuning);
        let t = ship.update_timers(tuning.breaking_ms + 1, &tuning, Vec2::ZERO);
        assert_eq!(t, Some(ShipTransition::GameOver));
        assert_eq!(ship.lives, 0);
        assert_eq!(ship.state, ShipState::GameOver);
    }

    #[test]
    fn test_breaking_ship_ignores_input() {
        let tuning = Tuning::default();
        let mut ship = ship();
        ship.shatter(0, &tuning);
        let input = TickInput {
            thrust: true,
            rotate_right: true,
            ..Default::default()
        };
        ship.steer(&input, 0.1, &tuning);
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.angle, 0.0);
    }
}
