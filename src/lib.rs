//! Asteroid Drift - A toroidal-world asteroid shooter
//!
//! Core modules:
//! - `sim`: Simulation (ship, asteroids, bullets, splitting, wrap-around)
//! - `renderer`: Draw submission to an external rendering collaborator
//! - `platform`: Clock and input collaborators
//! - `tuning`: Data-driven game balance
//! - `runner`: Headless sessions driven by a scripted pilot

pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// World dimensions in pixels
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 40.0;
    /// Thrust acceleration (pixels/s²)
    pub const SHIP_THRUST: f32 = 1500.0;
    /// Fraction of velocity lost per 1/60 s
    pub const SHIP_DRAG: f32 = 0.035;
    /// Rotation speed (1.5 turns per second)
    pub const SHIP_TURN_RATE: f32 = std::f32::consts::TAU * 1.5;
    pub const SHIP_LIVES: u8 = 3;
    /// Duration of the shatter animation before a life is lost
    pub const SHIP_BREAKING_MS: u64 = 1000;
    /// Collision grace after a respawn
    pub const SHIP_RESPAWN_GRACE_MS: u64 = 1500;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 700.0;
    pub const BULLET_LIFETIME_MS: u64 = 1300;
    pub const BULLET_CAPACITY: usize = 256;

    /// Asteroid defaults
    pub const ASTEROID_BASE_COUNT: usize = 12;
    /// Asteroids one Big becomes once fully split (3 Medium, then 6 Small)
    pub const ASTEROID_FANOUT: usize = 6;
    pub const ASTEROID_CAPACITY: usize = ASTEROID_BASE_COUNT * ASTEROID_FANOUT;
    pub const ASTEROID_IMMUNITY_MS: u64 = 200;

    /// Particle burst defaults
    pub const BURST_PARTICLES: usize = 8;
    pub const BURST_MS: u64 = 600;
    pub const BURST_CAPACITY: usize = 32;

    /// Reference frame rate for per-frame factors (drag)
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation
    pub const MAX_DT: f32 = 0.1;
}

/// Unit direction for a heading angle. Angle 0 points along +y.
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    let a = angle + std::f32::consts::FRAC_PI_2;
    Vec2::new(a.cos(), a.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
