//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be reproduced from a seed and
//! a tuning file. Defaults mirror [`crate::consts`].

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::asteroid::SizeTier;
use crate::sim::torus::WorldBounds;

/// Errors raised while loading or validating a tuning
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("{name} range is inverted or negative: {min}..{max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error(
        "asteroid capacity {capacity} cannot hold the split fan-out of {base} asteroids (needs {required})"
    )]
    CapacityTooSmall {
        capacity: usize,
        base: usize,
        required: usize,
    },
    #[error("{lower} {what} must not exceed {upper} {what}")]
    TierOrder {
        lower: &'static str,
        upper: &'static str,
        what: &'static str,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Closed interval sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`, or `min` for a degenerate range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), TuningError> {
        if self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
        {
            Ok(())
        } else {
            Err(TuningError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Size and speed ranges for one asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProfile {
    /// Bounding box edge length (pixels), rolled per axis
    pub size: Range,
    /// Speed along heading (pixels/s)
    pub speed: Range,
}

impl TierProfile {
    pub const fn new(size: (f32, f32), speed: (f32, f32)) -> Self {
        Self {
            size: Range::new(size.0, size.1),
            speed: Range::new(speed.0, speed.1),
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Ship ===
    pub ship_size: f32,
    pub ship_thrust: f32,
    /// Fraction of velocity lost per reference frame (1/60 s)
    pub ship_drag: f32,
    /// Radians per second
    pub ship_turn_rate: f32,
    pub ship_lives: u8,
    pub breaking_ms: u64,
    pub respawn_grace_ms: u64,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_lifetime_ms: u64,
    pub bullet_capacity: usize,

    // === Asteroids ===
    pub asteroid_base_count: usize,
    pub asteroid_capacity: usize,
    pub asteroid_immunity_ms: u64,
    /// Minimum distance between the ship and a freshly spawned wave asteroid
    pub spawn_clearance: f32,
    pub big: TierProfile,
    pub medium: TierProfile,
    pub small: TierProfile,

    // === Effects ===
    pub burst_particles: usize,
    pub burst_ms: u64,
    pub burst_capacity: usize,

    // === Timing ===
    pub max_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            ship_size: SHIP_SIZE,
            ship_thrust: SHIP_THRUST,
            ship_drag: SHIP_DRAG,
            ship_turn_rate: SHIP_TURN_RATE,
            ship_lives: SHIP_LIVES,
            breaking_ms: SHIP_BREAKING_MS,
            respawn_grace_ms: SHIP_RESPAWN_GRACE_MS,

            bullet_speed: BULLET_SPEED,
            bullet_lifetime_ms: BULLET_LIFETIME_MS,
            bullet_capacity: BULLET_CAPACITY,

            asteroid_base_count: ASTEROID_BASE_COUNT,
            asteroid_capacity: ASTEROID_CAPACITY,
            asteroid_immunity_ms: ASTEROID_IMMUNITY_MS,
            spawn_clearance: 150.0,
            big: TierProfile::new((80.0, 110.0), (40.0, 80.0)),
            medium: TierProfile::new((45.0, 70.0), (80.0, 130.0)),
            small: TierProfile::new((20.0, 35.0), (130.0, 200.0)),

            burst_particles: BURST_PARTICLES,
            burst_ms: BURST_MS,
            burst_capacity: BURST_CAPACITY,

            max_dt: MAX_DT,
        }
    }
}

/// Each tier must be no larger and no slower than the one it splits from
fn check_tier_order(
    child_name: &'static str,
    child: &TierProfile,
    parent_name: &'static str,
    parent: &TierProfile,
) -> Result<(), TuningError> {
    if child.size.max > parent.size.min {
        return Err(TuningError::TierOrder {
            lower: child_name,
            upper: parent_name,
            what: "size",
        });
    }
    if parent.speed.max > child.speed.min {
        return Err(TuningError::TierOrder {
            lower: parent_name,
            upper: child_name,
            what: "speed",
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a JSON tuning. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.world_width) || !positive(self.world_height) {
            return Err(TuningError::InvalidBounds {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if !positive(self.ship_size) {
            return Err(TuningError::Zero("ship_size"));
        }
        if !(0.0..1.0).contains(&self.ship_drag) {
            return Err(TuningError::InvalidRange {
                name: "ship_drag",
                min: self.ship_drag,
                max: self.ship_drag,
            });
        }
        if self.ship_lives == 0 {
            return Err(TuningError::Zero("ship_lives"));
        }
        if self.bullet_capacity == 0 {
            return Err(TuningError::Zero("bullet_capacity"));
        }
        if self.burst_capacity == 0 {
            return Err(TuningError::Zero("burst_capacity"));
        }
        if !positive(self.max_dt) {
            return Err(TuningError::Zero("max_dt"));
        }
        let required = self
            .asteroid_base_count
            .saturating_mul(ASTEROID_FANOUT)
            .max(1);
        if self.asteroid_capacity < required {
            return Err(TuningError::CapacityTooSmall {
                capacity: self.asteroid_capacity,
                base: self.asteroid_base_count,
                required,
            });
        }
        self.big.size.check("big.size")?;
        self.big.speed.check("big.speed")?;
        self.medium.size.check("medium.size")?;
        self.medium.speed.check("medium.speed")?;
        self.small.size.check("small.size")?;
        self.small.speed.check("small.speed")?;
        check_tier_order("medium", &self.medium, "big", &self.big)?;
        check_tier_order("small", &self.small, "medium", &self.medium)?;
        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_width, self.world_height)
    }

    /// Ranges for a live tier (`None` for `Dead`)
    pub fn profile(&self, tier: SizeTier) -> Option<&TierProfile> {
        match tier {
            SizeTier::Big => Some(&self.big),
            SizeTier::Medium => Some(&self.medium),
            SizeTier::Small => Some(&self.small),
            SizeTier::Dead => None,
        }
    }
}
