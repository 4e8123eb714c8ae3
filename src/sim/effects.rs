//! Cosmetic animations: asteroid particle bursts and the ship shatter
//!
//! Neither stores per-particle state. Each is a seed or pose plus a start
//! time, and positions are recomputed from elapsed time on demand.

use std::f32::consts::TAU;

use glam::{Mat2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Outward speed range of burst particles (pixels/s)
const BURST_SPEED: (f32, f32) = (40.0, 120.0);
/// Outward drift of shatter segments (pixels/s)
const SHATTER_DRIFT: f32 = 30.0;
/// Spin of shatter segments (radians/s)
const SHATTER_SPIN: f32 = 2.0;

#[inline]
fn elapsed_secs(since_ms: u64, now_ms: u64) -> f32 {
    now_ms.saturating_sub(since_ms) as f32 / 1000.0
}

/// One-shot radiating points left by a destroyed asteroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub origin: Vec2,
    pub started_ms: u64,
    pub seed: u32,
    pub particles: usize,
}

impl Burst {
    #[inline]
    pub fn is_finished(&self, now_ms: u64, duration_ms: u64) -> bool {
        now_ms > self.started_ms + duration_ms
    }

    /// Particle positions at `now_ms` (unwrapped; the renderer wraps them)
    pub fn points(&self, now_ms: u64) -> Vec<Vec2> {
        let t = elapsed_secs(self.started_ms, now_ms);
        let mut rng = Pcg32::seed_from_u64(self.seed as u64);
        (0..self.particles)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let speed = rng.random_range(BURST_SPEED.0..BURST_SPEED.1);
                self.origin + Vec2::from_angle(angle) * speed * t
            })
            .collect()
    }
}

/// Ship hull broken into segments that drift apart while spinning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shatter {
    pub origin: Vec2,
    /// Ship heading at the moment of impact
    pub angle: f32,
    pub since_ms: u64,
}

impl Shatter {
    /// World-space segments for an outline given as a unit-box line strip
    pub fn segments(&self, outline: &[Vec2], size: f32, now_ms: u64) -> Vec<(Vec2, Vec2)> {
        let t = elapsed_secs(self.since_ms, now_ms);
        let pose = Mat2::from_angle(self.angle);
        outline
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let a = pose * pair[0] * size;
                let b = pose * pair[1] * size;
                let mid = (a + b) / 2.0;
                let spin = if i % 2 == 0 { SHATTER_SPIN } else { -SHATTER_SPIN };
                let turn = Mat2::from_angle(spin * t);
                let drift = mid.normalize_or_zero() * SHATTER_DRIFT * t;
                let center = self.origin + mid + drift;
                (center + turn * (a - mid), center + turn * (b - mid))
            })
            .collect()
    }
}
