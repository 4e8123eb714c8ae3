//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in [`GameState`]. The renderer only
//! ever reads it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{AsteroidField, SizeTier};
use super::bullet::BulletPool;
use super::effects::Burst;
use super::pool::SwapPool;
use super::ship::Ship;
use super::torus::WorldBounds;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; the frame step is a no-op
    GameOver,
}

/// Something noteworthy that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired,
    /// Bullets that ran out of lifetime this frame
    BulletsExpired { count: usize },
    /// An asteroid was demoted to `tier` and spawned `spawned` siblings
    AsteroidSplit { tier: SizeTier, spawned: usize },
    AsteroidDestroyed { pos: Vec2 },
    ShipHit { pos: Vec2 },
    LifeLost { lives_left: u8 },
    WaveSpawned { wave: u32 },
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(super) rng: Pcg32,
    pub phase: GamePhase,
    pub ship: Ship,
    pub asteroids: AsteroidField,
    pub bullets: BulletPool,
    pub bursts: SwapPool<Burst>,
    pub score: u64,
    /// Waves spawned so far (1-based once play starts)
    pub wave: u32,
    /// Clock time of the last frame
    pub now_ms: u64,
    /// Frames simulated
    pub frame: u64,
    /// Events raised by the last frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session: ship at the centre, one wave of Big asteroids around it
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        state.spawn_wave();
        log::info!(
            "Game initialized with seed {} ({} asteroids)",
            seed,
            state.asteroids.len()
        );
        state
    }

    /// Session with a ship and no asteroids
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let bounds = tuning.bounds();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            ship: Ship::new(bounds.center(), tuning.ship_size, tuning.ship_lives),
            asteroids: AsteroidField::new(tuning.asteroid_capacity),
            bullets: BulletPool::new(tuning.bullet_capacity),
            bursts: SwapPool::with_capacity(tuning.burst_capacity),
            score: 0,
            wave: 0,
            now_ms: 0,
            frame: 0,
            events: Vec::new(),
            tuning,
        }
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        self.tuning.bounds()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Place a non-immune asteroid of `tier` with an explicit bounding box.
    /// Speed, heading and seed are rolled from the tier profile.
    pub fn place_asteroid(&mut self, tier: SizeTier, pos: Vec2, size: Vec2) -> Option<usize> {
        let profile = *self.tuning.profile(tier)?;
        let index = self
            .asteroids
            .spawn(tier, pos, &profile, &mut self.rng, 0)?;
        if let Some(asteroid) = self.asteroids.get_mut(index) {
            asteroid.size = size;
        }
        Some(index)
    }

    /// Spawn the next wave of Big asteroids away from the ship
    pub fn spawn_wave(&mut self) {
        let placed = self.asteroids.spawn_wave(
            self.tuning.asteroid_base_count,
            self.ship.pos,
            &mut self.rng,
            &self.tuning,
        );
        self.wave += 1;
        self.events.push(GameEvent::WaveSpawned { wave: self.wave });
        log::info!("Wave {} spawned ({} asteroids)", self.wave, placed);
    }

    /// Start a particle burst; dropped when the effect pool is full
    pub(super) fn start_burst(&mut self, origin: Vec2, now_ms: u64) {
        let burst = Burst {
            origin,
            started_ms: now_ms,
            seed: self.rng.random(),
            particles: self.tuning.burst_particles,
        };
        if self.bursts.insert(burst).is_none() {
            log::trace!("Burst dropped: effect pool full");
        }
    }

    /// Take the events raised by the last frame
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
