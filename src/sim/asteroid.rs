//! Asteroid population and the size-tier splitting state machine
//!
//! `Big → Medium → Small → Dead`. A registered bullet hit demotes the asteroid
//! in place with freshly rolled size, speed, heading and seed, and spawns
//! siblings of the new tier next to the impact point. A hit on a `Small`
//! asteroid kills it; dead asteroids are swept out at the end of the frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::circle_hit;
use super::pool::SwapPool;
use super::torus::WorldBounds;
use crate::direction_from_angle;
use crate::tuning::{TierProfile, Tuning};

/// Stage in the splitting progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    Big,
    Medium,
    Small,
    /// Terminal; waiting to be swept
    Dead,
}

impl SizeTier {
    /// Tier reached after a registered hit
    pub fn next(self) -> SizeTier {
        match self {
            SizeTier::Big => SizeTier::Medium,
            SizeTier::Medium => SizeTier::Small,
            SizeTier::Small | SizeTier::Dead => SizeTier::Dead,
        }
    }

    /// New siblings spawned when an asteroid of this tier is hit
    pub fn split_count(self) -> usize {
        match self {
            SizeTier::Big => 2,
            SizeTier::Medium => 1,
            SizeTier::Small | SizeTier::Dead => 0,
        }
    }

    /// Score for a registered hit
    pub fn points(self) -> u64 {
        match self {
            SizeTier::Big => 20,
            SizeTier::Medium => 50,
            SizeTier::Small => 100,
            SizeTier::Dead => 0,
        }
    }

    #[inline]
    pub fn is_live(self) -> bool {
        self != SizeTier::Dead
    }
}

/// An asteroid entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Bounding box (width, height)
    pub size: Vec2,
    /// Speed along heading (pixels/s)
    pub speed: f32,
    /// Heading angle (radians, 0 = +y)
    pub heading: f32,
    pub tier: SizeTier,
    /// Silhouette seed; the outline is regenerated from it every draw
    pub seed: u32,
    /// Bullet hits are ignored (and the asteroid holds still) until this time
    pub immune_until_ms: u64,
}

impl Asteroid {
    /// Roll a fresh asteroid of `tier` at `pos`
    pub fn roll<R: Rng>(
        id: u32,
        tier: SizeTier,
        pos: Vec2,
        profile: &TierProfile,
        rng: &mut R,
        immune_until_ms: u64,
    ) -> Self {
        let mut asteroid = Self {
            id,
            pos,
            size: Vec2::ZERO,
            speed: 0.0,
            heading: 0.0,
            tier,
            seed: 0,
            immune_until_ms,
        };
        asteroid.reroll(tier, profile, rng, immune_until_ms);
        asteroid
    }

    /// Re-randomize in place as `tier`, keeping id and position
    fn reroll<R: Rng>(
        &mut self,
        tier: SizeTier,
        profile: &TierProfile,
        rng: &mut R,
        immune_until_ms: u64,
    ) {
        self.tier = tier;
        self.size = Vec2::new(profile.size.sample(rng), profile.size.sample(rng));
        self.speed = profile.speed.sample(rng);
        self.heading = rng.random_range(-TAU..TAU);
        self.seed = rng.random();
        self.immune_until_ms = immune_until_ms;
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.tier.is_live()
    }

    #[inline]
    pub fn is_immune(&self, now_ms: u64) -> bool {
        now_ms < self.immune_until_ms
    }

    /// Live and outside its immunity window
    #[inline]
    pub fn is_hittable(&self, now_ms: u64) -> bool {
        self.is_live() && !self.is_immune(now_ms)
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        direction_from_angle(self.heading) * self.speed
    }

    /// Integrate along heading and wrap
    pub fn advance(&mut self, dt: f32, bounds: &WorldBounds) {
        self.pos = bounds.wrap(self.pos + self.velocity() * dt);
    }
}

/// Jagged outline for a seed: 7 to 13 vertices evenly spaced around the
/// circle, each at a radius in `[0.3, 0.9)`. The same seed always yields the
/// same polygon.
pub fn silhouette(seed: u32) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(seed as u64);
    let n = rng.random_range(7..=13usize);
    (0..n)
        .map(|i| {
            let radius = 0.6 * (1.0 + rng.random_range(-0.5f32..0.5));
            let angle = TAU * i as f32 / n as f32;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Result of a registered bullet hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Immune or already dead; nothing happened
    Ignored,
    /// Demoted to `tier`; `spawned` siblings added, `dropped` lost to capacity
    Split {
        tier: SizeTier,
        spawned: usize,
        dropped: usize,
    },
    /// A `Small` asteroid died at `pos`
    Destroyed { pos: Vec2 },
}

/// The asteroid population: a fixed-capacity pool plus an id counter
#[derive(Debug, Clone)]
pub struct AsteroidField {
    pool: SwapPool<Asteroid>,
    next_id: u32,
}

impl AsteroidField {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: SwapPool::with_capacity(capacity),
            next_id: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Asteroids that are not `Dead`
    pub fn live_count(&self) -> usize {
        self.pool.iter().filter(|a| a.is_live()).count()
    }

    pub fn count_tier(&self, tier: SizeTier) -> usize {
        self.pool.iter().filter(|a| a.tier == tier).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asteroid> {
        self.pool.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Asteroid> {
        self.pool.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Asteroid> {
        self.pool.get_mut(index)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Roll and insert a new asteroid. Returns its index, or `None` when the
    /// field is full (the spawn is dropped).
    pub fn spawn<R: Rng>(
        &mut self,
        tier: SizeTier,
        pos: Vec2,
        profile: &TierProfile,
        rng: &mut R,
        immune_until_ms: u64,
    ) -> Option<usize> {
        if self.pool.is_full() {
            return None;
        }
        let id = self.allocate_id();
        let asteroid = Asteroid::roll(id, tier, pos, profile, rng, immune_until_ms);
        self.pool.insert(asteroid)
    }

    /// Spawn `count` Big asteroids at random positions at least `clearance`
    /// away from `avoid`. Returns how many were placed.
    pub fn spawn_wave<R: Rng>(
        &mut self,
        count: usize,
        avoid: Vec2,
        rng: &mut R,
        tuning: &Tuning,
    ) -> usize {
        const PLACEMENT_TRIES: usize = 16;
        let bounds = tuning.bounds();
        let mut placed = 0;
        for _ in 0..count {
            let mut pos = Vec2::ZERO;
            for _ in 0..PLACEMENT_TRIES {
                pos = Vec2::new(
                    rng.random::<f32>() * bounds.width,
                    rng.random::<f32>() * bounds.height,
                );
                if bounds.delta(avoid, pos).length() >= tuning.spawn_clearance {
                    break;
                }
            }
            let pos = bounds.wrap(pos);
            if self.spawn(SizeTier::Big, pos, &tuning.big, rng, 0).is_none() {
                log::debug!("Wave spawn dropped: asteroid field full");
                break;
            }
            placed += 1;
        }
        placed
    }

    /// Move every live, non-immune asteroid
    pub fn advance(&mut self, dt: f32, now_ms: u64, bounds: &WorldBounds) {
        for asteroid in self.pool.iter_mut() {
            if asteroid.is_hittable(now_ms) {
                asteroid.advance(dt, bounds);
            }
        }
    }

    /// First asteroid (pool order) that `point` hits and that can take a hit
    pub fn first_hit(&self, point: Vec2, now_ms: u64) -> Option<usize> {
        self.pool
            .iter()
            .position(|a| a.is_hittable(now_ms) && circle_hit(point, a.pos, a.size))
    }

    /// First live asteroid touching `point`, immune or not
    pub fn first_contact(&self, point: Vec2) -> Option<usize> {
        self.pool
            .iter()
            .position(|a| a.is_live() && circle_hit(point, a.pos, a.size))
    }

    /// Apply a bullet hit at `impact` to the asteroid at `index`
    pub fn register_hit<R: Rng>(
        &mut self,
        index: usize,
        impact: Vec2,
        now_ms: u64,
        rng: &mut R,
        tuning: &Tuning,
    ) -> HitOutcome {
        let Some(asteroid) = self.pool.get_mut(index) else {
            return HitOutcome::Ignored;
        };
        if !asteroid.is_hittable(now_ms) {
            return HitOutcome::Ignored;
        }

        let next = asteroid.tier.next();
        let Some(profile) = tuning.profile(next) else {
            // Small -> Dead
            asteroid.tier = SizeTier::Dead;
            log::debug!("Asteroid {} destroyed", asteroid.id);
            return HitOutcome::Destroyed { pos: asteroid.pos };
        };

        let split = asteroid.tier.split_count();
        let immune_until = now_ms + tuning.asteroid_immunity_ms;
        asteroid.reroll(next, profile, rng, immune_until);
        let parent_id = asteroid.id;

        let bounds = tuning.bounds();
        let mut spawned = 0;
        for _ in 0..split {
            let offset_dir = direction_from_angle(rng.random_range(0.0..TAU));
            let reach = profile.size.max / 2.0;
            let pos = bounds.wrap(impact + offset_dir * reach);
            if self.spawn(next, pos, profile, rng, immune_until).is_some() {
                spawned += 1;
            }
        }
        let dropped = split - spawned;
        if dropped > 0 {
            log::debug!("Asteroid split dropped {} spawn(s): field full", dropped);
        }
        log::debug!(
            "Asteroid {} split into {:?} (+{} siblings)",
            parent_id,
            next,
            spawned
        );

        HitOutcome::Split {
            tier: next,
            spawned,
            dropped,
        }
    }

    /// Swap-remove every dead asteroid. Returns how many were removed.
    pub fn sweep_dead(&mut self) -> usize {
        self.pool.sweep(|a| !a.is_live())
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn field_with(tier: SizeTier, tuning: &Tuning) -> AsteroidField {
        let mut field = AsteroidField::new(tuning.asteroid_capacity);
        let profile = tuning.profile(tier).unwrap();
        field.spawn(tier, Vec2::new(640.0, 360.0), profile, &mut rng(), 0);
        field
    }

    #[test]
    fn test_tier_progression() {
        assert_eq!(SizeTier::Big.next(), SizeTier::Medium);
        assert_eq!(SizeTier::Medium.next(), SizeTier::Small);
        assert_eq!(SizeTier::Small.next(), SizeTier::Dead);
        assert_eq!(SizeTier::Dead.next(), SizeTier::Dead);
    }

    #[test]
    fn test_silhouette_is_deterministic() {
        let a = silhouette(0xDEAD_BEEF);
        let b = silhouette(0xDEAD_BEEF);
        assert_eq!(a, b);
        assert!((7..=13).contains(&a.len()));
        for v in &a {
            let r = v.length();
            assert!((0.3 - 1e-4..0.9 + 1e-4).contains(&r));
        }
    }

    #[test]
    fn test_silhouettes_differ_by_seed() {
        assert_ne!(silhouette(1), silhouette(2));
    }

    #[test]
    fn test_big_hit_yields_three_mediums() {
        let tuning = Tuning::default();
        let mut field = field_with(SizeTier::Big, &tuning);
        let outcome = field.register_hit(0, Vec2::new(640.0, 380.0), 1000, &mut rng(), &tuning);

        assert_eq!(
            outcome,
            HitOutcome::Split {
                tier: SizeTier::Medium,
                spawned: 2,
                dropped: 0
            }
        );
        assert_eq!(field.len(), 3);
        assert_eq!(field.count_tier(SizeTier::Medium), 3);
        for a in field.iter() {
            assert!(tuning.medium.size.contains(a.size.x));
            assert!(tuning.medium.size.contains(a.size.y));
            assert!(tuning.medium.speed.contains(a.speed));
            assert!(a.is_immune(1000));
            assert!(!a.is_immune(1000 + tuning.asteroid_immunity_ms));
        }
    }

    #[test]
    fn test_medium_hit_yields_two_smalls() {
        let tuning = Tuning::default();
        let mut field = field_with(SizeTier::Medium, &tuning);
        field.register_hit(0, Vec2::new(640.0, 360.0), 10, &mut rng(), &tuning);
        assert_eq!(field.len(), 2);
        assert_eq!(field.count_tier(SizeTier::Small), 2);
    }

    #[test]
    fn test_small_hit_dies_without_replacement() {
        let tuning = Tuning::default();
        let mut field = field_with(SizeTier::Small, &tuning);
        let outcome = field.register_hit(0, Vec2::new(640.0, 360.0), 10, &mut rng(), &tuning);
        assert_eq!(
            outcome,
            HitOutcome::Destroyed {
                pos: Vec2::new(640.0, 360.0)
            }
        );
        assert_eq!(field.live_count(), 0);
        assert_eq!(field.sweep_dead(), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_immune_asteroid_ignores_hit() {
        let tuning = Tuning::default();
        let mut field = AsteroidField::new(8);
        field.spawn(SizeTier::Big, Vec2::ZERO, &tuning.big, &mut rng(), 500);
        let outcome = field.register_hit(0, Vec2::ZERO, 499, &mut rng(), &tuning);
        assert_eq!(outcome, HitOutcome::Ignored);
        assert_eq!(field.get(0).unwrap().tier, SizeTier::Big);
        assert_eq!(field.first_hit(Vec2::ZERO, 499), None);
        assert_eq!(field.first_contact(Vec2::ZERO), Some(0));
    }

    #[test]
    fn test_split_drops_children_when_full() {
        let tuning = Tuning::default();
        let mut field = AsteroidField::new(2);
        field.spawn(SizeTier::Big, Vec2::splat(100.0), &tuning.big, &mut rng(), 0);
        let outcome = field.register_hit(0, Vec2::splat(100.0), 0, &mut rng(), &tuning);
        assert_eq!(
            outcome,
            HitOutcome::Split {
                tier: SizeTier::Medium,
                spawned: 1,
                dropped: 1
            }
        );
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_immune_asteroid_holds_position() {
        let tuning = Tuning::default();
        let bounds = tuning.bounds();
        let mut field = AsteroidField::new(4);
        field.spawn(SizeTier::Big, Vec2::splat(300.0), &tuning.big, &mut rng(), 100);
        field.advance(0.5, 50, &bounds);
        assert_eq!(field.get(0).unwrap().pos, Vec2::splat(300.0));
        field.advance(0.5, 100, &bounds);
        assert_ne!(field.get(0).unwrap().pos, Vec2::splat(300.0));
    }

    #[test]
    fn test_wave_respects_clearance() {
        let tuning = Tuning::default();
        let mut field = AsteroidField::new(tuning.asteroid_capacity);
        let center = tuning.bounds().center();
        let placed = field.spawn_wave(tuning.asteroid_base_count, center, &mut rng(), &tuning);
        assert_eq!(placed, tuning.asteroid_base_count);
        assert_eq!(field.count_tier(SizeTier::Big), placed);
        for a in field.iter() {
            assert!(tuning.bounds().contains(a.pos));
        }
    }
}
