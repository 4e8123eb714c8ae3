//! Fixed-capacity bullet pool
//!
//! Bullets live in a [`SwapPool`]. Expired bullets (timed out or absorbed by an
//! asteroid) are swap-removed mid-iteration and the vacated slot is revisited.
//! Firing into a full pool overwrites the oldest bullet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::SwapPool;
use super::torus::WorldBounds;

/// A projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    /// Clock time when fired
    pub spawn_ms: u64,
}

impl Bullet {
    #[inline]
    pub fn is_timed_out(&self, now_ms: u64, lifetime_ms: u64) -> bool {
        now_ms > self.spawn_ms + lifetime_ms
    }
}

/// Where a fired bullet landed in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Appended(usize),
    /// Pool was full; the oldest bullet at this index was replaced
    Overwrote(usize),
}

/// Per-frame bullet bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulletReport {
    pub timed_out: usize,
    pub absorbed: usize,
}

/// Motion parameters shared by every bullet
#[derive(Debug, Clone, Copy)]
pub struct BulletMotion {
    pub speed: f32,
    pub lifetime_ms: u64,
    pub bounds: WorldBounds,
}

#[derive(Debug, Clone)]
pub struct BulletPool {
    pool: SwapPool<Bullet>,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: SwapPool::with_capacity(capacity),
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

    pub fn iter(&self) -> std::slice::Iter<'_, Bullet> {
        self.pool.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.pool.get(index)
    }

    /// Add a bullet; overwrite the oldest one when full
    pub fn fire(&mut self, origin: Vec2, dir: Vec2, now_ms: u64) -> FireOutcome {
        let bullet = Bullet {
            pos: origin,
            dir,
            spawn_ms: now_ms,
        };
        if let Some(index) = self.pool.insert(bullet) {
            return FireOutcome::Appended(index);
        }

        // Ties resolve to the lowest index, so an append-only history overwrites slot 0
        let oldest = self
            .pool
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.spawn_ms)
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.pool.replace(oldest, bullet);
        log::trace!("Bullet pool full, overwrote slot {}", oldest);
        FireOutcome::Overwrote(oldest)
    }

    /// Advance every bullet, then expire it if it timed out or `absorb`
    /// reports an asteroid hit at its new position. Timed-out bullets are not
    /// offered to `absorb`.
    pub fn update<F>(
        &mut self,
        dt: f32,
        now_ms: u64,
        motion: &BulletMotion,
        mut absorb: F,
    ) -> BulletReport
    where
        F: FnMut(Vec2) -> bool,
    {
        let mut report = BulletReport::default();
        let mut i = 0;
        while i < self.pool.len() {
            let bullet = &mut self.pool[i];
            bullet.pos = motion
                .bounds
                .wrap(bullet.pos + bullet.dir * motion.speed * dt);

            if bullet.is_timed_out(now_ms, motion.lifetime_ms) {
                report.timed_out += 1;
            } else if absorb(bullet.pos) {
                report.absorbed += 1;
            } else {
                i += 1;
                continue;
            }
            // Revisit slot `i`: it now holds what was the last bullet
            self.pool.remove(i);
        }
        report
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn motion() -> BulletMotion {
        BulletMotion {
            speed: 100.0,
            lifetime_ms: 1300,
            bounds: WorldBounds::new(1280.0, 720.0),
        }
    }

    #[test]
    fn test_fire_appends() {
        let mut pool = BulletPool::new(4);
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y, 0), FireOutcome::Appended(0));
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y, 5), FireOutcome::Appended(1));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_full_pool_overwrites_oldest() {
        let mut pool = BulletPool::new(3);
        for t in [10, 20, 30] {
            pool.fire(Vec2::ZERO, Vec2::Y, t);
        }
        assert_eq!(pool.fire(Vec2::ONE, Vec2::X, 40), FireOutcome::Overwrote(0));
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(0).unwrap().spawn_ms, 40);
        // Slot 1 (t=20) is now the oldest
        assert_eq!(pool.fire(Vec2::ONE, Vec2::X, 50), FireOutcome::Overwrote(1));
    }

    #[test]
    fn test_update_moves_and_wraps() {
        let mut pool = BulletPool::new(4);
        pool.fire(Vec2::new(1275.0, 10.0), Vec2::X, 0);
        pool.update(0.1, 100, &motion(), |_| false);
        let b = pool.get(0).unwrap();
        assert!((b.pos.x - 5.0).abs() < 1e-3);
        assert!((b.pos.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_timeout_removes_and_revisits() {
        let mut pool = BulletPool::new(4);
        pool.fire(Vec2::ZERO, Vec2::Y, 0);
        pool.fire(Vec2::ZERO, Vec2::Y, 0);
        pool.fire(Vec2::ZERO, Vec2::Y, 1000);
        let report = pool.update(0.016, 1301, &motion(), |_| false);
        assert_eq!(report.timed_out, 2);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0).unwrap().spawn_ms, 1000);
    }

    #[test]
    fn test_lifetime_boundary_is_inclusive() {
        let mut pool = BulletPool::new(1);
        pool.fire(Vec2::ZERO, Vec2::Y, 0);
        pool.update(0.0, 1300, &motion(), |_| false);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_absorbed_bullets_removed() {
        let mut pool = BulletPool::new(4);
        pool.fire(Vec2::new(10.0, 10.0), Vec2::Y, 0);
        pool.fire(Vec2::new(500.0, 10.0), Vec2::Y, 0);
        let mut offered = 0;
        let report = pool.update(0.0, 0, &motion(), |p| {
            offered += 1;
            p.x < 100.0
        });
        assert_eq!(offered, 2);
        assert_eq!(report.absorbed, 1);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0).unwrap().pos.x, 500.0);
    }

    #[test]
    fn test_timed_out_bullet_not_offered() {
        let mut pool = BulletPool::new(1);
        pool.fire(Vec2::ZERO, Vec2::Y, 0);
        let report = pool.update(0.0, 2000, &motion(), |_| panic!("should not be asked"));
        assert_eq!(report.timed_out, 1);
    }

    proptest! {
        #[test]
        fn pool_never_exceeds_capacity(
            capacity in 1usize..32,
            shots in proptest::collection::vec(0u64..5000, 0..200),
        ) {
            let mut pool = BulletPool::new(capacity);
            for t in shots {
                pool.fire(Vec2::ZERO, Vec2::Y, t);
                prop_assert!(pool.len() <= capacity);
            }
        }
    }
}
