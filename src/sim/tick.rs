//! Frame step
//!
//! One call advances the whole world by one frame: input, physics,
//! collisions and splitting, pool compaction, timers. The step always runs to
//! completion; collisions are evaluated once per frame, so very fast objects
//! can tunnel through small targets.

use super::asteroid::HitOutcome;
use super::bullet::BulletMotion;
use super::ship::ShipTransition;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// Fire edge: true on exactly one frame per press
    pub fire: bool,
}

/// Clock sample for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Monotonic clock time (ms)
    pub now_ms: u64,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, frame: FrameTime) {
    state.events.clear();
    if state.phase == GamePhase::GameOver {
        return;
    }

    let now = frame.now_ms.max(state.now_ms);
    let dt = frame.dt.clamp(0.0, state.tuning.max_dt);
    state.now_ms = now;
    state.frame += 1;
    let bounds = state.bounds();
    log::trace!("frame {} at {} ms, dt {:.4}", state.frame, now, dt);

    // Ship input and physics
    state.ship.steer(input, dt, &state.tuning);
    if input.fire && state.ship.is_controllable() {
        let muzzle = bounds.wrap(state.ship.muzzle());
        state.bullets.fire(muzzle, state.ship.dir, now);
        state.events.push(GameEvent::BulletFired);
    }
    state.ship.integrate(dt, &state.tuning, &bounds);

    // Asteroid movement
    state.asteroids.advance(dt, now, &bounds);

    // Ship vs asteroids
    if state.ship.is_vulnerable() && state.asteroids.first_contact(state.ship.pos).is_some() {
        log::debug!("Ship hit at {:?}", state.ship.pos);
        state.events.push(GameEvent::ShipHit {
            pos: state.ship.pos,
        });
        state.ship.shatter(now, &state.tuning);
    }

    // Bullets: move, time out, or hit the first asteroid in reach
    let motion = BulletMotion {
        speed: state.tuning.bullet_speed,
        lifetime_ms: state.tuning.bullet_lifetime_ms,
        bounds,
    };
    let mut hits = Vec::new();
    let report = {
        let GameState {
            bullets,
            asteroids,
            rng,
            tuning,
            ..
        } = state;
        bullets.update(dt, now, &motion, |pos| {
            let Some(index) = asteroids.first_hit(pos, now) else {
                return false;
            };
            let tier = asteroids.get(index).map(|a| a.tier);
            let outcome = asteroids.register_hit(index, pos, now, &mut *rng, tuning);
            hits.push((tier, outcome));
            outcome != HitOutcome::Ignored
        })
    };
    if report.timed_out > 0 {
        state.events.push(GameEvent::BulletsExpired {
            count: report.timed_out,
        });
    }
    for (tier, outcome) in hits {
        if outcome != HitOutcome::Ignored {
            state.score += tier.map_or(0, |t| t.points());
        }
        match outcome {
            HitOutcome::Split { tier, spawned, .. } => {
                state.events.push(GameEvent::AsteroidSplit { tier, spawned });
            }
            HitOutcome::Destroyed { pos } => {
                state.start_burst(pos, now);
                state.events.push(GameEvent::AsteroidDestroyed { pos });
            }
            HitOutcome::Ignored => {}
        }
    }

    // Compaction
    state.asteroids.sweep_dead();
    let burst_ms = state.tuning.burst_ms;
    state.bursts.sweep(|b| b.is_finished(now, burst_ms));

    // Ship timers
    match state
        .ship
        .update_timers(now, &state.tuning, bounds.center())
    {
        Some(ShipTransition::LifeLost { lives_left }) => {
            log::debug!("Life lost, {} left", lives_left);
            state.events.push(GameEvent::LifeLost { lives_left });
        }
        Some(ShipTransition::GameOver) => {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::LifeLost { lives_left: 0 });
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!("Game over: score {} on wave {}", state.score, state.wave);
            return;
        }
        Some(ShipTransition::Vulnerable) | None => {}
    }

    // Field cleared: next wave
    if state.asteroids.is_empty() {
        state.spawn_wave();
    }
}
