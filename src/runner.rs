//! Headless session runner
//!
//! Drives a [`GameState`] with a scripted pilot through the same platform
//! path a windowed build would use (clock, frame timer, input latch) and
//! renders every frame into a [`RecordingCanvas`].

use anyhow::{Context, Result, anyhow};
use glam::Vec2;
use serde::Serialize;

use crate::platform::{Clock, Control, FrameTimer, InputState, ManualClock};
use crate::renderer::{RecordingCanvas, render};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::normalize_angle;

/// Chooses held controls and fire presses from the current state
pub trait Pilot {
    fn drive(&mut self, state: &GameState, input: &mut InputState);
}

/// Pilot that never touches the controls
#[derive(Debug, Default, Clone, Copy)]
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn drive(&mut self, _state: &GameState, input: &mut InputState) {
        input.release_all();
    }
}

/// Turns toward the nearest asteroid (across seams), fires when lined up,
/// and thrusts when everything is far away.
#[derive(Debug, Clone)]
pub struct AimPilot {
    /// Heading error accepted before firing (radians)
    pub tolerance: f32,
    /// Frames between shots
    pub fire_every: u64,
    /// Thrust while the nearest target is farther than this (pixels)
    pub cruise_distance: f32,
}

impl Default for AimPilot {
    fn default() -> Self {
        Self {
            tolerance: 0.12,
            fire_every: 6,
            cruise_distance: 320.0,
        }
    }
}

/// Heading angle (0 = +y) that points along `d`
fn angle_of(d: Vec2) -> f32 {
    normalize_angle(d.y.atan2(d.x) - std::f32::consts::FRAC_PI_2)
}

impl Pilot for AimPilot {
    fn drive(&mut self, state: &GameState, input: &mut InputState) {
        input.release_all();
        let ship = &state.ship;
        if !ship.is_controllable() {
            return;
        }
        let bounds = state.bounds();
        let target = state
            .asteroids
            .iter()
            .filter(|a| a.is_live())
            .map(|a| bounds.delta(ship.pos, a.pos))
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
        let Some(delta) = target else {
            return;
        };

        let error = normalize_angle(angle_of(delta) - ship.angle);
        if error < -self.tolerance {
            input.set_held(Control::RotateLeft, true);
        } else if error > self.tolerance {
            input.set_held(Control::RotateRight, true);
        } else if state.frame % self.fire_every == 0 {
            input.press_fire();
        }
        let facing = ship.dir.dot(delta.normalize_or_zero());
        if delta.length() > self.cruise_distance && facing > 0.9 {
            input.set_held(Control::Thrust, true);
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetrics {
    pub seed: u64,
    pub max_frames: u64,
    pub frame_count: u64,
    pub elapsed_ms: u64,
    pub final_score: u64,
    pub final_lives: u8,
    pub final_wave: u32,
    pub game_over: bool,
    pub asteroids_left: usize,
    pub bullets_fired: u32,
    pub bullets_expired: u32,
    pub asteroids_split: u32,
    pub asteroids_destroyed: u32,
    pub ship_hits: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
    pub draw_calls: usize,
    pub vertices_drawn: usize,
}

impl RunMetrics {
    fn record_input(&mut self, input: &TickInput) {
        if input.rotate_left || input.rotate_right {
            self.turn_frames += 1;
        }
        if input.thrust {
            self.thrust_frames += 1;
        }
        if input.fire {
            self.fire_frames += 1;
        }
    }

    fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BulletFired => self.bullets_fired += 1,
                GameEvent::BulletsExpired { count } => self.bullets_expired += *count as u32,
                GameEvent::AsteroidSplit { .. } => self.asteroids_split += 1,
                GameEvent::AsteroidDestroyed { .. } => self.asteroids_destroyed += 1,
                GameEvent::ShipHit { .. } => self.ship_hits += 1,
                _ => {}
            }
        }
    }
}

/// Run a session for up to `max_frames` at a fixed `fps`, stopping early on
/// game over.
pub fn run_session(
    seed: u64,
    tuning: Tuning,
    max_frames: u64,
    fps: u32,
    pilot: &mut dyn Pilot,
) -> Result<RunMetrics> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    if fps == 0 {
        return Err(anyhow!("fps must be > 0"));
    }
    tuning.validate().context("invalid tuning")?;

    let step_ms = (1000 / fps as u64).max(1);
    let clock = ManualClock::new(0);
    let mut timer = FrameTimer::new(tuning.max_dt);
    let mut input = InputState::new();
    let mut canvas = RecordingCanvas::new();
    let mut state = GameState::new(seed, tuning);
    let mut metrics = RunMetrics {
        seed,
        max_frames,
        ..RunMetrics::default()
    };

    while state.frame < max_frames && !state.is_game_over() {
        pilot.drive(&state, &mut input);
        let frame_input = input.take_frame();
        metrics.record_input(&frame_input);

        let frame = timer.advance(&clock);
        tick(&mut state, &frame_input, frame);
        metrics.record_events(&state.drain_events());

        canvas.clear();
        render(&state, &mut canvas);
        metrics.draw_calls += canvas.records.len();
        metrics.vertices_drawn += canvas.vertex_count();

        clock.advance(step_ms);
    }

    metrics.frame_count = state.frame;
    metrics.elapsed_ms = clock.now_ms();
    metrics.final_score = state.score;
    metrics.final_lives = state.ship.lives;
    metrics.final_wave = state.wave;
    metrics.game_over = state.is_game_over();
    metrics.asteroids_left = state.asteroids.live_count();
    log::info!(
        "Run finished: seed {} frames {} score {} wave {}",
        seed,
        metrics.frame_count,
        metrics.final_score,
        metrics.final_wave
    );
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction_from_angle;

    #[test]
    fn test_rejects_zero_frames() {
        assert!(run_session(1, Tuning::default(), 0, 60, &mut IdlePilot).is_err());
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let mut tuning = Tuning::default();
        tuning.world_width = -1.0;
        assert!(run_session(1, tuning, 10, 60, &mut IdlePilot).is_err());
    }

    #[test]
    fn test_angle_of_matches_direction() {
        for d in [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::new(1.0, -1.0).normalize()] {
            let back = direction_from_angle(angle_of(d));
            assert!(back.distance(d) < 1e-5, "{d:?} -> {back:?}");
        }
    }

    #[test]
    fn test_aim_pilot_turns_and_fires() {
        let metrics = run_session(7, Tuning::default(), 1200, 60, &mut AimPilot::default()).unwrap();
        assert!(metrics.bullets_fired > 0);
        assert!(metrics.turn_frames > 0);
        assert!(metrics.draw_calls > 0);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let a = run_session(42, Tuning::default(), 300, 60, &mut AimPilot::default()).unwrap();
        let b = run_session(42, Tuning::default(), 300, 60, &mut AimPilot::default()).unwrap();
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.bullets_fired, b.bullets_fired);
        assert_eq!(a.asteroids_left, b.asteroids_left);
    }
}
