//! Builds the draw list for one frame

use glam::Vec2;

use super::shapes;
use super::vertex::colors;
use super::{Canvas, DrawCommand, Primitive};
use crate::sim::ship::{HULL, ShipState};
use crate::sim::{GameState, WorldBounds};

/// Respawn blink period (ms)
const BLINK_MS: u64 = 100;
/// Flame shows on one frame in this many while thrusting
const FLAME_EVERY: u64 = 3;
const HUD_MARGIN: f32 = 24.0;
const HUD_ICON_SCALE: f32 = 0.6;

/// Draw a command and, if it straddles an edge, its ghost on the far side
fn draw_wrapped<C: Canvas + ?Sized>(
    canvas: &mut C,
    cmd: &DrawCommand<'_>,
    half_size: Vec2,
    bounds: &WorldBounds,
) {
    canvas.draw(cmd);
    if let Some(ghost) = bounds.ghost(cmd.position, half_size) {
        canvas.draw(&cmd.at(ghost));
    }
}

/// Render the whole scene: asteroids, ship, bullets, effects, then the HUD
pub fn render<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let bounds = state.bounds();
    let now = state.now_ms;

    for asteroid in state.asteroids.iter().filter(|a| a.is_live()) {
        let vertices = shapes::asteroid(asteroid.seed);
        let cmd = DrawCommand {
            primitive: Primitive::LineLoop,
            position: asteroid.pos,
            extent: asteroid.size,
            rotation: asteroid.heading,
            vertices: &vertices,
        };
        draw_wrapped(canvas, &cmd, asteroid.half_size(), &bounds);
    }

    render_ship(state, canvas, &bounds);

    if !state.bullets.is_empty() {
        let vertices = shapes::points(state.bullets.iter().map(|b| b.pos), colors::BULLET);
        canvas.draw(&DrawCommand::world(Primitive::Points, &vertices));
    }

    if !state.bursts.is_empty() {
        let vertices = shapes::points(
            state
                .bursts
                .iter()
                .flat_map(|b| b.points(now))
                .map(|p| bounds.wrap(p)),
            colors::PARTICLE,
        );
        canvas.draw(&DrawCommand::world(Primitive::Points, &vertices));
    }

    render_lives(state, canvas);
}

fn render_ship<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C, bounds: &WorldBounds) {
    let ship = &state.ship;
    match ship.state {
        ShipState::Alive | ShipState::Respawning { .. } => {
            if let ShipState::Respawning { until_ms } = ship.state {
                if (until_ms.saturating_sub(state.now_ms) / BLINK_MS) % 2 == 1 {
                    return;
                }
            }
            let flame = ship.thrusting && state.frame % FLAME_EVERY == 0;
            let vertices = shapes::ship(flame);
            let cmd = DrawCommand {
                primitive: Primitive::LineStrip,
                position: ship.pos,
                extent: Vec2::splat(ship.size),
                rotation: ship.angle,
                vertices: &vertices,
            };
            draw_wrapped(canvas, &cmd, ship.half_size(), bounds);
        }
        ShipState::Breaking { shatter, .. } => {
            let pairs = shatter.segments(&HULL, ship.size, state.now_ms);
            let vertices = shapes::segments(&pairs, colors::DEBRIS);
            canvas.draw(&DrawCommand::world(Primitive::Lines, &vertices));
        }
        ShipState::GameOver => {}
    }
}

/// Remaining lives as small hulls along the top-left corner
fn render_lives<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let size = state.ship.size * HUD_ICON_SCALE;
    let vertices = shapes::outline(&HULL, colors::HUD);
    for i in 0..state.ship.lives {
        canvas.draw(&DrawCommand {
            primitive: Primitive::LineStrip,
            position: Vec2::new(HUD_MARGIN + i as f32 * size, HUD_MARGIN),
            extent: Vec2::splat(size),
            rotation: 0.0,
            vertices: &vertices,
        });
    }
}
