//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, so a seed plus an input sequence replays exactly
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod effects;
pub mod pool;
pub mod ship;
pub mod state;
pub mod tick;
pub mod torus;

pub use asteroid::{Asteroid, AsteroidField, HitOutcome, SizeTier, silhouette};
pub use bullet::{Bullet, BulletPool, FireOutcome};
pub use collision::{circle_hit, circle_radius};
pub use effects::{Burst, Shatter};
pub use pool::SwapPool;
pub use ship::{Ship, ShipState, ShipTransition};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameTime, TickInput, tick};
pub use torus::{WorldBounds, ghost_offset, wrap};
