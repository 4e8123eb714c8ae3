//! Polled controls and the fire edge trigger

use crate::sim::TickInput;

/// Controls sampled as "currently held"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::RotateLeft, Control::RotateRight, Control::Thrust];

    #[inline]
    fn index(self) -> usize {
        match self {
            Control::RotateLeft => 0,
            Control::RotateRight => 1,
            Control::Thrust => 2,
        }
    }
}

/// Input as seen by the platform layer: a held-table plus a latched fire press
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 3],
    fire_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, control: Control, held: bool) {
        self.held[control.index()] = held;
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Latch a fire press; it is delivered to exactly one frame
    pub fn press_fire(&mut self) {
        self.fire_pending = true;
    }

    /// Drop every held control (focus loss)
    pub fn release_all(&mut self) {
        self.held = [false; 3];
    }

    /// Snapshot for this frame, consuming the fire latch
    pub fn take_frame(&mut self) -> TickInput {
        TickInput {
            rotate_left: self.is_held(Control::RotateLeft),
            rotate_right: self.is_held(Control::RotateRight),
            thrust: self.is_held(Control::Thrust),
            fire: std::mem::take(&mut self.fire_pending),
        }
    }
}
