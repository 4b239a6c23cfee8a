//! Control mapper - four mutually exclusive impulse controls
//!
//! Key-down always wins (last pressed control is the active one); only the
//! matching key-up returns to `Idle`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::segment::SegmentKind;

/// Impulse magnitude used by the reference game.
pub const DEFAULT_IMPULSE: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKey {
    LeftThigh,
    RightThigh,
    LeftCalf,
    RightCalf,
}

impl ControlKey {
    pub const ALL: [ControlKey; 4] = [
        ControlKey::LeftThigh,
        ControlKey::RightThigh,
        ControlKey::LeftCalf,
        ControlKey::RightCalf,
    ];

    pub fn target(self) -> SegmentKind {
        match self {
            ControlKey::LeftThigh => SegmentKind::ThighLeft,
            ControlKey::RightThigh => SegmentKind::ThighRight,
            ControlKey::LeftCalf => SegmentKind::CalfLeft,
            ControlKey::RightCalf => SegmentKind::CalfRight,
        }
    }

    /// Sign along the segment's local x axis: thighs swing forward, calves kick back.
    pub fn direction(self) -> f32 {
        match self {
            ControlKey::LeftThigh | ControlKey::RightThigh => 1.0,
            ControlKey::LeftCalf | ControlKey::RightCalf => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlState {
    #[default]
    Idle,
    LeftThighActive,
    RightThighActive,
    LeftCalfActive,
    RightCalfActive,
}

impl ControlState {
    fn holding(key: ControlKey) -> Self {
        match key {
            ControlKey::LeftThigh => ControlState::LeftThighActive,
            ControlKey::RightThigh => ControlState::RightThighActive,
            ControlKey::LeftCalf => ControlState::LeftCalfActive,
            ControlKey::RightCalf => ControlState::RightCalfActive,
        }
    }

    pub fn active(self) -> Option<ControlKey> {
        match self {
            ControlState::Idle => None,
            ControlState::LeftThighActive => Some(ControlKey::LeftThigh),
            ControlState::RightThighActive => Some(ControlKey::RightThigh),
            ControlState::LeftCalfActive => Some(ControlKey::LeftCalf),
            ControlState::RightCalfActive => Some(ControlKey::RightCalf),
        }
    }

    pub fn key_down(self, key: ControlKey) -> Self {
        Self::holding(key)
    }

    pub fn key_up(self, key: ControlKey) -> Self {
        if self.active() == Some(key) {
            ControlState::Idle
        } else {
            self
        }
    }
}

/// Named input actions the presentation layer maps raw key events to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Hold(ControlKey),
    Reset,
    TogglePause,
    SingleStep,
    Quit,
}

impl InputAction {
    /// Map a DOM `KeyboardEvent.code` to an action.
    pub fn from_key_code(code: &str) -> Option<Self> {
        let action = match code {
            "KeyQ" => InputAction::Hold(ControlKey::LeftThigh),
            "KeyW" => InputAction::Hold(ControlKey::RightThigh),
            "KeyO" => InputAction::Hold(ControlKey::LeftCalf),
            "KeyP" => InputAction::Hold(ControlKey::RightCalf),
            "KeyR" => InputAction::Reset,
            "Space" => InputAction::TogglePause,
            "KeyS" => InputAction::SingleStep,
            "Escape" => InputAction::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Impulse to apply this tick, in the target segment's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlImpulse {
    pub segment: SegmentKind,
    pub impulse: Vec2,
    pub local_point: Vec2,
}

#[derive(Clone, Debug)]
pub struct ControlMapper {
    state: ControlState,
    impulse: f32,
}

impl ControlMapper {
    pub fn new(impulse: f32) -> Self {
        Self { state: ControlState::Idle, impulse }
    }

    pub fn state(&self) -> ControlState { self.state }

    pub fn impulse(&self) -> f32 { self.impulse }

    pub fn set_impulse(&mut self, impulse: f32) {
        self.impulse = impulse;
    }

    pub fn press(&mut self, key: ControlKey) {
        self.state = self.state.key_down(key);
    }

    pub fn release(&mut self, key: ControlKey) {
        self.state = self.state.key_up(key);
    }

    /// Impulse for the current tick, if a control is held.
    pub fn tick_impulse(&self) -> Option<ControlImpulse> {
        let key = self.state.active()?;
        Some(ControlImpulse {
            segment: key.target(),
            impulse: Vec2::new(key.direction() * self.impulse, 0.0),
            local_point: Vec2::ZERO,
        })
    }
}

impl Default for ControlMapper {
    fn default() -> Self {
        Self::new(DEFAULT_IMPULSE)
    }
}
