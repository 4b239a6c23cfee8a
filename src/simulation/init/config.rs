use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{check_finite, check_positive};
use crate::core::RigError;
use crate::domain::control::DEFAULT_IMPULSE;
use crate::domain::rig::RigVariant;
use crate::domain::segment::CollisionCategory;
use crate::systems::rig_builder::layout::default_anchor;
use crate::systems::rig_builder::{GroundDimensions, RigDimensions};

/// Everything a session needs before it is built. Every field has a default,
/// so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub gravity: [f32; 2],
    /// Fraction of velocity kept per second.
    pub damping: f32,
    pub step: StepConfig,
    pub rig: RigConfig,
    pub ground: GroundDimensions,
    pub control: ControlConfig,
    pub fall: FallConfig,
    pub start_paused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepConfig {
    /// Simulated seconds per stepper call.
    pub duration: f64,
    pub substeps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RigConfig {
    /// Hip-line centre. `None` stands the rig on the middle of the ground.
    pub anchor: Option<[f32; 2]>,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub friction: f32,
    pub variant: RigVariant,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlConfig {
    pub impulse: f32,
    pub impulses_while_paused: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FallConfig {
    pub disallowed: Vec<CollisionCategory>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9820.0],
            damping: 0.99,
            step: StepConfig::default(),
            rig: RigConfig::default(),
            ground: GroundDimensions::default(),
            control: ControlConfig::default(),
            fall: FallConfig::default(),
            start_paused: true,
        }
    }
}

impl Default for StepConfig {
    fn default() -> Self {
        Self { duration: 1.0 / 50.0, substeps: 10 }
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            anchor: None,
            width: 100.0,
            height: 200.0,
            mass: 20.0,
            friction: 0.3,
            variant: RigVariant::Full,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { impulse: DEFAULT_IMPULSE, impulses_while_paused: false }
    }
}

impl Default for FallConfig {
    fn default() -> Self {
        Self { disallowed: vec![CollisionCategory::Trunk] }
    }
}

impl StepConfig {
    pub fn validate(&self) -> Result<(), RigError> {
        if self.duration.is_finite() && self.duration > 0.0 && self.substeps > 0 {
            Ok(())
        } else {
            Err(RigError::InvalidStep { duration: self.duration, substeps: self.substeps })
        }
    }

    /// Length of one engine advance.
    pub fn substep_dt(&self) -> f32 {
        (self.duration / self.substeps.max(1) as f64) as f32
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, RigError> {
        let config: SessionConfig = serde_json::from_str(json).map_err(|e| RigError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::from(self.gravity)
    }

    /// Rig placement with the anchor resolved against the ground.
    pub fn rig_dimensions(&self) -> RigDimensions {
        let anchor = match self.rig.anchor {
            Some(a) => Vec2::from(a),
            None => default_anchor(self.ground.centre().x, self.ground.surface, self.rig.height),
        };
        RigDimensions {
            anchor,
            width: self.rig.width,
            height: self.rig.height,
            mass: self.rig.mass,
            friction: self.rig.friction,
            variant: self.rig.variant,
        }
    }

    pub fn validate(&self) -> Result<(), RigError> {
        check_finite("gravity", &self.gravity)?;
        validate_damping(self.damping)?;
        self.step.validate()?;
        check_finite("control.impulse", &[self.control.impulse])?;
        self.ground.validate()?;
        self.rig_dimensions().validate()
    }
}

pub(crate) fn validate_damping(damping: f32) -> Result<(), RigError> {
    check_positive("damping", damping)?;
    if damping > 1.0 {
        return Err(RigError::OutOfRange { name: "damping", value: damping });
    }
    Ok(())
}
