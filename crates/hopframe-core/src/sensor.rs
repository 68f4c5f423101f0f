use serde::{Deserialize, Serialize};

use crate::sinks::GroundProbe;

/// Bitmask of surface layers that count as ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroundMask(pub u32);

impl GroundMask {
    /// Every layer is ground.
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    pub fn contains_layer(self, index: u32) -> bool {
        self.0 & Self::layer(index).0 != 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for GroundMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Grounded transition between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundEdge {
    /// Grounded to airborne.
    LeftGround,
    /// Airborne to grounded.
    Landed,
}

impl GroundEdge {
    pub fn between(was_grounded: bool, is_grounded: bool) -> Option<Self> {
        match (was_grounded, is_grounded) {
            (true, false) => Some(Self::LeftGround),
            (false, true) => Some(Self::Landed),
            _ => None,
        }
    }
}

/// Queries the ground probe once per simulation tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundSensor {
    mask: GroundMask,
}

impl GroundSensor {
    pub fn new(mask: GroundMask) -> Self {
        Self { mask }
    }

    pub fn mask(&self) -> GroundMask {
        self.mask
    }

    pub fn sample<G: GroundProbe + ?Sized>(&self, probe: &G) -> bool {
        probe.is_touching(self.mask)
    }
}
