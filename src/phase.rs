//! Preloader phases and the timeline that maps elapsed time onto them.
//!
//! Phases only move forward: `Scatter -> Converge -> Hold -> Explode`. The
//! current phase is a pure function of elapsed time, so the integration step
//! and the scheduler read it from the same clock and tests can jump to any
//! instant without real timers.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which force rules apply to every particle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Free drift with reflective walls.
    #[default]
    Scatter,
    /// Spring pull toward targets.
    Converge,
    /// Stiffer spring, particles hover on the shape.
    Hold,
    /// Accelerating dispersal and fade-out.
    Explode,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Scatter => "scatter",
            Phase::Converge => "converge",
            Phase::Hold => "hold",
            Phase::Explode => "explode",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Offsets from activation, in milliseconds when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    #[serde(with = "millis")]
    pub converge_at: Duration,
    /// Also when the overlay text appears.
    #[serde(with = "millis")]
    pub hold_at: Duration,
    #[serde(with = "millis")]
    pub explode_at: Duration,
    /// Host starts fading the overlay out.
    #[serde(with = "millis")]
    pub fade_out_at: Duration,
    #[serde(with = "millis")]
    pub complete_at: Duration,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            converge_at: Duration::from_millis(800),
            hold_at: Duration::from_millis(2200),
            explode_at: Duration::from_millis(3200),
            fade_out_at: Duration::from_millis(3100),
            complete_at: Duration::from_millis(3800),
        }
    }
}

impl Timeline {
    /// Phase in effect `elapsed` after activation.
    pub fn phase_at(&self, elapsed: Duration) -> Phase {
        if elapsed >= self.explode_at {
            Phase::Explode
        } else if elapsed >= self.hold_at {
            Phase::Hold
        } else if elapsed >= self.converge_at {
            Phase::Converge
        } else {
            Phase::Scatter
        }
    }

    /// Offset at which `phase` begins.
    pub fn start_of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Scatter => Duration::ZERO,
            Phase::Converge => self.converge_at,
            Phase::Hold => self.hold_at,
            Phase::Explode => self.explode_at,
        }
    }

    /// Check that phase offsets are ordered and that completion comes last.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.converge_at > self.hold_at || self.hold_at > self.explode_at {
            return Err(ConfigError::Timeline(format!(
                "phase offsets must be non-decreasing (converge {:?}, hold {:?}, explode {:?})",
                self.converge_at, self.hold_at, self.explode_at
            )));
        }
        if self.complete_at < self.explode_at || self.complete_at < self.fade_out_at {
            return Err(ConfigError::Timeline(format!(
                "completion at {:?} precedes explode or fade-out",
                self.complete_at
            )));
        }
        Ok(())
    }
}

/// Shorter timeline used when motion is reduced: no particles at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StillTimeline {
    #[serde(with = "millis")]
    pub fade_out_at: Duration,
    #[serde(with = "millis")]
    pub complete_at: Duration,
}

impl Default for StillTimeline {
    fn default() -> Self {
        Self {
            fade_out_at: Duration::from_millis(1500),
            complete_at: Duration::from_millis(2100),
        }
    }
}

impl StillTimeline {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.complete_at < self.fade_out_at {
            return Err(ConfigError::Timeline(format!(
                "reduced-motion completion at {:?} precedes fade-out at {:?}",
                self.complete_at, self.fade_out_at
            )));
        }
        Ok(())
    }
}
