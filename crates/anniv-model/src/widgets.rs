//! Small decorative widgets: step paths and frame tiles

use std::fmt;
use std::str::FromStr;

use anniv_core::AnnivError;
use serde::{Deserialize, Serialize};

use crate::{Merge, Renderable};

/// Direction a step path climbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Up,
    Down,
}

impl FromStr for StepDirection {
    type Err = AnnivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(StepDirection::Up),
            "down" => Ok(StepDirection::Down),
            other => Err(AnnivError::UnknownVariant {
                kind: "step direction",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDirection::Up => f.write_str("up"),
            StepDirection::Down => f.write_str("down"),
        }
    }
}

/// Props of the animated footstep path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepPathProps {
    /// Number of steps
    pub count: Option<u32>,
    /// Step size in pixels
    pub size: Option<f64>,
    pub path_width: Option<f64>,
    /// Spacing between steps
    pub gap: Option<f64>,
    pub dir: Option<StepDirection>,
    /// CSS color
    pub color: Option<String>,
}

impl Merge for StepPathProps {
    fn merge(self, partial: Self) -> Self {
        Self {
            count: partial.count.or(self.count),
            size: partial.size.or(self.size),
            path_width: partial.path_width.or(self.path_width),
            gap: partial.gap.or(self.gap),
            dir: partial.dir.or(self.dir),
            color: partial.color.or(self.color),
        }
    }
}

/// One tile of a photo frame
pub type FrameTile = Renderable;
