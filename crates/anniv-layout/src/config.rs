//! Layout configuration

use anniv_core::{AnnivError, AnnivResult, RngRange};
use anniv_model::TimelineOrientation;
use serde::{Deserialize, Serialize};

/// Timeline layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub orientation: TimelineOrientation,
    /// Mixed into every per-event seed; change it to reshuffle the page
    pub seed: u32,
    /// Branch length across the axis
    pub branch_len_y: RngRange,
    /// Branch shift along the axis
    pub branch_len_x: RngRange,
    pub node_width: f64,
    pub node_height: f64,
    /// Space kept free at both ends of the axis
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            orientation: TimelineOrientation::Horizontal,
            seed: 0,
            branch_len_y: RngRange::new(40.0, 120.0),
            branch_len_x: RngRange::new(-24.0, 24.0),
            node_width: 160.0,
            node_height: 120.0,
            padding: 32.0,
        }
    }
}

impl LayoutConfig {
    /// Dense layout for narrow screens
    pub fn compact() -> Self {
        LayoutConfig {
            branch_len_y: RngRange::new(24.0, 64.0),
            branch_len_x: RngRange::new(-12.0, 12.0),
            node_width: 120.0,
            node_height: 90.0,
            padding: 16.0,
            ..Default::default()
        }
    }

    /// Airy layout for wide screens
    pub fn spacious() -> Self {
        LayoutConfig {
            branch_len_y: RngRange::new(80.0, 200.0),
            branch_len_x: RngRange::new(-48.0, 48.0),
            node_width: 200.0,
            node_height: 150.0,
            padding: 64.0,
            ..Default::default()
        }
    }

    pub fn with_orientation(mut self, orientation: TimelineOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> AnnivResult<()> {
        self.branch_len_y.resolve()?;
        self.branch_len_x.resolve()?;
        if !(self.node_width > 0.0 && self.node_height > 0.0) {
            return Err(AnnivError::InvalidContent(format!(
                "node size must be positive, got {}x{}",
                self.node_width, self.node_height
            )));
        }
        if !(self.padding >= 0.0) {
            return Err(AnnivError::InvalidContent(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

/// Gallery scatter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    pub seed: u32,
    pub offset_x: RngRange,
    pub offset_y: RngRange,
    /// Tilt in degrees
    pub rotation: RngRange,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            seed: 0,
            offset_x: RngRange::new(-12.0, 12.0),
            offset_y: RngRange::new(-12.0, 12.0),
            rotation: RngRange::new(-6.0, 6.0),
        }
    }
}

impl GalleryConfig {
    /// No tilt, small offsets
    pub fn tidy() -> Self {
        GalleryConfig {
            offset_x: RngRange::new(-4.0, 4.0),
            offset_y: RngRange::new(-4.0, 4.0),
            rotation: RngRange::new(-0.5, 0.5),
            ..Default::default()
        }
    }

    /// Scrapbook look
    pub fn scattered() -> Self {
        GalleryConfig {
            offset_x: RngRange::new(-32.0, 32.0),
            offset_y: RngRange::new(-24.0, 24.0),
            rotation: RngRange::new(-15.0, 15.0),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> AnnivResult<()> {
        self.offset_x.resolve()?;
        self.offset_y.resolve()?;
        self.rotation.resolve()?;
        Ok(())
    }
}

/// Both layout configurations, as read from a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub timeline: LayoutConfig,
    pub gallery: GalleryConfig,
}

impl LayoutSettings {
    /// Parse JSON settings; keys left out keep their defaults
    pub fn from_json_str(json: &str) -> AnnivResult<Self> {
        let settings: LayoutSettings =
            serde_json::from_str(json).map_err(|e| AnnivError::InvalidContent(e.to_string()))?;
        settings.timeline.validate()?;
        settings.gallery.validate()?;
        Ok(settings)
    }
}
