//! Geometry snapshots exchanged with the renderer

use anniv_core::{consecutive_pairs, is_strictly_between};
use serde::{Deserialize, Serialize};

use crate::TimelineEvent;

/// Size of the area the timeline is drawn into
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineDimensions {
    pub width: f64,
    pub height: f64,
}

impl TimelineDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box, origin at the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on `(cx, cy)`
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point strictly inside; the border does not count
    pub fn contains(&self, px: f64, py: f64) -> bool {
        is_strictly_between(px, self.left(), self.right())
            && is_strictly_between(py, self.top(), self.bottom())
    }
}

/// Where a timeline node ended up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePosition {
    /// Anchor on the axis
    pub x: f64,
    pub y: f64,
    /// Node box
    pub rect: Rect,
    /// Signed length of the branch from anchor to node box
    pub branch_length: f64,
}

/// Click on a timeline node
#[derive(Debug, Clone)]
pub struct NodeClickEvent {
    pub node: TimelineEvent,
    /// Index of the node in the timeline data
    pub index: usize,
}

/// Connecting line between two consecutive anchors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BranchSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl BranchSegment {
    pub fn length(&self) -> f64 {
        let dx = self.to.0 - self.from.0;
        let dy = self.to.1 - self.from.1;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Segments joining each node's anchor to the next one's
pub fn branch_segments(positions: &[NodePosition]) -> Vec<BranchSegment> {
    consecutive_pairs(positions)
        .into_iter()
        .map(|(a, b)| BranchSegment {
            from: (a.x, a.y),
            to: (b.x, b.y),
        })
        .collect()
}
