//! Timeline - dated events and the gaps between them

use std::fmt;
use std::str::FromStr;

use anniv_core::AnnivError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ComponentRef, Merge, PropertyBag, Renderable};

/// Which side of the axis a node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineNodePosition {
    Above,
    Below,
    Left,
    Right,
}

impl TimelineNodePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineNodePosition::Above => "above",
            TimelineNodePosition::Below => "below",
            TimelineNodePosition::Left => "left",
            TimelineNodePosition::Right => "right",
        }
    }

    /// Sign of the branch relative to the axis: -1 above/left, +1 below/right
    pub fn branch_sign(&self) -> f64 {
        match self {
            TimelineNodePosition::Above | TimelineNodePosition::Left => -1.0,
            TimelineNodePosition::Below | TimelineNodePosition::Right => 1.0,
        }
    }
}

impl FromStr for TimelineNodePosition {
    type Err = AnnivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(TimelineNodePosition::Above),
            "below" => Ok(TimelineNodePosition::Below),
            "left" => Ok(TimelineNodePosition::Left),
            "right" => Ok(TimelineNodePosition::Right),
            other => Err(AnnivError::UnknownVariant {
                kind: "node position",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimelineNodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way an event's detail panel opens from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineNodeExpansion {
    Down,
    Up,
    Inside,
    Outside,
}

impl TimelineNodeExpansion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineNodeExpansion::Down => "down",
            TimelineNodeExpansion::Up => "up",
            TimelineNodeExpansion::Inside => "inside",
            TimelineNodeExpansion::Outside => "outside",
        }
    }

    /// Expansion that opens away from the axis for a node at `position`
    pub fn away_from_axis(position: TimelineNodePosition) -> Self {
        match position {
            TimelineNodePosition::Above => TimelineNodeExpansion::Up,
            TimelineNodePosition::Below => TimelineNodeExpansion::Down,
            TimelineNodePosition::Left | TimelineNodePosition::Right => {
                TimelineNodeExpansion::Outside
            }
        }
    }
}

impl FromStr for TimelineNodeExpansion {
    type Err = AnnivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(TimelineNodeExpansion::Down),
            "up" => Ok(TimelineNodeExpansion::Up),
            "inside" => Ok(TimelineNodeExpansion::Inside),
            "outside" => Ok(TimelineNodeExpansion::Outside),
            other => Err(AnnivError::UnknownVariant {
                kind: "node expansion",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimelineNodeExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis the timeline runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl TimelineOrientation {
    /// The two sides nodes alternate between
    pub fn sides(&self) -> [TimelineNodePosition; 2] {
        match self {
            TimelineOrientation::Horizontal => {
                [TimelineNodePosition::Above, TimelineNodePosition::Below]
            }
            TimelineOrientation::Vertical => {
                [TimelineNodePosition::Left, TimelineNodePosition::Right]
            }
        }
    }
}

impl FromStr for TimelineOrientation {
    type Err = AnnivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(TimelineOrientation::Horizontal),
            "vertical" => Ok(TimelineOrientation::Vertical),
            other => Err(AnnivError::UnknownVariant {
                kind: "orientation",
                value: other.to_string(),
            }),
        }
    }
}

/// Easing curve name the renderer animates node expansion with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationEasing {
    #[default]
    Linear,
    Cubic,
    Elastic,
    Bounce,
}

impl FromStr for AnimationEasing {
    type Err = AnnivError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(AnimationEasing::Linear),
            "cubic" => Ok(AnimationEasing::Cubic),
            "elastic" => Ok(AnimationEasing::Elastic),
            "bounce" => Ok(AnimationEasing::Bounce),
            other => Err(AnnivError::UnknownVariant {
                kind: "easing",
                value: other.to_string(),
            }),
        }
    }
}

/// Discriminant of a [`TimelineDatum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineNodeType {
    Skip,
    Event,
}

/// A dated event on the timeline.
///
/// Every field is optional; layout fills `position`, `expansion` and the
/// branch lengths when content leaves them out.
#[derive(Debug, Clone, Default)]
pub struct TimelineEvent {
    pub date: Option<NaiveDate>,
    pub content: Option<Renderable>,
    /// Stable identifier, also the layout seed key
    pub id: Option<String>,
    pub position: Option<TimelineNodePosition>,
    pub expansion: Option<TimelineNodeExpansion>,
    /// Vertical branch offset
    pub branch_len_y: Option<f64>,
    /// Horizontal branch offset
    pub branch_len_x: Option<f64>,
}

impl TimelineEvent {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_content(mut self, content: Renderable) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_position(mut self, position: TimelineNodePosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_expansion(mut self, expansion: TimelineNodeExpansion) -> Self {
        self.expansion = Some(expansion);
        self
    }

    pub fn with_branch_lengths(mut self, y: f64, x: f64) -> Self {
        self.branch_len_y = Some(y);
        self.branch_len_x = Some(x);
        self
    }

    /// Has layout assigned everything it owns?
    pub fn is_laid_out(&self) -> bool {
        self.position.is_some()
            && self.expansion.is_some()
            && self.branch_len_y.is_some()
            && self.branch_len_x.is_some()
    }
}

impl Merge for TimelineEvent {
    fn merge(self, partial: Self) -> Self {
        Self {
            date: partial.date.or(self.date),
            content: partial.content.or(self.content),
            id: partial.id.or(self.id),
            position: partial.position.or(self.position),
            expansion: partial.expansion.or(self.expansion),
            branch_len_y: partial.branch_len_y.or(self.branch_len_y),
            branch_len_x: partial.branch_len_x.or(self.branch_len_x),
        }
    }
}

/// One slot on the timeline
#[derive(Debug, Clone)]
pub enum TimelineDatum {
    /// A gap: takes a slot, draws no node
    Skip,
    Event(TimelineEvent),
}

impl TimelineDatum {
    /// Event built from a partial field set
    pub fn event(partial: TimelineEvent) -> Self {
        TimelineDatum::Event(TimelineEvent::from_partial(partial))
    }

    pub fn node_type(&self) -> TimelineNodeType {
        match self {
            TimelineDatum::Skip => TimelineNodeType::Skip,
            TimelineDatum::Event(_) => TimelineNodeType::Event,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, TimelineDatum::Skip)
    }

    pub fn as_event(&self) -> Option<&TimelineEvent> {
        match self {
            TimelineDatum::Event(event) => Some(event),
            TimelineDatum::Skip => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut TimelineEvent> {
        match self {
            TimelineDatum::Event(event) => Some(event),
            TimelineDatum::Skip => None,
        }
    }
}

/// Ordered timeline content
pub type TimelineData = Vec<TimelineDatum>;

/// Decorative attachment drawn alongside the timeline
#[derive(Debug, Clone)]
pub struct TimelineDecoration {
    pub component: ComponentRef,
    pub props: Option<PropertyBag>,
}

impl TimelineDecoration {
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            props: None,
        }
    }

    pub fn with_props(mut self, props: PropertyBag) -> Self {
        self.props = Some(props);
        self
    }

    /// The decoration as a plain renderable
    pub fn renderable(&self) -> Renderable {
        Renderable {
            component: self.component.clone(),
            props: self.props.clone(),
        }
    }
}
