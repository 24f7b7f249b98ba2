//! Timeline layout pass
//!
//! Two stages:
//! - `apply` fills each event's side, expansion and branch lengths where the
//!   content left them out
//! - `place` turns the laid-out data into anchor points and node boxes for a
//!   given drawing area
//!
//! Every event draws from its own generator seeded by its id, so adding or
//! removing one event never changes the branches of the others.

use anniv_core::{hash, AnnivResult, Mulberry32};
use anniv_model::{
    branch_segments, BranchSegment, NodeClickEvent, NodePosition, Rect, TimelineDatum,
    TimelineDimensions, TimelineEvent, TimelineNodeExpansion, TimelineOrientation,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::LayoutConfig;

/// What one `apply` run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    pub events: usize,
    pub skips: usize,
    /// Number of fields that were absent and got assigned
    pub filled: usize,
}

/// A node with its index in the timeline data
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedNode {
    pub index: usize,
    pub position: NodePosition,
}

/// Deterministic timeline layout
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    config: LayoutConfig,
}

impl TimelineLayout {
    pub fn new(config: LayoutConfig) -> AnnivResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Seed for an event: its id, or its slot index when it has none
    pub fn seed_for(&self, event: &TimelineEvent, index: usize) -> u32 {
        let key = match &event.id {
            Some(id) => hash(id),
            None => hash(&format!("#{}", index)),
        };
        key ^ self.config.seed
    }

    /// Fill absent layout fields of every event.
    ///
    /// Fields already set are kept, so running this twice changes nothing.
    pub fn apply(&self, data: &mut [TimelineDatum]) -> AnnivResult<LayoutReport> {
        let sides = self.config.orientation.sides();
        let mut report = LayoutReport::default();

        for (index, datum) in data.iter_mut().enumerate() {
            let Some(event) = datum.as_event_mut() else {
                report.skips += 1;
                continue;
            };

            let seed = self.seed_for(event, index);
            let mut rng = Mulberry32::new(seed);
            // Always draw both so each value is independent of what was preset
            let len_y = rng.sample(self.config.branch_len_y)?;
            let len_x = rng.sample(self.config.branch_len_x)?;

            if event.position.is_none() {
                event.position = Some(sides[report.events % 2]);
                report.filled += 1;
            }
            if event.expansion.is_none() {
                event.expansion = event.position.map(TimelineNodeExpansion::away_from_axis);
                report.filled += 1;
            }
            if event.branch_len_y.is_none() {
                event.branch_len_y = Some(len_y);
                report.filled += 1;
            }
            if event.branch_len_x.is_none() {
                event.branch_len_x = Some(len_x);
                report.filled += 1;
            }

            debug!(
                index,
                id = event.id.as_deref().unwrap_or(""),
                seed,
                position = ?event.position,
                "laid out timeline event"
            );
            report.events += 1;
        }

        info!(
            events = report.events,
            skips = report.skips,
            filled = report.filled,
            "timeline layout applied"
        );
        Ok(report)
    }

    /// Anchor and node box for every event, one slot per datum.
    ///
    /// Slots are spaced evenly along the axis inside the padding; skips take a
    /// slot but produce no node. Events not yet laid out sit on the positive
    /// side with zero-length branches.
    pub fn place(&self, data: &[TimelineDatum], dims: TimelineDimensions) -> Vec<PlacedNode> {
        if data.is_empty() {
            return Vec::new();
        }

        let c = &self.config;
        let horizontal = c.orientation == TimelineOrientation::Horizontal;
        let (along, across) = if horizontal {
            (dims.width, dims.height)
        } else {
            (dims.height, dims.width)
        };
        let spacing = (along - 2.0 * c.padding).max(0.0) / data.len() as f64;
        let axis = across / 2.0;

        data.iter()
            .enumerate()
            .filter_map(|(index, datum)| {
                let event = datum.as_event()?;
                let sign = event.position.map_or(1.0, |p| p.branch_sign());
                let (primary, shift) = if horizontal {
                    (event.branch_len_y, event.branch_len_x)
                } else {
                    (event.branch_len_x, event.branch_len_y)
                };
                let branch_length = sign * primary.unwrap_or(0.0).abs();
                let shift = shift.unwrap_or(0.0);

                let slot = c.padding + spacing * (index as f64 + 0.5);
                let (x, y, rect) = if horizontal {
                    let end_y = axis + branch_length + sign * c.node_height / 2.0;
                    (
                        slot,
                        axis,
                        Rect::centered(slot + shift, end_y, c.node_width, c.node_height),
                    )
                } else {
                    let end_x = axis + branch_length + sign * c.node_width / 2.0;
                    (
                        axis,
                        slot,
                        Rect::centered(end_x, slot + shift, c.node_width, c.node_height),
                    )
                };

                Some(PlacedNode {
                    index,
                    position: NodePosition {
                        x,
                        y,
                        rect,
                        branch_length,
                    },
                })
            })
            .collect()
    }

    /// Axis segments between consecutive nodes
    pub fn connectors(&self, nodes: &[PlacedNode]) -> Vec<BranchSegment> {
        let positions: Vec<NodePosition> = nodes.iter().map(|n| n.position).collect();
        branch_segments(&positions)
    }

    /// Node under a click, if any
    pub fn hit_test(
        &self,
        data: &[TimelineDatum],
        nodes: &[PlacedNode],
        px: f64,
        py: f64,
    ) -> Option<NodeClickEvent> {
        nodes
            .iter()
            .find(|n| n.position.rect.contains(px, py))
            .and_then(|n| {
                let node = data.get(n.index)?.as_event()?.clone();
                Some(NodeClickEvent {
                    node,
                    index: n.index,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anniv_model::{Merge, TimelineNodePosition};
    use proptest::prelude::*;

    fn sample_data() -> Vec<TimelineDatum> {
        vec![
            TimelineDatum::event(TimelineEvent::default().with_id("first-date")),
            TimelineDatum::Skip,
            TimelineDatum::event(TimelineEvent::default().with_id("trip")),
            TimelineDatum::event(TimelineEvent::default()),
        ]
    }

    fn layout() -> TimelineLayout {
        TimelineLayout::new(LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_apply_fills_all_event_fields() {
        let mut data = sample_data();
        let report = layout().apply(&mut data).unwrap();

        assert_eq!(report, LayoutReport { events: 3, skips: 1, filled: 12 });
        for event in data.iter().filter_map(|d| d.as_event()) {
            assert!(event.is_laid_out());
            let y = event.branch_len_y.unwrap();
            let x = event.branch_len_x.unwrap();
            assert!((40.0..120.0).contains(&y));
            assert!((-24.0..24.0).contains(&x));
        }
    }

    #[test]
    fn test_sides_alternate_per_event() {
        let mut data = sample_data();
        layout().apply(&mut data).unwrap();
        let sides: Vec<_> = data
            .iter()
            .filter_map(|d| d.as_event())
            .map(|e| (e.position.unwrap(), e.expansion.unwrap()))
            .collect();
        assert_eq!(
            sides,
            vec![
                (TimelineNodePosition::Above, TimelineNodeExpansion::Up),
                (TimelineNodePosition::Below, TimelineNodeExpansion::Down),
                (TimelineNodePosition::Above, TimelineNodeExpansion::Up),
            ]
        );

        let vertical = TimelineLayout::new(
            LayoutConfig::default().with_orientation(TimelineOrientation::Vertical),
        )
        .unwrap();
        let mut data = sample_data();
        vertical.apply(&mut data).unwrap();
        let first = data[0].as_event().unwrap();
        assert_eq!(first.position, Some(TimelineNodePosition::Left));
        assert_eq!(first.expansion, Some(TimelineNodeExpansion::Outside));
    }

    #[test]
    fn test_branch_lengths_come_from_id_seed() {
        let mut data = sample_data();
        layout().apply(&mut data).unwrap();

        let mut rng = Mulberry32::from_key("first-date");
        let first = data[0].as_event().unwrap();
        assert_eq!(first.branch_len_y, Some(rng.range(40.0, 120.0).unwrap()));
        assert_eq!(first.branch_len_x, Some(rng.range(-24.0, 24.0).unwrap()));

        // No id: keyed by slot index
        let mut rng = Mulberry32::from_key("#3");
        let anonymous = data[3].as_event().unwrap();
        assert_eq!(anonymous.branch_len_y, Some(rng.range(40.0, 120.0).unwrap()));
    }

    #[test]
    fn test_apply_is_idempotent_and_keeps_preset_fields() {
        let mut data = vec![TimelineDatum::event(TimelineEvent {
            id: Some("anniversary".into()),
            position: Some(TimelineNodePosition::Below),
            branch_len_y: Some(7.0),
            ..Default::default()
        })];
        let layout = layout();
        let first = layout.apply(&mut data).unwrap();
        assert_eq!(first.filled, 2);

        let event = data[0].as_event().unwrap().clone();
        assert_eq!(event.position, Some(TimelineNodePosition::Below));
        assert_eq!(event.expansion, Some(TimelineNodeExpansion::Down));
        assert_eq!(event.branch_len_y, Some(7.0));

        // x is the second draw whether or not y was preset
        let mut rng = Mulberry32::from_key("anniversary");
        rng.next_f64();
        assert_eq!(event.branch_len_x, Some(rng.range(-24.0, 24.0).unwrap()));

        let second = layout.apply(&mut data).unwrap();
        assert_eq!(second.filled, 0);
        let again = data[0].as_event().unwrap();
        assert_eq!(again.branch_len_x, event.branch_len_x);
    }

    #[test]
    fn test_config_seed_changes_layout() {
        let mut a = sample_data();
        let mut b = sample_data();
        layout().apply(&mut a).unwrap();
        TimelineLayout::new(LayoutConfig::default().with_seed(99))
            .unwrap()
            .apply(&mut b)
            .unwrap();
        assert_ne!(
            a[0].as_event().unwrap().branch_len_y,
            b[0].as_event().unwrap().branch_len_y
        );
    }

    #[test]
    fn test_place_spacing_and_sides() {
        let layout = TimelineLayout::new(LayoutConfig {
            padding: 0.0,
            ..Default::default()
        })
        .unwrap();
        let mut data = vec![
            TimelineDatum::event(TimelineEvent::default().with_branch_lengths(50.0, 0.0)),
            TimelineDatum::Skip,
            TimelineDatum::event(TimelineEvent::default().with_branch_lengths(30.0, 10.0)),
            TimelineDatum::Skip,
        ];
        layout.apply(&mut data).unwrap();
        let nodes = layout.place(&data, TimelineDimensions::new(400.0, 600.0));

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].index, 0);
        assert_eq!((nodes[0].position.x, nodes[0].position.y), (50.0, 300.0));
        assert_eq!(nodes[0].position.branch_length, -50.0);
        assert_eq!(nodes[0].position.rect.bottom(), 250.0);

        assert_eq!(nodes[1].index, 2);
        assert_eq!(nodes[1].position.x, 250.0);
        assert_eq!(nodes[1].position.branch_length, 30.0);
        assert_eq!(nodes[1].position.rect.top(), 330.0);
        assert_eq!(nodes[1].position.rect.center().0, 260.0);
    }

    #[test]
    fn test_place_vertical() {
        let layout = TimelineLayout::new(
            LayoutConfig {
                padding: 10.0,
                ..Default::default()
            }
            .with_orientation(TimelineOrientation::Vertical),
        )
        .unwrap();
        let data = vec![TimelineDatum::event(
            TimelineEvent::default()
                .with_position(TimelineNodePosition::Right)
                .with_branch_lengths(0.0, 20.0),
        )];
        let nodes = layout.place(&data, TimelineDimensions::new(300.0, 120.0));
        let p = nodes[0].position;
        assert_eq!((p.x, p.y), (150.0, 60.0));
        assert_eq!(p.branch_length, 20.0);
        assert_eq!(p.rect.left(), 170.0);
    }

    #[test]
    fn test_place_empty() {
        assert!(layout().place(&[], TimelineDimensions::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_connectors_and_hit_test() {
        let layout = layout();
        let mut data = sample_data();
        layout.apply(&mut data).unwrap();
        let nodes = layout.place(&data, TimelineDimensions::new(1200.0, 800.0));

        let connectors = layout.connectors(&nodes);
        assert_eq!(connectors.len(), nodes.len() - 1);
        assert_eq!(connectors[0].from, (nodes[0].position.x, nodes[0].position.y));

        let (cx, cy) = nodes[1].position.rect.center();
        let click = layout.hit_test(&data, &nodes, cx, cy).unwrap();
        assert_eq!(click.index, 2);
        assert_eq!(click.node.id.as_deref(), Some("trip"));

        assert!(layout.hit_test(&data, &nodes, -5.0, -5.0).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LayoutConfig {
            branch_len_x: anniv_core::RngRange::new(1.0, 1.0),
            ..Default::default()
        };
        assert!(TimelineLayout::new(config).is_err());
    }

    proptest! {
        #[test]
        fn layout_is_deterministic(ids in proptest::collection::vec("[a-z]{1,12}", 0..24), seed in any::<u32>()) {
            let build = || -> Vec<TimelineDatum> {
                ids.iter()
                    .map(|id| TimelineDatum::event(TimelineEvent::from_partial(
                        TimelineEvent::default().with_id(id.clone()),
                    )))
                    .collect()
            };
            let layout = TimelineLayout::new(LayoutConfig::default().with_seed(seed)).unwrap();
            let mut a = build();
            let mut b = build();
            layout.apply(&mut a).unwrap();
            layout.apply(&mut b).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                let (x, y) = (x.as_event().unwrap(), y.as_event().unwrap());
                prop_assert_eq!(x.position, y.position);
                prop_assert_eq!(x.branch_len_y, y.branch_len_y);
                prop_assert_eq!(x.branch_len_x, y.branch_len_x);
            }
        }
    }
}
