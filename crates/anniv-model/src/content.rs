//! Content manifest - static page content as JSON
//!
//! Page assembly describes the timeline and gallery in a manifest. Components
//! are named by tag here; the renderer maps tags to real components.
//!
//! ```json
//! {
//!   "timeline": [
//!     { "type": "event", "id": "first-date", "date": "2023-06-01",
//!       "component": "memory-card", "props": { "title": "Picnic" } },
//!     { "type": "skip" }
//!   ],
//!   "gallery": [
//!     { "url": "/gallery/lake.jpg", "photoFilename": "lake.jpg" }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use anniv_core::{AnnivError, AnnivResult, Mulberry32, SharedRng};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    ComponentRef, DeferredImage, GalleryPhoto, ImageSource, Merge, PhotoMetadata, PropertyBag,
    Renderable, TimelineData, TimelineDatum, TimelineEvent, TimelineNodeExpansion,
    TimelineNodePosition,
};

/// Event as written in the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDef {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    /// Component tag
    pub component: Option<String>,
    pub props: Option<Map<String, Value>>,
    pub position: Option<TimelineNodePosition>,
    pub expansion: Option<TimelineNodeExpansion>,
    pub branch_len_y: Option<f64>,
    pub branch_len_x: Option<f64>,
}

impl TryFrom<EventDef> for TimelineEvent {
    type Error = AnnivError;

    fn try_from(def: EventDef) -> AnnivResult<Self> {
        let content = match (def.component, def.props) {
            (Some(tag), props) => Some(Renderable {
                component: ComponentRef::Tag(tag),
                props: props.map(PropertyBag::new),
            }),
            (None, None) => None,
            (None, Some(_)) => {
                return Err(AnnivError::InvalidContent(format!(
                    "event {:?} has props but no component",
                    def.id.unwrap_or_default()
                )))
            }
        };

        Ok(TimelineEvent::from_partial(TimelineEvent {
            date: def.date,
            content,
            id: def.id,
            position: def.position,
            expansion: def.expansion,
            branch_len_y: def.branch_len_y,
            branch_len_x: def.branch_len_x,
        }))
    }
}

/// Timeline slot as written in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineEntryDef {
    Skip,
    Event(EventDef),
}

impl TryFrom<TimelineEntryDef> for TimelineDatum {
    type Error = AnnivError;

    fn try_from(def: TimelineEntryDef) -> AnnivResult<Self> {
        match def {
            TimelineEntryDef::Skip => Ok(TimelineDatum::Skip),
            TimelineEntryDef::Event(event) => Ok(TimelineDatum::Event(event.try_into()?)),
        }
    }
}

/// Photo as written in the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoDef {
    /// Known image locator
    pub url: Option<String>,
    /// Image locator comes later from the loader
    pub deferred: bool,
    pub path: Option<PathBuf>,
    /// Explicit generator seed; otherwise layout derives one
    pub seed: Option<f64>,
    #[serde(flatten)]
    pub metadata: PhotoMetadata,
}

impl TryFrom<PhotoDef> for GalleryPhoto {
    type Error = AnnivError;

    fn try_from(def: PhotoDef) -> AnnivResult<Self> {
        let image = match (def.url, def.deferred) {
            (Some(_), true) => {
                return Err(AnnivError::InvalidContent(format!(
                    "photo {:?} is both deferred and has a url",
                    def.metadata.photo_filename.unwrap_or_default()
                )))
            }
            (Some(url), false) => Some(ImageSource::Resolved(url)),
            (None, true) => Some(ImageSource::Pending(DeferredImage::new())),
            (None, false) => None,
        };
        let rng = def
            .seed
            .map(|seed| Mulberry32::from_f64_seed(seed).map(SharedRng::from_generator))
            .transpose()?;

        Ok(GalleryPhoto::from_partial(GalleryPhoto {
            image,
            path: def.path,
            metadata: def.metadata,
            rng,
        }))
    }
}

/// Whole-page content definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentManifest {
    pub timeline: Vec<TimelineEntryDef>,
    pub gallery: Vec<PhotoDef>,
}

impl ContentManifest {
    pub fn from_json_str(json: &str) -> AnnivResult<Self> {
        serde_json::from_str(json).map_err(|e| AnnivError::InvalidContent(e.to_string()))
    }

    /// Convert into model values, failing on the first bad entry
    pub fn into_content(self) -> AnnivResult<Content> {
        let timeline = self
            .timeline
            .into_iter()
            .map(TimelineDatum::try_from)
            .collect::<AnnivResult<TimelineData>>()?;
        let gallery = self
            .gallery
            .into_iter()
            .map(GalleryPhoto::try_from)
            .collect::<AnnivResult<Vec<_>>>()?;
        Ok(Content { timeline, gallery })
    }
}

/// Model values for one page
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub timeline: TimelineData,
    pub gallery: Vec<GalleryPhoto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimelineNodeType;

    const MANIFEST: &str = r#"{
        "timeline": [
            { "type": "event", "id": "first-date", "date": "2023-06-01",
              "component": "memory-card", "props": { "title": "Picnic" },
              "position": "below", "branchLenY": 40 },
            { "type": "skip" },
            { "type": "event", "id": "trip" }
        ],
        "gallery": [
            { "url": "/gallery/lake.jpg", "photoFilename": "lake.jpg", "nickname": "sunny" },
            { "deferred": true, "path": "gallery/raw/beach.png", "seed": -1 }
        ]
    }"#;

    #[test]
    fn test_manifest_into_content() {
        let content = ContentManifest::from_json_str(MANIFEST)
            .unwrap()
            .into_content()
            .unwrap();

        let types: Vec<_> = content.timeline.iter().map(|d| d.node_type()).collect();
        assert_eq!(
            types,
            vec![TimelineNodeType::Event, TimelineNodeType::Skip, TimelineNodeType::Event]
        );

        let first = content.timeline[0].as_event().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(first.position, Some(TimelineNodePosition::Below));
        assert_eq!(first.branch_len_y, Some(40.0));
        assert!(first.branch_len_x.is_none());
        assert!(first.expansion.is_none());
        let card = first.content.as_ref().unwrap();
        assert_eq!(card.component.label(), "memory-card");
        assert_eq!(
            card.props.as_ref().unwrap().get("title"),
            Some(&Value::from("Picnic"))
        );

        let trip = content.timeline[2].as_event().unwrap();
        assert!(trip.content.is_none());
        assert!(trip.date.is_none());

        let lake = &content.gallery[0];
        assert_eq!(lake.image.as_ref().unwrap().current(), Some("/gallery/lake.jpg"));
        assert_eq!(lake.metadata.nickname.as_deref(), Some("sunny"));
        assert!(lake.rng.is_none());

        let beach = &content.gallery[1];
        assert!(beach.image.as_ref().unwrap().is_pending());
        assert_eq!(beach.rng.as_ref().unwrap().snapshot().state(), u32::MAX);
    }

    #[test]
    fn test_props_without_component_rejected() {
        let json = r#"{ "timeline": [ { "type": "event", "id": "x", "props": {} } ] }"#;
        let err = ContentManifest::from_json_str(json)
            .unwrap()
            .into_content()
            .unwrap_err();
        assert!(matches!(err, AnnivError::InvalidContent(_)));
    }

    #[test]
    fn test_unknown_position_rejected() {
        let json = r#"{ "timeline": [ { "type": "event", "position": "sideways" } ] }"#;
        assert!(matches!(
            ContentManifest::from_json_str(json),
            Err(AnnivError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_deferred_with_url_rejected() {
        let json = r#"{ "gallery": [ { "url": "/a.png", "deferred": true } ] }"#;
        let manifest = ContentManifest::from_json_str(json).unwrap();
        assert!(manifest.into_content().is_err());
    }

    #[test]
    fn test_empty_manifest() {
        let content = ContentManifest::from_json_str("{}")
            .unwrap()
            .into_content()
            .unwrap();
        assert!(content.timeline.is_empty());
        assert!(content.gallery.is_empty());
    }
}
