//! Gallery - photo entries and their deferred images

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anniv_core::SharedRng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ComponentRef, Merge};

/// Image locator that an external loader fills in later.
///
/// Resolves at most once. Clones share the slot, so every entry holding a
/// copy sees the locator as soon as the loader resolves it.
#[derive(Debug, Clone, Default)]
pub struct DeferredImage(Arc<OnceLock<String>>);

impl DeferredImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the locator. Returns false if it was already resolved.
    pub fn resolve(&self, url: impl Into<String>) -> bool {
        self.0.set(url.into()).is_ok()
    }

    pub fn get(&self) -> Option<&str> {
        self.0.get().map(String::as_str)
    }

    pub fn is_resolved(&self) -> bool {
        self.0.get().is_some()
    }

    pub fn ptr_eq(&self, other: &DeferredImage) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Where a photo's image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Locator known up front
    Resolved(String),
    /// Locator produced later by the loader
    Pending(DeferredImage),
}

impl ImageSource {
    pub fn url(url: impl Into<String>) -> Self {
        ImageSource::Resolved(url.into())
    }

    /// Locator if available now
    pub fn current(&self) -> Option<&str> {
        match self {
            ImageSource::Resolved(url) => Some(url.as_str()),
            ImageSource::Pending(deferred) => deferred.get(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current().is_none()
    }
}

/// Descriptive fields attached to a submitted photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoMetadata {
    pub timestamp: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-text message left with the photo
    pub message: Option<String>,
    pub nickname: Option<String>,
    pub social_handle: Option<String>,
    pub photo_filename: Option<String>,
    /// Was the image asset generated by the pipeline rather than uploaded?
    pub asset_generated: Option<bool>,
}

impl Merge for PhotoMetadata {
    fn merge(self, partial: Self) -> Self {
        Self {
            timestamp: partial.timestamp.or(self.timestamp),
            email: partial.email.or(self.email),
            phone: partial.phone.or(self.phone),
            message: partial.message.or(self.message),
            nickname: partial.nickname.or(self.nickname),
            social_handle: partial.social_handle.or(self.social_handle),
            photo_filename: partial.photo_filename.or(self.photo_filename),
            asset_generated: partial.asset_generated.or(self.asset_generated),
        }
    }
}

/// One photo in the gallery
#[derive(Debug, Clone, Default)]
pub struct GalleryPhoto {
    pub image: Option<ImageSource>,
    /// Asset path relative to the content root
    pub path: Option<PathBuf>,
    pub metadata: PhotoMetadata,
    /// Per-photo generator for placement jitter
    pub rng: Option<SharedRng>,
}

impl GalleryPhoto {
    pub fn with_image(mut self, image: ImageSource) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_metadata(mut self, metadata: PhotoMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_rng(mut self, rng: SharedRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Stable text to seed this photo's layout from: filename, then path
    pub fn seed_key(&self) -> Option<String> {
        self.metadata
            .photo_filename
            .clone()
            .or_else(|| self.path.as_ref().map(|p| p.to_string_lossy().into_owned()))
    }
}

impl Merge for GalleryPhoto {
    /// Metadata fields merge one by one, as if they sat on the photo itself.
    fn merge(self, partial: Self) -> Self {
        Self {
            image: partial.image.or(self.image),
            path: partial.path.or(self.path),
            metadata: self.metadata.merge(partial.metadata),
            rng: partial.rng.or(self.rng),
        }
    }
}

/// Props of the photo card component
#[derive(Debug, Clone, Default)]
pub struct PhotoCardProps {
    pub image: Option<ImageSource>,
}

/// Photo card: a component plus its props, as page assembly lists them
#[derive(Debug, Clone, Default)]
pub struct PhotoCard {
    pub component: Option<ComponentRef>,
    pub props: Option<PhotoCardProps>,
}

impl Merge for PhotoCard {
    fn merge(self, partial: Self) -> Self {
        Self {
            component: partial.component.or(self.component),
            props: partial.props.or(self.props),
        }
    }
}
