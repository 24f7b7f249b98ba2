//! Gallery scatter - per-photo jitter and ordering

use anniv_core::{hash, AnnivResult, Mulberry32, RangeSampler, SharedRng};
use anniv_model::GalleryPhoto;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::debug;

use crate::GalleryConfig;

/// Where a photo lands relative to its grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPlacement {
    pub index: usize,
    pub offset_x: f64,
    pub offset_y: f64,
    pub rotation_deg: f64,
}

/// Seed key for a photo: filename, path, or its index
pub fn photo_key(photo: &GalleryPhoto, index: usize) -> String {
    photo.seed_key().unwrap_or_else(|| format!("#{}", index))
}

/// Give every photo without a generator one keyed by [`photo_key`].
///
/// Returns how many were assigned.
pub fn assign_generators(photos: &mut [GalleryPhoto], seed: u32) -> usize {
    let mut assigned = 0;
    for (index, photo) in photos.iter_mut().enumerate() {
        if photo.rng.is_none() {
            let key = photo_key(photo, index);
            photo.rng = Some(SharedRng::new(hash(&key) ^ seed));
            assigned += 1;
        }
    }
    debug!(assigned, total = photos.len(), "assigned gallery generators");
    assigned
}

/// Offset and tilt for every photo.
///
/// Photos with their own generator draw from a fork of it, so the shared
/// stream is left untouched and repeated calls agree.
pub fn scatter(photos: &[GalleryPhoto], config: &GalleryConfig) -> AnnivResult<Vec<PhotoPlacement>> {
    config.validate()?;

    photos
        .iter()
        .enumerate()
        .map(|(index, photo)| {
            let mut rng = match &photo.rng {
                Some(shared) => shared.snapshot(),
                None => Mulberry32::new(hash(&photo_key(photo, index)) ^ config.seed),
            };
            place_one(&mut rng, index, config)
        })
        .collect()
}

fn place_one(
    rng: &mut dyn RangeSampler,
    index: usize,
    config: &GalleryConfig,
) -> AnnivResult<PhotoPlacement> {
    Ok(PhotoPlacement {
        index,
        offset_x: rng.sample(config.offset_x)?,
        offset_y: rng.sample(config.offset_y)?,
        rotation_deg: rng.sample(config.rotation)?,
    })
}

/// Deterministic permutation of `0..len`
pub fn shuffled_order(len: usize, seed: u32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(&mut Mulberry32::new(seed));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use anniv_core::RngRange;
    use anniv_model::PhotoMetadata;

    fn named(name: &str) -> GalleryPhoto {
        GalleryPhoto::default().with_metadata(PhotoMetadata {
            photo_filename: Some(name.into()),
            ..Default::default()
        })
    }

    #[test]
    fn test_scatter_keyed_by_filename() {
        let photos = vec![named("lake.jpg"), GalleryPhoto::default()];
        let config = GalleryConfig::default();
        let placements = scatter(&photos, &config).unwrap();

        let mut rng = Mulberry32::from_key("lake.jpg");
        assert_eq!(placements[0].offset_x, rng.range(-12.0, 12.0).unwrap());
        assert_eq!(placements[0].offset_y, rng.range(-12.0, 12.0).unwrap());
        assert_eq!(placements[0].rotation_deg, rng.range(-6.0, 6.0).unwrap());

        let mut rng = Mulberry32::from_key("#1");
        assert_eq!(placements[1].offset_x, rng.range(-12.0, 12.0).unwrap());
    }

    #[test]
    fn test_scatter_is_repeatable_with_shared_generators() {
        let mut photos = vec![named("a.png"), named("b.png"), GalleryPhoto::default()];
        assert_eq!(assign_generators(&mut photos, 5), 3);
        assert_eq!(assign_generators(&mut photos, 5), 0);

        let config = GalleryConfig::scattered();
        let first = scatter(&photos, &config).unwrap();
        let second = scatter(&photos, &config).unwrap();
        assert_eq!(first, second);

        for p in &first {
            assert!(p.rotation_deg >= -15.0 && p.rotation_deg < 15.0);
        }
    }

    #[test]
    fn test_scatter_uses_explicit_generator() {
        let photo = named("lake.jpg").with_rng(SharedRng::new(1));
        let placements = scatter(&[photo], &GalleryConfig::default()).unwrap();
        assert_eq!(
            placements[0].offset_x,
            RngRange::scale(-12.0, 12.0, 0.6270739405881613)
        );
    }

    #[test]
    fn test_scatter_rejects_bad_config() {
        let config = GalleryConfig {
            rotation: RngRange::new(0.0, 0.0),
            ..Default::default()
        };
        assert!(scatter(&[named("x")], &config).is_err());
    }

    #[test]
    fn test_shuffled_order() {
        let order = shuffled_order(12, 2024);
        assert_eq!(order, shuffled_order(12, 2024));
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..12).collect::<Vec<_>>());
        assert!(shuffled_order(0, 1).is_empty());
    }
}
