//! Anniversary Bench - shared fixtures for the criterion benchmarks

use anniv_model::{GalleryPhoto, PhotoMetadata, TimelineDatum, TimelineEvent};

/// Timeline of `events` events with a skip after every fourth one
pub fn timeline_fixture(events: usize) -> Vec<TimelineDatum> {
    let mut data = Vec::with_capacity(events + events / 4);
    for i in 0..events {
        data.push(TimelineDatum::event(
            TimelineEvent::default().with_id(format!("event-{}", i)),
        ));
        if i % 4 == 3 {
            data.push(TimelineDatum::Skip);
        }
    }
    data
}

/// Gallery of `photos` named photos
pub fn gallery_fixture(photos: usize) -> Vec<GalleryPhoto> {
    (0..photos)
        .map(|i| {
            GalleryPhoto::default().with_metadata(PhotoMetadata {
                photo_filename: Some(format!("thumbnail-{}.jpg", i)),
                ..Default::default()
            })
        })
        .collect()
}
