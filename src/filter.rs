//! Identity selection: photo-count threshold, then result cap

use crate::scanner::PersonEntry;

/// Keep identities with at least `min_images` photos, then cap the result
///
/// The threshold is applied before the cap, so `limit` counts only identities
/// that already passed the threshold. A `limit` of 0 disables the cap.
pub fn filter(entries: Vec<PersonEntry>, min_images: usize, limit: usize) -> Vec<PersonEntry> {
    let retained = entries
        .into_iter()
        .filter(|entry| entry.image_count() >= min_images);

    if limit > 0 {
        retained.take(limit).collect()
    } else {
        retained.collect()
    }
}
