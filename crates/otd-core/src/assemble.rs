//! Merge captions back into their groups.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::date::CanonicalDate;
use crate::entities::{CaptionResult, DisplayEvent, EventGroup};

/// Join caption results to their groups and sort chronologically.
///
/// A caption whose date matches no group is dropped, and so is any caption
/// after the first for the same group. The representative photo of each
/// event is drawn uniformly from its group using `rng`.
pub fn assemble<R: Rng + ?Sized>(
    groups: &[EventGroup],
    captions: Vec<CaptionResult>,
    rng: &mut R,
) -> Vec<DisplayEvent> {
    let mut captioned: HashSet<CanonicalDate> = HashSet::new();
    let mut events: Vec<DisplayEvent> = captions
        .into_iter()
        .filter_map(|caption| {
            let Some(group) = groups.iter().find(|g| g.date.to_string() == caption.date) else {
                tracing::debug!(date = %caption.date, "dropping caption without matching group");
                return None;
            };
            if !captioned.insert(group.date) {
                tracing::debug!(date = %caption.date, "dropping duplicate caption for group");
                return None;
            }
            let image = group.photos.choose(rng)?.clone();
            Some(DisplayEvent {
                date: group.date,
                headline: caption.headline,
                match_info: caption.match_info,
                source_url: image.source_page_url.clone(),
                image,
                photo_count: group.photos.len(),
            })
        })
        .collect();

    events.sort_by(|a, b| a.date.cmp(&b.date));
    events
}
