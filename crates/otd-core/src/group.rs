//! Same-day filtering and grouping by historical date.

use crate::entities::{EventGroup, PhotoRecord};
use crate::selector::QueryDate;

/// Photos taken on the queried month and day, any year.
#[must_use]
pub fn filter_same_day(photos: &[PhotoRecord], query: QueryDate) -> Vec<&PhotoRecord> {
    photos.iter().filter(|p| query.matches(p.date)).collect()
}

/// Partition photos by full date (year included), first-seen order.
#[must_use]
pub fn group_by_date(matches: &[&PhotoRecord]) -> Vec<EventGroup> {
    let mut groups: Vec<EventGroup> = Vec::new();
    for photo in matches {
        match groups.iter_mut().find(|g| g.date == photo.date) {
            Some(group) => group.photos.push((*photo).clone()),
            None => groups.push(EventGroup {
                date: photo.date,
                photos: vec![(*photo).clone()],
            }),
        }
    }
    groups
}

/// Groups for a query, or `None` when no photo matches the day.
#[must_use]
pub fn select_groups(photos: &[PhotoRecord], query: QueryDate) -> Option<Vec<EventGroup>> {
    let matches = filter_same_day(photos, query);
    if matches.is_empty() {
        tracing::debug!(%query, "no photos for day");
        return None;
    }
    let groups = group_by_date(&matches);
    tracing::debug!(%query, photos = matches.len(), groups = groups.len(), "grouped photos");
    Some(groups)
}
