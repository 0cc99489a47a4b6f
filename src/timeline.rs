use serde::Serialize;

use crate::itinerary::Itinerary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub index: usize,
    pub day_number: u32,
    pub date: String,
    pub title: String,
    pub active: bool,
}

/// One entry per day in itinerary order; only `current_index` is active.
pub fn timeline(itinerary: &Itinerary, current_index: usize) -> Vec<TimelineEntry> {
    itinerary
        .days()
        .iter()
        .enumerate()
        .map(|(index, day)| TimelineEntry {
            index,
            day_number: day.day_number,
            date: day.date.clone(),
            title: day.title.clone(),
            active: index == current_index,
        })
        .collect()
}
