//! Pure transforms over loaded events: grouping by category and picking today's events.

use chrono::{Local, NaiveDate};

use crate::contract::Event;

/// Events partitioned by uppercased category.
///
/// Categories iterate in first-seen order; events within a category keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedEvents {
    groups: Vec<(String, Vec<Event>)>,
}

impl GroupedEvents {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.groups
            .iter()
            .map(|(category, events)| (category.as_str(), events.as_slice()))
    }

    pub fn as_slice(&self) -> &[(String, Vec<Event>)] {
        &self.groups
    }

    pub fn get(&self, category: &str) -> Option<&[Event]> {
        self.groups
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, events)| events.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(category, _)| category.as_str())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_events(&self) -> usize {
        self.groups.iter().map(|(_, events)| events.len()).sum()
    }

    fn push(&mut self, category: String, event: Event) {
        match self.groups.iter_mut().find(|(key, _)| *key == category) {
            Some((_, events)) => events.push(event),
            None => self.groups.push((category, vec![event])),
        }
    }
}

pub fn group_by_category(events: &[Event]) -> GroupedEvents {
    let mut grouped = GroupedEvents::default();
    for event in events {
        grouped.push(event.category_key(), event.clone());
    }
    grouped
}

/// Keeps events whose datetime string starts with `today` formatted as `YYYY-MM-DD`.
///
/// This is a literal prefix match: datetimes written in any other textual
/// format never match.
pub fn filter_today(events: &[Event], today: NaiveDate) -> Vec<Event> {
    let prefix = today.format("%Y-%m-%d").to_string();
    events
        .iter()
        .filter(|event| event.datetime.starts_with(&prefix))
        .cloned()
        .collect()
}

/// Current calendar date on the process's local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
