//! Events file parsing.
//!
//! An events file is TOML with an optional column `date` and an array of
//! `[[events]]` tables. Date-times are written as quoted strings so they
//! deserialize as local, zone-less instants:
//!
//! ```toml
//! date = "2024-05-01"
//!
//! [[events]]
//! id = "standup"
//! title = "Standup"
//! start = "2024-05-01T09:00:00"
//! end = "2024-05-01T09:15:00"
//! resource = "room-a"
//! ```

use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Deserialize;

use timegrid::{
    TimeGridError,
    segment::{EventDef, ResourceId, Segment},
};

/// Parsed contents of an events file.
#[derive(Debug, Deserialize)]
pub struct EventsFile {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    resource: Option<ResourceId>,
}

impl EventsFile {
    /// Parse an events file from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::Input`] if the source is not a valid events file.
    pub fn parse(source: &str) -> Result<Self, TimeGridError> {
        toml::from_str(source).map_err(|err| TimeGridError::Input(err.to_string()))
    }

    /// Number of events in the file.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the file lists no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Resolve the date of the column to lay out.
    ///
    /// An explicit `override_date` wins, then the file's `date`, then the
    /// start date of the first event.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::Input`] when none of those is available.
    pub fn column_date(&self, override_date: Option<NaiveDate>) -> Result<NaiveDate, TimeGridError> {
        override_date
            .or(self.date)
            .or_else(|| self.events.first().map(|event| event.start.date()))
            .ok_or_else(|| {
                TimeGridError::Input(
                    "no column date given and the file has no events to infer one from"
                        .to_string(),
                )
            })
    }

    /// Build one segment per event, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`TimeGridError::Input`] if an event ends before it starts.
    pub fn segments(&self) -> Result<Vec<Segment>, TimeGridError> {
        self.events
            .iter()
            .map(|entry| {
                let mut def = EventDef::new(entry.id.clone());
                if let Some(title) = &entry.title {
                    def = def.with_title(title.clone());
                }
                if let Some(resource) = &entry.resource {
                    def = def.with_resource(resource.clone());
                }

                let segment = Segment::new(Rc::new(def), entry.start, entry.end);
                if segment.duration() < TimeDelta::zero() {
                    return Err(TimeGridError::Input(format!(
                        "event `{}` ends at {} before it starts at {}",
                        entry.id, entry.end, entry.start
                    )));
                }

                Ok(segment)
            })
            .collect()
    }
}
