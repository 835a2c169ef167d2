//! Events, resources, and the segments rendered inside a time column.
//!
//! A calendar event is described once by an [`EventDef`] and may be rendered
//! as one or more [`Segment`]s, one per column it crosses. Segments share
//! their definition through an `Rc`, so several segments of the same event
//! report the same id, title, and [`ResourceId`].

use std::{fmt, rc::Rc};

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Identifier of the resource (room, person, machine...) an event belongs to.
///
/// Ordering is total and stable: numeric ids sort before named ids, numeric
/// ids compare numerically, and named ids compare lexically.
///
/// # Examples
///
/// ```
/// use timegrid_core::segment::ResourceId;
///
/// let mut ids = vec![ResourceId::from("b"), ResourceId::from(10), ResourceId::from(2)];
/// ids.sort();
/// assert_eq!(ids, vec![ResourceId::from(2), ResourceId::from(10), ResourceId::from("b")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Name(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// The definition shared by every segment of one calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDef {
    id: String,
    title: Option<String>,
    resource_id: Option<ResourceId>,
}

impl EventDef {
    /// Creates a new definition with the given event id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            resource_id: None,
        }
    }

    /// Sets the display title (builder style).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the owning resource (builder style).
    pub fn with_resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Returns the event id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display title, if any
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the owning resource, if any
    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.resource_id.as_ref()
    }
}

/// One rendered occurrence of an event within a single column.
///
/// Segments are never mutated by the layout engine; placements refer back to
/// them by reference.
#[derive(Debug, Clone)]
pub struct Segment {
    def: Rc<EventDef>,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Segment {
    /// Creates a new segment for `def` covering `start..end`.
    ///
    /// Instants are not validated; an inverted segment simply maps to an
    /// empty span.
    pub fn new(def: Rc<EventDef>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { def, start, end }
    }

    /// Returns the shared event definition
    pub fn def(&self) -> &EventDef {
        &self.def
    }

    /// Returns the start instant
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end instant
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the owning resource of the event, if any
    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.def.resource_id()
    }

    /// Returns the time covered by the segment
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
