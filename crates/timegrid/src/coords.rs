//! Time to pixel coordinate lookup.
//!
//! The span calculator never converts instants itself; it asks a
//! [`CoordinateLookup`] where an instant falls inside a column. [`SlatCoords`]
//! is the standard implementation for a column divided into equal time slots
//! ("slats"), each with a measured top and height.
//!
//! Any `Fn(NaiveDateTime, NaiveDate) -> f32` is also a lookup, which is
//! convenient for callers that already own a conversion function.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Maps an instant to a vertical pixel offset within a column.
///
/// Implementations must be monotonic in `instant` for a fixed `column_date`.
pub trait CoordinateLookup {
    /// Returns the offset of `instant` from the top of the column that
    /// displays `column_date`.
    fn date_top(&self, instant: NaiveDateTime, column_date: NaiveDate) -> f32;
}

impl<F> CoordinateLookup for F
where
    F: Fn(NaiveDateTime, NaiveDate) -> f32,
{
    fn date_top(&self, instant: NaiveDateTime, column_date: NaiveDate) -> f32 {
        self(instant, column_date)
    }
}

/// Vertical position of one slat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slat {
    top: f32,
    height: f32,
}

impl Slat {
    /// Creates a slat at `top` spanning `height` pixels.
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Returns the top edge in pixels
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the height in pixels
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Coordinates of the time slats of a column.
///
/// Slat `i` covers `slot_min_time + i * slot_duration` up to the next slot.
/// Instants before the first slat map to its top; instants after the last
/// slat map to its bottom.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use timegrid::coords::{CoordinateLookup, SlatCoords};
///
/// // 48 half-hour slats of 20px each.
/// let coords = SlatCoords::uniform(TimeDelta::zero(), TimeDelta::minutes(30), 48, 20.0);
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let nine = date.and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(coords.date_top(nine, date), 360.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlatCoords {
    slot_min_time: TimeDelta,
    slot_duration: TimeDelta,
    slats: Vec<Slat>,
}

impl SlatCoords {
    /// Creates slat coordinates from measured slat positions.
    ///
    /// # Arguments
    ///
    /// * `slot_min_time` - Time of day at which the first slat starts
    /// * `slot_duration` - Time covered by each slat
    /// * `slats` - Slat positions, top to bottom
    pub fn new(
        slot_min_time: TimeDelta,
        slot_duration: TimeDelta,
        slats: impl IntoIterator<Item = Slat>,
    ) -> Self {
        Self {
            slot_min_time,
            slot_duration,
            slats: slats.into_iter().collect(),
        }
    }

    /// Creates `slat_count` consecutive slats of equal height.
    pub fn uniform(
        slot_min_time: TimeDelta,
        slot_duration: TimeDelta,
        slat_count: usize,
        slat_height: f32,
    ) -> Self {
        let slats = (0..slat_count).map(|idx| Slat::new(idx as f32 * slat_height, slat_height));
        Self::new(slot_min_time, slot_duration, slats)
    }

    /// Returns the number of slats
    pub fn slat_count(&self) -> usize {
        self.slats.len()
    }

    /// Returns the bottom edge of the last slat, or 0 if there are none
    pub fn bottom(&self) -> f32 {
        self.slats
            .last()
            .map_or(0.0, |slat| slat.top() + slat.height())
    }

    /// Returns the offset of a time of day, measured from the start of the column date.
    ///
    /// The time may exceed 24 hours for columns that extend past midnight.
    pub fn time_top(&self, time: TimeDelta) -> f32 {
        let slot_ms = self.slot_duration.num_milliseconds();
        if self.slats.is_empty() || slot_ms <= 0 {
            return 0.0;
        }

        let count = self.slats.len();
        let elapsed_ms = (time - self.slot_min_time).num_milliseconds();
        let coverage = (elapsed_ms as f64 / slot_ms as f64).clamp(0.0, count as f64);
        let index = (coverage.floor() as usize).min(count - 1);
        let partial = (coverage - index as f64) as f32;

        let slat = self.slats[index];
        slat.top() + slat.height() * partial
    }
}

impl CoordinateLookup for SlatCoords {
    fn date_top(&self, instant: NaiveDateTime, column_date: NaiveDate) -> f32 {
        let start_of_day = column_date.and_time(NaiveTime::MIN);
        self.time_top(instant - start_of_day)
    }
}
