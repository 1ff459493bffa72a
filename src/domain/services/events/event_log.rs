//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Append-only record of the matching process. Every `iterate()` call opens a segment with
// `begin_process`, appends its events and closes it with `end_process`, so consumers can
// pull the newest batch without rescanning the whole history.
//
// | Name          | Description                                   | Key Methods                   |
// |---------------|-----------------------------------------------|-------------------------------|
// | EventLog      | Ordered history of matching events           | add_process, slice_current    |
// | Marks         | Bounds of the most recent segment            | start, end                    |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::event_types::MatchingEvent;

/// Bounds of the most recent segment inside the history.
///
/// `start <= end <= history.len()` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    pub start: usize,
    pub end: usize,
}

/// Append-only event history with segment marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    history: Vec<MatchingEvent>,
    marks: Marks,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the beginning of a new segment at the current end of the history.
    ///
    /// The segment is empty until `end_process` is called.
    pub fn begin_process(&mut self) {
        self.marks.start = self.history.len();
        self.marks.end = self.marks.start;
    }

    /// Marks the end of the current segment.
    pub fn end_process(&mut self) {
        self.marks.end = self.history.len();
    }

    /// Appends an event to the history.
    pub fn add_process(&mut self, event: MatchingEvent) {
        self.history.push(event);
    }

    /// Events recorded before the current segment.
    pub fn slice_before(&self) -> &[MatchingEvent] {
        &self.history[..self.marks.start]
    }

    /// Events inside the current segment.
    pub fn slice_current(&self) -> &[MatchingEvent] {
        &self.history[self.marks.start..self.marks.end]
    }

    /// Events recorded after the current segment was closed.
    pub fn slice_after(&self) -> &[MatchingEvent] {
        &self.history[self.marks.end..]
    }

    pub fn history(&self) -> &[MatchingEvent] {
        &self.history
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
