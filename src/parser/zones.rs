use super::markers::{Marker, MarkerSet};
use super::types::Action;

/// Position of the scanner in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    BeforeEntry,
    Declarations,
    AttributeStatements,
    Done,
}

impl Zone {
    /// The single transition function: decides the next zone and what to do
    /// with `line` (terminator already stripped).
    pub fn advance(self, line: &str, markers: &MarkerSet) -> (Zone, Action) {
        match self {
            Zone::BeforeEntry if markers.matches(Marker::EntryPoint, line) => {
                (Zone::Declarations, Action::Boundary(Marker::EntryPoint))
            }
            Zone::BeforeEntry => (Zone::BeforeEntry, Action::Discard),
            Zone::Declarations if markers.matches(Marker::AttributeVectors, line) => (
                Zone::AttributeStatements,
                Action::Boundary(Marker::AttributeVectors),
            ),
            Zone::Declarations => (Zone::Declarations, Action::Declaration),
            Zone::AttributeStatements if markers.matches(Marker::LeaveDefineMode, line) => {
                (Zone::Done, Action::Boundary(Marker::LeaveDefineMode))
            }
            Zone::AttributeStatements => (Zone::AttributeStatements, Action::Statement),
            Zone::Done => (Zone::Done, Action::Discard),
        }
    }

    /// The marker still awaited in this zone, if any.
    pub fn awaiting(self) -> Option<Marker> {
        match self {
            Zone::BeforeEntry => Some(Marker::EntryPoint),
            Zone::Declarations => Some(Marker::AttributeVectors),
            Zone::AttributeStatements => Some(Marker::LeaveDefineMode),
            Zone::Done => None,
        }
    }
}
