use crate::node::SearchNode;

/// A single step of search progress, for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// The node was taken from the open set and its neighbors examined.
    Expanded(SearchNode),
    /// The node was appended to the closed set.
    Closed(SearchNode),
}

/// Receives search events as they happen.
///
/// Implemented for closures and for `Vec<SearchEvent>` (which records).
pub trait SearchObserver {
    fn observe(&mut self, event: SearchEvent);
}

impl<F: FnMut(SearchEvent)> SearchObserver for F {
    fn observe(&mut self, event: SearchEvent) {
        self(event)
    }
}

impl SearchObserver for Vec<SearchEvent> {
    fn observe(&mut self, event: SearchEvent) {
        self.push(event);
    }
}
