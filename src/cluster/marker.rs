use std::fmt;

use super::point::LatLng;

/// Identity of a marker supplied by the host
///
/// Two markers at the same coordinates are distinct as long as their ids differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marker is the clusterer's view of a host map marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
    /// Draggable markers are re-clustered when the host reports a drag end
    pub draggable: bool,
}

impl Marker {
    pub fn new(id: u64, position: LatLng) -> Self {
        Self {
            id: MarkerId(id),
            position,
            draggable: false,
        }
    }

    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }
}
