//! Viewport gate: decides which part of the map takes part in a pass

use super::host::MapView;
use super::point::LatLngBounds;
use super::projection::expand_bounds;

/// ViewportGate tracks the last accepted zoom and builds query regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGate {
    prev_zoom: u32,
}

impl ViewportGate {
    pub fn new(zoom: u32) -> Self {
        Self { prev_zoom: zoom }
    }

    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn prev_zoom(&self) -> u32 {
        self.prev_zoom
    }

    /// Visible bounds padded by `grid_size` pixels, `None` if the map has no bounds yet
    pub fn query_region(&self, view: &impl MapView, grid_size: u32) -> Option<LatLngBounds> {
        view.bounds()
            .map(|bounds| expand_bounds(&bounds, grid_size, view))
    }

    /// Records a zoom change reported by the host
    ///
    /// Returns true when the zoom is within the map's range and differs
    /// from the previous one, meaning current clusters are stale.
    pub fn zoom_changed(&mut self, zoom: u32, map_max_zoom: u32) -> bool {
        if zoom > map_max_zoom || zoom == self.prev_zoom {
            return false;
        }
        self.prev_zoom = zoom;
        true
    }
}
