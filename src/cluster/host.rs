//! Seams to the host mapping platform
//!
//! The clusterer never draws anything and never owns the map. It reads the
//! viewport through [`MapView`] and pushes visibility decisions through
//! [`Renderer`].

use super::icon::ClusterIcon;
use super::marker::MarkerId;
use super::point::LatLngBounds;
use super::projection::Projector;

/// Identity of a cluster, stable for the cluster's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterKey(pub u64);

/// Viewport queries answered by the host map
pub trait MapView: Projector {
    /// Currently visible region, `None` before the map has a size
    fn bounds(&self) -> Option<LatLngBounds>;
    fn zoom(&self) -> u32;
    /// Maximum zoom of the active map type
    fn max_zoom(&self) -> u32;
    /// Moves and zooms the map so that `bounds` is visible
    fn fit_bounds(&mut self, bounds: &LatLngBounds);
}

/// Visual side effects requested by the clusterer
pub trait Renderer {
    /// Attaches (`true`) or detaches a marker from the map
    fn set_marker_attached(&mut self, id: MarkerId, attached: bool);
    fn is_marker_attached(&self, id: MarkerId) -> bool;

    /// Shows or refreshes the aggregate icon of a cluster
    fn show_icon(&mut self, key: ClusterKey, icon: &ClusterIcon);
    /// Hides the icon but keeps it around for a later `show_icon`
    fn hide_icon(&mut self, key: ClusterKey);
    /// Drops the icon for good
    fn remove_icon(&mut self, key: ClusterKey);
}

/// A host provides both the map view and the rendering layer
pub trait Host: MapView + Renderer {}

impl<T: MapView + Renderer> Host for T {}
