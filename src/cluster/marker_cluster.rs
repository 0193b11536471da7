//! A single cluster: members, representative center and catchment bounds

use tracing::trace;

use super::calculator::{Calculator, ClusterStyle};
use super::host::{ClusterKey, Host};
use super::icon::ClusterIcon;
use super::marker::{Marker, MarkerId};
use super::point::{LatLng, LatLngBounds};
use super::projection::expand_bounds;

/// Everything a cluster needs from its owner while updating
pub struct ClusterContext<'a, H: Host> {
    pub host: &'a mut H,
    /// Zoom above which clustering is disabled
    pub max_zoom: u32,
    pub calculator: &'a dyn Calculator,
    pub styles: &'a [ClusterStyle],
}

/// Cluster groups markers that are drawn as one icon once there are enough of them
#[derive(Debug, Clone)]
pub struct Cluster {
    key: ClusterKey,
    /// Members in assignment order
    markers: Vec<Marker>,
    center: Option<LatLng>,
    /// Grid-padded box around `center`, recomputed whenever `center` moves
    expanded_bounds: Option<LatLngBounds>,
    min_size: usize,
    grid_size: u32,
    average_center: bool,
    /// Icon as last shown, `None` while hidden
    icon: Option<ClusterIcon>,
}

#[allow(dead_code)] // Part of public API, may be used by external code
impl Cluster {
    pub fn new(key: ClusterKey, min_size: usize, grid_size: u32, average_center: bool) -> Self {
        Self {
            key,
            markers: Vec::new(),
            center: None,
            expanded_bounds: None,
            min_size,
            grid_size,
            average_center,
            icon: None,
        }
    }

    pub fn key(&self) -> ClusterKey {
        self.key
    }

    pub fn size(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn expanded_bounds(&self) -> Option<LatLngBounds> {
        self.expanded_bounds
    }

    pub fn icon(&self) -> Option<&ClusterIcon> {
        self.icon.as_ref()
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.iter().any(|m| m.id == id)
    }

    /// Adds a marker, returning false if it is already a member
    ///
    /// The first member fixes the center. Later members move it only when
    /// average centering is on, as an incremental mean over lat and lng.
    pub fn add_marker<H: Host>(&mut self, marker: Marker, ctx: &mut ClusterContext<'_, H>) -> bool {
        if self.contains(marker.id) {
            return false;
        }

        match self.center {
            None => {
                self.center = Some(marker.position);
                self.calculate_bounds(&*ctx.host);
            }
            Some(center) if self.average_center => {
                let n = (self.markers.len() + 1) as f64;
                self.center = Some(LatLng::new(
                    (center.lat * (n - 1.0) + marker.position.lat) / n,
                    (center.lng * (n - 1.0) + marker.position.lng) / n,
                ));
                self.calculate_bounds(&*ctx.host);
            }
            Some(_) => {}
        }

        self.markers.push(marker);
        let size = self.markers.len();

        if size < self.min_size && !ctx.host.is_marker_attached(marker.id) {
            ctx.host.set_marker_attached(marker.id, true);
        }
        if size == self.min_size {
            // threshold crossed: hide everybody in one pass
            for m in &self.markers {
                ctx.host.set_marker_attached(m.id, false);
            }
        }
        if size >= self.min_size {
            ctx.host.set_marker_attached(marker.id, false);
        }

        self.update_visibility(ctx);
        true
    }

    /// Checks if the marker lies within the cluster's catchment bounds
    pub fn is_marker_in_cluster_bounds(&self, marker: &Marker) -> bool {
        self.expanded_bounds
            .is_some_and(|bounds| bounds.contains(&marker.position))
    }

    /// Applies the zoom and threshold visibility policy
    ///
    /// Above `max_zoom` every member is shown on its own. Below the size
    /// threshold the icon is hidden, otherwise the members are detached and
    /// the icon is shown with a label from the calculator.
    pub fn update_visibility<H: Host>(&mut self, ctx: &mut ClusterContext<'_, H>) {
        let zoom = ctx.host.zoom();

        if zoom > ctx.max_zoom {
            for m in &self.markers {
                ctx.host.set_marker_attached(m.id, true);
            }
            self.hide_icon(&mut *ctx.host);
            return;
        }

        let Some(center) = self.center else {
            return;
        };
        if self.markers.len() < self.min_size {
            self.hide_icon(&mut *ctx.host);
            return;
        }

        // the icon stands in for every member
        for m in &self.markers {
            ctx.host.set_marker_attached(m.id, false);
        }
        let sums = ctx.calculator.calculate(&self.markers, ctx.styles.len());
        let icon = ClusterIcon::new(center, sums, ctx.styles, &*ctx.host);
        ctx.host.show_icon(self.key, &icon);
        self.icon = Some(icon);
    }

    /// Union of the center with every member position
    pub fn get_bounds(&self) -> Option<LatLngBounds> {
        let center = self.center?;
        let mut bounds = LatLngBounds::from_point(center);
        for m in &self.markers {
            bounds.extend(m.position);
        }
        Some(bounds)
    }

    /// Drops the icon and releases all members
    ///
    /// Ownership of the released markers is left to the caller, which may
    /// already have handed them to newer clusters.
    pub fn remove(&mut self, host: &mut impl Host) {
        host.remove_icon(self.key);
        self.icon = None;
        self.markers.clear();
    }

    fn hide_icon(&mut self, host: &mut impl Host) {
        if self.icon.take().is_some() {
            host.hide_icon(self.key);
        }
    }

    fn calculate_bounds(&mut self, host: &impl Host) {
        self.expanded_bounds = self.center.map(|center| {
            let bounds = expand_bounds(&LatLngBounds::from_point(center), self.grid_size, host);
            trace!(cluster = self.key.0, ?bounds, "recalculated cluster bounds");
            bounds
        });
    }
}
