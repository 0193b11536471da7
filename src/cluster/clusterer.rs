//! Marker clusterer: owns the marker set and the active clusters
//!
//! A recompute pass scans markers in insertion order. Every marker that is
//! not yet owned by a cluster and lies inside the padded viewport goes to
//! the nearest cluster by center distance, provided it falls within that
//! cluster's catchment bounds; otherwise it starts a cluster of its own.
//!
//! The nearest search has no distance cutoff. Bounds containment is the
//! only acceptance test, so chains of sparse markers can form elongated
//! clusters.

use std::collections::{HashMap, VecDeque};
use std::mem;

use bitvec::prelude::*;
use tracing::{debug, trace};

use super::calculator::{Calculator, ClusterStyle, DigitCountCalculator, default_styles};
use super::distance::{MAX_DISTANCE_KM, haversine_distance};
use super::host::{ClusterKey, Host};
use super::marker::{Marker, MarkerId};
use super::marker_cluster::{Cluster, ClusterContext};
use super::options::{ClustererOptions, DEFAULT_GRID_SIZE, DEFAULT_MIN_CLUSTER_SIZE};
use super::point::{LatLng, LatLngBounds};
use super::viewport::ViewportGate;

/// Data handed to the cluster click listener
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub key: ClusterKey,
    pub center: Option<LatLng>,
    pub size: usize,
    pub bounds: Option<LatLngBounds>,
    pub markers: Vec<Marker>,
}

/// What a cluster click did to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Already at the max cluster zoom with several members; the host decides
    MaxZoomReached,
    /// The map was fit to the cluster's member bounds
    Zoomed,
    /// Zoom on click is disabled
    Ignored,
}

type ClickListener = Box<dyn FnMut(&ClusterSummary)>;

/// MarkerClusterer groups host markers into clusters for the current viewport
pub struct MarkerClusterer<H: Host> {
    host: H,
    /// Every marker ever added and not removed, in insertion order
    markers: Vec<Marker>,
    /// Clusters of the current viewport and zoom
    clusters: Vec<Cluster>,
    /// Which active cluster owns a marker; absent means unassigned
    owners: HashMap<MarkerId, ClusterKey>,
    /// Snapshots from `repaint` waiting for `run_deferred`
    pending: VecDeque<Vec<Cluster>>,
    gate: ViewportGate,
    grid_size: u32,
    min_cluster_size: usize,
    max_zoom: Option<u32>,
    average_center: bool,
    zoom_on_click: bool,
    styles: Vec<ClusterStyle>,
    calculator: Box<dyn Calculator>,
    click_listener: Option<ClickListener>,
    ready: bool,
    next_key: u64,
}

#[allow(dead_code)] // Part of public API, may be used by external code
impl<H: Host> MarkerClusterer<H> {
    /// Creates a clusterer over `host` and adds `markers` without clustering them yet
    ///
    /// Nothing is clustered until the host calls [`on_ready`](Self::on_ready).
    /// A zero grid size or minimum cluster size falls back to its default.
    pub fn new(host: H, markers: Vec<Marker>, options: ClustererOptions) -> Self {
        let styles = if options.styles.is_empty() {
            default_styles(&options.image_path, &options.image_extension)
        } else {
            options.styles
        };
        let gate = ViewportGate::new(host.zoom());

        let mut clusterer = Self {
            host,
            markers: Vec::new(),
            clusters: Vec::new(),
            owners: HashMap::new(),
            pending: VecDeque::new(),
            gate,
            grid_size: match options.grid_size {
                0 => DEFAULT_GRID_SIZE,
                n => n,
            },
            min_cluster_size: match options.minimum_cluster_size {
                0 => DEFAULT_MIN_CLUSTER_SIZE,
                n => n,
            },
            max_zoom: options.max_zoom,
            average_center: options.average_center,
            zoom_on_click: options.zoom_on_click,
            styles,
            calculator: Box::new(DigitCountCalculator),
            click_listener: None,
            ready: false,
            next_key: 0,
        };
        if !markers.is_empty() {
            clusterer.add_markers(markers, false);
        }
        clusterer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn total_markers(&self) -> usize {
        self.markers.len()
    }

    pub fn total_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Cluster currently owning the marker
    pub fn cluster_of(&self, id: MarkerId) -> Option<ClusterKey> {
        self.owners.get(&id).copied()
    }

    pub fn is_assigned(&self, id: MarkerId) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn cluster(&self, key: ClusterKey) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.key() == key)
    }

    /// Old clusters that stay readable until the next [`run_deferred`](Self::run_deferred)
    pub fn pending_disposals(&self) -> impl Iterator<Item = &Cluster> {
        self.pending.iter().flatten()
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, grid_size: u32) {
        self.grid_size = grid_size;
    }

    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    pub fn set_min_cluster_size(&mut self, size: usize) {
        self.min_cluster_size = size;
    }

    /// Zoom above which clustering is off, defaulting to the map's max zoom
    pub fn max_zoom(&self) -> u32 {
        self.max_zoom.unwrap_or_else(|| self.host.max_zoom())
    }

    pub fn set_max_zoom(&mut self, max_zoom: Option<u32>) {
        self.max_zoom = max_zoom;
    }

    pub fn calculator(&self) -> &dyn Calculator {
        self.calculator.as_ref()
    }

    pub fn set_calculator(&mut self, calculator: impl Calculator + 'static) {
        self.calculator = Box::new(calculator);
    }

    pub fn styles(&self) -> &[ClusterStyle] {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: Vec<ClusterStyle>) {
        self.styles = styles;
    }

    pub fn is_zoom_on_click(&self) -> bool {
        self.zoom_on_click
    }

    pub fn is_average_center(&self) -> bool {
        self.average_center
    }

    pub fn set_click_listener(&mut self, listener: impl FnMut(&ClusterSummary) + 'static) {
        self.click_listener = Some(Box::new(listener));
    }

    pub fn add_marker(&mut self, marker: Marker, defer_redraw: bool) {
        self.push_marker(marker);
        if !defer_redraw {
            self.recompute();
        }
    }

    /// Adds markers as unassigned; pass `defer_redraw` to batch several calls into one pass
    pub fn add_markers(&mut self, markers: impl IntoIterator<Item = Marker>, defer_redraw: bool) {
        for marker in markers {
            self.push_marker(marker);
        }
        if !defer_redraw {
            self.recompute();
        }
    }

    /// Removes a marker by identity, returning false if it was never added
    pub fn remove_marker(&mut self, id: MarkerId, defer_redraw: bool) -> bool {
        let Some(pos) = self.markers.iter().position(|m| m.id == id) else {
            return false;
        };
        self.host.set_marker_attached(id, false);
        self.markers.remove(pos);
        self.owners.remove(&id);

        if !defer_redraw {
            self.reset_viewport(false);
            self.recompute();
        }
        true
    }

    /// Removes every listed marker that is present, returning true if any was
    pub fn remove_markers(&mut self, ids: &[MarkerId], defer_redraw: bool) -> bool {
        let mut doomed = bitvec![0; self.markers.len()];
        for id in ids {
            let found = self
                .markers
                .iter()
                .enumerate()
                .position(|(i, m)| m.id == *id && !doomed[i]);
            if let Some(i) = found {
                doomed.set(i, true);
                self.host.set_marker_attached(*id, false);
                self.owners.remove(id);
            }
        }

        let removed = doomed.any();
        if removed {
            let mut i = 0;
            self.markers.retain(|_| {
                let keep = !doomed[i];
                i += 1;
                keep
            });
        }

        if removed && !defer_redraw {
            self.reset_viewport(false);
            self.recompute();
        }
        removed
    }

    /// Detaches every marker from the map and forgets them all
    pub fn clear_markers(&mut self) {
        self.reset_viewport(true);
        self.markers.clear();
    }

    /// Destroys all clusters and marks every marker unassigned
    ///
    /// With `detach` each marker is also taken off the map, so no stray
    /// markers remain after a full clear.
    pub fn reset_viewport(&mut self, detach: bool) {
        let count = self.clusters.len();
        for mut cluster in self.clusters.drain(..) {
            cluster.remove(&mut self.host);
        }
        self.owners.clear();
        if detach {
            for m in &self.markers {
                self.host.set_marker_attached(m.id, false);
            }
        }
        debug!(clusters = count, detach, "viewport reset");
    }

    /// Runs a clustering pass over unassigned markers inside the padded viewport
    pub fn recompute(&mut self) {
        if !self.ready {
            return;
        }
        let Some(region) = self.gate.query_region(&self.host, self.grid_size) else {
            debug!("host has no bounds yet, skipping pass");
            return;
        };

        let mut routed = 0;
        for i in 0..self.markers.len() {
            let marker = self.markers[i];
            if self.owners.contains_key(&marker.id) || !region.contains(&marker.position) {
                continue;
            }
            self.add_to_closest_cluster(marker);
            routed += 1;
        }

        debug!(
            routed,
            clusters = self.clusters.len(),
            markers = self.markers.len(),
            "recompute pass finished"
        );
    }

    /// Rebuilds all clusters, keeping the old ones alive until [`run_deferred`](Self::run_deferred)
    ///
    /// Old icons stay on screen for one more tick so markers are never
    /// left without either their old or their new representation.
    pub fn repaint(&mut self) {
        let old = mem::take(&mut self.clusters);
        self.reset_viewport(false);
        self.recompute();
        if !old.is_empty() {
            debug!(clusters = old.len(), "scheduled disposal of old clusters");
            self.pending.push_back(old);
        }
    }

    /// Disposes every snapshot scheduled by `repaint`, oldest first
    ///
    /// The host event loop calls this once control has returned to it.
    /// Returns the number of clusters disposed.
    pub fn run_deferred(&mut self) -> usize {
        let mut disposed = 0;
        while let Some(snapshot) = self.pending.pop_front() {
            for mut cluster in snapshot {
                cluster.remove(&mut self.host);
                disposed += 1;
            }
        }
        if disposed > 0 {
            debug!(disposed, "disposed old clusters");
        }
        disposed
    }

    /// Host attached the clusterer; the first pass runs now
    pub fn on_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.recompute();
    }

    /// Host reported a zoom change; clusters are dropped and rebuilt on the next idle
    pub fn on_zoom_changed(&mut self, zoom: u32) -> bool {
        let map_max_zoom = self.host.max_zoom();
        if !self.gate.zoom_changed(zoom, map_max_zoom) {
            return false;
        }
        self.reset_viewport(false);
        true
    }

    /// Host finished panning or zooming
    pub fn on_idle(&mut self) {
        self.recompute();
    }

    /// Host finished dragging a marker to `position`
    ///
    /// Returns false for unknown or non-draggable markers.
    pub fn on_marker_drag_end(&mut self, id: MarkerId, position: LatLng) -> bool {
        let Some(marker) = self.markers.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        if !marker.draggable {
            return false;
        }
        marker.position = position;
        self.owners.remove(&id);
        self.repaint();
        true
    }

    /// Moves and zooms the map so that every marker is visible
    pub fn fit_map_to_markers(&mut self) {
        let bounds = LatLngBounds::from_points(self.markers.iter().map(|m| &m.position));
        if let Some(bounds) = bounds {
            self.host.fit_bounds(&bounds);
        }
    }

    /// Handles a click on a cluster icon
    ///
    /// The click listener sees the cluster first. Returns `None` for an
    /// unknown cluster.
    pub fn click_cluster(&mut self, key: ClusterKey) -> Option<ClickOutcome> {
        let cluster = self.clusters.iter().find(|c| c.key() == key)?;
        let summary = ClusterSummary {
            key,
            center: cluster.center(),
            size: cluster.size(),
            bounds: cluster.get_bounds(),
            markers: cluster.markers().to_vec(),
        };

        if let Some(listener) = self.click_listener.as_mut() {
            listener(&summary);
        }

        if self.host.zoom() >= self.max_zoom() && summary.size > 1 {
            return Some(ClickOutcome::MaxZoomReached);
        }
        if !self.zoom_on_click {
            return Some(ClickOutcome::Ignored);
        }
        if let Some(bounds) = summary.bounds {
            self.host.fit_bounds(&bounds);
        }
        Some(ClickOutcome::Zoomed)
    }

    fn push_marker(&mut self, marker: Marker) {
        self.owners.remove(&marker.id);
        self.markers.push(marker);
    }

    /// Sends the marker to the nearest cluster that will take it, or to a new one
    ///
    /// Ties go to the cluster created first.
    fn add_to_closest_cluster(&mut self, marker: Marker) {
        let mut best = MAX_DISTANCE_KM;
        let mut nearest = None;
        for (i, cluster) in self.clusters.iter().enumerate() {
            let Some(center) = cluster.center() else {
                continue;
            };
            let d = haversine_distance(Some(&center), Some(&marker.position));
            if d < best {
                best = d;
                nearest = Some(i);
            }
        }
        let accepting = nearest.filter(|&i| self.clusters[i].is_marker_in_cluster_bounds(&marker));

        let max_zoom = self.max_zoom();
        let mut ctx = ClusterContext {
            host: &mut self.host,
            max_zoom,
            calculator: self.calculator.as_ref(),
            styles: &self.styles,
        };

        match accepting {
            Some(i) => {
                let cluster = &mut self.clusters[i];
                if cluster.add_marker(marker, &mut ctx) {
                    self.owners.insert(marker.id, cluster.key());
                }
            }
            None => {
                let key = ClusterKey(self.next_key);
                self.next_key += 1;
                let mut cluster =
                    Cluster::new(key, self.min_cluster_size, self.grid_size, self.average_center);
                cluster.add_marker(marker, &mut ctx);
                trace!(cluster = key.0, marker = %marker.id, "spawned cluster");
                self.owners.insert(marker.id, key);
                self.clusters.push(cluster);
            }
        }
    }
}
