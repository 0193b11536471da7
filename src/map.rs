//! Headless map host
//!
//! A Web Mercator viewport of a fixed pixel size that records what the
//! clusterer asks it to show. Used to cluster offline and in tests.

use std::collections::{BTreeMap, HashSet};

use crate::cluster::{
    ClusterIcon, ClusterKey, LatLng, LatLngBounds, MapView, MarkerId, Pixel, Projector, Renderer,
    WebMercator,
};

/// Maximum zoom of the default map type
pub const DEFAULT_MAP_MAX_ZOOM: u32 = 21;

#[derive(Debug, Clone, PartialEq)]
struct IconSlot {
    icon: ClusterIcon,
    visible: bool,
}

/// HeadlessMap is an in-memory map view with a recording renderer
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: LatLng,
    zoom: u32,
    max_zoom: u32,
    width: u32,
    height: u32,
    attached: HashSet<MarkerId>,
    icons: BTreeMap<ClusterKey, IconSlot>,
}

#[allow(dead_code)] // Part of public API, may be used by external code
impl HeadlessMap {
    pub fn new(center: LatLng, zoom: u32, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            max_zoom: DEFAULT_MAP_MAX_ZOOM,
            width,
            height,
            attached: HashSet::new(),
            icons: BTreeMap::new(),
        }
    }

    pub fn with_max_zoom(mut self, max_zoom: u32) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Changes the zoom; the owner reports it to the clusterer
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom;
    }

    pub fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Projection for the current center and zoom, with the view's top-left as origin
    pub fn projection(&self) -> WebMercator {
        let mut projection = WebMercator::new(self.zoom);
        let c = projection.to_world(&self.center);
        projection.origin = Pixel {
            x: c.x - f64::from(self.width) / 2.0,
            y: c.y - f64::from(self.height) / 2.0,
        };
        projection
    }

    pub fn is_attached(&self, id: MarkerId) -> bool {
        self.attached.contains(&id)
    }

    /// Attached markers in id order
    pub fn attached_markers(&self) -> Vec<MarkerId> {
        let mut ids: Vec<MarkerId> = self.attached.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Icons currently on screen, in cluster key order
    pub fn visible_icons(&self) -> impl Iterator<Item = (ClusterKey, &ClusterIcon)> {
        self.icons
            .iter()
            .filter(|(_, slot)| slot.visible)
            .map(|(key, slot)| (*key, &slot.icon))
    }

    pub fn visible_icon(&self, key: ClusterKey) -> Option<&ClusterIcon> {
        self.icons
            .get(&key)
            .filter(|slot| slot.visible)
            .map(|slot| &slot.icon)
    }

    /// Icons known to the renderer, visible or hidden
    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }
}

impl Projector for HeadlessMap {
    fn lat_lng_to_pixel(&self, p: &LatLng) -> Pixel {
        self.projection().lat_lng_to_pixel(p)
    }

    fn pixel_to_lat_lng(&self, px: &Pixel) -> LatLng {
        self.projection().pixel_to_lat_lng(px)
    }
}

impl MapView for HeadlessMap {
    fn bounds(&self) -> Option<LatLngBounds> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let projection = self.projection();
        let ne = projection.pixel_to_lat_lng(&Pixel {
            x: f64::from(self.width),
            y: 0.0,
        });
        let sw = projection.pixel_to_lat_lng(&Pixel {
            x: 0.0,
            y: f64::from(self.height),
        });
        Some(LatLngBounds::new(sw, ne))
    }

    fn zoom(&self) -> u32 {
        self.zoom
    }

    fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    /// Centers on `bounds` at the deepest zoom where it still fits the view
    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.center = bounds.center();
        let mut zoom = 0;
        for z in 0..=self.max_zoom {
            let projection = WebMercator::new(z);
            let ne = projection.to_world(&bounds.ne);
            let sw = projection.to_world(&bounds.sw);
            if (ne.x - sw.x) > f64::from(self.width) || (sw.y - ne.y) > f64::from(self.height) {
                break;
            }
            zoom = z;
        }
        self.zoom = zoom;
    }
}

impl Renderer for HeadlessMap {
    fn set_marker_attached(&mut self, id: MarkerId, attached: bool) {
        if attached {
            self.attached.insert(id);
        } else {
            self.attached.remove(&id);
        }
    }

    fn is_marker_attached(&self, id: MarkerId) -> bool {
        self.attached.contains(&id)
    }

    fn show_icon(&mut self, key: ClusterKey, icon: &ClusterIcon) {
        self.icons.insert(
            key,
            IconSlot {
                icon: icon.clone(),
                visible: true,
            },
        );
    }

    fn hide_icon(&mut self, key: ClusterKey) {
        if let Some(slot) = self.icons.get_mut(&key) {
            slot.visible = false;
        }
    }

    fn remove_icon(&mut self, key: ClusterKey) {
        self.icons.remove(&key);
    }
}
