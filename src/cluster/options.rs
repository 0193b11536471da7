use super::calculator::{ClusterStyle, DEFAULT_IMAGE_EXTENSION, DEFAULT_IMAGE_PATH};

/// Default pixel padding around a cluster's center
pub const DEFAULT_GRID_SIZE: u32 = 60;
/// Default member count at which the cluster icon replaces the markers
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Construction-time settings of a [`MarkerClusterer`](super::MarkerClusterer)
#[derive(Debug, Clone, PartialEq)]
pub struct ClustererOptions {
    pub grid_size: u32,
    pub minimum_cluster_size: usize,
    /// Zoom above which markers are never clustered; `None` uses the map's max zoom
    pub max_zoom: Option<u32>,
    /// Use the running centroid of members instead of the first member's position
    pub average_center: bool,
    /// Fit the map to a cluster when it is clicked
    pub zoom_on_click: bool,
    /// Icon tiers; when empty, built-in tiers are generated from the image settings
    pub styles: Vec<ClusterStyle>,
    pub image_path: String,
    pub image_extension: String,
}

impl Default for ClustererOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            minimum_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            max_zoom: None,
            average_center: false,
            zoom_on_click: true,
            styles: Vec::new(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
        }
    }
}

#[allow(dead_code)] // Part of public API, may be used by external code
impl ClustererOptions {
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_minimum_cluster_size(mut self, size: usize) -> Self {
        self.minimum_cluster_size = size;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: Option<u32>) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_average_center(mut self, average_center: bool) -> Self {
        self.average_center = average_center;
        self
    }

    pub fn with_zoom_on_click(mut self, zoom_on_click: bool) -> Self {
        self.zoom_on_click = zoom_on_click;
        self
    }

    pub fn with_styles(mut self, styles: Vec<ClusterStyle>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_image(mut self, path: impl Into<String>, extension: impl Into<String>) -> Self {
        self.image_path = path.into();
        self.image_extension = extension.into();
        self
    }
}
