//! Package cluster groups map markers into viewport-dependent clusters
pub mod calculator;
pub mod clusterer;
pub mod distance;
pub mod host;
pub mod icon;
pub mod marker;
pub mod marker_cluster;
pub mod options;
pub mod point;
pub mod projection;
pub mod viewport;

#[cfg(test)]
mod distance_test;
#[cfg(test)]
mod marker_cluster_test;
#[cfg(test)]
mod projection_test;
#[cfg(test)]
mod viewport_test;

// Public API exports - allow unused imports as these are part of the public API
#[allow(unused_imports)]
pub use calculator::{Calculator, ClusterStyle, DigitCountCalculator, Sums, default_styles};
#[allow(unused_imports)]
pub use clusterer::{ClickOutcome, ClusterSummary, MarkerClusterer};
#[allow(unused_imports)]
pub use distance::{DEGREE_RAD, EARTH_R, MAX_DISTANCE_KM, haversine_distance};
#[allow(unused_imports)]
pub use host::{ClusterKey, Host, MapView, Renderer};
#[allow(unused_imports)]
pub use icon::ClusterIcon;
#[allow(unused_imports)]
pub use marker::{Marker, MarkerId};
#[allow(unused_imports)]
pub use marker_cluster::Cluster;
pub use options::ClustererOptions;
pub use point::{LatLng, LatLngBounds};
#[allow(unused_imports)]
pub use projection::{Pixel, Projector, WebMercator, expand_bounds};
