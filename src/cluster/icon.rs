use super::calculator::{ClusterStyle, Sums, style_for};
use super::point::LatLng;
use super::projection::{Pixel, Projector};

/// ClusterIcon is the plain-data description of an aggregate icon
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterIcon {
    pub center: LatLng,
    pub sums: Sums,
    /// Resolved style tier, `None` when no tiers are configured
    pub style: Option<ClusterStyle>,
    /// Top-left corner of the icon in screen pixels
    pub position: Pixel,
}

impl ClusterIcon {
    pub fn new(center: LatLng, sums: Sums, styles: &[ClusterStyle], projector: &impl Projector) -> Self {
        let style = style_for(styles, sums.index).cloned();
        let mut position = projector.lat_lng_to_pixel(&center);
        if let Some(style) = &style {
            position.x -= f64::from(style.width / 2);
            position.y -= f64::from(style.height / 2);
        }

        Self {
            center,
            sums,
            style,
            position,
        }
    }
}
