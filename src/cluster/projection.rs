//! Screen projection and pixel-space bounds padding

use std::f64::consts::PI;

use super::distance::DEGREE_RAD;
use super::point::{LatLng, LatLngBounds};

/// Size in pixels of one Web Mercator tile at zoom 0
pub const TILE_SIZE: f64 = 256.0;

/// Sine of the latitude is clamped to this to keep Mercator finite at the poles
const MAX_SIN_LAT: f64 = 0.9999;

/// Pixel is a screen position; `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

/// Converts between geographic coordinates and screen pixels
pub trait Projector {
    fn lat_lng_to_pixel(&self, p: &LatLng) -> Pixel;
    fn pixel_to_lat_lng(&self, px: &Pixel) -> LatLng;
}

/// Pads `bounds` outwards by `grid_size` screen pixels on every side
///
/// Padding happens in pixel space so that the catchment area stays visually
/// constant across zoom levels. The result is the union of the original box
/// with both padded corners.
pub fn expand_bounds(bounds: &LatLngBounds, grid_size: u32, projector: &impl Projector) -> LatLngBounds {
    let grid = f64::from(grid_size);

    let mut ne = projector.lat_lng_to_pixel(&bounds.ne);
    ne.x += grid;
    ne.y -= grid;

    let mut sw = projector.lat_lng_to_pixel(&bounds.sw);
    sw.x -= grid;
    sw.y += grid;

    let mut out = *bounds;
    out.extend(projector.pixel_to_lat_lng(&ne));
    out.extend(projector.pixel_to_lat_lng(&sw));
    out
}

/// Spherical Web Mercator at a fixed zoom level
///
/// Pixels are relative to `origin`, the world pixel shown in the top-left
/// corner of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    pub zoom: u32,
    pub origin: Pixel,
}

impl WebMercator {
    pub fn new(zoom: u32) -> Self {
        Self {
            zoom,
            origin: Pixel { x: 0.0, y: 0.0 },
        }
    }

    /// Width of the whole world in pixels at this zoom
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powi(self.zoom as i32)
    }

    /// Projects to absolute world pixels, ignoring `origin`
    pub fn to_world(&self, p: &LatLng) -> Pixel {
        let size = self.world_size();
        let sin_lat = (p.lat * DEGREE_RAD).sin().clamp(-MAX_SIN_LAT, MAX_SIN_LAT);

        Pixel {
            x: (p.lng + 180.0) / 360.0 * size,
            y: (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size,
        }
    }

    pub fn from_world(&self, px: &Pixel) -> LatLng {
        let size = self.world_size();
        let n = PI - 2.0 * PI * px.y / size;

        LatLng {
            lat: n.sinh().atan() / DEGREE_RAD,
            lng: px.x / size * 360.0 - 180.0,
        }
    }
}

impl Projector for WebMercator {
    fn lat_lng_to_pixel(&self, p: &LatLng) -> Pixel {
        let world = self.to_world(p);
        Pixel {
            x: world.x - self.origin.x,
            y: world.y - self.origin.y,
        }
    }

    fn pixel_to_lat_lng(&self, px: &Pixel) -> LatLng {
        self.from_world(&Pixel {
            x: px.x + self.origin.x,
            y: px.y + self.origin.y,
        })
    }
}
