//! Geographic coordinates and bounding boxes

/// LatLng represents a geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// LatLngBounds is a rectangle in geographic coordinates
///
/// Stored as south-west and north-east corners. Boxes crossing the
/// antimeridian are not modelled: `sw.lng <= ne.lng` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl LatLngBounds {
    /// Creates bounds from two corners, normalizing their order
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            sw: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            ne: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Degenerate bounds containing a single point
    pub fn from_point(p: LatLng) -> Self {
        Self { sw: p, ne: p }
    }

    /// Smallest bounds containing every point, `None` for an empty iterator
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(*first);
        for p in iter {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Grows the bounds to include `p`
    pub fn extend(&mut self, p: LatLng) {
        self.sw.lat = self.sw.lat.min(p.lat);
        self.sw.lng = self.sw.lng.min(p.lng);
        self.ne.lat = self.ne.lat.max(p.lat);
        self.ne.lng = self.ne.lng.max(p.lng);
    }

    /// Returns the union of two bounds
    #[allow(dead_code)] // Part of public API, may be used by external code
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let mut out = *self;
        out.extend(other.sw);
        out.extend(other.ne);
        out
    }

    /// Checks if `p` lies inside the bounds (edges inclusive)
    pub fn contains(&self, p: &LatLng) -> bool {
        p.lat >= self.sw.lat && p.lat <= self.ne.lat && p.lng >= self.sw.lng && p.lng <= self.ne.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }
}
