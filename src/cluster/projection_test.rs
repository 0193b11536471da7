#[cfg(test)]
mod tests {
    use crate::cluster::projection::{Pixel, Projector, TILE_SIZE, WebMercator, expand_bounds};
    use crate::cluster::{LatLng, LatLngBounds};

    #[test]
    fn test_web_mercator_world_center() {
        let projection = WebMercator::new(3);
        let px = projection.lat_lng_to_pixel(&LatLng::new(0.0, 0.0));
        let half = TILE_SIZE * 8.0 / 2.0;
        assert!((px.x - half).abs() < 1e-9);
        assert!((px.y - half).abs() < 1e-9);
    }

    #[test]
    fn test_web_mercator_inverse() {
        let mut projection = WebMercator::new(12);
        projection.origin = Pixel {
            x: 1_200_000.0,
            y: 1_500_000.0,
        };
        let p = LatLng::new(40.7128, -74.0060);
        let back = projection.pixel_to_lat_lng(&projection.lat_lng_to_pixel(&p));
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lng - p.lng).abs() < 1e-9);
    }

    #[test]
    fn test_north_is_up() {
        let projection = WebMercator::new(5);
        let north = projection.lat_lng_to_pixel(&LatLng::new(10.0, 0.0));
        let south = projection.lat_lng_to_pixel(&LatLng::new(-10.0, 0.0));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_expand_bounds_pads_in_pixels() {
        let projection = WebMercator::new(10);
        let center = LatLng::new(0.0, 0.0);
        let bounds = expand_bounds(&LatLngBounds::from_point(center), 60, &projection);

        let pad = 60.0 / projection.world_size() * 360.0;
        assert!((bounds.ne.lng - pad).abs() < 1e-9);
        assert!((bounds.sw.lng + pad).abs() < 1e-9);
        assert!(bounds.ne.lat > 0.0 && bounds.sw.lat < 0.0);
        assert!(bounds.contains(&center));
    }

    #[test]
    fn test_expand_bounds_shrinks_with_zoom() {
        let center = LatLngBounds::from_point(LatLng::new(48.8566, 2.3522));
        let wide = expand_bounds(&center, 60, &WebMercator::new(8));
        let narrow = expand_bounds(&center, 60, &WebMercator::new(9));

        let wide_span = wide.ne.lng - wide.sw.lng;
        let narrow_span = narrow.ne.lng - narrow.sw.lng;
        assert!((wide_span - 2.0 * narrow_span).abs() < 1e-9);
    }

    #[test]
    fn test_expand_bounds_keeps_original_box() {
        let projection = WebMercator::new(6);
        let original = LatLngBounds::new(LatLng::new(10.0, 10.0), LatLng::new(12.0, 15.0));
        let padded = expand_bounds(&original, 0, &projection);
        assert!(padded.contains(&original.sw));
        assert!(padded.contains(&original.ne));
        assert!((padded.sw.lat - original.sw.lat).abs() < 1e-9);
        assert!((padded.ne.lng - original.ne.lng).abs() < 1e-9);
    }
}
