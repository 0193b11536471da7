#[cfg(test)]
mod tests {
    use crate::cluster::LatLng;
    use crate::cluster::viewport::ViewportGate;
    use crate::map::HeadlessMap;

    #[test]
    fn test_zoom_changed() {
        let mut gate = ViewportGate::new(10);
        assert!(!gate.zoom_changed(10, 21));
        assert!(!gate.zoom_changed(22, 21));
        assert_eq!(gate.prev_zoom(), 10);

        assert!(gate.zoom_changed(11, 21));
        assert_eq!(gate.prev_zoom(), 11);
        assert!(!gate.zoom_changed(11, 21));
        assert!(gate.zoom_changed(0, 21));
    }

    #[test]
    fn test_query_region_pads_viewport() {
        let map = HeadlessMap::new(LatLng::new(40.7128, -74.0060), 10, 800, 600);
        let gate = ViewportGate::new(10);
        let visible = crate::cluster::MapView::bounds(&map).unwrap();
        let region = gate.query_region(&map, 60).unwrap();

        assert!(region.contains(&visible.sw));
        assert!(region.contains(&visible.ne));
        assert!(region.ne.lng > visible.ne.lng);
        assert!(region.sw.lat < visible.sw.lat);
    }

    #[test]
    fn test_query_region_without_bounds() {
        let map = HeadlessMap::new(LatLng::new(0.0, 0.0), 10, 0, 0);
        let gate = ViewportGate::new(10);
        assert!(gate.query_region(&map, 60).is_none());
    }
}
