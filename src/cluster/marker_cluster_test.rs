#[cfg(test)]
mod tests {
    use crate::cluster::calculator::{DigitCountCalculator, default_styles};
    use crate::cluster::marker_cluster::ClusterContext;
    use crate::cluster::{Cluster, ClusterKey, LatLng, Marker, Renderer};
    use crate::map::HeadlessMap;

    fn map(zoom: u32) -> HeadlessMap {
        HeadlessMap::new(LatLng::new(0.0, 2.0), zoom, 1024, 768)
    }

    /// Adds markers to a fresh cluster and returns it with the map
    fn build(
        average_center: bool,
        min_size: usize,
        zoom: u32,
        max_zoom: u32,
        markers: &[Marker],
    ) -> (Cluster, HeadlessMap) {
        let mut host = map(zoom);
        let styles = default_styles("images/m", "png");
        let mut cluster = Cluster::new(ClusterKey(7), min_size, 60, average_center);
        let mut ctx = ClusterContext {
            host: &mut host,
            max_zoom,
            calculator: &DigitCountCalculator,
            styles: &styles,
        };
        for m in markers {
            assert!(cluster.add_marker(*m, &mut ctx));
        }
        (cluster, host)
    }

    fn line_markers() -> Vec<Marker> {
        vec![
            Marker::new(1, LatLng::new(0.0, 0.0)),
            Marker::new(2, LatLng::new(0.0, 2.0)),
            Marker::new(3, LatLng::new(0.0, 4.0)),
        ]
    }

    #[test]
    fn test_average_center() {
        let (cluster, _) = build(true, 2, 5, 21, &line_markers());
        let center = cluster.center().unwrap();
        assert!((center.lat - 0.0).abs() < 1e-12);
        assert!((center.lng - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_position_center() {
        let (cluster, _) = build(false, 2, 5, 21, &line_markers());
        assert_eq!(cluster.center(), Some(LatLng::new(0.0, 0.0)));
    }

    #[test]
    fn test_bounds_follow_center() {
        let (avg, _) = build(true, 2, 5, 21, &line_markers());
        let (first, _) = build(false, 2, 5, 21, &line_markers());

        let avg_bounds = avg.expanded_bounds().unwrap();
        let first_bounds = first.expanded_bounds().unwrap();
        assert!(avg_bounds.contains(&LatLng::new(0.0, 2.0)));
        assert!(first_bounds.contains(&LatLng::new(0.0, 0.0)));
        assert!((avg_bounds.center().lng - 2.0).abs() < 1e-9);
        assert!((first_bounds.center().lng - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_marker_rejected() {
        let marker = Marker::new(1, LatLng::new(1.0, 1.0));
        let twin = Marker::new(2, LatLng::new(1.0, 1.0));
        let (mut cluster, mut host) = build(true, 5, 5, 21, &[marker]);
        let styles = default_styles("images/m", "png");
        let mut ctx = ClusterContext {
            host: &mut host,
            max_zoom: 21,
            calculator: &DigitCountCalculator,
            styles: &styles,
        };

        assert!(!cluster.add_marker(marker, &mut ctx));
        assert_eq!(cluster.size(), 1);

        // same coordinates, different identity
        assert!(cluster.add_marker(twin, &mut ctx));
        assert_eq!(cluster.size(), 2);
    }

    #[test]
    fn test_threshold_crossing_hides_members() {
        let markers = vec![
            Marker::new(1, LatLng::new(0.0, 2.0)),
            Marker::new(2, LatLng::new(0.0, 2.001)),
            Marker::new(3, LatLng::new(0.0, 2.002)),
        ];

        let (below, host) = build(false, 3, 10, 21, &markers[..2]);
        assert!(host.is_attached(markers[0].id));
        assert!(host.is_attached(markers[1].id));
        assert!(host.visible_icon(below.key()).is_none());
        assert!(below.icon().is_none());

        let (at, host) = build(false, 3, 10, 21, &markers);
        for m in &markers {
            assert!(!host.is_attached(m.id));
        }
        let icon = host.visible_icon(at.key()).unwrap();
        assert_eq!(icon.sums.text, "3");
        assert_eq!(icon.sums.index, 1);
        assert_eq!(icon.style.as_ref().unwrap().url, "images/m1.png");
        assert_eq!(host.visible_icons().count(), 1);
    }

    #[test]
    fn test_above_max_zoom_shows_members() {
        let markers = vec![
            Marker::new(1, LatLng::new(0.0, 2.0)),
            Marker::new(2, LatLng::new(0.0, 2.00001)),
        ];
        let (cluster, host) = build(false, 2, 13, 12, &markers);
        assert!(host.is_attached(markers[0].id));
        assert!(host.is_attached(markers[1].id));
        assert!(host.visible_icon(cluster.key()).is_none());
        assert!(cluster.icon().is_none());
    }

    #[test]
    fn test_update_visibility_after_zoom_out() {
        let markers = vec![
            Marker::new(1, LatLng::new(0.0, 2.0)),
            Marker::new(2, LatLng::new(0.0, 2.00001)),
        ];
        let (mut cluster, mut host) = build(false, 2, 13, 12, &markers);
        host.set_zoom(12);
        let styles = default_styles("images/m", "png");
        let mut ctx = ClusterContext {
            host: &mut host,
            max_zoom: 12,
            calculator: &DigitCountCalculator,
            styles: &styles,
        };
        cluster.update_visibility(&mut ctx);

        assert!(host.visible_icon(cluster.key()).is_some());
        assert!(!host.is_attached(markers[0].id));
        assert!(!host.is_attached(markers[1].id));
    }

    #[test]
    fn test_icon_position_is_centered() {
        let markers = vec![
            Marker::new(1, LatLng::new(0.0, 2.0)),
            Marker::new(2, LatLng::new(0.0, 2.0)),
        ];
        let (cluster, host) = build(false, 2, 10, 21, &markers);
        let icon = host.visible_icon(cluster.key()).unwrap();
        // view is centered on the cluster, default tier is 53px wide
        assert!((icon.position.x - (512.0 - 26.0)).abs() < 1e-6);
        assert!((icon.position.y - (384.0 - 26.0)).abs() < 1e-6);
    }

    #[test]
    fn test_get_bounds_uses_members() {
        let (cluster, _) = build(false, 2, 5, 21, &line_markers());
        let bounds = cluster.get_bounds().unwrap();
        assert_eq!(bounds.sw, LatLng::new(0.0, 0.0));
        assert_eq!(bounds.ne, LatLng::new(0.0, 4.0));
    }

    #[test]
    fn test_is_marker_in_cluster_bounds() {
        let (cluster, _) = build(false, 2, 10, 21, &[Marker::new(1, LatLng::new(0.0, 2.0))]);
        assert!(cluster.is_marker_in_cluster_bounds(&Marker::new(2, LatLng::new(0.0, 2.05))));
        assert!(!cluster.is_marker_in_cluster_bounds(&Marker::new(3, LatLng::new(0.0, 2.5))));

        let empty = Cluster::new(ClusterKey(1), 2, 60, false);
        assert!(!empty.is_marker_in_cluster_bounds(&Marker::new(2, LatLng::new(0.0, 2.0))));
        assert!(empty.get_bounds().is_none());
    }

    #[test]
    fn test_remove_releases_members() {
        let markers = vec![
            Marker::new(1, LatLng::new(0.0, 2.0)),
            Marker::new(2, LatLng::new(0.0, 2.0)),
        ];
        let (mut cluster, mut host) = build(false, 2, 10, 21, &markers);
        assert_eq!(host.icon_count(), 1);

        cluster.remove(&mut host);
        assert_eq!(cluster.size(), 0);
        assert_eq!(host.icon_count(), 0);
        assert!(cluster.icon().is_none());
        // attachment is the owner's business
        host.set_marker_attached(markers[0].id, true);
        assert!(host.is_attached(markers[0].id));
    }
}
