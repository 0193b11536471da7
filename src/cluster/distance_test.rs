#[cfg(test)]
mod tests {
    use crate::cluster::LatLng;
    use crate::cluster::distance::{DEGREE_RAD, EARTH_R, MAX_DISTANCE_KM, haversine_distance};
    use quickcheck::quickcheck;

    #[test]
    fn test_haversine_distance() {
        let p1 = LatLng::new(59.955982, 30.244759);
        let p2 = LatLng::new(59.955975, 30.24472);
        let expected = 0.0023064907653812116;
        let actual1 = haversine_distance(Some(&p1), Some(&p2));
        let actual2 = haversine_distance(Some(&p2), Some(&p1));
        assert!((actual1 - expected).abs() < 1e-6);
        assert!((actual1 - actual2).abs() < 1e-12);
        assert_eq!(haversine_distance(Some(&p1), Some(&p1)), 0.0);
    }

    #[test]
    fn test_one_degree_on_equator() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 1.0);
        let d = haversine_distance(Some(&a), Some(&b));
        assert!((d - EARTH_R * DEGREE_RAD).abs() < 1e-9);
    }

    #[test]
    fn test_missing_point_is_zero() {
        let p = LatLng::new(40.7128, -74.0060);
        assert_eq!(haversine_distance(None, Some(&p)), 0.0);
        assert_eq!(haversine_distance(Some(&p), None), 0.0);
        assert_eq!(haversine_distance(None, None), 0.0);
    }

    #[test]
    fn test_sentinel_exceeds_antipodal_distance() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 180.0);
        assert!(haversine_distance(Some(&a), Some(&b)) < MAX_DISTANCE_KM);
    }

    #[test]
    fn prop_distance_to_self_is_zero() {
        fn prop(lat: i16, lng: i16) -> bool {
            let p = LatLng::new(f64::from(lat % 90), f64::from(lng % 180));
            haversine_distance(Some(&p), Some(&p)) == 0.0
        }
        quickcheck(prop as fn(i16, i16) -> bool);
    }
}
