use serde::{Deserialize, Serialize};

/// A `(latitude, longitude)` pair in degrees.
///
/// Serialized as a two-element array so it can be handed to Leaflet as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-90.0..=90.0).contains(&self.0)
            && (-180.0..=180.0).contains(&self.1)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        LatLng(lat, lng)
    }
}

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl BoundingBox {
    /// True when all points coincide; Leaflet needs padding or a fixed zoom then.
    pub fn is_degenerate(&self) -> bool {
        self.south_west == self.north_east
    }
}

/// Tightest box around `points`, or `None` for an empty list.
pub fn bounds_from_points(points: &[LatLng]) -> Option<BoundingBox> {
    let (first, rest) = points.split_first()?;
    let mut south_west = *first;
    let mut north_east = *first;

    for point in rest {
        south_west.0 = south_west.0.min(point.0);
        south_west.1 = south_west.1.min(point.1);
        north_east.0 = north_east.0.max(point.0);
        north_east.1 = north_east.1.max(point.1);
    }

    Some(BoundingBox {
        south_west,
        north_east,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(bounds: &BoundingBox, point: &LatLng) -> bool {
        (bounds.south_west.lat()..=bounds.north_east.lat()).contains(&point.lat())
            && (bounds.south_west.lng()..=bounds.north_east.lng()).contains(&point.lng())
    }

    #[test]
    fn empty_list_has_no_bounds() {
        assert_eq!(bounds_from_points(&[]), None);
    }

    #[test]
    fn airport_to_umeda_bounds() {
        let points = [LatLng(34.4347, 135.2327), LatLng(34.7025, 135.4959)];
        let bounds = bounds_from_points(&points).unwrap();
        assert_eq!(bounds.south_west, LatLng(34.4347, 135.2327));
        assert_eq!(bounds.north_east, LatLng(34.7025, 135.4959));
    }

    #[test]
    fn single_point_is_degenerate() {
        let bounds = bounds_from_points(&[LatLng(35.0116, 135.7681)]).unwrap();
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.south_west, LatLng(35.0116, 135.7681));
    }

    #[test]
    fn bounds_contain_every_point_and_are_tight() {
        // Valencia, Haneda, Shinjuku: crosses the prime meridian.
        let points = [
            LatLng(35.6909, 139.7003),
            LatLng(35.5494, 139.7798),
            LatLng(39.4699, -0.3763),
        ];
        let bounds = bounds_from_points(&points).unwrap();

        for p in &points {
            assert!(inside(&bounds, p), "{:?} outside {:?}", p, bounds);
        }

        // Every edge is touched by at least one input point.
        assert!(points.iter().any(|p| p.lat() == bounds.south_west.lat()));
        assert!(points.iter().any(|p| p.lng() == bounds.south_west.lng()));
        assert!(points.iter().any(|p| p.lat() == bounds.north_east.lat()));
        assert!(points.iter().any(|p| p.lng() == bounds.north_east.lng()));
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = [LatLng(1.0, 5.0), LatLng(-3.0, 2.0), LatLng(4.0, -1.0)];
        let mut b = a;
        b.reverse();
        assert_eq!(bounds_from_points(&a), bounds_from_points(&b));
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(LatLng(34.7, 135.5).is_valid());
        assert!(!LatLng(91.0, 0.0).is_valid());
        assert!(!LatLng(0.0, 181.0).is_valid());
        assert!(!LatLng(f64::NAN, 0.0).is_valid());
    }
}
