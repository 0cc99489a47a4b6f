use serde::Serialize;

use crate::config::MapStrategy;
use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::geo::{bounds_from_points, BoundingBox, LatLng};
use crate::itinerary::{DayRecord, Marker, Region};

/// Fixed view of one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionView {
    pub center: LatLng,
    pub zoom: u8,
}

pub fn region_view(region: Region) -> RegionView {
    let (center, zoom) = match region {
        Region::LongHaul => (LatLng(40.0, 70.0), 3),
        Region::Kansai => (LatLng(34.85, 135.6), 9),
        Region::FujiHakone => (LatLng(35.35, 138.95), 10),
        Region::MetroTokyo => (LatLng(35.66, 139.74), 11),
    };
    RegionView { center, zoom }
}

/// How the renderer should frame the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Framing {
    FitBounds { bounds: BoundingBox },
    CenterZoom { center: LatLng, zoom: u8 },
}

/// Everything the map collaborator needs to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    /// Connected route; present only when the day has two or more points.
    pub path: Option<Vec<LatLng>>,
    pub bounds: Option<BoundingBox>,
    pub region: Option<Region>,
    pub framing: Framing,
}

impl MapView {
    pub fn for_day(day: &DayRecord, strategy: MapStrategy) -> Self {
        let default_center = LatLng::from(DEFAULT_CENTER);

        let (center, zoom) = match strategy {
            MapStrategy::Continuous => (
                day.points.first().copied().unwrap_or(default_center),
                DEFAULT_ZOOM,
            ),
            MapStrategy::RegionScoped => match day.region {
                Some(region) => {
                    let view = region_view(region);
                    (view.center, view.zoom)
                }
                None => (default_center, DEFAULT_ZOOM),
            },
        };

        let bounds = bounds_from_points(&day.points);
        let path = (day.points.len() >= 2).then(|| day.points.clone());

        // A single-point box has no extent to fit; keep center/zoom then.
        let framing = match bounds {
            Some(b) if !b.is_degenerate() => Framing::FitBounds { bounds: b },
            _ => Framing::CenterZoom { center, zoom },
        };

        MapView {
            center,
            zoom,
            markers: day.markers.clone(),
            path,
            bounds,
            region: day.region,
            framing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::tests::day;
    use crate::itinerary::Itinerary;

    #[test]
    fn multi_point_day_draws_route_and_fits_bounds() {
        let d = day(2, 49.0, vec![LatLng(34.4347, 135.2327), LatLng(34.7025, 135.4959)]);
        let view = MapView::for_day(&d, MapStrategy::Continuous);

        assert_eq!(view.path.as_ref().map(|p| p.len()), Some(2));
        assert_eq!(view.center, LatLng(34.4347, 135.2327));
        assert_eq!(view.zoom, DEFAULT_ZOOM);
        match view.framing {
            Framing::FitBounds { bounds } => {
                assert_eq!(bounds.south_west, LatLng(34.4347, 135.2327));
                assert_eq!(bounds.north_east, LatLng(34.7025, 135.4959));
            }
            other => panic!("expected bounds framing, got {:?}", other),
        }
    }

    #[test]
    fn single_point_day_has_markers_only() {
        let d = day(3, 70.0, vec![LatLng(34.7025, 135.4959)]);
        let view = MapView::for_day(&d, MapStrategy::Continuous);

        assert!(view.path.is_none());
        assert_eq!(view.markers.len(), 1);
        assert_eq!(
            view.framing,
            Framing::CenterZoom {
                center: LatLng(34.7025, 135.4959),
                zoom: DEFAULT_ZOOM
            }
        );
    }

    #[test]
    fn empty_day_falls_back_to_default_view() {
        let d = day(1, 0.0, vec![]);
        let view = MapView::for_day(&d, MapStrategy::Continuous);

        assert!(view.bounds.is_none());
        assert!(view.path.is_none());
        assert_eq!(view.center, LatLng::from(DEFAULT_CENTER));
        assert!(matches!(view.framing, Framing::CenterZoom { .. }));
    }

    #[test]
    fn region_scoped_uses_region_table() {
        let mut d = day(6, 41.0, vec![LatLng(35.0116, 135.7681)]);
        d.region = Some(Region::Kansai);
        let view = MapView::for_day(&d, MapStrategy::RegionScoped);

        let kansai = region_view(Region::Kansai);
        assert_eq!(view.center, kansai.center);
        assert_eq!(view.zoom, kansai.zoom);
        assert_eq!(
            view.framing,
            Framing::CenterZoom {
                center: kansai.center,
                zoom: kansai.zoom
            }
        );
    }

    #[test]
    fn bounds_take_precedence_over_region_view() {
        let mut d = day(
            9,
            86.0,
            vec![LatLng(35.0116, 135.7681), LatLng(35.2324, 139.1068)],
        );
        d.region = Some(Region::FujiHakone);
        let view = MapView::for_day(&d, MapStrategy::RegionScoped);

        assert_eq!(view.zoom, region_view(Region::FujiHakone).zoom);
        assert!(matches!(view.framing, Framing::FitBounds { .. }));
    }

    #[test]
    fn region_scoped_without_tag_uses_default() {
        let d = day(4, 41.0, vec![LatLng(34.7025, 135.4959)]);
        let view = MapView::for_day(&d, MapStrategy::RegionScoped);
        assert_eq!(view.center, LatLng::from(DEFAULT_CENTER));
        assert_eq!(view.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn every_builtin_region_center_is_a_valid_coordinate() {
        let itinerary = Itinerary::builtin().unwrap();
        for d in itinerary.days() {
            let view = MapView::for_day(d, MapStrategy::RegionScoped);
            assert!(view.center.is_valid());
        }
    }
}
