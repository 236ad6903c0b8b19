use crate::error::EngineError;
use crate::types::{GeoPoint, Region};

/// Ray-casting point-in-polygon test.
///
/// Casts a ray along the latitude axis from `point` and toggles on every ring
/// edge it crosses; edge `i` joins vertex `i` and vertex `(i + 1) mod n`.
/// Points exactly on an edge or vertex get whatever the floating-point
/// crossing arithmetic yields; no boundary policy is applied.
#[inline]
pub fn point_in_polygon(point: GeoPoint, region: &Region) -> bool {
    ray_cast(point, region.points())
}

/// Ray-casting test against a raw vertex ring.
///
/// Fails with [`EngineError::DegenerateRegion`] when the ring has fewer than
/// three vertices.
pub fn point_in_ring(point: GeoPoint, ring: &[GeoPoint]) -> Result<bool, EngineError> {
    if ring.len() < 3 {
        return Err(EngineError::DegenerateRegion { distinct: ring.len() });
    }
    Ok(ray_cast(point, ring))
}

/// Union test: true if `point` lies inside any of `regions`.
pub fn point_in_any_region<'r>(point: GeoPoint, regions: impl IntoIterator<Item = &'r Region>) -> bool {
    regions.into_iter().any(|region| point_in_polygon(point, region))
}

fn ray_cast(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    let (x, y) = (point.lat(), point.lng());

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lat(), ring[i].lng());
        let (xj, yj) = (ring[j].lat(), ring[j].lng());

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint { GeoPoint::new(lat, lng).unwrap() }

    fn square() -> Region {
        Region::new(vec![pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0)]).unwrap()
    }

    #[test]
    fn inside_and_outside_square() {
        assert!(point_in_polygon(pt(5.0, 5.0), &square()));
        assert!(!point_in_polygon(pt(15.0, 5.0), &square()));
        assert!(!point_in_polygon(pt(5.0, -1.0), &square()));
    }

    #[test]
    fn explicit_closing_vertex_changes_nothing() {
        let closed = Region::new(vec![
            pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0), pt(0.0, 0.0),
        ]).unwrap();
        for p in [pt(5.0, 5.0), pt(15.0, 5.0), pt(9.9, 0.1), pt(-1.0, 3.0)] {
            assert_eq!(point_in_polygon(p, &closed), point_in_polygon(p, &square()));
        }
    }

    #[test]
    fn triangle_odd_vertex_count() {
        let tri = Region::new(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0)]).unwrap();
        assert!(point_in_polygon(pt(2.0, 2.0), &tri));
        assert!(!point_in_polygon(pt(6.0, 6.0), &tri));
    }

    #[test]
    fn concave_polygon_notch() {
        // U shape open towards high latitudes: notch spans lat 4..10, lng 4..6.
        let u = Region::new(vec![
            pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 6.0),
            pt(4.0, 6.0), pt(4.0, 4.0), pt(10.0, 4.0), pt(10.0, 0.0),
        ]).unwrap();
        assert!(point_in_polygon(pt(2.0, 5.0), &u));
        assert!(!point_in_polygon(pt(7.0, 5.0), &u));
        assert!(point_in_polygon(pt(7.0, 2.0), &u));
    }

    #[test]
    fn ring_requires_three_vertices() {
        assert_eq!(
            point_in_ring(pt(0.0, 0.0), &[pt(0.0, 0.0), pt(1.0, 1.0)]),
            Err(EngineError::DegenerateRegion { distinct: 2 })
        );
        assert_eq!(point_in_ring(pt(5.0, 5.0), square().points()), Ok(true));
    }

    #[test]
    fn union_semantics() {
        let a = square();
        let b = Region::new(vec![pt(20.0, 20.0), pt(20.0, 30.0), pt(30.0, 30.0), pt(30.0, 20.0)]).unwrap();
        let regions = [a, b];
        assert!(point_in_any_region(pt(5.0, 5.0), &regions));
        assert!(point_in_any_region(pt(25.0, 25.0), &regions));
        assert!(!point_in_any_region(pt(15.0, 15.0), &regions));
        assert!(!point_in_any_region(pt(5.0, 5.0), &[] as &[Region]));
    }
}
