// End-to-end scenarios for drawing, registry, grouping and centroids.

use quotemap::{
    centroid_of, group_by_location, point_in_polygon, records_in_region, DrawingSession,
    GeoPoint, GestureOutcome, QuotationSite, Region, RegionRegistry,
};

fn pt(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

fn site(id: &str, lat: f64, lng: f64) -> QuotationSite {
    QuotationSite::new(id, "submitted", pt(lat, lng))
}

/// Run one full gesture and hand any finished region to the registry.
fn drag(session: &mut DrawingSession, registry: &mut RegionRegistry, from: GeoPoint, to: Option<GeoPoint>) {
    session.enter_drawing_mode().unwrap();
    session.on_pointer_down(from).unwrap();
    if let Some(to) = to {
        session.on_pointer_move(to).unwrap();
    }
    if let GestureOutcome::Completed(region) = session.on_pointer_up().unwrap() {
        registry.add_region(region).unwrap();
    }
}

#[test]
fn drag_over_a_record_makes_it_visible() {
    let records = vec![site("q1", 51.505, -0.125)];
    let mut session = DrawingSession::new();
    let mut registry = RegionRegistry::new();

    drag(&mut session, &mut registry, pt(51.50, -0.13), Some(pt(51.51, -0.12)));

    assert_eq!(registry.len(), 1);
    let visible = registry.visible_records(&records);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "q1");
}

#[test]
fn live_preview_tracks_candidate() {
    let records = vec![site("near", 51.505, -0.125), site("far", 51.55, -0.05)];
    let mut session = DrawingSession::new();
    session.enter_drawing_mode().unwrap();
    session.on_pointer_down(pt(51.50, -0.13)).unwrap();

    let small = session.on_pointer_move(pt(51.51, -0.12)).unwrap().cloned().unwrap();
    let ids: Vec<&str> = records_in_region(&small, &records).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["near"]);

    let large = session.on_pointer_move(pt(51.60, -0.01)).unwrap().cloned().unwrap();
    assert_eq!(records_in_region(&large, &records).len(), 2);
}

#[test]
fn shared_location_is_one_cluster_of_two() {
    let records = vec![site("a", 53.48, -2.24), site("b", 53.48, -2.24)];
    let clusters = group_by_location(&records);
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].count(), 2);
}

#[test]
fn click_without_movement_adds_no_region() {
    let mut session = DrawingSession::new();
    let mut registry = RegionRegistry::new();
    drag(&mut session, &mut registry, pt(51.50, -0.13), Some(pt(51.51, -0.12)));
    assert_eq!(registry.len(), 1);

    drag(&mut session, &mut registry, pt(52.0, -1.0), None);
    assert_eq!(registry.len(), 1);

    // Moving back onto the anchor is a no-op, so this is still a click.
    session.enter_drawing_mode().unwrap();
    session.on_pointer_down(pt(52.0, -1.0)).unwrap();
    assert!(session.on_pointer_move(pt(52.0, -1.0)).unwrap().is_none());
    assert_eq!(session.on_pointer_up().unwrap(), GestureOutcome::Discarded);
    assert_eq!(registry.len(), 1);
}

#[test]
fn centroid_of_unit_square() {
    let r = Region::new(vec![pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)]).unwrap();
    assert_eq!(centroid_of(&r), pt(1.0, 1.0));
}

#[test]
fn square_containment() {
    let r = Region::new(vec![pt(0.0, 0.0), pt(0.0, 10.0), pt(10.0, 10.0), pt(10.0, 0.0)]).unwrap();
    assert!(point_in_polygon(pt(5.0, 5.0), &r));
    assert!(!point_in_polygon(pt(15.0, 5.0), &r));
}

#[test]
fn multiple_regions_union() {
    let records = vec![site("west", 51.505, -0.125), site("north", 53.48, -2.24), site("none", 50.0, 0.0)];
    let mut session = DrawingSession::new();
    let mut registry = RegionRegistry::new();

    drag(&mut session, &mut registry, pt(51.50, -0.13), Some(pt(51.51, -0.12)));
    drag(&mut session, &mut registry, pt(53.40, -2.30), Some(pt(53.50, -2.20)));

    let ids: Vec<&str> = registry.visible_records(&records).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["west", "north"]);

    registry.clear_all();
    assert!(registry.visible_records(&records).is_empty());
}
