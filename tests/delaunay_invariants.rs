use proptest::prelude::*;
use quadsubdiv::{PtLoc, Rect, Subdivision, Point2f};

fn init_unit_square() -> Subdivision {
  let mut sub = Subdivision::new();
  sub.init(Rect::new(0, 0, 1000, 1000)).unwrap();
  sub
}

fn arb_point() -> impl Strategy<Value = Point2f> {
  (1i32..999, 1i32..999).prop_map(|(x, y)| Point2f::new(x as f32, y as f32))
}

proptest! {
  #[test]
  fn insertion_stays_delaunay_legal(points in prop::collection::vec(arb_point(), 1..40)) {
    let mut sub = init_unit_square();
    for p in points {
      prop_assert!(sub.insert(p).is_ok());
    }
    prop_assert!(sub.check_invariants().is_ok());
  }

  #[test]
  fn locating_every_inserted_point_reports_vertex(points in prop::collection::vec(arb_point(), 1..20)) {
    let mut sub = init_unit_square();
    let mut ids = Vec::new();
    for p in points {
      ids.push((p, sub.insert(p).unwrap()));
    }
    for (p, v) in ids {
      let loc = sub.locate(p);
      prop_assert_eq!(loc.kind, PtLoc::Vertex);
      prop_assert_eq!(loc.vertex, v);
    }
  }

  #[test]
  fn re_inserting_any_existing_vertex_is_a_no_op(points in prop::collection::vec(arb_point(), 1..20)) {
    let mut sub = init_unit_square();
    let mut ids = Vec::new();
    for p in points {
      ids.push((p, sub.insert(p).unwrap()));
    }
    let before = sub.get_num_vertices();
    for (p, v) in ids {
      prop_assert_eq!(sub.insert(p).unwrap(), v);
    }
    prop_assert_eq!(sub.get_num_vertices(), before);
  }
}

#[test]
fn voronoi_facets_cover_every_real_vertex() {
  let mut sub = init_unit_square();
  let ids = sub
    .insert_many([
      Point2f::new(100.0, 100.0),
      Point2f::new(900.0, 100.0),
      Point2f::new(900.0, 900.0),
      Point2f::new(100.0, 900.0),
      Point2f::new(500.0, 500.0),
    ])
    .unwrap();
  let facets = sub.get_voronoi_facet_list(None);
  assert_eq!(facets.len(), ids.len());
  for (_, _, polygon) in &facets {
    assert!(polygon.len() >= 3);
  }
}
