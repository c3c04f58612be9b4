//! Incremental Delaunay insertion (§4.4): locate, stellate the containing
//! polygon around the new vertex, then restore the Delaunay property with
//! Lawson edge-flips.

use claim::debug_assert_ok;

use crate::error::{Error, PtLoc};
use crate::geometry::Point2f;
use crate::ids::{EdgeId, NavStep, VertexId};
use crate::predicates::in_circle;
use crate::subdivision::Subdivision;
use crate::vertex::VertexKind;

impl Subdivision {
  /// Inserts `p`, returning its vertex id. A point that coincides with an
  /// existing vertex returns that vertex's id unchanged and performs no
  /// mutation.
  pub fn insert(&mut self, p: Point2f) -> Result<VertexId, Error> {
    if self.is_empty() {
      return Err(Error::NotInitialised);
    }
    let rect = self.rect.unwrap();
    if !rect.contains(p) {
      return Err(Error::OutOfRange);
    }

    let loc = self.locate(p);
    let base_edge = match loc.kind {
      PtLoc::Error => return Err(Error::LocateFailed),
      PtLoc::OutsideRect => return Err(Error::OutOfRange),
      PtLoc::Vertex => return Ok(loc.vertex),
      PtLoc::OnEdge => {
        let deleted_edge = loc.edge;
        let org = self.quad_edges.org(deleted_edge);
        let dst = self.quad_edges.dst(deleted_edge);
        let org_fallback = self.quad_edges.oprev(deleted_edge);
        let dst_fallback = self.quad_edges.oprev(deleted_edge.sym());
        self.quad_edges.delete_edge(deleted_edge);
        if self.vertices.get(org).first_edge == deleted_edge {
          self.vertices.get_mut(org).first_edge = org_fallback;
        }
        if self.vertices.get(dst).first_edge == deleted_edge.sym() {
          self.vertices.get_mut(dst).first_edge = dst_fallback;
        }
        org_fallback
      }
      PtLoc::Inside => loc.edge,
    };

    self.clear_voronoi();
    let v = self.stellate_and_restore_delaunay(base_edge, p);
    self.recent_edge = self.vertices.get(v).first_edge;
    debug_assert_ok!(self.check_invariants());
    Ok(v)
  }

  /// Inserts every point in `points` in order. Stops and propagates the
  /// first error; points already inserted remain in the triangulation.
  pub fn insert_many<I>(&mut self, points: I) -> Result<Vec<VertexId>, Error>
  where
    I: IntoIterator<Item = Point2f>,
  {
    let mut ids = Vec::new();
    for p in points {
      ids.push(self.insert(p)?);
    }
    Ok(ids)
  }

  fn stellate_and_restore_delaunay(&mut self, mut curr_edge: EdgeId, p: Point2f) -> VertexId {
    let curr_point = self.vertices.alloc(p, VertexKind::Real);
    let first_point = self.quad_edges.org(curr_edge);

    let mut base_edge = self.quad_edges.make_edge();
    self.quad_edges.set_endpoints(base_edge, first_point, curr_point);
    self.quad_edges.splice(base_edge, curr_edge);
    self.vertices.get_mut(curr_point).first_edge = base_edge.sym();

    loop {
      base_edge = self.quad_edges.connect(curr_edge, base_edge.sym());
      curr_edge = self.quad_edges.oprev(base_edge);
      if self.quad_edges.dst(curr_edge) == first_point {
        break;
      }
    }

    curr_edge = self.quad_edges.oprev(base_edge);

    let max_edges = self.quad_edges.capacity() * 4 + 64;
    for _ in 0..max_edges {
      let temp_dst = self.quad_edges.dst(curr_edge);
      let curr_org = self.quad_edges.org(curr_edge);
      let curr_dst = self.quad_edges.dst(curr_edge);

      let temp_dst_pt = self.vertex_point(temp_dst);
      let right_of = self.is_right_of_edge(temp_dst_pt, curr_edge);

      let onext_dst = self.quad_edges.dst(self.quad_edges.onext(curr_edge));
      let illegal = in_circle(
        self.vertex_point(curr_org),
        self.vertex_point(onext_dst),
        self.vertex_point(curr_dst),
        self.vertex_point(curr_point),
      ) > 0;

      if right_of > 0 && illegal {
        self.swap_edge(curr_edge);
        curr_edge = self.quad_edges.oprev(curr_edge);
      } else if curr_org == first_point {
        break;
      } else {
        let nxt = self.quad_edges.onext(curr_edge);
        curr_edge = self.quad_edges.get_edge(nxt, NavStep::PrevAroundLeft);
      }
    }

    curr_point
  }

  /// Rotates `e` and repairs any vertex `first_edge` hint that pointed at
  /// `e` or `sym(e)` before the rotation changed its endpoints.
  pub(crate) fn swap_edge(&mut self, e: EdgeId) {
    let v_org = self.quad_edges.org(e);
    let v_dst = self.quad_edges.dst(e);
    let fallback_org = self.quad_edges.oprev(e);
    let fallback_dst = self.quad_edges.oprev(e.sym());
    self.quad_edges.swap(e);
    if self.vertices.get(v_org).first_edge == e {
      self.vertices.get_mut(v_org).first_edge = fallback_org;
    }
    if self.vertices.get(v_dst).first_edge == e.sym() {
      self.vertices.get_mut(v_dst).first_edge = fallback_dst;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Rect;

  fn init_square() -> Subdivision {
    let mut sub = Subdivision::new();
    sub.init(Rect::new(0, 0, 100, 100)).unwrap();
    sub
  }

  #[test]
  fn single_point_insert_produces_three_triangles_sharing_it() {
    let mut sub = init_square();
    let v = sub.insert(Point2f::new(50.0, 50.0)).unwrap();
    let loc = sub.locate(Point2f::new(50.0, 50.0));
    assert_eq!(loc.kind, PtLoc::Vertex);
    assert_eq!(loc.vertex, v);

    let triangles = sub.get_triangle_list();
    assert_eq!(triangles.len(), 3);
    for (a, b, c) in triangles {
      assert!(a == v || b == v || c == v);
    }
  }

  #[test]
  fn duplicate_insert_returns_same_vertex_and_does_not_grow() {
    let mut sub = init_square();
    let v1 = sub.insert(Point2f::new(20.0, 20.0)).unwrap();
    let before = sub.get_num_vertices();
    let v2 = sub.insert(Point2f::new(20.0, 20.0)).unwrap();
    assert_eq!(v1, v2);
    assert_eq!(sub.get_num_vertices(), before);
  }

  #[test]
  fn out_of_range_insert_fails_and_leaves_state_unchanged() {
    let mut sub = init_square();
    let before = sub.get_num_vertices();
    let err = sub.insert(Point2f::new(-1.0, -1.0)).unwrap_err();
    assert_eq!(err, Error::OutOfRange);
    assert_eq!(sub.get_num_vertices(), before);
  }

  #[test]
  fn on_edge_insert_splits_edge_and_stays_delaunay_legal() {
    let mut sub = init_square();
    sub.insert(Point2f::new(10.0, 10.0)).unwrap();
    sub.insert(Point2f::new(30.0, 10.0)).unwrap();
    let loc = sub.locate(Point2f::new(20.0, 10.0));
    assert_eq!(loc.kind, PtLoc::OnEdge);
    sub.insert(Point2f::new(20.0, 10.0)).unwrap();
    assert!(sub.check_invariants().is_ok());
  }

  #[test]
  fn three_collinear_points_do_not_fail() {
    let mut sub = init_square();
    sub.insert(Point2f::new(10.0, 50.0)).unwrap();
    sub.insert(Point2f::new(50.0, 50.0)).unwrap();
    sub.insert(Point2f::new(90.0, 50.0)).unwrap();
    assert!(sub.check_invariants().is_ok());
    assert_eq!(sub.get_triangle_list().len(), 5);
  }

  #[test]
  fn four_points_stay_delaunay_legal_after_flips() {
    let mut sub = init_square();
    sub.insert(Point2f::new(25.0, 25.0)).unwrap();
    sub.insert(Point2f::new(75.0, 25.0)).unwrap();
    sub.insert(Point2f::new(75.0, 75.0)).unwrap();
    sub.insert(Point2f::new(25.0, 75.0)).unwrap();
    assert!(sub.check_invariants().is_ok());
  }
}
