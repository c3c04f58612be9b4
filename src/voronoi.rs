//! Dual/Voronoi layer (§4.5): lazily computed circumcenters stored as
//! *virtual* vertices at the left-face dual slot of every bounding primal
//! edge, invalidated by any primal mutation.

use std::collections::HashSet;

use crate::geometry::Point2f;
use crate::ids::{EdgeId, VertexId, INVALID_VERTEX};
use crate::ids::QuadEdgeIndex;
use crate::subdivision::{edge_at, Subdivision};
use crate::vertex::VertexKind;

impl Subdivision {
  pub fn is_geometry_valid(&self) -> bool {
    self.valid_geometry
  }

  /// Frees every virtual-dual vertex and resets all dual endpoint slots.
  /// Called implicitly at the start of any primal mutation; cheap when the
  /// geometry is already invalid.
  pub(crate) fn clear_voronoi(&mut self) {
    if self.valid_geometry {
      for i in 0..self.quad_edges.capacity() {
        let qe = QuadEdgeIndex::new(i as u32);
        if !self.quad_edges.is_live(qe) {
          continue;
        }
        for rot in [1u32, 3u32] {
          let e = edge_at(qe, rot);
          let v = self.quad_edges.face_vertex(e);
          if v.is_valid() && matches!(self.vertices.get(v).kind, VertexKind::VirtualDual) {
            self.vertices.free(v);
          }
          self.quad_edges.set_face_vertex(e, INVALID_VERTEX);
        }
      }
    }
    self.valid_geometry = false;
  }

  /// Computes the circumcenter of every primal triangle and stores it as a
  /// virtual-dual vertex, on demand.
  pub fn calc_voronoi(&mut self) {
    if self.valid_geometry {
      return;
    }
    self.clear_voronoi();

    let mut visited: HashSet<EdgeId> = HashSet::new();
    for e0 in self.get_leading_edge_list() {
      if visited.contains(&e0) {
        continue;
      }
      let e1 = self.quad_edges.lnext(e0);
      let e2 = self.quad_edges.lnext(e1);
      visited.insert(e0);
      visited.insert(e1);
      visited.insert(e2);

      let a = self.quad_edges.org(e0);
      let b = self.quad_edges.org(e1);
      let c = self.quad_edges.org(e2);
      if a == VertexId::PLACEHOLDER || b == VertexId::PLACEHOLDER || c == VertexId::PLACEHOLDER {
        continue;
      }

      let center = circumcenter(self.vertex_point(a), self.vertex_point(b), self.vertex_point(c));
      let cv = self.vertices.alloc(center, VertexKind::VirtualDual);
      for e in [e0, e1, e2] {
        let slot = e.rotate(-1);
        self.quad_edges.set_face_vertex(slot, cv);
      }
    }

    self.valid_geometry = true;
  }

  /// The Voronoi facets for `ids` (or every real vertex, if `None`), each
  /// as `(vertex, site position, closed facet polygon)`. Triggers
  /// [`Subdivision::calc_voronoi`] if the cache is stale.
  pub fn get_voronoi_facet_list(&mut self, ids: Option<&[VertexId]>) -> Vec<(VertexId, Point2f, Vec<Point2f>)> {
    if !self.valid_geometry {
      self.calc_voronoi();
    }
    let targets: Vec<VertexId> = match ids {
      Some(list) => list.to_vec(),
      None => self.vertices.iter_live().filter(|v| self.is_vertex_real(*v)).collect(),
    };
    targets
      .into_iter()
      .map(|v| (v, self.vertex_point(v), self.voronoi_facet(v)))
      .collect()
  }

  fn voronoi_facet(&self, v: VertexId) -> Vec<Point2f> {
    let start = self.vertices.get(v).first_edge;
    if !start.is_valid() {
      return Vec::new();
    }
    let mut pts = Vec::new();
    let mut e = start;
    let max_iters = self.quad_edges.capacity() * 4 + 8;
    for _ in 0..max_iters {
      let dual_v = self.quad_edges.face_vertex(e.rotate(-1));
      if dual_v.is_valid() {
        pts.push(self.vertex_point(dual_v));
      }
      e = self.quad_edges.rnext(e);
      if e == start {
        break;
      }
    }
    pts
  }
}

/// Standard circumcenter formula; falls back to the centroid when the
/// divisor underflows (near-collinear triangle).
fn circumcenter(a: Point2f, b: Point2f, c: Point2f) -> Point2f {
  let (ax, ay) = (a.x as f64, a.y as f64);
  let (bx, by) = (b.x as f64, b.y as f64);
  let (cx, cy) = (c.x as f64, c.y as f64);

  let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
  if d.abs() < 1e-9 {
    return Point2f::new(((ax + bx + cx) / 3.0) as f32, ((ay + by + cy) / 3.0) as f32);
  }

  let a2 = ax * ax + ay * ay;
  let b2 = bx * bx + by * by;
  let c2 = cx * cx + cy * cy;

  let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
  let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
  Point2f::new(ux as f32, uy as f32)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Rect;

  #[test]
  fn circumcenter_of_right_triangle_is_hypotenuse_midpoint() {
    let a = Point2f::new(0.0, 0.0);
    let b = Point2f::new(4.0, 0.0);
    let c = Point2f::new(0.0, 4.0);
    let center = circumcenter(a, b, c);
    assert!((center.x - 2.0).abs() < 1e-4);
    assert!((center.y - 2.0).abs() < 1e-4);
  }

  #[test]
  fn voronoi_of_square_has_four_facets() {
    let mut sub = Subdivision::new();
    sub.init(Rect::new(0, 0, 100, 100)).unwrap();
    let ids = sub
      .insert_many([
        Point2f::new(25.0, 25.0),
        Point2f::new(75.0, 25.0),
        Point2f::new(75.0, 75.0),
        Point2f::new(25.0, 75.0),
      ])
      .unwrap();

    let facets = sub.get_voronoi_facet_list(Some(&ids));
    assert_eq!(facets.len(), 4);
    assert!(sub.is_geometry_valid());
    for (_, _, polygon) in &facets {
      assert!(!polygon.is_empty());
    }
  }

  #[test]
  fn any_primal_mutation_invalidates_geometry() {
    let mut sub = Subdivision::new();
    sub.init(Rect::new(0, 0, 100, 100)).unwrap();
    sub.insert(Point2f::new(50.0, 50.0)).unwrap();
    sub.calc_voronoi();
    assert!(sub.is_geometry_valid());
    sub.insert(Point2f::new(10.0, 10.0)).unwrap();
    assert!(!sub.is_geometry_valid());
  }
}
