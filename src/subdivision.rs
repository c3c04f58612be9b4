//! The top-level [`Subdivision`] type: owns both arenas and exposes the
//! public accessor surface. Insertion, point-location, and Voronoi
//! construction are implemented in sibling modules as further `impl`
//! blocks on this same type.

use std::collections::HashSet;

use crate::error::Error;
use crate::geometry::{Point2f, Rect};
use crate::ids::{EdgeId, NavStep, QuadEdgeIndex, VertexId, INVALID_EDGE};
use crate::quad_edge::QuadEdgeArena;
use crate::vertex::{VertexArena, VertexKind};

/// An incremental Delaunay triangulation with its dual Voronoi diagram.
///
/// A freshly constructed `Subdivision` ([`Subdivision::new`]) is empty; call
/// [`Subdivision::init`] before inserting any points.
#[derive(Debug)]
pub struct Subdivision {
  pub(crate) quad_edges: QuadEdgeArena,
  pub(crate) vertices: VertexArena,
  pub(crate) rect: Option<Rect>,
  pub(crate) recent_edge: EdgeId,
  pub(crate) valid_geometry: bool,
}

impl Default for Subdivision {
  fn default() -> Subdivision {
    Subdivision::new()
  }
}

impl Subdivision {
  pub fn new() -> Subdivision {
    Subdivision {
      quad_edges: QuadEdgeArena::new(),
      vertices: VertexArena::new(),
      rect: None,
      recent_edge: INVALID_EDGE,
      valid_geometry: false,
    }
  }

  /// Largest representable coordinate magnitude, mirroring the reference's
  /// `MAX_VAL()`.
  pub const MAX_VAL: f32 = f32::MAX;
  /// Smallest representable positive difference, mirroring `EPSILON()`.
  pub const EPSILON: f32 = f32::EPSILON;

  pub fn is_empty(&self) -> bool {
    self.rect.is_none()
  }

  pub fn rect(&self) -> Option<Rect> {
    self.rect
  }

  /// Plants the bounding triangle for `rect` and resets both arenas.
  pub fn init(&mut self, rect: Rect) -> Result<(), Error> {
    if !rect.has_positive_area() {
      return Err(Error::InvalidRect);
    }

    self.quad_edges = QuadEdgeArena::new();
    self.vertices = VertexArena::new();
    self.valid_geometry = false;

    let placeholder = self.vertices.alloc(Point2f::new(0.0, 0.0), VertexKind::Placeholder);
    debug_assert_eq!(placeholder, VertexId::PLACEHOLDER);

    let (pa, pb, pc) = super_triangle(rect);
    let va = self.vertices.alloc(pa, VertexKind::BoundaryCorner);
    let vb = self.vertices.alloc(pb, VertexKind::BoundaryCorner);
    let vc = self.vertices.alloc(pc, VertexKind::BoundaryCorner);

    let edge_ab = self.quad_edges.make_edge();
    let edge_bc = self.quad_edges.make_edge();
    let edge_ca = self.quad_edges.make_edge();

    self.quad_edges.set_endpoints(edge_ab, va, vb);
    self.quad_edges.set_endpoints(edge_bc, vb, vc);
    self.quad_edges.set_endpoints(edge_ca, vc, va);

    self.quad_edges.splice(edge_ab, edge_ca.sym());
    self.quad_edges.splice(edge_bc, edge_ab.sym());
    self.quad_edges.splice(edge_ca, edge_bc.sym());

    self.vertices.get_mut(va).first_edge = edge_ab;
    self.vertices.get_mut(vb).first_edge = edge_bc;
    self.vertices.get_mut(vc).first_edge = edge_ca;

    self.rect = Some(rect);
    self.recent_edge = edge_ab;
    Ok(())
  }

  pub fn get_edge(&self, e: EdgeId, nav: NavStep) -> EdgeId {
    debug_assert!(self.quad_edges.is_live(e.quad_edge()));
    self.quad_edges.get_edge(e, nav)
  }

  pub fn edge_org(&self, e: EdgeId) -> VertexId {
    debug_assert!(self.quad_edges.is_live(e.quad_edge()));
    self.quad_edges.org(e)
  }

  pub fn edge_dst(&self, e: EdgeId) -> VertexId {
    debug_assert!(self.quad_edges.is_live(e.quad_edge()));
    self.quad_edges.dst(e)
  }

  pub fn vertex_point(&self, v: VertexId) -> Point2f {
    self.vertices.get(v).position
  }

  pub fn get_vertex(&self, v: VertexId) -> (Point2f, EdgeId) {
    let vertex = self.vertices.get(v);
    (vertex.position, vertex.first_edge)
  }

  pub fn is_vertex_boundary(&self, v: VertexId) -> bool {
    matches!(self.vertices.get(v).kind, VertexKind::BoundaryCorner)
  }

  pub fn is_vertex_real(&self, v: VertexId) -> bool {
    matches!(self.vertices.get(v).kind, VertexKind::Real)
  }

  pub fn get_num_vertices(&self) -> usize {
    self.vertices.len()
  }

  pub fn get_num_quad_edges(&self) -> usize {
    self.quad_edges.num_live()
  }

  /// Every live primal edge as an `(org, dst)` point pair, skipping free
  /// quad-edges and any edge touching the permanent placeholder vertex.
  pub fn get_edge_list(&self) -> Vec<(Point2f, Point2f)> {
    let mut out = Vec::new();
    for i in 0..self.quad_edges.capacity() {
      let qe = QuadEdgeIndex::new(i as u32);
      if !self.quad_edges.is_live(qe) {
        continue;
      }
      let e = edge_at(qe, 0);
      let org = self.quad_edges.org(e);
      let dst = self.quad_edges.dst(e);
      if org == VertexId::PLACEHOLDER || dst == VertexId::PLACEHOLDER {
        continue;
      }
      if !org.is_valid() || !dst.is_valid() {
        continue;
      }
      out.push((self.vertex_point(org), self.vertex_point(dst)));
    }
    out
  }

  /// One representative edge per face (both the bounded triangular faces
  /// and the single unbounded outer face of the bounding triangle),
  /// mirroring the reference's `getLeadingEdgeList`.
  pub fn get_leading_edge_list(&self) -> Vec<EdgeId> {
    let mut visited = HashSet::new();
    let mut leading = Vec::new();
    for i in 0..self.quad_edges.capacity() {
      let qe = QuadEdgeIndex::new(i as u32);
      if !self.quad_edges.is_live(qe) {
        continue;
      }
      for rot in [0u32, 2u32] {
        let e0 = edge_at(qe, rot);
        if visited.contains(&e0) {
          continue;
        }
        visited.insert(e0);
        let e1 = self.quad_edges.lnext(e0);
        visited.insert(e1);
        let e2 = self.quad_edges.lnext(e1);
        visited.insert(e2);
        leading.push(e0);
      }
    }
    leading
  }

  /// Triangles whose three vertices all lie strictly within the
  /// initialisation rectangle — this excludes both the synthetic bounding
  /// frame and the single spurious "outer" face bounded by its three edges.
  pub fn get_triangle_list(&self) -> Vec<(VertexId, VertexId, VertexId)> {
    let rect = match self.rect {
      Some(r) => r,
      None => return Vec::new(),
    };
    let mut visited = HashSet::new();
    let mut triangles = Vec::new();
    for edge in self.get_leading_edge_list() {
      if visited.contains(&edge) {
        continue;
      }
      let e0 = edge;
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
      let (pa, pb, pc) = (self.vertex_point(a), self.vertex_point(b), self.vertex_point(c));
      if rect.contains(pa) && rect.contains(pb) && rect.contains(pc) {
        triangles.push((a, b, c));
      }
    }
    triangles
  }

  /// Full O(N) re-validation of the structural invariants (symmetry, onext
  /// ring closure, face closure, Delaunay legality). `insert` runs it via
  /// `debug_assert_ok!` after every mutation; compiled to a no-op in
  /// release builds so the cost never reaches production.
  #[cfg(not(debug_assertions))]
  pub fn check_invariants(&self) -> Result<(), Error> {
    Ok(())
  }

  #[cfg(debug_assertions)]
  pub fn check_invariants(&self) -> Result<(), Error> {
    for i in 0..self.quad_edges.capacity() {
      let qe = QuadEdgeIndex::new(i as u32);
      if !self.quad_edges.is_live(qe) {
        continue;
      }
      for rot in 0..4u32 {
        let e = edge_at(qe, rot);
        if e.sym().sym() != e {
          return Err(Error::InvariantViolation);
        }
        for k in -3..=3 {
          if e.rotate(k).rotate(-k) != e {
            return Err(Error::InvariantViolation);
          }
        }
      }
      let e0 = edge_at(qe, 0);
      let org = self.quad_edges.org(e0);
      if org.is_valid() && org != VertexId::PLACEHOLDER {
        let mut e = self.quad_edges.onext(e0);
        let mut steps = 0;
        while e != e0 {
          if self.quad_edges.org(e) != org {
            return Err(Error::InvariantViolation);
          }
          e = self.quad_edges.onext(e);
          steps += 1;
          if steps > self.quad_edges.capacity() * 4 + 8 {
            return Err(Error::InvariantViolation);
          }
        }
      }
    }
    for (a, b, c) in self.get_triangle_list() {
      for (p, q, r) in [(a, b, c), (b, c, a), (c, a, b)] {
        let opposite = self.find_opposite_apex(p, q, r);
        if let Some(s) = opposite {
          let pts = (
            self.vertex_point(p),
            self.vertex_point(q),
            self.vertex_point(r),
            self.vertex_point(s),
          );
          if crate::predicates::in_circle(pts.0, pts.1, pts.2, pts.3) > 0 {
            return Err(Error::InvariantViolation);
          }
        }
      }
    }
    Ok(())
  }

  pub(crate) fn is_right_of_edge(&self, p: Point2f, e: EdgeId) -> i32 {
    let org = self.vertex_point(self.quad_edges.org(e));
    let dst = self.vertex_point(self.quad_edges.dst(e));
    crate::predicates::is_right_of(p, org, dst)
  }

  pub(crate) fn any_live_edge(&self) -> Option<EdgeId> {
    for i in 0..self.quad_edges.capacity() {
      let qe = QuadEdgeIndex::new(i as u32);
      if self.quad_edges.is_live(qe) {
        return Some(edge_at(qe, 0));
      }
    }
    None
  }

  #[cfg(debug_assertions)]
  fn find_opposite_apex(&self, p: VertexId, q: VertexId, r: VertexId) -> Option<VertexId> {
    for (a, b, c) in self.get_triangle_list() {
      let verts = [a, b, c];
      if verts.contains(&p) && verts.contains(&q) && !verts.contains(&r) {
        return verts.into_iter().find(|v| *v != p && *v != q);
      }
    }
    None
  }
}

pub(crate) fn edge_at(qe: QuadEdgeIndex, rot: u32) -> EdgeId {
  EdgeId::from_quad_edge(qe, rot)
}

/// An "equilateral" super-triangle centred on `rect`, generously larger
/// than it so that every point strictly inside `rect` is strictly inside
/// the triangle.
fn super_triangle(rect: Rect) -> (Point2f, Point2f, Point2f) {
  let cx = rect.x as f64 + rect.width as f64 / 2.0;
  let cy = rect.y as f64 + rect.height as f64 / 2.0;
  let span = (rect.width.max(rect.height) as f64).max(1.0);
  let radius = span * 20.0 + 1000.0;
  let sqrt3 = 3.0f64.sqrt();
  let pa = Point2f::new(cx as f32, (cy - 2.0 * radius) as f32);
  let pb = Point2f::new((cx - sqrt3 * radius) as f32, (cy + radius) as f32);
  let pc = Point2f::new((cx + sqrt3 * radius) as f32, (cy + radius) as f32);
  (pa, pb, pc)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn init_rejects_degenerate_rect() {
    let mut sub = Subdivision::new();
    assert_eq!(sub.init(Rect::new(0, 0, 0, 10)), Err(Error::InvalidRect));
  }

  #[test]
  fn init_plants_a_closed_triangle_enclosing_the_rect() {
    let mut sub = Subdivision::new();
    let rect = Rect::new(0, 0, 100, 100);
    sub.init(rect).unwrap();
    assert_eq!(sub.get_num_vertices(), 4);
    assert_eq!(sub.get_num_quad_edges(), 3);

    let e = sub.recent_edge;
    let mut cur = e;
    let mut count = 0;
    loop {
      cur = sub.quad_edges.lnext(cur);
      count += 1;
      if cur == e || count > 10 {
        break;
      }
    }
    assert_eq!(count, 3);

    for corner in [rect.x as f32, (rect.x + rect.width) as f32] {
      for corner_y in [rect.y as f32, (rect.y + rect.height) as f32] {
        let p = Point2f::new(corner, corner_y);
        assert!(rect.contains(p));
      }
    }
  }
}
