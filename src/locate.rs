//! The point-location walk (§4.3) and the accessors built on top of it:
//! `find_nearest`, `locate_vertices`, and the interpolation-refining
//! variant that never returns a synthetic boundary-corner vertex.

use crate::error::{Location, PtLoc};
use crate::geometry::Point2f;
use crate::ids::{SmallVertexSet, VertexId, INVALID_EDGE, INVALID_VERTEX};
use crate::predicates::orient;
use crate::subdivision::Subdivision;

impl Subdivision {
  /// Classifies `p` against the current triangulation: inside a face, on
  /// an edge, at a vertex, outside the bounding rect, or (for pathological
  /// degenerate input) `Error`. Caches the terminal edge as `recent_edge`
  /// so nearby subsequent queries run in O(1) average.
  pub fn locate(&mut self, p: Point2f) -> Location {
    if self.is_empty() {
      return Location {
        kind: PtLoc::Error,
        edge: INVALID_EDGE,
        vertex: INVALID_VERTEX,
      };
    }
    let rect = self.rect.unwrap();
    if !rect.contains(p) {
      return Location {
        kind: PtLoc::OutsideRect,
        edge: INVALID_EDGE,
        vertex: INVALID_VERTEX,
      };
    }

    let mut edge = self.recent_edge;
    if !edge.is_valid() || !self.quad_edges.is_live(edge.quad_edge()) {
      match self.any_live_edge() {
        Some(e) => edge = e,
        None => {
          return Location {
            kind: PtLoc::Error,
            edge: INVALID_EDGE,
            vertex: INVALID_VERTEX,
          }
        }
      }
    }

    let mut right_of_curr = self.is_right_of_edge(p, edge);
    if right_of_curr > 0 {
      edge = edge.sym();
      right_of_curr = -right_of_curr;
    }

    let max_iters = self.quad_edges.capacity() * 4 + 64;
    let mut bracketed = false;
    for _ in 0..max_iters {
      let onext_edge = self.quad_edges.onext(edge);
      let dprev_edge = self.quad_edges.dprev(edge);

      let right_of_onext = self.is_right_of_edge(p, onext_edge);
      let right_of_dprev = self.is_right_of_edge(p, dprev_edge);

      if right_of_dprev > 0 {
        if right_of_onext > 0 || (right_of_onext == 0 && right_of_curr == 0) {
          bracketed = true;
          break;
        }
        right_of_curr = right_of_onext;
        edge = onext_edge;
      } else if right_of_onext > 0 {
        right_of_curr = right_of_dprev;
        edge = dprev_edge;
      } else if right_of_curr == 0 {
        let dprev_dst = self.vertex_point(self.quad_edges.dst(dprev_edge));
        if self.is_right_of_edge(dprev_dst, edge) >= 0 {
          edge = edge.sym();
        } else {
          right_of_curr = right_of_onext;
          edge = onext_edge;
        }
      } else {
        right_of_curr = right_of_onext;
        edge = onext_edge;
      }
    }

    self.recent_edge = edge;
    if !bracketed {
      return Location {
        kind: PtLoc::Error,
        edge: INVALID_EDGE,
        vertex: INVALID_VERTEX,
      };
    }

    let org = self.quad_edges.org(edge);
    let dst = self.quad_edges.dst(edge);
    let org_pt = self.vertex_point(org);
    let dst_pt = self.vertex_point(dst);

    if p == org_pt {
      return Location {
        kind: PtLoc::Vertex,
        edge,
        vertex: org,
      };
    }
    if p == dst_pt {
      return Location {
        kind: PtLoc::Vertex,
        edge,
        vertex: dst,
      };
    }
    if orient(p, org_pt, dst_pt) == 0 {
      return Location {
        kind: PtLoc::OnEdge,
        edge,
        vertex: INVALID_VERTEX,
      };
    }
    Location {
      kind: PtLoc::Inside,
      edge,
      vertex: INVALID_VERTEX,
    }
  }

  /// Nearest already-inserted real vertex to `p`, found among the
  /// candidates of the triangle/edge that `locate` brackets `p` in.
  pub fn find_nearest(&mut self, p: Point2f) -> (VertexId, Point2f) {
    if self.vertices.len() <= 4 {
      return (INVALID_VERTEX, Point2f::new(0.0, 0.0));
    }
    let loc = self.locate(p);
    let mut candidates: Vec<VertexId> = Vec::with_capacity(3);
    match loc.kind {
      PtLoc::Vertex => return (loc.vertex, self.vertex_point(loc.vertex)),
      PtLoc::OnEdge => {
        candidates.push(self.quad_edges.org(loc.edge));
        candidates.push(self.quad_edges.dst(loc.edge));
      }
      PtLoc::Inside => {
        candidates.push(self.quad_edges.org(loc.edge));
        candidates.push(self.quad_edges.dst(loc.edge));
        let apex = self.quad_edges.dst(self.quad_edges.lnext(loc.edge));
        candidates.push(apex);
      }
      PtLoc::Error | PtLoc::OutsideRect => {}
    }

    let mut best: Option<(VertexId, f32)> = None;
    for v in candidates {
      if !self.is_vertex_real(v) {
        continue;
      }
      let d = self.vertex_point(v).squared_distance(p);
      if best.map_or(true, |(_, best_d)| d < best_d) {
        best = Some((v, d));
      }
    }
    match best {
      Some((v, _)) => (v, self.vertex_point(v)),
      None => (INVALID_VERTEX, Point2f::new(0.0, 0.0)),
    }
  }

  /// Up to three vertex ids bracketing `p`: one for `Vertex`, two for
  /// `OnEdge`, three for `Inside`. Empty for `Error`/`OutsideRect`.
  pub fn locate_vertices(&mut self, p: Point2f) -> SmallVertexSet {
    let loc = self.locate(p);
    let mut set = SmallVertexSet::new();
    match loc.kind {
      PtLoc::Vertex => set.push(loc.vertex),
      PtLoc::OnEdge => {
        set.push(self.quad_edges.org(loc.edge));
        set.push(self.quad_edges.dst(loc.edge));
      }
      PtLoc::Inside => {
        set.push(self.quad_edges.org(loc.edge));
        set.push(self.quad_edges.dst(loc.edge));
        set.push(self.quad_edges.dst(self.quad_edges.lnext(loc.edge)));
      }
      PtLoc::Error | PtLoc::OutsideRect => {}
    }
    set
  }

  /// Variant of [`Subdivision::locate_vertices`] that never returns a
  /// synthetic boundary-corner vertex. If the bracketing triangle touches
  /// the outer frame, steps once across the edge opposite the boundary
  /// vertex into the neighbouring, fully-real triangle.
  pub fn locate_vertex_ids_for_interpolation(&mut self, p: Point2f) -> SmallVertexSet {
    let loc = self.locate(p);
    let mut set = SmallVertexSet::new();
    match loc.kind {
      PtLoc::Vertex => {
        if !self.is_vertex_boundary(loc.vertex) {
          set.push(loc.vertex);
        }
      }
      PtLoc::OnEdge => {
        let org = self.quad_edges.org(loc.edge);
        let dst = self.quad_edges.dst(loc.edge);
        if !self.is_vertex_boundary(org) {
          set.push(org);
        }
        if !self.is_vertex_boundary(dst) {
          set.push(dst);
        }
      }
      PtLoc::Inside => {
        let e0 = loc.edge;
        let e1 = self.quad_edges.lnext(e0);
        let e2 = self.quad_edges.lnext(e1);
        let mut tri = [self.quad_edges.org(e0), self.quad_edges.org(e1), self.quad_edges.org(e2)];

        if tri.iter().any(|v| self.is_vertex_boundary(*v)) {
          for edge_try in [e0, e1, e2] {
            let org = self.quad_edges.org(edge_try);
            let dst = self.quad_edges.dst(edge_try);
            let apex = self.quad_edges.dst(self.quad_edges.lnext(edge_try));
            if self.is_vertex_boundary(apex) && !self.is_vertex_boundary(org) && !self.is_vertex_boundary(dst) {
              let crossed = edge_try.sym();
              let new_apex = self.quad_edges.dst(self.quad_edges.lnext(crossed));
              tri = [org, dst, new_apex];
              break;
            }
          }
        }

        for v in tri {
          if !self.is_vertex_boundary(v) {
            set.push(v);
          }
        }
      }
      PtLoc::Error | PtLoc::OutsideRect => {}
    }
    set
  }
}
