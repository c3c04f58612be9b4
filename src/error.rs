//! Error and classification enums. Kept as flat value types returned from
//! `Result`, with no `std::error::Error` impl or `source` chain — the
//! failure modes here are all local to the arena and don't compose with
//! other error types.

use crate::ids::{EdgeId, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// `init` was called with a non-positive-area rectangle.
  InvalidRect,
  /// A point lies outside the initialisation rectangle.
  OutOfRange,
  /// The point-location walk could not make progress.
  LocateFailed,
  /// An operation requires a prior `init`.
  NotInitialised,
  /// `check_invariants` found a structural inconsistency. Test/debug-build
  /// only; steady-state code never produces this.
  InvariantViolation,
}

/// Classification of a located point, returned by `locate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtLoc {
  /// The walk could not make progress (pathological degenerate input).
  Error,
  /// The point lies outside the bounding rectangle.
  OutsideRect,
  /// The point lies strictly inside a face.
  Inside,
  /// The point lies exactly on an edge.
  OnEdge,
  /// The point coincides with an existing vertex.
  Vertex,
}

/// The full result of a location query: classification, the edge the walk
/// terminated on, and (for `Vertex`) the matching vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
  pub kind: PtLoc,
  pub edge: EdgeId,
  pub vertex: VertexId,
}
