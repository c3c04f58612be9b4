//! An incremental planar Delaunay triangulation with its dual Voronoi
//! diagram, built on a quad-edge topological engine (Guibas–Stolfi).
//!
//! Plant a bounding rectangle with [`Subdivision::init`], then stream
//! points through [`Subdivision::insert`]. The triangulation stays
//! Delaunay-legal after every call; [`Subdivision::locate`] answers
//! point-in-triangle / on-edge / at-vertex queries, and
//! [`Subdivision::get_voronoi_facet_list`] derives the dual diagram on
//! demand.

mod error;
mod geometry;
mod ids;
mod insertion;
mod locate;
mod predicates;
mod quad_edge;
mod subdivision;
mod vertex;
mod voronoi;

pub use error::{Error, Location, PtLoc};
pub use geometry::{Point2f, Rect};
pub use ids::{EdgeId, NavStep, QuadEdgeIndex, SmallVertexSet, VertexId, INVALID_EDGE, INVALID_VERTEX};
pub use predicates::{in_circle, is_right_of, orient};
pub use subdivision::Subdivision;
pub use vertex::VertexKind;
