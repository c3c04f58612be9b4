//! Orientation and in-circle predicates. Both are evaluated in `f64`
//! regardless of the `f32` precision of the input coordinates, and commit
//! to plain floating-point arithmetic with no epsilon — a tie is exactly
//! zero, never nudged. See [`crate::Error`] for what callers do with a
//! degenerate result; this module only classifies.

use crate::geometry::Point2f;

/// `sign((b-a) x (c-a))`, widened to `f64`. Positive means `a, b, c` turn
/// counter-clockwise; negative clockwise; zero exactly collinear.
pub fn orient(a: Point2f, b: Point2f, c: Point2f) -> i32 {
  let ax = a.x as f64;
  let ay = a.y as f64;
  let bx = b.x as f64;
  let by = b.y as f64;
  let cx = c.x as f64;
  let cy = c.y as f64;
  let det = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
  sign(det)
}

fn sign(v: f64) -> i32 {
  if v > 0.0 {
    1
  } else if v < 0.0 {
    -1
  } else {
    0
  }
}

/// `orient(p, dst, org)`: positive when `p` is strictly to the right of the
/// directed edge `org -> dst`.
pub fn is_right_of(p: Point2f, org: Point2f, dst: Point2f) -> i32 {
  orient(p, dst, org)
}

/// Classical 4x4 in-circle determinant, evaluated in `f64`. Positive means
/// `d` lies strictly inside the circumcircle of `a, b, c` when `a, b, c`
/// are listed counter-clockwise.
pub fn in_circle(a: Point2f, b: Point2f, c: Point2f, d: Point2f) -> i32 {
  let pts = [a, b, c, d];
  let mut m = [[0.0f64; 4]; 4];
  for (row, p) in pts.iter().enumerate() {
    let x = p.x as f64;
    let y = p.y as f64;
    m[row][0] = x;
    m[row][1] = y;
    m[row][2] = x * x + y * y;
    m[row][3] = 1.0;
  }
  sign(det4(m))
}

fn det4(m: [[f64; 4]; 4]) -> f64 {
  // Laplace expansion along the last column, since it is always 1.0 here,
  // reduces to a 3x3 determinant sum with alternating signs.
  let mut det = 0.0;
  for i in 0..4 {
    let minor = minor3(m, i);
    let cofactor = det3(minor);
    let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
    det += sign * m[i][3] * cofactor;
  }
  det
}

fn minor3(m: [[f64; 4]; 4], skip_row: usize) -> [[f64; 3]; 3] {
  let mut out = [[0.0f64; 3]; 3];
  let mut r = 0;
  for (i, row) in m.iter().enumerate() {
    if i == skip_row {
      continue;
    }
    out[r][0] = row[0];
    out[r][1] = row[1];
    out[r][2] = row[2];
    r += 1;
  }
  out
}

fn det3(m: [[f64; 3]; 3]) -> f64 {
  m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
    - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
    + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn orient_ccw_cw_colinear() {
    let a = Point2f::new(0.0, 0.0);
    let b = Point2f::new(1.0, 0.0);
    let c_ccw = Point2f::new(0.0, 1.0);
    let c_cw = Point2f::new(0.0, -1.0);
    let c_colinear = Point2f::new(2.0, 0.0);
    assert_eq!(orient(a, b, c_ccw), 1);
    assert_eq!(orient(a, b, c_cw), -1);
    assert_eq!(orient(a, b, c_colinear), 0);
  }

  #[test]
  fn in_circle_classic_unit_circle_case() {
    let a = Point2f::new(1.0, 0.0);
    let b = Point2f::new(0.0, 1.0);
    let c = Point2f::new(-1.0, 0.0);
    let inside = Point2f::new(0.0, 0.5);
    let outside = Point2f::new(0.0, 5.0);
    let on_circle = Point2f::new(0.0, -1.0);
    assert_eq!(in_circle(a, b, c, inside), 1);
    assert_eq!(in_circle(a, b, c, outside), -1);
    assert_eq!(in_circle(a, b, c, on_circle), 0);
  }

  #[test]
  fn is_right_of_matches_orientation_convention() {
    let org = Point2f::new(0.0, 0.0);
    let dst = Point2f::new(1.0, 0.0);
    let right = Point2f::new(0.5, -1.0);
    let left = Point2f::new(0.5, 1.0);
    assert!(is_right_of(right, org, dst) > 0);
    assert!(is_right_of(left, org, dst) < 0);
  }
}
