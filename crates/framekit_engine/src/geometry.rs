use crate::error::InvalidArgument;

/// Shrink factor used when callers do not pick their own.
pub const DEFAULT_HITBOX_SHRINK: f64 = 0.75;

/// Axis-aligned rectangle in screen pixels.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// Overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }

    pub fn hitbox(&self, shrink: f64) -> Result<Rect, InvalidArgument> {
        compute_hitbox(*self, shrink)
    }
}

/// Centered collision rectangle `shrink` times the size of `bounds`.
///
/// Width and height are floored; the leftover space is split evenly with
/// integer division, so an odd remainder leaves the extra pixel on the
/// right/bottom side. Fails if the centered origin does not fit in `i32`.
pub fn compute_hitbox(bounds: Rect, shrink: f64) -> Result<Rect, InvalidArgument> {
    if !(shrink > 0.0 && shrink <= 1.0) {
        return Err(InvalidArgument::new(
            "shrink",
            format!("{shrink} is outside (0, 1]"),
        ));
    }
    let w = (bounds.w as f64 * shrink).floor() as u32;
    let h = (bounds.h as f64 * shrink).floor() as u32;
    let x = centered_origin("bounds.x", bounds.x, bounds.w, w)?;
    let y = centered_origin("bounds.y", bounds.y, bounds.h, h)?;
    Ok(Rect { x, y, w, h })
}

fn centered_origin(
    name: &'static str,
    start: i32,
    outer: u32,
    inner: u32,
) -> Result<i32, InvalidArgument> {
    let origin = start as i64 + ((outer - inner) / 2) as i64;
    i32::try_from(origin)
        .map_err(|_| InvalidArgument::new(name, format!("hitbox origin {origin} overflows i32")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_hitbox_is_centered() {
        let bounds = Rect::new(0, 0, 32, 64);
        let hitbox = compute_hitbox(bounds, 0.75).unwrap();
        assert_eq!(hitbox, Rect::new(4, 8, 24, 48));
    }

    #[test]
    fn hitbox_follows_bounds_offset() {
        let hitbox = Rect::new(100, -20, 32, 64).hitbox(0.75).unwrap();
        assert_eq!(hitbox, Rect::new(104, -12, 24, 48));
    }

    #[test]
    fn decimal_shrink_matches_double_precision() {
        let hitbox = compute_hitbox(Rect::new(0, 0, 10, 10), 0.7).unwrap();
        assert_eq!(hitbox, Rect::new(1, 1, 7, 7));
    }

    #[test]
    fn origin_near_i32_max_is_rejected_not_overflowed() {
        let err = compute_hitbox(Rect::new(i32::MAX - 1, 0, 10, 10), 0.5).unwrap_err();
        assert_eq!(err.name, "bounds.x");

        let hitbox = compute_hitbox(Rect::new(i32::MAX - 2, i32::MIN, 4, 4), 0.5).unwrap();
        assert_eq!(hitbox, Rect::new(i32::MAX - 1, i32::MIN + 1, 2, 2));
    }

    #[test]
    fn full_shrink_is_identity() {
        let bounds = Rect::new(7, 9, 13, 5);
        assert_eq!(compute_hitbox(bounds, 1.0).unwrap(), bounds);
    }

    #[test]
    fn width_is_floored_and_centered_for_many_factors() {
        let bounds = Rect::new(-3, 11, 37, 23);
        for step in 1..=100 {
            let shrink = step as f64 / 100.0;
            let hitbox = compute_hitbox(bounds, shrink).unwrap();
            assert_eq!(hitbox.w, (bounds.w as f64 * shrink).floor() as u32);
            assert_eq!(hitbox.h, (bounds.h as f64 * shrink).floor() as u32);
            assert_eq!(hitbox.x - bounds.x, ((bounds.w - hitbox.w) / 2) as i32);
            assert_eq!(hitbox.y - bounds.y, ((bounds.h - hitbox.h) / 2) as i32);
        }
    }

    #[test]
    fn rejects_out_of_range_shrink() {
        let bounds = Rect::new(0, 0, 10, 10);
        for shrink in [0.0, -0.5, 1.0001, 2.0, f64::NAN] {
            let err = compute_hitbox(bounds, shrink).unwrap_err();
            assert_eq!(err.name, "shrink");
        }
    }

    #[test]
    fn intersection_excludes_touching_edges() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 0, 0, 5)));
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains_point(2, 2));
        assert!(r.contains_point(4, 4));
        assert!(!r.contains_point(5, 4));
    }
}
