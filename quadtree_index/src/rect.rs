// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangle primitive and the scalar abstraction behind it.
//!
//! Extents are half-open: a rectangle covers `[left, right) × [top, bottom)`.
//! The same convention drives containment, intersection, and the quadrant
//! fit used by the tree, so a rectangle that ends exactly on a midline belongs
//! to the side it does not cross.

use core::fmt::Debug;

/// Numeric scalar abstraction for rectangle coordinates.
///
/// The tree only needs addition, subtraction, and halving (to find the
/// midlines of a node), so any ordered numeric type with these operations can
/// be used as a coordinate. Implementations are provided for `f32`, `f64`,
/// `i32`, and `i64`.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Half of the value, rounded toward negative infinity for integers.
    fn half(v: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn half(v: Self) -> Self {
        v * 0.5
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn half(v: Self) -> Self {
        v * 0.5
    }
}

impl Scalar for i32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn half(v: Self) -> Self {
        v >> 1
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn half(v: Self) -> Self {
        v >> 1
    }
}

/// Axis-aligned rectangle given by its top-left corner and its size.
///
/// `y` grows downward, so `top <= bottom` for any well-formed rectangle.
/// Negative sizes are a caller error and are not checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect<T> {
    /// Left edge.
    pub x: T,
    /// Top edge.
    pub y: T,
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T> Rect<T> {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Scalar> Rect<T> {
    /// Left edge (`x`).
    #[inline]
    pub fn left(&self) -> T {
        self.x
    }

    /// Top edge (`y`).
    #[inline]
    pub fn top(&self) -> T {
        self.y
    }

    /// Right edge (`x + width`), exclusive.
    #[inline]
    pub fn right(&self) -> T {
        T::add(self.x, self.width)
    }

    /// Bottom edge (`y + height`), exclusive.
    #[inline]
    pub fn bottom(&self) -> T {
        T::add(self.y, self.height)
    }

    /// The vertical and horizontal midlines: `(x + width / 2, y + height / 2)`.
    #[inline]
    pub fn midpoint(&self) -> (T, T) {
        (
            T::add(self.x, T::half(self.width)),
            T::add(self.y, T::half(self.height)),
        )
    }

    /// True if `other` lies entirely within this rectangle on both axes.
    ///
    /// Shared edges count as contained.
    pub fn contains(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// True if the two rectangles overlap on both axes.
    ///
    /// Rectangles that merely touch along an edge or at a corner do not
    /// intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > T::zero() && self.height > T::zero())
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: T, dy: T) -> Self {
        Self::new(T::add(self.x, dx), T::add(self.y, dy), self.width, self.height)
    }

    /// Split into four quadrants along the midlines.
    ///
    /// Returned in top-right, top-left, bottom-left, bottom-right order. The
    /// right and bottom halves take whatever the left and top halves leave,
    /// so the four pieces tile the rectangle exactly even for odd integer
    /// sizes.
    pub fn quadrants(&self) -> [Self; 4] {
        let (mid_x, mid_y) = self.midpoint();
        let left_w = T::half(self.width);
        let top_h = T::half(self.height);
        let right_w = T::sub(self.width, left_w);
        let bottom_h = T::sub(self.height, top_h);
        [
            Self::new(mid_x, self.y, right_w, top_h),
            Self::new(self.x, self.y, left_w, top_h),
            Self::new(self.x, mid_y, left_w, bottom_h),
            Self::new(mid_x, mid_y, right_w, bottom_h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_origin_and_size() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.top(), 20);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.midpoint(), (25, 40));
    }

    #[test]
    fn contains_is_inclusive_of_shared_edges() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::new(90.0, 90.0, 10.0, 10.0)));
        assert!(!outer.contains(&Rect::new(95.0, 90.0, 10.0, 10.0)));
        assert!(!outer.contains(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        let corner = Rect::new(10, 10, 5, 5);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&corner));

        let overlap = Rect::new(9, 9, 5, 5);
        assert!(a.intersects(&overlap));
        assert!(overlap.intersects(&a));
    }

    #[test]
    fn quadrants_tile_odd_integer_bounds() {
        let r = Rect::new(0_i64, 0, 7, 5);
        let [tr, tl, bl, br] = r.quadrants();
        assert_eq!(tl, Rect::new(0, 0, 3, 2));
        assert_eq!(tr, Rect::new(3, 0, 4, 2));
        assert_eq!(bl, Rect::new(0, 2, 3, 3));
        assert_eq!(br, Rect::new(3, 2, 4, 3));
        assert_eq!(tr.right(), r.right());
        assert_eq!(br.bottom(), r.bottom());
        for (i, a) in r.quadrants().iter().enumerate() {
            assert!(r.contains(a), "quadrant {i} must lie inside the parent");
            for b in r.quadrants().iter().skip(i + 1) {
                assert!(!a.intersects(b), "quadrants must not overlap");
            }
        }
    }

    #[test]
    fn empty_and_translate() {
        assert!(Rect::new(0.0_f32, 0.0, 0.0, 4.0).is_empty());
        assert!(!Rect::new(0.0_f32, 0.0, 1.0, 4.0).is_empty());
        assert_eq!(
            Rect::new(1, 2, 3, 4).translate(-1, 5),
            Rect::new(0, 7, 3, 4)
        );
    }
}
