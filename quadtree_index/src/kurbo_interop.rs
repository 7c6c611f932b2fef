// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between [`Rect<f64>`] and [`kurbo::Rect`].
//!
//! Kurbo stores rectangles by their corners (`x0, y0, x1, y1`) while this crate
//! stores origin and size. Converting a Kurbo rectangle normalizes it first,
//! so flipped corners still produce a non-negative size.

use crate::handle::HandleId;
use crate::rect::Rect;
use crate::tree::QuadTree;

impl From<kurbo::Rect> for Rect<f64> {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

impl From<Rect<f64>> for kurbo::Rect {
    fn from(r: Rect<f64>) -> Self {
        Self::new(r.x, r.y, r.x + r.width, r.y + r.height)
    }
}

impl<P> QuadTree<f64, P> {
    /// Handles whose bounds intersect a Kurbo rectangle.
    ///
    /// Shorthand for converting `region` and calling
    /// [`QuadTree::query_intersecting`].
    pub fn query_kurbo(&self, region: kurbo::Rect) -> impl Iterator<Item = HandleId> + '_ {
        let region = Rect::from(region);
        let candidates = self.query(&region);
        candidates.into_iter().filter(move |id| {
            self.bounds(*id)
                .is_some_and(|bounds| bounds.intersects(&region))
        })
    }
}
