// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use serde::{Deserialize, Serialize};

/// Rectangular region of the render target in window coordinates, origin at the bottom left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    // Edges are computed in i64 so that viewports near the i32 limits do not overflow.
    #[inline]
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    #[inline]
    fn top(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Checks whether the point lies inside the viewport. The right and top edges are exclusive.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && (x as i64) < self.right() && y >= self.y && (y as i64) < self.top()
    }

    /// Checks whether both viewports share at least one pixel. Empty viewports intersect nothing.
    #[inline]
    pub fn intersects(&self, other: &Viewport) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.top()
            && (other.y as i64) < self.top()
    }

    /// Shrinks this viewport to the common part of both viewports. Returns `false` and leaves the
    /// viewport untouched if there is no common part.
    pub fn intersect(&mut self, other: &Viewport) -> bool {
        if !self.intersects(other) {
            return false;
        }
        let left = self.x.max(other.x);
        let bottom = self.y.max(other.y);
        let right = self.right().min(other.right());
        let top = self.top().min(other.top());
        // The common part is no larger than either viewport, so its size fits into i32.
        *self = Self::new(
            left,
            bottom,
            (right - left as i64) as i32,
            (top - bottom as i64) as i32,
        );
        true
    }
}
