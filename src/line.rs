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

use crate::{
    error::{GeomError, Result},
    settings::Tolerances,
    vec3::Vec3,
};
use serde::{Deserialize, Serialize};

/// Parametric line `origin + direction * t`. The direction does not have to be unit length, in
/// which case `t` is measured in direction lengths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Line {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Line through two points, `point_at(0)` gives `a` and `point_at(1)` gives `b`.
    #[inline]
    pub fn from_segment(a: &Vec3, b: &Vec3) -> Self {
        Self {
            origin: *a,
            direction: *b - *a,
        }
    }

    #[inline]
    pub fn set(&mut self, origin: Vec3, direction: Vec3) -> &mut Self {
        self.origin = origin;
        self.direction = direction;
        self
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Finds the nearest intersection in front of the origin with a triangle strip. See
    /// [`Self::tri_strip_intersection_with`].
    pub fn tri_strip_intersection(
        &self,
        points: &[f32],
        stride: usize,
        elements: &[u16],
    ) -> Result<Option<Vec3>> {
        self.tri_strip_intersection_with(points, stride, elements, &Tolerances::DEFAULT)
    }

    /// Finds the nearest intersection in front of the origin (`t >= 0`) with a triangle strip.
    /// `points` holds interleaved vertices whose first three values are the coordinates, and
    /// `elements` are vertex indices forming the strip.
    ///
    /// Each triangle is tested with the Moller-Trumbore algorithm. Triangles nearly parallel to
    /// the line are skipped and hits within the ray epsilon outside a triangle edge still count,
    /// so rays through shared edges are not lost.
    pub fn tri_strip_intersection_with(
        &self,
        points: &[f32],
        stride: usize,
        elements: &[u16],
        tolerances: &Tolerances,
    ) -> Result<Option<Vec3>> {
        const METHOD: &str = "tri_strip_intersection";

        if stride < 3 {
            return Err(GeomError::invalid_argument(
                "Line",
                METHOD,
                format!("stride {stride} is less than 3"),
            ));
        }
        if points.len() < stride {
            return Err(GeomError::invalid_argument(
                "Line",
                METHOD,
                format!("{} values hold no vertex of stride {stride}", points.len()),
            ));
        }
        if elements.len() < 3 {
            return Err(GeomError::invalid_argument(
                "Line",
                METHOD,
                format!("{} elements do not form a triangle", elements.len()),
            ));
        }
        if let Some(index) = elements
            .iter()
            .find(|&&index| index as usize * stride + 3 > points.len())
        {
            return Err(GeomError::invalid_argument(
                "Line",
                METHOD,
                format!("element {index} is past the end of the vertex buffer"),
            ));
        }

        let epsilon = tolerances.ray_epsilon;
        let vertex = |index: u16| {
            let i = index as usize * stride;
            Vec3::new(points[i] as f64, points[i + 1] as f64, points[i + 2] as f64)
        };

        let dir = self.direction;
        let mut t_min = f64::INFINITY;

        // Consecutive triangles share two vertices, so only one new vertex is read per step.
        let mut v1 = vertex(elements[0]);
        let mut v2 = vertex(elements[1]);

        for &element in &elements[2..] {
            let v0 = v1;
            v1 = v2;
            v2 = vertex(element);

            let edge1 = v1 - v0;
            let edge2 = v2 - v0;

            let p = dir.cross(&edge2);
            let det = edge1.dot(&p);
            // Line lies in the plane of the triangle.
            if det > -epsilon && det < epsilon {
                continue;
            }
            let inv_det = 1.0 / det;

            let s = self.origin - v0;
            let u = inv_det * s.dot(&p);
            if u < -epsilon || u > 1.0 + epsilon {
                continue;
            }

            let q = s.cross(&edge1);
            let v = inv_det * dir.dot(&q);
            if v < -epsilon || u + v > 1.0 + epsilon {
                continue;
            }

            let t = inv_det * edge2.dot(&q);
            if t >= 0.0 && t < t_min {
                t_min = t;
            }
        }

        if t_min.is_finite() {
            Ok(Some(self.point_at(t_min)))
        } else {
            Ok(None)
        }
    }
}
