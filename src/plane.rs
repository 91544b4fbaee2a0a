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

use crate::{mat4::Mat4, vec3::Vec3};
use serde::{Deserialize, Serialize};

/// Plane in the form `normal . p + distance = 0`. Points on the side the normal points to have
/// positive signed distance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f64,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Z,
            distance: 0.0,
        }
    }
}

impl Plane {
    /// Creates plane from coefficients of the plane equation `Ax + By + Cz + D = 0`. The values
    /// are stored as given, call [`Self::normalize`] to get a unit normal.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, distance: f64) -> Self {
        Self {
            normal: Vec3::new(x, y, z),
            distance,
        }
    }

    /// Creates plane passing through three points, with the normal pointing toward the side
    /// from which the points appear in counter-clockwise order. Collinear points give a
    /// degenerate plane with zero normal.
    pub fn from_points(a: &Vec3, b: &Vec3, c: &Vec3) -> Self {
        let mut normal = (*b - *a).cross(&(*c - *a));
        normal.normalize();
        Self {
            normal,
            distance: -normal.dot(a),
        }
    }

    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, distance: f64) -> &mut Self {
        self.normal.set(x, y, z);
        self.distance = distance;
        self
    }

    /// Signed distance from the plane to the point, in units of the normal length.
    #[inline]
    pub fn dot(&self, point: &Vec3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    #[inline]
    pub fn distance_to_point(&self, point: &Vec3) -> f64 {
        self.dot(point)
    }

    /// Multiplies the plane vector `(normal, distance)` by the matrix. To move a plane by a
    /// point transform `M`, pass the inverse transpose of `M`.
    pub fn transform_by_matrix(&mut self, matrix: &Mat4) -> &mut Self {
        let m = &matrix.m;
        let Vec3 { x, y, z } = self.normal;
        let d = self.distance;
        self.normal = Vec3::new(
            m[0] * x + m[1] * y + m[2] * z + m[3] * d,
            m[4] * x + m[5] * y + m[6] * z + m[7] * d,
            m[8] * x + m[9] * y + m[10] * z + m[11] * d,
        );
        self.distance = m[12] * x + m[13] * y + m[14] * z + m[15] * d;
        self
    }

    /// Scales the plane so its normal has unit length. Does nothing for a zero normal.
    pub fn normalize(&mut self) -> &mut Self {
        let magnitude = self.normal.magnitude();
        if magnitude != 0.0 {
            self.normal.divide(magnitude);
            self.distance /= magnitude;
        }
        self
    }

    /// Checks whether the segment touches or crosses the plane.
    pub fn intersects_segment(&self, a: &Vec3, b: &Vec3) -> bool {
        let da = self.dot(a);
        let db = self.dot(b);
        da * db <= 0.0
    }

    /// Returns 1 if both points are strictly on the positive side, -1 if both are strictly on
    /// the negative side, 0 otherwise.
    pub fn on_same_side(&self, a: &Vec3, b: &Vec3) -> i32 {
        let da = self.dot(a);
        let db = self.dot(b);
        if da > 0.0 && db > 0.0 {
            1
        } else if da < 0.0 && db < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Clips the segment to the positive half-space of the plane.
    ///
    /// A segment crossing the plane is cut at the intersection point and its positive part is
    /// returned. A segment that does not cross is returned unchanged when its start is on the
    /// positive side and rejected otherwise. A segment parallel to the plane is kept only when
    /// it lies in the plane. Zero length segments are rejected.
    pub fn clip(&self, a: &Vec3, b: &Vec3) -> Option<(Vec3, Vec3)> {
        if a == b {
            return None;
        }

        let direction = *b - *a;
        let n_dot_dir = self.normal.dot(&direction);
        let p_dot = self.dot(a);

        if n_dot_dir == 0.0 {
            return if p_dot == 0.0 { Some((*a, *b)) } else { None };
        }

        let t = -p_dot / n_dot_dir;
        if !(0.0..=1.0).contains(&t) {
            return if p_dot > 0.0 { Some((*a, *b)) } else { None };
        }

        let p = *a + direction * t;
        if n_dot_dir > 0.0 {
            Some((p, *b))
        } else {
            Some((*a, p))
        }
    }
}

#[cfg(test)]
mod test {
    use super::Plane;
    use crate::{mat4::Mat4, vec3::Vec3};

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(
            &Vec3::new(0.0, 0.0, 3.0),
            &Vec3::new(1.0, 0.0, 3.0),
            &Vec3::new(0.0, 1.0, 3.0),
        );
        assert_eq!(plane.normal, Vec3::Z);
        assert_eq!(plane.distance, -3.0);
        assert_eq!(plane.dot(&Vec3::new(5.0, 5.0, 5.0)), 2.0);
        assert_eq!(plane.distance_to_point(&Vec3::ZERO), -3.0);

        // Collinear points.
        let degenerate = Plane::from_points(&Vec3::ZERO, &Vec3::X, &(Vec3::X * 2.0));
        assert_eq!(degenerate.normal, Vec3::ZERO);
    }

    #[test]
    fn test_plane_normalize() {
        let mut plane = Plane::new(0.0, 3.0, 4.0, 10.0);
        plane.normalize();
        assert_eq!(plane, Plane::new(0.0, 0.6, 0.8, 2.0));

        let mut zero = Plane::new(0.0, 0.0, 0.0, 1.0);
        zero.normalize();
        assert_eq!(zero, Plane::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_plane_transform() {
        // Plane z = 0 moved up by 2 becomes z = 2.
        let mut translation = Mat4::IDENTITY;
        translation.set_to_translation(0.0, 0.0, 2.0);
        let mut inverse_transpose = translation;
        inverse_transpose.invert().unwrap().transpose();

        let mut plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        plane.transform_by_matrix(&inverse_transpose);
        assert_eq!(plane, Plane::new(0.0, 0.0, 1.0, -2.0));
        assert_eq!(plane.dot(&Vec3::new(0.0, 0.0, 2.0)), 0.0);
    }

    #[test]
    fn test_plane_side_queries() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let above = Vec3::new(0.0, 0.0, 1.0);
        let below = Vec3::new(0.0, 0.0, -1.0);
        let on = Vec3::new(1.0, 1.0, 0.0);

        assert!(plane.intersects_segment(&above, &below));
        assert!(plane.intersects_segment(&above, &on));
        assert!(!plane.intersects_segment(&above, &(above * 2.0)));

        assert_eq!(plane.on_same_side(&above, &(above * 2.0)), 1);
        assert_eq!(plane.on_same_side(&below, &(below * 2.0)), -1);
        assert_eq!(plane.on_same_side(&above, &below), 0);
        assert_eq!(plane.on_same_side(&on, &above), 0);
    }

    #[test]
    fn test_clip_straddling_segment() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let a = Vec3::new(1.0, 2.0, -1.0);
        let b = Vec3::new(1.0, 2.0, 3.0);

        let (p, q) = plane.clip(&a, &b).unwrap();
        assert_eq!(plane.dot(&p), 0.0);
        assert_eq!(p, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(q, b);

        let (p, q) = plane.clip(&b, &a).unwrap();
        assert_eq!(p, b);
        assert_eq!(plane.dot(&q), 0.0);

        // Clipping the clipped segment changes nothing.
        let (p2, q2) = plane.clip(&Vec3::new(1.0, 2.0, 0.0), &b).unwrap();
        assert_eq!(p2, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(q2, b);
    }

    #[test]
    fn test_clip_positive_segment_is_unchanged() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let a = Vec3::new(0.0, 0.0, 1.0);
        let b = Vec3::new(5.0, -3.0, 2.0);
        assert_eq!(plane.clip(&a, &b), Some((a, b)));
        let (p, q) = plane.clip(&a, &b).unwrap();
        assert_eq!(plane.clip(&p, &q), Some((a, b)));
    }

    #[test]
    fn test_clip_rejections() {
        let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
        let a = Vec3::new(0.0, 0.0, -1.0);

        // Zero length.
        assert!(plane.clip(&a, &a).is_none());
        // Entirely negative.
        assert!(plane.clip(&a, &Vec3::new(0.0, 0.0, -2.0)).is_none());
        // Parallel below the plane.
        assert!(plane.clip(&a, &Vec3::new(1.0, 0.0, -1.0)).is_none());
        // Parallel in the plane.
        let on = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(plane.clip(&Vec3::ZERO, &on), Some((Vec3::ZERO, on)));
    }
}
