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

use crate::{mat4::Mat4, plane::Plane, vec3::Vec3, viewport::Viewport};
use serde::{Deserialize, Serialize};

/// Source of six inward-facing planes bounding a convex volume. Bounding volumes test
/// themselves against anything implementing this trait.
pub trait BoundingPlanes {
    fn left(&self) -> &Plane;
    fn right(&self) -> &Plane;
    fn bottom(&self) -> &Plane;
    fn top(&self) -> &Plane;
    fn near(&self) -> &Plane;
    fn far(&self) -> &Plane;
}

/// View volume bounded by six planes with normals pointing inside, plus the viewport it was
/// built for.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    planes: [Plane; 6],
    viewport: Viewport,
}

impl Default for Frustum {
    /// Unit frustum: the cube [-1, 1] on every axis.
    fn default() -> Self {
        Self {
            planes: [
                Plane::new(1.0, 0.0, 0.0, 1.0),
                Plane::new(-1.0, 0.0, 0.0, 1.0),
                Plane::new(0.0, 1.0, 0.0, 1.0),
                Plane::new(0.0, -1.0, 0.0, 1.0),
                Plane::new(0.0, 0.0, 1.0, 1.0),
                Plane::new(0.0, 0.0, -1.0, 1.0),
            ],
            viewport: Viewport::new(0, 0, 1, 1),
        }
    }
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    pub fn new(
        left: Plane,
        right: Plane,
        bottom: Plane,
        top: Plane,
        near: Plane,
        far: Plane,
        viewport: Viewport,
    ) -> Self {
        Self {
            planes: [left, right, bottom, top, near, far],
            viewport,
        }
    }

    #[inline]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_to_unit_frustum(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Extracts normalized clip planes from a projection matrix. The planes are in the
    /// coordinate system the matrix projects from, usually eye coordinates.
    pub fn set_to_projection_matrix(&mut self, projection: &Mat4) -> &mut Self {
        let m = &projection.m;
        // Rows of the matrix, the fourth one is what clip-space W is computed with.
        let (r0, r1, r2, r3) = (&m[0..4], &m[4..8], &m[8..12], &m[12..16]);
        let sum = |a: &[f64], b: &[f64]| {
            Plane::new(a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3])
        };
        let diff = |a: &[f64], b: &[f64]| {
            Plane::new(a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3])
        };

        self.planes = [
            sum(r3, r0),
            diff(r3, r0),
            sum(r3, r1),
            diff(r3, r1),
            sum(r3, r2),
            diff(r3, r2),
        ];

        self.normalize()
    }

    /// Builds the frustum in model coordinates: the planes of `projection` are moved by the
    /// transpose of `modelview`.
    pub fn set_to_modelview_projection(
        &mut self,
        projection: &Mat4,
        modelview: &Mat4,
        viewport: &Viewport,
    ) -> &mut Self {
        let mut transposed = Mat4::IDENTITY;
        transposed.transpose_matrix(modelview);

        self.set_to_projection_matrix(projection);
        for plane in self.planes.iter_mut() {
            plane.transform_by_matrix(&transposed);
        }
        self.viewport = *viewport;

        self.normalize()
    }

    /// Multiplies every plane by the matrix. See [`Plane::transform_by_matrix`].
    pub fn transform_by_matrix(&mut self, matrix: &Mat4) -> &mut Self {
        for plane in self.planes.iter_mut() {
            plane.transform_by_matrix(matrix);
        }
        self
    }

    pub fn normalize(&mut self) -> &mut Self {
        for plane in self.planes.iter_mut() {
            plane.normalize();
        }
        self
    }

    /// Checks whether the point is strictly inside every plane. Points on the boundary are
    /// outside.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes.iter().all(|plane| plane.dot(point) > 0.0)
    }

    /// Conservative test of a segment against the frustum. The segment is accepted when an
    /// endpoint is inside or when it straddles a plane that it can be clipped against, and
    /// rejected when it lies behind some plane.
    pub fn intersects_segment(&self, a: &Vec3, b: &Vec3) -> bool {
        if self.contains_point(a) || self.contains_point(b) {
            return true;
        }

        if a == b {
            return false;
        }

        for plane in self.planes.iter() {
            match plane.on_same_side(a, b) {
                -1 => return false,
                0 => {
                    if plane.clip(a, b).is_some() {
                        return true;
                    }
                }
                _ => (),
            }
        }

        false
    }

    /// Checks whether the viewport this frustum was built for overlaps `viewport`.
    pub fn intersects_viewport(&self, viewport: &Viewport) -> bool {
        self.viewport.intersects(viewport)
    }
}

impl BoundingPlanes for Frustum {
    #[inline]
    fn left(&self) -> &Plane {
        &self.planes[Self::LEFT]
    }

    #[inline]
    fn right(&self) -> &Plane {
        &self.planes[Self::RIGHT]
    }

    #[inline]
    fn bottom(&self) -> &Plane {
        &self.planes[Self::BOTTOM]
    }

    #[inline]
    fn top(&self) -> &Plane {
        &self.planes[Self::TOP]
    }

    #[inline]
    fn near(&self) -> &Plane {
        &self.planes[Self::NEAR]
    }

    #[inline]
    fn far(&self) -> &Plane {
        &self.planes[Self::FAR]
    }
}

#[cfg(test)]
mod test {
    use super::{BoundingPlanes, Frustum};
    use crate::{mat4::Mat4, plane::Plane, vec3::Vec3, viewport::Viewport};

    #[test]
    fn test_unit_frustum_boundary() {
        let f = Frustum::default();
        assert!(f.contains_point(&Vec3::ZERO));
        assert!(!f.contains_point(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(f.contains_point(&Vec3::new(1.0 - 1.0e-7, 0.0, 0.0)));
        assert!(!f.contains_point(&Vec3::new(1.0 + 1.0e-7, 0.0, 0.0)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, -1.0)));
        assert!(f.contains_point(&Vec3::new(0.0, 0.0, -1.0 + 1.0e-7)));
    }

    #[test]
    fn test_identity_projection_gives_unit_frustum() {
        let mut f = Frustum::default();
        f.transform_by_matrix(&Mat4::IDENTITY);
        f.set_to_projection_matrix(&Mat4::IDENTITY);
        assert_eq!(f, Frustum::default());
        assert_eq!(f.left(), &Plane::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(f.far(), &Plane::new(0.0, 0.0, -1.0, 1.0));
    }

    #[test]
    fn test_perspective_frustum() {
        let mut projection = Mat4::IDENTITY;
        projection
            .set_to_perspective_projection(100.0, 100.0, 90.0, 1.0, 100.0)
            .unwrap();
        let mut f = Frustum::default();
        f.set_to_projection_matrix(&projection);

        for plane in f.planes() {
            assert!((plane.normal.magnitude() - 1.0).abs() < 1.0e-12);
        }
        assert!(f.contains_point(&Vec3::new(0.0, 0.0, -10.0)));
        assert!(f.contains_point(&Vec3::new(9.0, -9.0, -10.0)));
        assert!(!f.contains_point(&Vec3::new(11.0, 0.0, -10.0)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, -0.5)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, -101.0)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, 10.0)));
        assert!((f.near().dot(&Vec3::new(0.0, 0.0, -1.0))).abs() < 1.0e-12);
    }

    #[test]
    fn test_modelview_projection_frustum() {
        let mut projection = Mat4::IDENTITY;
        projection
            .set_to_perspective_projection(100.0, 100.0, 90.0, 1.0, 100.0)
            .unwrap();
        // Eye at z = 10 looking toward the origin.
        let mut modelview = Mat4::IDENTITY;
        modelview.set_to_translation(0.0, 0.0, -10.0);
        let viewport = Viewport::new(0, 0, 100, 100);

        let mut f = Frustum::default();
        f.set_to_modelview_projection(&projection, &modelview, &viewport);
        assert!(f.contains_point(&Vec3::ZERO));
        assert!(f.contains_point(&Vec3::new(0.0, 0.0, -80.0)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, 9.5)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, 20.0)));
        assert!(!f.contains_point(&Vec3::new(0.0, 0.0, -95.0)));
        assert!(f.intersects_viewport(&Viewport::new(50, 50, 100, 100)));
        assert!(!f.intersects_viewport(&Viewport::new(100, 0, 10, 10)));
        assert_eq!(f.viewport(), &viewport);
    }

    #[test]
    fn test_intersects_segment() {
        let f = Frustum::default();

        // One endpoint inside.
        assert!(f.intersects_segment(&Vec3::ZERO, &Vec3::new(5.0, 0.0, 0.0)));
        // Passing through the whole frustum.
        assert!(f.intersects_segment(&Vec3::new(-5.0, 0.0, 0.0), &Vec3::new(5.0, 0.0, 0.0)));
        // Behind one plane.
        assert!(!f.intersects_segment(&Vec3::new(2.0, 0.0, 0.0), &Vec3::new(3.0, 5.0, 0.0)));
        // Degenerate segment outside.
        let p = Vec3::new(2.0, 2.0, 2.0);
        assert!(!f.intersects_segment(&p, &p));
    }
}
