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

//! Oriented bounding box used for view frustum culling of terrain tiles and shapes.
//!
//! The box is stored as its center, three orthogonal axes R, S and T scaled to the box size and
//! sorted from the longest to the shortest, and the centers of the two faces perpendicular to R.
//! Frustum tests treat the box as a capsule-like volume swept along R, which is exact for the
//! faces of the box and slightly conservative at its edges.

use crate::{
    error::{GeomError, Result},
    frustum::BoundingPlanes,
    geo::{Globe, Sector},
    mat4::Mat4,
    plane::Plane,
    vec3::{self, Vec3},
};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Working segment of a box frustum test. It starts as the R axis of the box and is trimmed by
/// each plane the box straddles. Owned by the caller, so that repeated tests do not need any
/// shared scratch state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CullingSegment {
    pub a: Vec3,
    pub b: Vec3,
}

/// Extremes of the point projections onto a unit axis.
#[derive(Copy, Clone, Debug)]
struct AxisExtent {
    axis: Vec3,
    min: f64,
    max: f64,
}

impl AxisExtent {
    fn new(axis: Vec3) -> Self {
        Self {
            axis,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, point: &Vec3) {
        let d = point.dot(&self.axis);
        self.min = self.min.min(d);
        self.max = self.max.max(d);
    }

    fn length(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    center: Vec3,
    bottom_center: Vec3,
    top_center: Vec3,
    r: Vec3,
    s: Vec3,
    t: Vec3,
    radius: f64,
}

impl Default for BoundingBox {
    /// The box [-1, 1] on every axis.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            bottom_center: Vec3::new(-1.0, 0.0, 0.0),
            top_center: Vec3::new(1.0, 0.0, 0.0),
            r: Vec3::new(2.0, 0.0, 0.0),
            s: Vec3::new(0.0, 2.0, 0.0),
            t: Vec3::new(0.0, 0.0, 2.0),
            radius: 3.0f64.sqrt(),
        }
    }
}

impl BoundingBox {
    #[inline]
    pub fn center(&self) -> &Vec3 {
        &self.center
    }

    /// Center of the face at the start of the R axis.
    #[inline]
    pub fn bottom_center(&self) -> &Vec3 {
        &self.bottom_center
    }

    /// Center of the face at the end of the R axis.
    #[inline]
    pub fn top_center(&self) -> &Vec3 {
        &self.top_center
    }

    /// Longest axis, its length is the box size along it.
    #[inline]
    pub fn r(&self) -> &Vec3 {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &Vec3 {
        &self.s
    }

    /// Shortest axis.
    #[inline]
    pub fn t(&self) -> &Vec3 {
        &self.t
    }

    /// Half of the box diagonal: radius of the sphere around the box.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_to_unit_box(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    pub fn is_unit_box(&self) -> bool {
        *self == Self::default()
    }

    /// Fits the box around interleaved vertices, the first three values of every `stride`
    /// values are the coordinates of a vertex. The axes are the principal components of the
    /// point set.
    pub fn set_to_points(&mut self, points: &[f32], stride: usize) -> Result<&mut Self> {
        vec3::validate_vertex_buffer("BoundingBox", "set_to_points", points, stride)?;
        Ok(self.set_to_principal_axes(vec3::vertices(points, stride)))
    }

    /// Same as [`Self::set_to_points`] for a slice of vectors.
    pub fn set_to_vec3_points(&mut self, points: &[Vec3]) -> Result<&mut Self> {
        if points.is_empty() {
            return Err(GeomError::invalid_argument(
                "BoundingBox",
                "set_to_vec3_points",
                "point slice is empty",
            ));
        }
        Ok(self.set_to_principal_axes(points.iter().copied()))
    }

    fn set_to_principal_axes<I>(&mut self, points: I) -> &mut Self
    where
        I: Iterator<Item = Vec3> + Clone,
    {
        let mut covariance = Mat4::IDENTITY;
        covariance.set_to_covariance_of_vertices(points.clone());

        // Unit eigenvectors keep their direction even for zero variance, which scaled ones
        // would lose.
        let axes = match covariance.symmetric_eigen() {
            Some(pairs) => pairs.map(|pair| pair.vector),
            None => {
                // Only NaN coordinates make the covariance compare as non-symmetric.
                crate::warn!("BoundingBox: no principal axes for the points, using X, Y and Z");
                [Vec3::X, Vec3::Y, Vec3::Z]
            }
        };

        let mut extents = axes.map(AxisExtent::new);
        for p in points {
            for extent in extents.iter_mut() {
                extent.include(&p);
            }
        }

        self.set_to_extents(extents)
    }

    /// Fits the box around a geographic sector between two heights. The axes are the local
    /// east, north and up directions at the sector centroid.
    pub fn set_to_sector<G: Globe>(
        &mut self,
        sector: &Sector,
        globe: &G,
        min_height: f64,
        max_height: f64,
    ) -> Result<&mut Self> {
        if sector.is_empty() {
            return Err(GeomError::invalid_argument(
                "BoundingBox",
                "set_to_sector",
                "sector is empty",
            ));
        }

        // A 3x3 grid is enough to bound the curvature of the sector. Corners use the minimum
        // height, the edge midpoints and the center use the maximum.
        let heights = [
            min_height, max_height, min_height, //
            max_height, max_height, max_height, //
            min_height, max_height, min_height,
        ];
        let mut points = ArrayVec::<Vec3, 9>::new();
        globe.geographic_to_cartesian_grid(sector, 3, 3, Some(&heights[..]), &mut points)?;

        let frame = globe.geographic_to_cartesian_transform(
            sector.centroid_latitude(),
            sector.centroid_longitude(),
            0.0,
        );
        let m = &frame.m;
        let axes = [
            Vec3::new(m[0], m[4], m[8]),
            Vec3::new(m[1], m[5], m[9]),
            Vec3::new(m[2], m[6], m[10]),
        ];

        let mut extents = axes.map(AxisExtent::new);
        for p in points.iter() {
            for extent in extents.iter_mut() {
                extent.include(p);
            }
        }

        Ok(self.set_to_extents(extents))
    }

    fn set_to_extents(&mut self, mut extents: [AxisExtent; 3]) -> &mut Self {
        // Flat point sets still get a box with volume.
        for extent in extents.iter_mut() {
            if extent.max == extent.min {
                extent.max = extent.min + 1.0;
            }
        }

        // Culling relies on R being the longest axis.
        extents.sort_by(|a, b| b.length().total_cmp(&a.length()));
        let [r, s, t] = extents;

        self.center = r.axis * (0.5 * (r.min + r.max))
            + s.axis * (0.5 * (s.min + s.max))
            + t.axis * (0.5 * (t.min + t.max));

        let r_half = r.axis * (0.5 * r.length());
        self.bottom_center = self.center - r_half;
        self.top_center = self.center + r_half;

        self.r = r.axis * r.length();
        self.s = s.axis * s.length();
        self.t = t.axis * t.length();

        self.radius =
            0.5 * (r.length() * r.length() + s.length() * s.length() + t.length() * t.length())
                .sqrt();

        self
    }

    /// Approximate distance from the point to the box: the smallest distance to the center, the
    /// ends of the R axis and the centers of the S and T faces.
    pub fn distance_to(&self, point: &Vec3) -> f64 {
        let half_s = self.s * 0.5;
        let half_t = self.t * 0.5;
        [
            self.center,
            self.bottom_center,
            self.top_center,
            self.center - half_s,
            self.center + half_s,
            self.center - half_t,
            self.center + half_t,
        ]
        .iter()
        .map(|p| p.distance_to_squared(point))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
    }

    /// Checks whether the box intersects the frustum. See [`Self::intersects_frustum_with`].
    pub fn intersects_frustum<P: BoundingPlanes>(&self, frustum: &P) -> bool {
        let mut segment = CullingSegment::default();
        self.intersects_frustum_with(frustum, &mut segment)
    }

    /// Checks whether the box intersects the frustum, using `segment` as working storage. On
    /// return the segment holds the part of the R axis that survived clipping. Planes must be
    /// normalized.
    pub fn intersects_frustum_with<P: BoundingPlanes>(
        &self,
        frustum: &P,
        segment: &mut CullingSegment,
    ) -> bool {
        segment.a = self.bottom_center;
        segment.b = self.top_center;

        let planes = [
            frustum.near(),
            frustum.far(),
            frustum.left(),
            frustum.right(),
            frustum.top(),
            frustum.bottom(),
        ];

        planes
            .iter()
            .all(|plane| self.clip_segment(plane, segment).is_some())
    }

    /// Clips the working segment against the plane grown by the box extent across R. Returns
    /// `None` when the whole segment is behind, otherwise the fraction at which the segment was
    /// cut, or zero when it was not cut.
    fn clip_segment(&self, plane: &Plane, segment: &mut CullingSegment) -> Option<f64> {
        let n = &plane.normal;
        let effective_radius = 0.5 * (self.s.dot(n).abs() + self.t.dot(n).abs());

        let dq1 = plane.dot(&segment.a);
        let bq1 = dq1 <= -effective_radius;
        let dq2 = plane.dot(&segment.b);
        let bq2 = dq2 <= -effective_radius;

        if bq1 && bq2 {
            return None;
        }

        if bq1 == bq2 {
            return Some(0.0);
        }

        // Move the outside endpoint onto the grown plane.
        let t = (effective_radius + dq1) / n.dot(&(segment.a - segment.b));
        let point = segment.a + (segment.b - segment.a) * t;
        if bq1 {
            segment.a = point;
        } else {
            segment.b = point;
        }

        Some(t)
    }
}
