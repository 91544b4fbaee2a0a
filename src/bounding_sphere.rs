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
    frustum::BoundingPlanes,
    vec3::Vec3,
};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f64,
}

impl Default for BoundingSphere {
    /// Unit sphere at the origin.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.0,
        }
    }
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f64) -> Result<Self> {
        let mut sphere = Self::default();
        sphere.set(center, radius)?;
        Ok(sphere)
    }

    #[inline]
    pub fn center(&self) -> &Vec3 {
        &self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fails on a negative or NaN radius, the sphere is left untouched in that case.
    pub fn set(&mut self, center: Vec3, radius: f64) -> Result<&mut Self> {
        if !(radius >= 0.0) {
            return Err(GeomError::invalid_argument(
                "BoundingSphere",
                "set",
                format!("radius {radius} is not a non-negative number"),
            ));
        }
        self.center = center;
        self.radius = radius;
        Ok(self)
    }

    /// Rejects the sphere if it lies entirely behind one of the planes. Planes must be
    /// normalized.
    pub fn intersects_frustum<P: BoundingPlanes>(&self, frustum: &P) -> bool {
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
            .all(|plane| plane.dot(&self.center) > -self.radius)
    }
}

#[cfg(test)]
mod test {
    use super::BoundingSphere;
    use crate::{frustum::Frustum, vec3::Vec3};

    #[test]
    fn test_negative_radius() {
        assert!(BoundingSphere::new(Vec3::ZERO, -1.0)
            .unwrap_err()
            .is_invalid_argument());
        let mut s = BoundingSphere::default();
        assert!(s.set(Vec3::X, -0.5).is_err());
        assert_eq!(s, BoundingSphere::default());
        assert!(BoundingSphere::new(Vec3::ZERO, f64::NAN)
            .unwrap_err()
            .is_invalid_argument());
        assert!(s.set(Vec3::X, f64::NAN).is_err());
        assert_eq!(s, BoundingSphere::default());
        s.set(Vec3::X, 0.0).unwrap();
        assert_eq!(s.radius(), 0.0);
        assert_eq!(s.center(), &Vec3::X);
    }

    #[test]
    fn test_sphere_against_unit_frustum() {
        let f = Frustum::default();
        let inside = BoundingSphere::new(Vec3::ZERO, 0.5).unwrap();
        assert!(inside.intersects_frustum(&f));

        // Overlaps the right face.
        let overlapping = BoundingSphere::new(Vec3::new(1.4, 0.0, 0.0), 0.5).unwrap();
        assert!(overlapping.intersects_frustum(&f));

        // Touches the right face from outside.
        let touching = BoundingSphere::new(Vec3::new(1.5, 0.0, 0.0), 0.5).unwrap();
        assert!(!touching.intersects_frustum(&f));

        let behind = BoundingSphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap();
        assert!(!behind.intersects_frustum(&f));
    }
}
