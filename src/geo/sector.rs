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

/// Rectangular region in geographic coordinates, bounded by two latitudes and two longitudes
/// in degrees. A sector with NaN bounds is empty, which is also the default state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
}

impl Default for Sector {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Sector {
    pub const EMPTY: Self = Self {
        min_latitude: f64::NAN,
        max_latitude: f64::NAN,
        min_longitude: f64::NAN,
        max_longitude: f64::NAN,
    };

    pub const FULL_SPHERE: Self = Self {
        min_latitude: -90.0,
        max_latitude: 90.0,
        min_longitude: -180.0,
        max_longitude: 180.0,
    };

    /// Creates a sector from its south-west corner and its size.
    pub fn from_degrees(
        min_latitude: f64,
        min_longitude: f64,
        delta_latitude: f64,
        delta_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude: min_latitude + delta_latitude,
            min_longitude,
            max_longitude: min_longitude + delta_longitude,
        }
    }

    #[inline]
    pub fn min_latitude(&self) -> f64 {
        self.min_latitude
    }

    #[inline]
    pub fn max_latitude(&self) -> f64 {
        self.max_latitude
    }

    #[inline]
    pub fn min_longitude(&self) -> f64 {
        self.min_longitude
    }

    #[inline]
    pub fn max_longitude(&self) -> f64 {
        self.max_longitude
    }

    #[inline]
    pub fn delta_latitude(&self) -> f64 {
        self.max_latitude - self.min_latitude
    }

    #[inline]
    pub fn delta_longitude(&self) -> f64 {
        self.max_longitude - self.min_longitude
    }

    #[inline]
    pub fn centroid_latitude(&self) -> f64 {
        0.5 * (self.min_latitude + self.max_latitude)
    }

    #[inline]
    pub fn centroid_longitude(&self) -> f64 {
        0.5 * (self.min_longitude + self.max_longitude)
    }

    pub fn is_empty(&self) -> bool {
        self.delta_latitude().is_nan() || self.delta_longitude().is_nan()
    }

    pub fn is_full_sphere(&self) -> bool {
        *self == Self::FULL_SPHERE
    }

    pub fn set_empty(&mut self) -> &mut Self {
        *self = Self::EMPTY;
        self
    }

    /// Checks whether the location is inside the sector, boundaries included.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.min_latitude <= latitude
            && self.max_latitude >= latitude
            && self.min_longitude <= longitude
            && self.max_longitude >= longitude
    }

    /// Checks whether the sectors share some area. Sectors touching only along an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Sector) -> bool {
        self.min_latitude < other.max_latitude
            && self.max_latitude > other.min_latitude
            && self.min_longitude < other.max_longitude
            && self.max_longitude > other.min_longitude
    }

    /// Grows this sector to include `other`. Empty sectors contribute nothing.
    pub fn union(&mut self, other: &Sector) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            *self = *other;
            return self;
        }
        self.min_latitude = self.min_latitude.min(other.min_latitude);
        self.max_latitude = self.max_latitude.max(other.max_latitude);
        self.min_longitude = self.min_longitude.min(other.min_longitude);
        self.max_longitude = self.max_longitude.max(other.max_longitude);
        self
    }
}

#[cfg(test)]
mod test {
    use super::Sector;

    #[test]
    fn test_empty_sector() {
        let s = Sector::default();
        assert!(s.is_empty());
        assert!(!s.contains(0.0, 0.0));
        assert!(!s.intersects(&Sector::FULL_SPHERE));
        assert!(!Sector::FULL_SPHERE.is_empty());
        assert!(Sector::FULL_SPHERE.is_full_sphere());
    }

    #[test]
    fn test_sector_geometry() {
        let s = Sector::from_degrees(10.0, 20.0, 4.0, 6.0);
        assert_eq!(s.max_latitude(), 14.0);
        assert_eq!(s.max_longitude(), 26.0);
        assert_eq!(s.centroid_latitude(), 12.0);
        assert_eq!(s.centroid_longitude(), 23.0);
        assert!(s.contains(10.0, 26.0));
        assert!(!s.contains(9.9, 23.0));
    }

    #[test]
    fn test_sector_intersection_and_union() {
        let a = Sector::from_degrees(0.0, 0.0, 10.0, 10.0);
        let b = Sector::from_degrees(5.0, 5.0, 10.0, 10.0);
        let edge = Sector::from_degrees(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&edge));

        let mut u = Sector::default();
        u.union(&a).union(&b).union(&Sector::EMPTY);
        assert_eq!(u, Sector::from_degrees(0.0, 0.0, 15.0, 15.0));
    }
}
