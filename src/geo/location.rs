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

use super::{normalize_latitude, normalize_longitude};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Kind of path between two locations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    /// Shortest path on the sphere.
    #[default]
    GreatCircle,
    /// Path of constant azimuth.
    Rhumb,
}

/// Geographic location in degrees. Distances between locations are angles in radians, multiply
/// them by a globe radius to get a length.
///
/// Nothing is validated here: NaN coordinates produce NaN results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline]
    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.to_degrees(), longitude.to_degrees())
    }

    #[inline]
    pub fn set(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Azimuth in degrees, clockwise from north, of the great circle path from this location
    /// toward `other`.
    pub fn great_circle_azimuth(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let lon2 = other.longitude.to_radians();

        if lat1 == lat2 && lon1 == lon2 {
            return 0.0;
        }

        if lon1 == lon2 {
            return if lat1 > lat2 { 180.0 } else { 0.0 };
        }

        let y = lat2.cos() * (lon2 - lon1).sin();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();
        y.atan2(x).to_degrees()
    }

    /// Great circle angular distance to `other` in radians, computed with the haversine formula.
    pub fn great_circle_distance(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let lon2 = other.longitude.to_radians();

        if lat1 == lat2 && lon1 == lon2 {
            return 0.0;
        }

        let a = ((lat2 - lat1) / 2.0).sin();
        let b = ((lon2 - lon1) / 2.0).sin();
        // Rounding may push the haversine slightly out of [0, 1] near antipodes.
        let c = (a * a + lat1.cos() * lat2.cos() * b * b).clamp(0.0, 1.0);

        2.0 * c.sqrt().asin()
    }

    /// Location at the given angular distance (radians) along the great circle leaving this
    /// location with `azimuth_degrees`.
    pub fn great_circle_location(&self, azimuth_degrees: f64, distance_radians: f64) -> Location {
        if distance_radians == 0.0 {
            return *self;
        }

        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let azimuth = azimuth_degrees.to_radians();
        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let (sin_d, cos_d) = distance_radians.sin_cos();

        let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * azimuth.cos()).asin();
        let lon2 = lon1
            + (sin_d * azimuth.sin()).atan2(cos_lat1 * cos_d - sin_lat1 * sin_d * azimuth.cos());

        if lat2.is_nan() || lon2.is_nan() {
            Location::new(f64::NAN, f64::NAN)
        } else {
            Location::new(
                normalize_latitude(lat2.to_degrees()),
                normalize_longitude(lon2.to_degrees()),
            )
        }
    }

    /// Azimuth in degrees, clockwise from north, of the rhumb line from this location toward
    /// `other`.
    pub fn rhumb_azimuth(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let lon2 = other.longitude.to_radians();

        if lat1 == lat2 && lon1 == lon2 {
            return 0.0;
        }

        let d_lon = wrap_longitude_delta(lon2 - lon1);
        let d_phi = mercator_delta(lat1, lat2);

        d_lon.atan2(d_phi).to_degrees()
    }

    /// Rhumb line angular distance to `other` in radians.
    pub fn rhumb_distance(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let lon2 = other.longitude.to_radians();

        if lat1 == lat2 && lon1 == lon2 {
            return 0.0;
        }

        let d_lat = lat2 - lat1;
        let d_lon = wrap_longitude_delta(lon2 - lon1);

        // East-west lines have no Mercator stretch to divide by.
        let q = if d_lat.abs() < 1.0e-10 {
            lat1.cos()
        } else {
            d_lat / mercator_delta(lat1, lat2)
        };

        (d_lat * d_lat + q * q * d_lon * d_lon).sqrt()
    }

    /// Location at the given angular distance (radians) along the rhumb line leaving this
    /// location with `azimuth_degrees`.
    pub fn rhumb_location(&self, azimuth_degrees: f64, distance_radians: f64) -> Location {
        if distance_radians == 0.0 {
            return *self;
        }

        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let azimuth = azimuth_degrees.to_radians();

        let mut lat2 = lat1 + distance_radians * azimuth.cos();
        let d_phi = mercator_delta(lat1, lat2);
        let mut q = (lat2 - lat1) / d_phi;
        if !q.is_finite() {
            q = lat1.cos();
        }
        let d_lon = distance_radians * azimuth.sin() / q;

        // Crossing a pole.
        if lat2.abs() > FRAC_PI_2 {
            lat2 = if lat2 > 0.0 { PI - lat2 } else { -PI - lat2 };
        }

        let lon2 = (lon1 + d_lon + PI).rem_euclid(2.0 * PI) - PI;

        if lat2.is_nan() || lon2.is_nan() {
            Location::new(f64::NAN, f64::NAN)
        } else {
            Location::new(
                normalize_latitude(lat2.to_degrees()),
                normalize_longitude(lon2.to_degrees()),
            )
        }
    }

    /// Location at `amount` (0 gives this location, 1 gives `end`) along the path of the given
    /// kind between this location and `end`.
    pub fn interpolate_along_path(
        &self,
        end: &Location,
        path_type: PathType,
        amount: f64,
    ) -> Location {
        if self == end {
            return *self;
        }

        match path_type {
            PathType::GreatCircle => {
                let azimuth = self.great_circle_azimuth(end);
                let distance = self.great_circle_distance(end);
                self.great_circle_location(azimuth, amount * distance)
            }
            PathType::Rhumb => {
                let azimuth = self.rhumb_azimuth(end);
                let distance = self.rhumb_distance(end);
                self.rhumb_location(azimuth, amount * distance)
            }
        }
    }
}

/// Difference of Mercator-projected latitudes (radians).
#[inline]
fn mercator_delta(lat1: f64, lat2: f64) -> f64 {
    ((lat2 / 2.0 + FRAC_PI_4).tan() / (lat1 / 2.0 + FRAC_PI_4).tan()).ln()
}

/// Takes the short way around the antimeridian.
#[inline]
fn wrap_longitude_delta(d_lon: f64) -> f64 {
    if d_lon.abs() > PI {
        if d_lon > 0.0 {
            -(2.0 * PI - d_lon)
        } else {
            2.0 * PI + d_lon
        }
    } else {
        d_lon
    }
}

#[cfg(test)]
mod test {
    use super::{Location, PathType};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_location_close(a: &Location, b: &Location, eps: f64) {
        assert!(
            (a.latitude - b.latitude).abs() < eps && (a.longitude - b.longitude).abs() < eps,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_great_circle_distance_is_symmetric() {
        let locations = [
            Location::new(0.0, 0.0),
            Location::new(34.2, -119.2),
            Location::new(-45.0, 170.0),
            Location::new(89.0, 10.0),
            Location::new(-12.5, -179.5),
        ];
        for a in locations.iter() {
            for b in locations.iter() {
                let ab = a.great_circle_distance(b);
                let ba = b.great_circle_distance(a);
                assert!((ab - ba).abs() < 1.0e-12);
                assert!(ab >= 0.0 && ab <= PI);
            }
        }
    }

    #[test]
    fn test_antipodal_distance() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 180.0);
        assert!((a.great_circle_distance(&b) - PI).abs() < 1.0e-10);

        let a = Location::new(30.0, 45.0);
        let b = Location::new(-30.0, -135.0);
        assert!((a.great_circle_distance(&b) - PI).abs() < 1.0e-10);

        let north = Location::new(90.0, 0.0);
        let south = Location::new(-90.0, 0.0);
        assert!((north.great_circle_distance(&south) - PI).abs() < 1.0e-10);
    }

    #[test]
    fn test_nan_propagates() {
        let a = Location::new(f64::NAN, 0.0);
        let b = Location::new(10.0, 10.0);
        assert!(a.great_circle_distance(&b).is_nan());
        assert!(a.great_circle_azimuth(&b).is_nan());
        assert!(a.rhumb_distance(&b).is_nan());
        let c = a.great_circle_location(45.0, 0.1);
        assert!(c.latitude.is_nan() && c.longitude.is_nan());
    }

    #[test]
    fn test_great_circle_azimuth() {
        let origin = Location::new(0.0, 0.0);
        assert_eq!(origin.great_circle_azimuth(&origin), 0.0);
        assert_eq!(origin.great_circle_azimuth(&Location::new(10.0, 0.0)), 0.0);
        assert_eq!(origin.great_circle_azimuth(&Location::new(-10.0, 0.0)), 180.0);
        assert!((origin.great_circle_azimuth(&Location::new(0.0, 10.0)) - 90.0).abs() < 1.0e-12);
        assert!((origin.great_circle_azimuth(&Location::new(0.0, -10.0)) + 90.0).abs() < 1.0e-12);
    }

    #[test]
    fn test_great_circle_location() {
        let origin = Location::new(0.0, 0.0);
        let north = origin.great_circle_location(0.0, FRAC_PI_2);
        assert_location_close(&north, &Location::new(90.0, 0.0), 1.0e-9);

        let east = origin.great_circle_location(90.0, PI / 4.0);
        assert_location_close(&east, &Location::new(0.0, 45.0), 1.0e-9);

        // Travelling along the computed path reaches the destination.
        let start = Location::new(34.2, -119.2);
        let end = Location::new(51.5, -0.1);
        let reached = start.great_circle_location(
            start.great_circle_azimuth(&end),
            start.great_circle_distance(&end),
        );
        assert_location_close(&reached, &end, 1.0e-9);
    }

    #[test]
    fn test_rhumb_line() {
        let start = Location::new(10.0, 20.0);
        let end = Location::new(40.0, 60.0);
        let azimuth = start.rhumb_azimuth(&end);
        let distance = start.rhumb_distance(&end);
        let reached = start.rhumb_location(azimuth, distance);
        assert_location_close(&reached, &end, 1.0e-9);

        // Along the equator rhumb and great circle paths coincide.
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 30.0);
        assert!((a.rhumb_distance(&b) - a.great_circle_distance(&b)).abs() < 1.0e-12);
        assert!((a.rhumb_azimuth(&b) - 90.0).abs() < 1.0e-12);

        // The short way across the antimeridian.
        let a = Location::new(0.0, 170.0);
        let b = Location::new(0.0, -170.0);
        assert!((a.rhumb_distance(&b) - 20.0f64.to_radians()).abs() < 1.0e-12);
        assert!((a.rhumb_azimuth(&b) - 90.0).abs() < 1.0e-12);
    }

    #[test]
    fn test_interpolate_along_path() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.0, 90.0);
        for path_type in [PathType::GreatCircle, PathType::Rhumb] {
            let mid = a.interpolate_along_path(&b, path_type, 0.5);
            assert_location_close(&mid, &Location::new(0.0, 45.0), 1.0e-9);
            assert_eq!(a.interpolate_along_path(&b, path_type, 0.0), a);
            assert_location_close(&a.interpolate_along_path(&b, path_type, 1.0), &b, 1.0e-9);
            assert_eq!(a.interpolate_along_path(&a, path_type, 0.5), a);
        }
    }
}
