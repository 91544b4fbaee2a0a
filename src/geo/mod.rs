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

//! Geographic helpers: angle normalization, locations on a sphere, sectors and globes that map
//! geographic positions into Cartesian coordinates. All angles are in degrees.

mod globe;
mod location;
mod sector;

pub use globe::{Ellipsoid, Globe};
pub use location::{Location, PathType};
pub use sector::Sector;

/// Wraps an angle into [-180, 180].
pub fn normalize_angle180(degrees: f64) -> f64 {
    let angle = degrees % 360.0;
    if angle > 180.0 {
        angle - 360.0
    } else if angle >= -180.0 {
        angle
    } else {
        angle + 360.0
    }
}

/// Wraps an angle into [0, 360).
pub fn normalize_angle360(degrees: f64) -> f64 {
    let angle = degrees % 360.0;
    if angle >= 0.0 {
        angle
    } else {
        angle + 360.0
    }
}

/// Folds a latitude into [-90, 90]. Latitudes beyond a pole continue on the other side of it, so
/// 100 becomes 80 and -100 becomes -80.
pub fn normalize_latitude(degrees: f64) -> f64 {
    let lat = normalize_angle180(degrees);
    if lat > 90.0 {
        180.0 - lat
    } else if lat < -90.0 {
        -180.0 - lat
    } else {
        lat
    }
}

/// Wraps a longitude into [-180, 180].
pub fn normalize_longitude(degrees: f64) -> f64 {
    normalize_angle180(degrees)
}

pub fn clamp_latitude(degrees: f64) -> f64 {
    degrees.clamp(-90.0, 90.0)
}

pub fn clamp_longitude(degrees: f64) -> f64 {
    degrees.clamp(-180.0, 180.0)
}

/// Linear interpolation: amount 0 gives `a`, amount 1 gives `b`.
#[inline]
pub fn interpolate(amount: f64, a: f64, b: f64) -> f64 {
    (1.0 - amount) * a + amount * b
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_angles() {
        assert_eq!(normalize_angle180(190.0), -170.0);
        assert_eq!(normalize_angle180(-190.0), 170.0);
        assert_eq!(normalize_angle180(180.0), 180.0);
        assert_eq!(normalize_angle180(540.0), 180.0);
        assert_eq!(normalize_angle360(-90.0), 270.0);
        assert_eq!(normalize_angle360(720.0), 0.0);
        assert_eq!(normalize_longitude(181.0), -179.0);
    }

    #[test]
    fn test_normalize_latitude() {
        assert_eq!(normalize_latitude(45.0), 45.0);
        assert_eq!(normalize_latitude(100.0), 80.0);
        assert_eq!(normalize_latitude(-100.0), -80.0);
        assert_eq!(normalize_latitude(190.0), -10.0);
        assert_eq!(normalize_latitude(-190.0), 10.0);
        assert_eq!(normalize_latitude(360.0), 0.0);
        assert_eq!(normalize_latitude(270.0), -90.0);
        assert!(normalize_latitude(f64::NAN).is_nan());
    }

    #[test]
    fn test_clamp_and_interpolate() {
        assert_eq!(clamp_latitude(95.0), 90.0);
        assert_eq!(clamp_longitude(-200.0), -180.0);
        assert_eq!(interpolate(0.25, 0.0, 8.0), 2.0);
    }
}
