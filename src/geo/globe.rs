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

use super::Sector;
use crate::{
    error::{GeomError, Result},
    mat4::Mat4,
    vec3::Vec3,
};
use serde::{Deserialize, Serialize};

/// Mapping of geographic positions into the Cartesian coordinate system of a globe.
///
/// The Cartesian system has its origin at the globe center, Y toward the north pole, Z toward
/// the intersection of the equator and the prime meridian and X toward 90 degrees east.
pub trait Globe {
    /// Cartesian point of a geographic position. Latitude and longitude are in degrees, the
    /// altitude is in meters above the surface.
    fn geographic_to_cartesian(&self, latitude: f64, longitude: f64, altitude: f64) -> Vec3;

    /// Local frame at a geographic position: the columns of the rotation block are the east,
    /// north and up directions, the translation is the Cartesian point of the position.
    fn geographic_to_cartesian_transform(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> Mat4;

    /// Computes a grid of Cartesian points covering `sector`, with `num_lat` rows from the
    /// southern to the northern edge and `num_lon` columns from the western to the eastern edge.
    /// Points are emitted row by row. `heights`, when given, holds one altitude per point in
    /// the same order.
    fn geographic_to_cartesian_grid<E>(
        &self,
        sector: &Sector,
        num_lat: usize,
        num_lon: usize,
        heights: Option<&[f64]>,
        out: &mut E,
    ) -> Result<()>
    where
        E: Extend<Vec3>,
        Self: Sized,
    {
        if num_lat < 1 || num_lon < 1 {
            return Err(GeomError::invalid_argument(
                "Globe",
                "geographic_to_cartesian_grid",
                format!("grid size {num_lat}x{num_lon} is empty"),
            ));
        }
        if let Some(heights) = heights {
            if heights.len() < num_lat * num_lon {
                return Err(GeomError::invalid_argument(
                    "Globe",
                    "geographic_to_cartesian_grid",
                    format!(
                        "{} heights given for a {num_lat}x{num_lon} grid",
                        heights.len()
                    ),
                ));
            }
        }

        let delta_lat = sector.delta_latitude() / num_lat.saturating_sub(1).max(1) as f64;
        let delta_lon = sector.delta_longitude() / num_lon.saturating_sub(1).max(1) as f64;

        let mut index = 0;
        for row in 0..num_lat {
            // Last row and column land exactly on the sector edges.
            let latitude = if row + 1 == num_lat && num_lat > 1 {
                sector.max_latitude()
            } else {
                sector.min_latitude() + row as f64 * delta_lat
            };
            for column in 0..num_lon {
                let longitude = if column + 1 == num_lon && num_lon > 1 {
                    sector.max_longitude()
                } else {
                    sector.min_longitude() + column as f64 * delta_lon
                };
                let altitude = heights.map_or(0.0, |h| h[index]);
                out.extend(std::iter::once(self.geographic_to_cartesian(
                    latitude, longitude, altitude,
                )));
                index += 1;
            }
        }

        Ok(())
    }
}

/// Ellipsoid of revolution around the polar axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    semi_major_axis: f64,
    inverse_flattening: f64,
    eccentricity_squared: f64,
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Ellipsoid {
    pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6378137.0;
    pub const WGS84_INVERSE_FLATTENING: f64 = 298.257223563;

    /// Creates an ellipsoid from its equatorial radius in meters and inverse flattening.
    pub fn new(semi_major_axis: f64, inverse_flattening: f64) -> Result<Self> {
        if !(semi_major_axis > 0.0) || !(inverse_flattening > 0.0) {
            return Err(GeomError::invalid_argument(
                "Ellipsoid",
                "new",
                format!(
                    "semi-major axis {semi_major_axis} and inverse flattening \
                     {inverse_flattening} must be positive"
                ),
            ));
        }
        Ok(Self::new_unchecked(semi_major_axis, inverse_flattening))
    }

    fn new_unchecked(semi_major_axis: f64, inverse_flattening: f64) -> Self {
        let f = 1.0 / inverse_flattening;
        Self {
            semi_major_axis,
            inverse_flattening,
            eccentricity_squared: 2.0 * f - f * f,
        }
    }

    /// The World Geodetic System 1984 ellipsoid.
    pub fn wgs84() -> Self {
        Self::new_unchecked(Self::WGS84_SEMI_MAJOR_AXIS, Self::WGS84_INVERSE_FLATTENING)
    }

    #[inline]
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    #[inline]
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - 1.0 / self.inverse_flattening)
    }

    #[inline]
    pub fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    #[inline]
    pub fn eccentricity_squared(&self) -> f64 {
        self.eccentricity_squared
    }

    /// Radius of curvature in the prime vertical at the given latitude sine.
    #[inline]
    fn prime_vertical_radius(&self, sin_lat: f64) -> f64 {
        self.semi_major_axis / (1.0 - self.eccentricity_squared * sin_lat * sin_lat).sqrt()
    }
}

impl Globe for Ellipsoid {
    fn geographic_to_cartesian(&self, latitude: f64, longitude: f64, altitude: f64) -> Vec3 {
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
        let rpm = self.prime_vertical_radius(sin_lat);

        Vec3::new(
            (rpm + altitude) * cos_lat * sin_lon,
            (rpm * (1.0 - self.eccentricity_squared) + altitude) * sin_lat,
            (rpm + altitude) * cos_lat * cos_lon,
        )
    }

    #[rustfmt::skip]
    fn geographic_to_cartesian_transform(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
    ) -> Mat4 {
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
        let point = self.geographic_to_cartesian(latitude, longitude, altitude);

        let up = Vec3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon);
        let north = Vec3::new(-sin_lat * sin_lon, cos_lat, -sin_lat * cos_lon);
        let mut east = north.cross(&up);
        east.normalize();
        let mut north = up.cross(&east);
        north.normalize();

        Mat4::new(
            east.x, north.x, up.x, point.x,
            east.y, north.y, up.y, point.y,
            east.z, north.z, up.z, point.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
