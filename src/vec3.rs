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
    mat4::Mat4,
};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops;

/// Three-component vector of doubles. Mutating methods work in place and return `&mut Self`,
/// so several operations can be chained without temporaries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) -> &mut Self {
        std::mem::swap(self, other);
        self
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_to_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_to_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn dot(&self, b: &Self) -> f64 {
        self.x * b.x + self.y * b.y + self.z * b.z
    }

    /// Returns `self x b`.
    #[inline]
    pub fn cross(&self, b: &Self) -> Self {
        Self {
            x: self.y * b.z - self.z * b.y,
            y: self.z * b.x - self.x * b.z,
            z: self.x * b.y - self.y * b.x,
        }
    }

    /// Sets this vector to `a x b`.
    #[inline]
    pub fn cross_vectors(&mut self, a: &Self, b: &Self) -> &mut Self {
        *self = a.cross(b);
        self
    }

    #[inline]
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self
    }

    #[inline]
    pub fn subtract(&mut self, other: &Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self
    }

    #[inline]
    pub fn multiply(&mut self, scalar: f64) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
        self
    }

    #[inline]
    pub fn divide(&mut self, divisor: f64) -> &mut Self {
        self.x /= divisor;
        self.y /= divisor;
        self.z /= divisor;
        self
    }

    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Scales the vector to unit length. Does nothing if the vector has zero length.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let magnitude = self.magnitude();
        if magnitude != 0.0 {
            self.divide(magnitude);
        }
        self
    }

    /// Returns a unit length copy, or `None` for the zero vector.
    #[inline]
    pub fn normalized(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            None
        } else {
            Some(*self / magnitude)
        }
    }

    /// Linear interpolation towards `other`: weight 0 keeps this vector, weight 1 gives `other`.
    #[inline]
    pub fn mix(&mut self, other: &Self, weight: f64) -> &mut Self {
        let w0 = 1.0 - weight;
        self.x = self.x * w0 + other.x * weight;
        self.y = self.y * w0 + other.y * weight;
        self.z = self.z * w0 + other.z * weight;
        self
    }

    /// Transforms the vector as a point with implicit `w = 1` and divides by the resulting `w`.
    #[inline]
    pub fn multiply_by_matrix(&mut self, matrix: &Mat4) -> &mut Self {
        let m = &matrix.m;
        let x = m[0] * self.x + m[1] * self.y + m[2] * self.z + m[3];
        let y = m[4] * self.x + m[5] * self.y + m[6] * self.z + m[7];
        let z = m[8] * self.x + m[9] * self.y + m[10] * self.z + m[11];
        let w = m[12] * self.x + m[13] * self.y + m[14] * self.z + m[15];
        self.x = x / w;
        self.y = y / w;
        self.z = z / w;
        self
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn to_f32_array(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl ops::Add<Self> for Vec3 {
    type Output = Self;
    fn add(self, b: Self) -> Self {
        Self::new(self.x + b.x, self.y + b.y, self.z + b.z)
    }
}

impl ops::AddAssign<Self> for Vec3 {
    fn add_assign(&mut self, b: Self) {
        self.x += b.x;
        self.y += b.y;
        self.z += b.z;
    }
}

impl ops::Sub<Self> for Vec3 {
    type Output = Self;
    fn sub(self, b: Self) -> Self {
        Self::new(self.x - b.x, self.y - b.y, self.z - b.z)
    }
}

impl ops::SubAssign<Self> for Vec3 {
    fn sub_assign(&mut self, b: Self) {
        self.x -= b.x;
        self.y -= b.y;
        self.z -= b.z;
    }
}

impl ops::Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, b: f64) -> Self {
        Self::new(self.x * b, self.y * b, self.z * b)
    }
}

impl ops::MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, b: f64) {
        self.x *= b;
        self.y *= b;
        self.z *= b;
    }
}

impl ops::Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, b: f64) -> Self {
        Self::new(self.x / b, self.y / b, self.z / b)
    }
}

impl ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for nalgebra::Vector3<f64> {
    fn from(v: Vec3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vec3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Checks that `points` holds at least one vertex of interleaved data with the given `stride`:
/// the stride must cover three coordinates and the buffer length must be a whole number of
/// strides.
pub(crate) fn validate_vertex_buffer(
    type_name: &'static str,
    method: &'static str,
    points: &[f32],
    stride: usize,
) -> Result<()> {
    if stride < 3 {
        return Err(GeomError::invalid_argument(
            type_name,
            method,
            format!("stride {stride} is less than 3"),
        ));
    }
    if points.is_empty() {
        return Err(GeomError::invalid_argument(
            type_name,
            method,
            "point buffer is empty",
        ));
    }
    if points.len() % stride != 0 {
        return Err(GeomError::invalid_argument(
            type_name,
            method,
            format!(
                "point buffer length {} is not a multiple of stride {stride}",
                points.len()
            ),
        ));
    }
    Ok(())
}

/// Iterates over the vertices of an interleaved buffer, taking the first three values of every
/// `stride` values. A trailing partial vertex is skipped.
pub(crate) fn vertices(points: &[f32], stride: usize) -> impl Iterator<Item = Vec3> + Clone + '_ {
    points
        .chunks_exact(stride)
        .map(|c| Vec3::new(c[0] as f64, c[1] as f64, c[2] as f64))
}

#[cfg(test)]
mod test {
    use super::{validate_vertex_buffer, vertices, Vec3};
    use crate::mat4::Mat4;

    #[test]
    fn test_vertex_buffer() {
        let data = [1.0f32, 2.0, 3.0, 9.0, 4.0, 5.0, 6.0, 9.0];
        let v: Vec<Vec3> = vertices(&data, 4).collect();
        assert_eq!(v, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);

        assert!(validate_vertex_buffer("Vec3", "test", &data, 4).is_ok());
        assert!(validate_vertex_buffer("Vec3", "test", &data, 2).is_err());
        assert!(validate_vertex_buffer("Vec3", "test", &data, 3).is_err());
        assert!(validate_vertex_buffer("Vec3", "test", &[], 3).is_err());
    }

    #[test]
    fn test_vec3_chaining() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v.add(&Vec3::new(1.0, 1.0, 1.0)).multiply(2.0).negate();
        assert_eq!(v, Vec3::new(-4.0, -6.0, -8.0));
        v.subtract(&Vec3::new(-4.0, -6.0, -8.0));
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_vec3_normalize() {
        let mut v = Vec3::new(0.0, 3.0, 4.0);
        v.normalize();
        assert_eq!(v, Vec3::new(0.0, 0.6, 0.8));

        let mut zero = Vec3::ZERO;
        zero.normalize();
        assert_eq!(zero, Vec3::ZERO);
        assert!(zero.normalized().is_none());
    }

    #[test]
    fn test_vec3_cross() {
        assert_eq!(Vec3::X.cross(&Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(&Vec3::Z), Vec3::X);
        let mut r = Vec3::ZERO;
        r.cross_vectors(&Vec3::Z, &Vec3::X);
        assert_eq!(r, Vec3::Y);
    }

    #[test]
    fn test_vec3_distances() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, 4.0, 5.0);
        assert_eq!(a.distance_to_squared(&b), 9.0);
        assert_eq!(a.distance_to(&b), 3.0);
        assert_eq!(Vec3::new(2.0, 3.0, 6.0).magnitude(), 7.0);
    }

    #[test]
    fn test_vec3_mix() {
        let mut a = Vec3::new(0.0, 0.0, 0.0);
        a.mix(&Vec3::new(4.0, 8.0, -4.0), 0.5);
        assert_eq!(a, Vec3::new(2.0, 4.0, -2.0));
    }

    #[test]
    fn test_vec3_multiply_by_matrix() {
        let mut m = Mat4::IDENTITY;
        m.set_to_translation(1.0, 2.0, 3.0);
        m.multiply_by_scale(2.0, 2.0, 2.0);
        let mut v = Vec3::new(1.0, 1.0, 1.0);
        v.multiply_by_matrix(&m);
        assert_eq!(v, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_vec3_swap() {
        let mut a = Vec3::X;
        let mut b = Vec3::Y;
        a.swap(&mut b);
        assert_eq!(a, Vec3::Y);
        assert_eq!(b, Vec3::X);
    }

    #[test]
    fn test_vec3_nalgebra_conversion() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let n: nalgebra::Vector3<f64> = v.into();
        assert_eq!(n, nalgebra::Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::from(n), v);
    }

    #[test]
    fn test_vec3_bytes() {
        let points = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
        let raw: &[f64] = bytemuck::cast_slice(&points);
        assert_eq!(raw, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
