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

use crate::mat3::Mat3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops;

/// Two-component vector of doubles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
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
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    #[inline]
    pub fn subtract(&mut self, other: &Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    #[inline]
    pub fn multiply(&mut self, scalar: f64) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    #[inline]
    pub fn divide(&mut self, divisor: f64) -> &mut Self {
        self.x /= divisor;
        self.y /= divisor;
        self
    }

    #[inline]
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
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

    /// Linear interpolation towards `other`: weight 0 keeps this vector, weight 1 gives `other`.
    #[inline]
    pub fn mix(&mut self, other: &Self, weight: f64) -> &mut Self {
        let w0 = 1.0 - weight;
        self.x = self.x * w0 + other.x * weight;
        self.y = self.y * w0 + other.y * weight;
        self
    }

    /// Transforms the vector as a point with implicit `z = 1` and divides by the resulting `z`.
    #[inline]
    pub fn multiply_by_matrix(&mut self, matrix: &Mat3) -> &mut Self {
        let m = &matrix.m;
        let x = m[0] * self.x + m[1] * self.y + m[2];
        let y = m[3] * self.x + m[4] * self.y + m[5];
        let z = m[6] * self.x + m[7] * self.y + m[8];
        self.x = x / z;
        self.y = y / z;
        self
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn to_f32_array(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

impl ops::Add<Self> for Vec2 {
    type Output = Self;
    fn add(self, b: Self) -> Self {
        Self::new(self.x + b.x, self.y + b.y)
    }
}

impl ops::AddAssign<Self> for Vec2 {
    fn add_assign(&mut self, b: Self) {
        self.x += b.x;
        self.y += b.y;
    }
}

impl ops::Sub<Self> for Vec2 {
    type Output = Self;
    fn sub(self, b: Self) -> Self {
        Self::new(self.x - b.x, self.y - b.y)
    }
}

impl ops::SubAssign<Self> for Vec2 {
    fn sub_assign(&mut self, b: Self) {
        self.x -= b.x;
        self.y -= b.y;
    }
}

impl ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, b: f64) -> Self {
        Self::new(self.x * b, self.y * b)
    }
}

impl ops::Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, b: f64) -> Self {
        Self::new(self.x / b, self.y / b)
    }
}

impl ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vec2> for nalgebra::Vector2<f64> {
    fn from(v: Vec2) -> Self {
        nalgebra::Vector2::new(v.x, v.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vec2 {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}
