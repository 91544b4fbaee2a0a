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

use crate::geo::Sector;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3x3 matrix stored in row-major order. Used for 2D and texture coordinate transforms.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat3 {
    pub m: [f64; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0],
    };

    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64, m01: f64, m02: f64,
        m10: f64, m11: f64, m12: f64,
        m20: f64, m21: f64, m22: f64,
    ) -> Self {
        Self {
            m: [m00, m01, m02,
                m10, m11, m12,
                m20, m21, m22],
        }
    }

    pub fn set_to_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Sets the translation components, leaving the rest of the matrix untouched.
    pub fn set_translation(&mut self, x: f64, y: f64) -> &mut Self {
        self.m[2] = x;
        self.m[5] = y;
        self
    }

    /// Sets the rotation block to a counter-clockwise rotation by `angle_degrees`, leaving the
    /// rest of the matrix untouched.
    pub fn set_rotation(&mut self, angle_degrees: f64) -> &mut Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        self.m[0] = c;
        self.m[1] = -s;
        self.m[3] = s;
        self.m[4] = c;
        self
    }

    /// Sets the scale components, leaving the rest of the matrix untouched.
    pub fn set_scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.m[0] = x;
        self.m[4] = y;
        self
    }

    pub fn set_to_translation(&mut self, x: f64, y: f64) -> &mut Self {
        self.set_to_identity();
        self.set_translation(x, y)
    }

    pub fn set_to_rotation(&mut self, angle_degrees: f64) -> &mut Self {
        self.set_to_identity();
        self.set_rotation(angle_degrees)
    }

    pub fn set_to_scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.set_to_identity();
        self.set_scale(x, y)
    }

    /// Sets this matrix to one that flips and shifts the Y axis, mapping texture coordinates
    /// with the origin at the top to coordinates with the origin at the bottom.
    #[rustfmt::skip]
    pub fn set_to_vertical_flip(&mut self) -> &mut Self {
        self.m = [1.0, 0.0, 0.0,
                  0.0, -1.0, 1.0,
                  0.0, 0.0, 1.0];
        self
    }

    /// Sets this matrix to `a * b`.
    pub fn set_to_multiply(&mut self, a: &Mat3, b: &Mat3) -> &mut Self {
        let a = &a.m;
        let b = &b.m;
        let mut r = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                r[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        self.m = r;
        self
    }

    /// Post-multiplies this matrix by `other`: `self = self * other`.
    pub fn multiply_by_matrix(&mut self, other: &Mat3) -> &mut Self {
        let lhs = *self;
        self.set_to_multiply(&lhs, other)
    }

    pub fn multiply_by_translation(&mut self, x: f64, y: f64) -> &mut Self {
        let m = &mut self.m;
        m[2] += m[0] * x + m[1] * y;
        m[5] += m[3] * x + m[4] * y;
        m[8] += m[6] * x + m[7] * y;
        self
    }

    pub fn multiply_by_rotation(&mut self, angle_degrees: f64) -> &mut Self {
        let mut rotation = Mat3::IDENTITY;
        rotation.set_rotation(angle_degrees);
        self.multiply_by_matrix(&rotation)
    }

    pub fn multiply_by_scale(&mut self, x: f64, y: f64) -> &mut Self {
        let m = &mut self.m;
        m[0] *= x;
        m[1] *= y;
        m[3] *= x;
        m[4] *= y;
        m[6] *= x;
        m[7] *= y;
        self
    }

    /// Post-multiplies by the matrix of [`Self::set_to_vertical_flip`].
    pub fn multiply_by_vertical_flip(&mut self) -> &mut Self {
        let m = &mut self.m;
        m[2] += m[1];
        m[5] += m[4];
        m[8] += m[7];
        m[1] = -m[1];
        m[4] = -m[4];
        m[7] = -m[7];
        self
    }

    /// Post-multiplies by a transform that maps texture coordinates of a tile covering `src` into
    /// texture coordinates of a tile covering `dst`. Both sectors must be non-empty.
    pub fn multiply_by_tile_transform(&mut self, src: &Sector, dst: &Sector) -> &mut Self {
        let src_delta_lat = src.delta_latitude();
        let src_delta_lon = src.delta_longitude();
        let dst_delta_lat = dst.delta_latitude();
        let dst_delta_lon = dst.delta_longitude();

        let xs = src_delta_lon / dst_delta_lon;
        let ys = src_delta_lat / dst_delta_lat;
        let xt = (src.min_longitude() - dst.min_longitude()) / dst_delta_lon;
        let yt = (src.min_latitude() - dst.min_latitude()) / dst_delta_lat;

        // Same as multiplying by [xs, 0, xt, 0, ys, yt, 0, 0, 1].
        let m = &mut self.m;
        m[2] += m[0] * xt + m[1] * yt;
        m[5] += m[3] * xt + m[4] * yt;
        m[8] += m[6] * xt + m[7] * yt;
        m[0] *= xs;
        m[1] *= ys;
        m[3] *= xs;
        m[4] *= ys;
        m[6] *= xs;
        m[7] *= ys;
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        self.m.swap(1, 3);
        self.m.swap(2, 6);
        self.m.swap(5, 7);
        self
    }

    pub fn transpose_matrix(&mut self, src: &Mat3) -> &mut Self {
        *self = *src;
        self.transpose()
    }

    pub fn to_f32_array(&self) -> [f32; 9] {
        self.m.map(|v| v as f32)
    }

    /// Column-major copy, suitable for uploading into a shader uniform.
    pub fn to_column_major_f32_array(&self) -> [f32; 9] {
        let mut t = *self;
        t.transpose();
        t.to_f32_array()
    }
}
