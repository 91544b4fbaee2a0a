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

//! Row-major 4x4 matrix of doubles: affine and projective transforms, general and orthonormal
//! inversion, projection builders, window projection and orientation extraction.
//!
//! Matrices are applied to column vectors, so `x' = m[0] * x + m[1] * y + m[2] * z + m[3]`
//! and `multiply_by_*` methods post-multiply: the new transform is applied first.

mod eigen;
mod lu;

pub use eigen::EigenPair;

use crate::{
    error::{GeomError, Result},
    settings::Tolerances,
    vec3::Vec3,
    viewport::Viewport,
};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops;

#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat4 {
    pub m: [f64; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0],
    };

    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64, m01: f64, m02: f64, m03: f64,
        m10: f64, m11: f64, m12: f64, m13: f64,
        m20: f64, m21: f64, m22: f64, m23: f64,
        m30: f64, m31: f64, m32: f64, m33: f64,
    ) -> Self {
        Self {
            m: [m00, m01, m02, m03,
                m10, m11, m12, m13,
                m20, m21, m22, m23,
                m30, m31, m32, m33],
        }
    }

    pub fn set_to_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Sets the translation column, leaving the rest of the matrix untouched.
    pub fn set_translation(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.m[3] = x;
        self.m[7] = y;
        self.m[11] = z;
        self
    }

    /// Sets the upper 3x3 block to a rotation about `axis`, leaving the rest of the matrix
    /// untouched. The axis must be unit length. Positive angles rotate counter-clockwise when
    /// looking from the positive end of the axis toward the origin.
    pub fn set_rotation(&mut self, axis: &Vec3, angle_degrees: f64) -> &mut Self {
        let (s, c) = angle_degrees.to_radians().sin_cos();
        let Vec3 { x, y, z } = *axis;
        let k = 1.0 - c;

        let m = &mut self.m;
        m[0] = c + k * x * x;
        m[1] = k * x * y - s * z;
        m[2] = k * x * z + s * y;
        m[4] = k * x * y + s * z;
        m[5] = c + k * y * y;
        m[6] = k * y * z - s * x;
        m[8] = k * x * z - s * y;
        m[9] = k * y * z + s * x;
        m[10] = c + k * z * z;
        self
    }

    /// Sets the diagonal scale components, leaving the rest of the matrix untouched.
    pub fn set_scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.m[0] = x;
        self.m[5] = y;
        self.m[10] = z;
        self
    }

    pub fn set_to_translation(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.set_to_identity();
        self.set_translation(x, y, z)
    }

    pub fn set_to_rotation(&mut self, axis: &Vec3, angle_degrees: f64) -> &mut Self {
        self.set_to_identity();
        self.set_rotation(axis, angle_degrees)
    }

    pub fn set_to_scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.set_to_identity();
        self.set_scale(x, y, z)
    }

    /// Sets this matrix to a perspective projection for a viewport of the given size. The
    /// vertical field of view must be in (0, 180) degrees and both clip distances must be
    /// positive and distinct.
    #[rustfmt::skip]
    pub fn set_to_perspective_projection(
        &mut self,
        width: f64,
        height: f64,
        fovy_degrees: f64,
        near: f64,
        far: f64,
    ) -> Result<&mut Self> {
        const METHOD: &str = "set_to_perspective_projection";
        validate_projection_size(METHOD, width, height)?;
        validate_fovy(METHOD, fovy_degrees)?;
        if near == far {
            return Err(GeomError::invalid_argument(
                "Mat4",
                METHOD,
                format!("near and far distances are equal ({near})"),
            ));
        }
        if !(near > 0.0) || !(far > 0.0) {
            return Err(GeomError::invalid_argument(
                "Mat4",
                METHOD,
                format!("clip distances must be positive (near {near}, far {far})"),
            ));
        }

        let near_height = 2.0 * near * (fovy_degrees.to_radians() * 0.5).tan();
        let near_width = near_height * width / height;

        self.m = [
            2.0 * near / near_width, 0.0, 0.0, 0.0,
            0.0, 2.0 * near / near_height, 0.0, 0.0,
            0.0, 0.0, -(far + near) / (far - near), -2.0 * near * far / (far - near),
            0.0, 0.0, -1.0, 0.0,
        ];

        Ok(self)
    }

    /// Same as [`Self::set_to_perspective_projection`] with the far clip plane at infinity.
    #[rustfmt::skip]
    pub fn set_to_infinite_projection(
        &mut self,
        width: f64,
        height: f64,
        fovy_degrees: f64,
        near: f64,
    ) -> Result<&mut Self> {
        const METHOD: &str = "set_to_infinite_projection";
        validate_projection_size(METHOD, width, height)?;
        validate_fovy(METHOD, fovy_degrees)?;
        if !(near > 0.0) {
            return Err(GeomError::invalid_argument(
                "Mat4",
                METHOD,
                format!("near distance must be positive ({near})"),
            ));
        }

        let near_height = 2.0 * near * (fovy_degrees.to_radians() * 0.5).tan();
        let near_width = near_height * width / height;

        self.m = [
            2.0 * near / near_width, 0.0, 0.0, 0.0,
            0.0, 2.0 * near / near_height, 0.0, 0.0,
            0.0, 0.0, -1.0, -2.0 * near,
            0.0, 0.0, -1.0, 0.0,
        ];

        Ok(self)
    }

    /// Sets this matrix to a projection that maps model coordinates directly to window pixels of
    /// a viewport with the given size. Model Z in [0, 1] comes out of the window transform as
    /// the same depth value.
    #[rustfmt::skip]
    pub fn set_to_screen_projection(&mut self, width: f64, height: f64) -> Result<&mut Self> {
        validate_projection_size("set_to_screen_projection", width, height)?;

        self.m = [
            2.0 / width, 0.0, 0.0, -1.0,
            0.0, 2.0 / height, 0.0, -1.0,
            0.0, 0.0, 2.0, -1.0,
            0.0, 0.0, 0.0, 1.0,
        ];

        Ok(self)
    }

    /// Slightly shifts the depth range of a perspective projection, used to draw geometry on
    /// top of coplanar surfaces. Positive offsets move geometry away from the viewer.
    pub fn offset_projection_depth(&mut self, offset: f64) -> &mut Self {
        self.m[10] *= 1.0 + offset;
        self
    }

    /// Sets this matrix to `a * b`.
    pub fn set_to_multiply(&mut self, a: &Mat4, b: &Mat4) -> &mut Self {
        let a = &a.m;
        let b = &b.m;
        let mut r = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                r[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        self.m = r;
        self
    }

    /// Post-multiplies this matrix by `other`: `self = self * other`.
    pub fn multiply_by_matrix(&mut self, other: &Mat4) -> &mut Self {
        let lhs = *self;
        self.set_to_multiply(&lhs, other)
    }

    pub fn multiply_by_translation(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        let m = &mut self.m;
        m[3] += m[0] * x + m[1] * y + m[2] * z;
        m[7] += m[4] * x + m[5] * y + m[6] * z;
        m[11] += m[8] * x + m[9] * y + m[10] * z;
        m[15] += m[12] * x + m[13] * y + m[14] * z;
        self
    }

    pub fn multiply_by_rotation(&mut self, axis: &Vec3, angle_degrees: f64) -> &mut Self {
        let mut rotation = Mat4::IDENTITY;
        rotation.set_rotation(axis, angle_degrees);
        self.multiply_by_matrix(&rotation)
    }

    pub fn multiply_by_scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        for row in self.m.chunks_exact_mut(4) {
            row[0] *= x;
            row[1] *= y;
            row[2] *= z;
        }
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        let m = &mut self.m;
        m.swap(1, 4);
        m.swap(2, 8);
        m.swap(3, 12);
        m.swap(6, 9);
        m.swap(7, 13);
        m.swap(11, 14);
        self
    }

    pub fn transpose_matrix(&mut self, src: &Mat4) -> &mut Self {
        *self = *src;
        self.transpose()
    }

    /// Inverts this matrix in place. See [`Self::invert_matrix`].
    pub fn invert(&mut self) -> Result<&mut Self> {
        let src = *self;
        self.invert_matrix_with(&src, &Tolerances::DEFAULT)
    }

    /// Sets this matrix to the inverse of `src` using LU decomposition with partial pivoting.
    /// Fails with [`GeomError::SingularMatrix`] when the determinant magnitude is below the
    /// singularity threshold; the receiver is left untouched in that case.
    pub fn invert_matrix(&mut self, src: &Mat4) -> Result<&mut Self> {
        self.invert_matrix_with(src, &Tolerances::DEFAULT)
    }

    pub fn invert_matrix_with(&mut self, src: &Mat4, tolerances: &Tolerances) -> Result<&mut Self> {
        match lu::invert(&src.m, tolerances.singular_threshold) {
            Ok((inverse, _)) => {
                self.m = inverse;
                Ok(self)
            }
            Err(determinant) => {
                crate::warn_once!(
                    line!() as usize,
                    "Mat4::invert_matrix: singular matrix, determinant {:e}",
                    determinant
                );
                Err(GeomError::SingularMatrix { determinant })
            }
        }
    }

    /// Determinant computed from the LU decomposition.
    pub fn determinant(&self) -> f64 {
        match lu::invert(&self.m, 0.0) {
            Ok((_, determinant)) | Err(determinant) => determinant,
        }
    }

    /// Inverts this matrix in place assuming it is orthonormal. See
    /// [`Self::invert_orthonormal_matrix`].
    pub fn invert_orthonormal(&mut self) -> &mut Self {
        let src = *self;
        self.invert_orthonormal_matrix(&src)
    }

    /// Sets this matrix to the inverse of `src`, which must be a rotation followed by a
    /// translation. The rotation block is transposed and the translation is rotated back and
    /// negated. Never fails, but gives garbage for other kinds of matrices.
    #[rustfmt::skip]
    pub fn invert_orthonormal_matrix(&mut self, src: &Mat4) -> &mut Self {
        let s = &src.m;
        self.m = [
            s[0], s[4], s[8], -(s[0] * s[3] + s[4] * s[7] + s[8] * s[11]),
            s[1], s[5], s[9], -(s[1] * s[3] + s[5] * s[7] + s[9] * s[11]),
            s[2], s[6], s[10], -(s[2] * s[3] + s[6] * s[7] + s[10] * s[11]),
            0.0, 0.0, 0.0, 1.0,
        ];
        self
    }

    /// Transforms a model point by this model-view-projection matrix into window coordinates
    /// of `viewport`. The resulting Z is the depth in [0, 1]. Returns `None` if the point
    /// cannot be projected: its clip-space W is zero or it lies outside the depth range.
    pub fn project(&self, x: f64, y: f64, z: f64, viewport: &Viewport) -> Option<Vec3> {
        let m = &self.m;
        let cx = m[0] * x + m[1] * y + m[2] * z + m[3];
        let cy = m[4] * x + m[5] * y + m[6] * z + m[7];
        let cz = m[8] * x + m[9] * y + m[10] * z + m[11];
        let cw = m[12] * x + m[13] * y + m[14] * z + m[15];

        if cw == 0.0 {
            return None;
        }

        let nx = cx / cw;
        let ny = cy / cw;
        let nz = cz / cw;

        if !(-1.0..=1.0).contains(&nz) {
            return None;
        }

        Some(Vec3::new(
            (nx * 0.5 + 0.5) * viewport.width as f64 + viewport.x as f64,
            (ny * 0.5 + 0.5) * viewport.height as f64 + viewport.y as f64,
            nz * 0.5 + 0.5,
        ))
    }

    /// Maps a window coordinate back into model coordinates at the near and far clip planes.
    /// This matrix must be the inverse of the model-view-projection matrix. Returns the
    /// `(near, far)` pair, or `None` if either point is at infinity. Fails if the viewport is
    /// empty.
    pub fn un_project(&self, x: f64, y: f64, viewport: &Viewport) -> Result<Option<(Vec3, Vec3)>> {
        if viewport.is_empty() {
            return Err(GeomError::invalid_argument(
                "Mat4",
                "un_project",
                format!("viewport {viewport:?} is empty"),
            ));
        }

        let sx = (x - viewport.x as f64) / viewport.width as f64 * 2.0 - 1.0;
        let sy = (y - viewport.y as f64) / viewport.height as f64 * 2.0 - 1.0;

        let m = &self.m;
        let mx = m[0] * sx + m[1] * sy + m[3];
        let my = m[4] * sx + m[5] * sy + m[7];
        let mz = m[8] * sx + m[9] * sy + m[11];
        let mw = m[12] * sx + m[13] * sy + m[15];

        // NDC depth -1 at the near plane and +1 at the far plane.
        let nw = mw - m[14];
        let fw = mw + m[14];
        if nw == 0.0 || fw == 0.0 {
            return Ok(None);
        }

        let near = Vec3::new((mx - m[2]) / nw, (my - m[6]) / nw, (mz - m[10]) / nw);
        let far = Vec3::new((mx + m[2]) / fw, (my + m[6]) / fw, (mz + m[10]) / fw);

        Ok(Some((near, far)))
    }

    /// Eye position in model coordinates of a model-view matrix.
    pub fn extract_eye_point(&self) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            -(m[0] * m[3]) - m[4] * m[7] - m[8] * m[11],
            -(m[1] * m[3]) - m[5] * m[7] - m[9] * m[11],
            -(m[2] * m[3]) - m[6] * m[7] - m[10] * m[11],
        )
    }

    /// Viewing direction in model coordinates of a model-view matrix.
    pub fn extract_forward_vector(&self) -> Vec3 {
        Vec3::new(-self.m[8], -self.m[9], -self.m[10])
    }

    /// Heading in degrees of a local model-view matrix, given its roll in degrees.
    pub fn extract_heading(&self, roll_degrees: f64) -> f64 {
        let (sr, cr) = roll_degrees.to_radians().sin_cos();
        let m = &self.m;
        let ch = cr * m[0] - sr * m[4];
        let sh = sr * m[5] - cr * m[1];
        sh.atan2(ch).to_degrees()
    }

    /// Tilt in degrees of a local model-view matrix: 0 looks straight down the Z axis.
    pub fn extract_tilt(&self) -> f64 {
        let m = &self.m;
        let ct = m[10];
        let st = (m[2] * m[2] + m[6] * m[6]).sqrt();
        st.atan2(ct).to_degrees()
    }

    pub fn to_f32_array(&self) -> [f32; 16] {
        self.m.map(|v| v as f32)
    }

    /// Column-major copy, suitable for uploading into a shader uniform.
    pub fn to_column_major_f32_array(&self) -> [f32; 16] {
        let mut t = *self;
        t.transpose();
        t.to_f32_array()
    }
}

fn validate_projection_size(method: &'static str, width: f64, height: f64) -> Result<()> {
    if !(width > 0.0) || !(height > 0.0) {
        Err(GeomError::invalid_argument(
            "Mat4",
            method,
            format!("viewport size must be positive ({width}x{height})"),
        ))
    } else {
        Ok(())
    }
}

fn validate_fovy(method: &'static str, fovy_degrees: f64) -> Result<()> {
    if !(fovy_degrees > 0.0 && fovy_degrees < 180.0) {
        Err(GeomError::invalid_argument(
            "Mat4",
            method,
            format!("field of view {fovy_degrees} is not in (0, 180) degrees"),
        ))
    } else {
        Ok(())
    }
}

impl ops::Mul<Self> for Mat4 {
    type Output = Self;

    fn mul(self, b: Self) -> Self {
        let mut r = Self::IDENTITY;
        r.set_to_multiply(&self, &b);
        r
    }
}

impl ops::MulAssign<Self> for Mat4 {
    fn mul_assign(&mut self, b: Self) {
        self.multiply_by_matrix(&b);
    }
}

impl From<Mat4> for nalgebra::Matrix4<f64> {
    fn from(m: Mat4) -> Self {
        nalgebra::Matrix4::from_row_slice(&m.m)
    }
}

impl From<nalgebra::Matrix4<f64>> for Mat4 {
    fn from(n: nalgebra::Matrix4<f64>) -> Self {
        let mut m = [0.0; 16];
        for (i, v) in m.iter_mut().enumerate() {
            *v = n[(i / 4, i % 4)];
        }
        Self { m }
    }
}
