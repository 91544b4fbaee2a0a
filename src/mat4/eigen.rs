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

//! Covariance of point sets and eigen-decomposition of symmetric 3x3 matrices by the cyclic
//! Jacobi method. Used to find principal axes of oriented bounding boxes.

use super::Mat4;
use crate::{error::Result, settings::Tolerances, vec3::Vec3};

/// Eigenvalue together with its unit length eigenvector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EigenPair {
    pub value: f64,
    pub vector: Vec3,
}

/// Plane rotation that annihilates the off-diagonal entry `apq` of a symmetric matrix with
/// diagonal entries `app` and `aqq`. Returns `(t, c, s)`: tangent, cosine and sine of the angle.
#[inline]
fn jacobi_rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64, f64) {
    let u = (aqq - app) * 0.5 / apq;
    let u2 = u * u;
    let u2p1 = u2 + 1.0;
    let t = if u2p1 != u2 {
        u.signum() / (u2p1.sqrt() + u.abs())
    } else {
        0.5 / u
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    (t, c, c * t)
}

impl Mat4 {
    /// Sets the upper 3x3 block of this matrix to the covariance matrix of the given points and
    /// zeroes everything else. `points` holds interleaved vertices, the first three values of
    /// every `stride` values are the coordinates of a vertex.
    pub fn set_to_covariance_of_points(
        &mut self,
        points: &[f32],
        stride: usize,
    ) -> Result<&mut Self> {
        crate::vec3::validate_vertex_buffer(
            "Mat4",
            "set_to_covariance_of_points",
            points,
            stride,
        )?;
        Ok(self.set_to_covariance_of_vertices(crate::vec3::vertices(points, stride)))
    }

    /// Same as [`Self::set_to_covariance_of_points`] for an iterator over at least one point.
    #[rustfmt::skip]
    pub(crate) fn set_to_covariance_of_vertices<I>(&mut self, points: I) -> &mut Self
    where
        I: Iterator<Item = Vec3> + Clone,
    {
        let mut count = 0.0;
        let mut mean = Vec3::ZERO;
        for p in points.clone() {
            mean += p;
            count += 1.0;
        }
        mean = mean / count;

        let (mut c11, mut c22, mut c33) = (0.0, 0.0, 0.0);
        let (mut c12, mut c13, mut c23) = (0.0, 0.0, 0.0);
        for p in points {
            let d = p - mean;
            c11 += d.x * d.x;
            c22 += d.y * d.y;
            c33 += d.z * d.z;
            c12 += d.x * d.y;
            c13 += d.x * d.z;
            c23 += d.y * d.z;
        }

        self.m = [
            c11 / count, c12 / count, c13 / count, 0.0,
            c12 / count, c22 / count, c23 / count, 0.0,
            c13 / count, c23 / count, c33 / count, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ];

        self
    }

    /// Computes eigenvalues and unit eigenvectors of the upper 3x3 block, sorted by descending
    /// eigenvalue magnitude. Returns `None` if the block is not symmetric.
    pub fn symmetric_eigen(&self) -> Option<[EigenPair; 3]> {
        self.symmetric_eigen_with(&Tolerances::DEFAULT)
    }

    /// Same as [`Self::symmetric_eigen`], but with custom convergence settings.
    pub fn symmetric_eigen_with(&self, tolerances: &Tolerances) -> Option<[EigenPair; 3]> {
        let m = &self.m;
        if m[1] != m[4] || m[2] != m[8] || m[6] != m[9] {
            return None;
        }

        let epsilon = tolerances.jacobi_epsilon;

        // Symmetric, so only the upper triangle is tracked.
        let (mut m11, mut m12, mut m13) = (m[0], m[1], m[2]);
        let (mut m22, mut m23) = (m[5], m[6]);
        let mut m33 = m[10];

        // Accumulated rotations, eigenvectors end up in its columns.
        let mut r = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let mut converged = false;
        for _ in 0..tolerances.jacobi_max_sweeps {
            if m12.abs() < epsilon && m13.abs() < epsilon && m23.abs() < epsilon {
                converged = true;
                break;
            }

            if m12 != 0.0 {
                let (t, c, s) = jacobi_rotation(m11, m22, m12);
                m11 -= t * m12;
                m22 += t * m12;
                m12 = 0.0;
                let temp = c * m13 - s * m23;
                m23 = s * m13 + c * m23;
                m13 = temp;
                for row in r.iter_mut() {
                    let temp = c * row[0] - s * row[1];
                    row[1] = s * row[0] + c * row[1];
                    row[0] = temp;
                }
            }

            if m13 != 0.0 {
                let (t, c, s) = jacobi_rotation(m11, m33, m13);
                m11 -= t * m13;
                m33 += t * m13;
                m13 = 0.0;
                let temp = c * m12 - s * m23;
                m23 = s * m12 + c * m23;
                m12 = temp;
                for row in r.iter_mut() {
                    let temp = c * row[0] - s * row[2];
                    row[2] = s * row[0] + c * row[2];
                    row[0] = temp;
                }
            }

            if m23 != 0.0 {
                let (t, c, s) = jacobi_rotation(m22, m33, m23);
                m22 -= t * m23;
                m33 += t * m23;
                m23 = 0.0;
                let temp = c * m12 - s * m13;
                m13 = s * m12 + c * m13;
                m12 = temp;
                for row in r.iter_mut() {
                    let temp = c * row[1] - s * row[2];
                    row[2] = s * row[1] + c * row[2];
                    row[1] = temp;
                }
            }
        }

        if !converged
            && !(m12.abs() < epsilon && m13.abs() < epsilon && m23.abs() < epsilon)
        {
            crate::warn_once!(
                line!() as usize,
                "Mat4::symmetric_eigen: no convergence after {} sweeps, off-diagonal residue {:e}",
                tolerances.jacobi_max_sweeps,
                m12.abs().max(m13.abs()).max(m23.abs())
            );
        }

        let mut pairs = [m11, m22, m33].map(|value| EigenPair {
            value,
            vector: Vec3::ZERO,
        });
        for (column, pair) in pairs.iter_mut().enumerate() {
            let mut vector = Vec3::new(r[0][column], r[1][column], r[2][column]);
            vector.normalize();
            pair.vector = vector;
        }
        pairs.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));

        Some(pairs)
    }

    /// Computes the eigenvectors of the upper 3x3 block, which must be symmetric. The vectors
    /// are sorted by descending eigenvalue magnitude and each one is scaled by its eigenvalue,
    /// so the magnitude of a vector is the magnitude of its eigenvalue. Returns `None` if the
    /// block is not symmetric.
    pub fn extract_eigenvectors(&self) -> Option<[Vec3; 3]> {
        self.extract_eigenvectors_with(&Tolerances::DEFAULT)
    }

    /// Same as [`Self::extract_eigenvectors`], but with custom convergence settings.
    pub fn extract_eigenvectors_with(&self, tolerances: &Tolerances) -> Option<[Vec3; 3]> {
        self.symmetric_eigen_with(tolerances)
            .map(|pairs| pairs.map(|pair| pair.vector * pair.value))
    }
}
