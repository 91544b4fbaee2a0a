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

//! General 4x4 inversion through LU decomposition with partial pivoting (Crout's method with
//! implicit row scaling), followed by back-substitution for each column of the identity.

type Rows = [[f64; 4]; 4];

/// Replaces `a` by the LU decomposition of a row-wise permutation of itself. Pivot rows are
/// written into `index`. Returns +1 or -1 depending on whether the number of row interchanges
/// was even or odd, or 0 if some row of `a` is entirely zero.
fn decompose(a: &mut Rows, index: &mut [usize; 4]) -> f64 {
    const TINY: f64 = 1.0e-20;

    let mut scale = [0.0; 4];
    let mut parity = 1.0;

    for (row, s) in a.iter().zip(scale.iter_mut()) {
        let big = row.iter().fold(0.0f64, |big, v| big.max(v.abs()));
        if big == 0.0 {
            return 0.0;
        }
        *s = 1.0 / big;
    }

    for j in 0..4 {
        for i in 0..j {
            let mut sum = a[i][j];
            for k in 0..i {
                sum -= a[i][k] * a[k][j];
            }
            a[i][j] = sum;
        }

        let mut big = 0.0;
        let mut imax = j;
        for i in j..4 {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= a[i][k] * a[k][j];
            }
            a[i][j] = sum;

            let dum = scale[i] * sum.abs();
            if dum >= big {
                big = dum;
                imax = i;
            }
        }

        if j != imax {
            a.swap(imax, j);
            parity = -parity;
            scale[imax] = scale[j];
        }

        index[j] = imax;

        if a[j][j] == 0.0 {
            a[j][j] = TINY;
        }

        if j != 3 {
            let dum = 1.0 / a[j][j];
            for row in a.iter_mut().skip(j + 1) {
                row[j] *= dum;
            }
        }
    }

    parity
}

/// Solves `A x = b` in place, where `a` and `index` come from [`decompose`].
fn back_substitute(a: &Rows, index: &[usize; 4], b: &mut [f64; 4]) {
    let mut first_nonzero = None;

    for i in 0..4 {
        let ip = index[i];
        let mut sum = b[ip];
        b[ip] = b[i];

        match first_nonzero {
            Some(ii) => {
                for j in ii..i {
                    sum -= a[i][j] * b[j];
                }
            }
            None => {
                if sum != 0.0 {
                    first_nonzero = Some(i);
                }
            }
        }

        b[i] = sum;
    }

    for i in (0..4).rev() {
        let mut sum = b[i];
        for j in (i + 1)..4 {
            sum -= a[i][j] * b[j];
        }
        b[i] = sum / a[i][i];
    }
}

/// Inverts a row-major 4x4 matrix. On success returns the inverse together with the
/// determinant of the source. If the determinant magnitude is below `singular_threshold`
/// the determinant is returned as the error.
pub(super) fn invert(src: &[f64; 16], singular_threshold: f64) -> Result<([f64; 16], f64), f64> {
    let mut a: Rows = [
        [src[0], src[1], src[2], src[3]],
        [src[4], src[5], src[6], src[7]],
        [src[8], src[9], src[10], src[11]],
        [src[12], src[13], src[14], src[15]],
    ];
    let mut index = [0usize; 4];

    let mut determinant = decompose(&mut a, &mut index);
    for (i, row) in a.iter().enumerate() {
        determinant *= row[i];
    }

    if !(determinant.abs() >= singular_threshold) {
        return Err(determinant);
    }

    let mut inverse = [0.0; 16];
    for j in 0..4 {
        let mut column = [0.0; 4];
        column[j] = 1.0;
        back_substitute(&a, &index, &mut column);
        for (i, v) in column.iter().enumerate() {
            inverse[i * 4 + j] = *v;
        }
    }

    Ok((inverse, determinant))
}

#[cfg(test)]
mod test {
    use super::invert;

    #[test]
    fn test_determinant_of_permuted_diagonal() {
        #[rustfmt::skip]
        let m = [
            0.0, 2.0, 0.0, 0.0,
            3.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 4.0, 0.0,
            0.0, 0.0, 0.0, 5.0,
        ];
        let (inverse, det) = invert(&m, 1.0e-8).unwrap();
        assert!((det - -120.0).abs() < 1.0e-12);
        #[rustfmt::skip]
        let expected = [
            0.0, 1.0 / 3.0, 0.0, 0.0,
            0.5, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.25, 0.0,
            0.0, 0.0, 0.0, 0.2,
        ];
        for (a, b) in inverse.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1.0e-12);
        }
    }

    #[test]
    fn test_zero_row_is_singular() {
        #[rustfmt::skip]
        let m = [
            1.0, 2.0, 3.0, 4.0,
            0.0, 0.0, 0.0, 0.0,
            5.0, 6.0, 7.0, 8.0,
            1.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(invert(&m, 1.0e-8), Err(0.0));
    }

    #[test]
    fn test_rank_deficient_is_singular() {
        #[rustfmt::skip]
        let m = [
            1.0, 2.0, 3.0, 4.0,
            2.0, 4.0, 6.0, 8.0,
            5.0, 6.0, 7.0, 8.0,
            1.0, 0.0, 0.0, 1.0,
        ];
        let det = invert(&m, 1.0e-8).unwrap_err();
        assert!(det.abs() < 1.0e-8);
    }
}
