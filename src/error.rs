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

//! Errors that may occur in the spatial math kernel.

use std::fmt::{Display, Formatter};

/// A failure of a kernel operation. Argument errors are programmer errors and are reported
/// before the receiver is touched; numerical errors are reported instead of producing garbage.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomError {
    /// An argument was out of its valid range: non-positive dimension, out-of-range field of
    /// view, too short stride, empty point set and so on.
    InvalidArgument {
        /// Name of the type the failed method belongs to, for instance "Mat4".
        type_name: &'static str,
        /// Name of the failed method.
        method: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },
    /// A matrix could not be inverted because its determinant is (nearly) zero.
    SingularMatrix {
        /// Determinant computed from the LU decomposition.
        determinant: f64,
    },
}

impl GeomError {
    /// Creates [`GeomError::InvalidArgument`] and writes it into the log at error level.
    pub fn invalid_argument<S>(type_name: &'static str, method: &'static str, message: S) -> Self
    where
        S: Into<String>,
    {
        let error = Self::InvalidArgument {
            type_name,
            method,
            message: message.into(),
        };
        crate::err!("{}", error);
        error
    }

    /// Returns `true` if the error was caused by a bad argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` if the error was caused by a singular matrix.
    pub fn is_singular_matrix(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. })
    }
}

impl std::error::Error for GeomError {}

impl Display for GeomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument {
                type_name,
                method,
                message,
            } => write!(f, "{type_name}::{method}: invalid argument: {message}"),
            Self::SingularMatrix { determinant } => {
                write!(f, "matrix is singular (determinant {determinant:e})")
            }
        }
    }
}

/// Shortcut for results of kernel operations.
pub type Result<T> = std::result::Result<T, GeomError>;

#[cfg(test)]
mod test {
    use super::GeomError;

    #[test]
    fn test_display() {
        let e = GeomError::InvalidArgument {
            type_name: "Mat4",
            method: "set_to_scale",
            message: "bad".to_string(),
        };
        assert_eq!(e.to_string(), "Mat4::set_to_scale: invalid argument: bad");
        assert!(e.is_invalid_argument());
        assert!(!e.is_singular_matrix());

        let e = GeomError::SingularMatrix { determinant: 0.0 };
        assert!(e.is_singular_matrix());
        assert!(e.to_string().starts_with("matrix is singular"));
    }

    #[test]
    fn test_invalid_argument_constructor() {
        let e = GeomError::invalid_argument("Line", "tri_strip_intersection", "stride");
        assert_eq!(
            e,
            GeomError::InvalidArgument {
                type_name: "Line",
                method: "tri_strip_intersection",
                message: "stride".to_string()
            }
        );
    }
}
