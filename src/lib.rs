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

//! Spatial math kernel of a geospatial 3D renderer.
//!
//! Vectors, matrices, planes, view frustums and bounding volumes used to move coordinates
//! between geographic, Cartesian and screen space, to decide which objects are visible in a
//! frame and to find where a pick ray hits the terrain. Matrices are row-major and are applied
//! to column vectors; angles at public boundaries are in degrees.

pub use arrayvec;
pub use nalgebra as algebra;
pub use parking_lot;

pub mod bounding_box;
pub mod bounding_sphere;
pub mod error;
pub mod frustum;
pub mod geo;
pub mod line;
pub mod log;
pub mod mat3;
pub mod mat4;
pub mod plane;
pub mod settings;
pub mod vec2;
pub mod vec3;
pub mod viewport;

pub use bounding_box::{BoundingBox, CullingSegment};
pub use bounding_sphere::BoundingSphere;
pub use error::{GeomError, Result};
pub use frustum::{BoundingPlanes, Frustum};
pub use geo::{Ellipsoid, Globe, Location, PathType, Sector};
pub use line::Line;
pub use mat3::Mat3;
pub use mat4::{EigenPair, Mat4};
pub use plane::Plane;
pub use settings::{SettingsError, Tolerances};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
