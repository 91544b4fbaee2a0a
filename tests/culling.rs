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

//! Frame setup as a renderer does it: build the view matrices, derive the frustum, cull
//! bounding volumes and pick the terrain under the cursor.

use globe_math::{
    BoundingBox, BoundingSphere, Ellipsoid, Frustum, Line, Mat4, Sector, Tolerances, Vec3,
    Viewport,
};

const VIEWPORT: Viewport = Viewport::new(0, 0, 800, 600);

struct Camera {
    projection: Mat4,
    modelview: Mat4,
}

impl Camera {
    /// Camera on the +Z axis looking down at the origin.
    fn looking_down(distance: f64, near: f64, far: f64) -> Self {
        let mut projection = Mat4::IDENTITY;
        projection
            .set_to_perspective_projection(
                VIEWPORT.width as f64,
                VIEWPORT.height as f64,
                45.0,
                near,
                far,
            )
            .unwrap();
        let mut modelview = Mat4::IDENTITY;
        modelview.set_to_translation(0.0, 0.0, -distance);
        Self {
            projection,
            modelview,
        }
    }

    fn frustum(&self) -> Frustum {
        let mut frustum = Frustum::default();
        frustum.set_to_modelview_projection(&self.projection, &self.modelview, &VIEWPORT);
        frustum
    }

    fn modelview_projection(&self) -> Mat4 {
        let mut mvp = Mat4::IDENTITY;
        mvp.set_to_multiply(&self.projection, &self.modelview);
        mvp
    }
}

fn cube(center: Vec3, half: f32) -> Vec<f32> {
    let mut points = Vec::new();
    for &dx in &[-half, half] {
        for &dy in &[-half, half] {
            for &dz in &[-half, half] {
                points.extend_from_slice(&[
                    center.x as f32 + dx,
                    center.y as f32 + dy,
                    center.z as f32 + dz,
                ]);
            }
        }
    }
    points
}

#[test]
fn test_cull_boxes_and_spheres() {
    let camera = Camera::looking_down(10.0, 1.0, 100.0);
    let frustum = camera.frustum();
    assert_eq!(frustum.viewport(), &VIEWPORT);

    let mut visible = BoundingBox::default();
    visible.set_to_points(&cube(Vec3::ZERO, 1.0), 3).unwrap();
    assert!(visible.intersects_frustum(&frustum));

    let mut behind = BoundingBox::default();
    behind
        .set_to_points(&cube(Vec3::new(0.0, 0.0, 20.0), 1.0), 3)
        .unwrap();
    assert!(!behind.intersects_frustum(&frustum));

    let mut beside = BoundingBox::default();
    beside
        .set_to_points(&cube(Vec3::new(50.0, 0.0, 0.0), 1.0), 3)
        .unwrap();
    assert!(!beside.intersects_frustum(&frustum));

    let too_far = BoundingSphere::new(Vec3::new(0.0, 0.0, -200.0), 5.0).unwrap();
    assert!(!too_far.intersects_frustum(&frustum));
    let ahead = BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 5.0).unwrap();
    assert!(ahead.intersects_frustum(&frustum));

    assert!(frustum.contains_point(&Vec3::ZERO));
    assert!(!frustum.contains_point(&Vec3::new(0.0, 0.0, 10.5)));
    assert!(frustum.intersects_segment(
        &Vec3::new(-100.0, 0.0, 0.0),
        &Vec3::new(100.0, 0.0, 0.0)
    ));
}

#[test]
fn test_cull_globe_tiles() {
    let globe = Ellipsoid::wgs84();
    let radius = Ellipsoid::WGS84_SEMI_MAJOR_AXIS;
    let camera = Camera::looking_down(3.0 * radius, 1000.0, 2.5 * radius);
    let frustum = camera.frustum();

    // Longitude zero on the equator faces the camera.
    let mut facing = BoundingBox::default();
    facing
        .set_to_sector(&Sector::from_degrees(-1.0, -1.0, 2.0, 2.0), &globe, 0.0, 8848.0)
        .unwrap();
    assert!(facing.intersects_frustum(&frustum));

    let mut far_side = BoundingBox::default();
    far_side
        .set_to_sector(&Sector::from_degrees(-1.0, 178.0, 2.0, 2.0), &globe, 0.0, 8848.0)
        .unwrap();
    assert!(!far_side.intersects_frustum(&frustum));
}

#[test]
fn test_pick_terrain_under_cursor() {
    let camera = Camera::looking_down(10.0, 1.0, 100.0);
    let mvp = camera.modelview_projection();

    let origin = mvp.project(0.0, 0.0, 0.0, &VIEWPORT).unwrap();
    assert!((origin.x - 400.0).abs() < 1.0e-9);
    assert!((origin.y - 300.0).abs() < 1.0e-9);
    assert!(origin.z > 0.0 && origin.z < 1.0);

    let mut inverse = Mat4::IDENTITY;
    inverse.invert_matrix(&mvp).unwrap();

    let (near, far) = inverse.un_project(400.0, 300.0, &VIEWPORT).unwrap().unwrap();
    assert!((near.z - 9.0).abs() < 1.0e-6);
    assert!((far.z + 90.0).abs() < 1.0e-6);

    #[rustfmt::skip]
    let terrain = [
        -1.0f32, -1.0, 0.0,
        1.0, -1.0, 0.0,
        -1.0, 1.0, 0.0,
        1.0, 1.0, 0.0,
    ];
    let ray = Line::from_segment(&near, &far);
    let hit = ray
        .tri_strip_intersection(&terrain, 3, &[0, 1, 2, 3])
        .unwrap()
        .unwrap();
    assert!(hit.magnitude() < 1.0e-6);

    // Cursor far outside the terrain patch.
    let (near, far) = inverse.un_project(10.0, 10.0, &VIEWPORT).unwrap().unwrap();
    let ray = Line::from_segment(&near, &far);
    assert_eq!(
        ray.tri_strip_intersection(&terrain, 3, &[0, 1, 2, 3]).unwrap(),
        None
    );

    assert!(inverse
        .un_project(400.0, 300.0, &Viewport::new(0, 0, 0, 600))
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn test_tolerances_file() {
    let tolerances = Tolerances {
        singular_threshold: 1.0e-12,
        jacobi_max_sweeps: 64,
        ..Default::default()
    };
    let path = std::env::temp_dir().join("globe_math_culling_tolerances.ron");
    tolerances.save(&path).unwrap();
    let loaded = Tolerances::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, tolerances);

    let partial = Tolerances::from_ron_str("(ray_epsilon: 0.001)").unwrap();
    assert_eq!(partial.ray_epsilon, 0.001);
    assert_eq!(partial.singular_threshold, Tolerances::DEFAULT.singular_threshold);

    assert!(Tolerances::load("/nonexistent/dir/tolerances.ron").is_err());
}
