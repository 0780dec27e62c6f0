//! Small meshes shared by the estimator tests.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::mesh::{build_from_triangles, HalfEdgeMesh};

/// A flat `n x n` grid of unit squares in the z = 0 plane, each split along
/// its diagonal. Vertex `(i, j)` has index `j * (n + 1) + i`.
pub fn flat_grid(n: usize) -> HalfEdgeMesh {
    grid_with_height(n, |_, _| 0.0)
}

/// Like [`flat_grid`], with `z = height(x, y)`.
pub fn grid_with_height(n: usize, height: impl Fn(f64, f64) -> f64) -> HalfEdgeMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (i as f64, j as f64);
            vertices.push(Point3::new(x, y, height(x, y)));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

/// Index of grid vertex `(i, j)` in a grid built by [`flat_grid`].
pub fn grid_vertex(n: usize, i: usize, j: usize) -> usize {
    j * (n + 1) + i
}

/// A unit icosphere: the regular icosahedron subdivided `subdivisions` times
/// with new vertices projected back onto the sphere.
pub fn icosphere(subdivisions: usize) -> HalfEdgeMesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let scale = 1.0 / (1.0 + phi * phi).sqrt();

    let mut vertices: Vec<Point3<f64>> = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ]
    .iter()
    .map(|&[x, y, z]| Point3::new(x * scale, y * scale, z * scale))
    .collect();

    let mut faces: Vec<[usize; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);

        for face in &faces {
            let mut mids = [0usize; 3];
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                let key = (a.min(b), a.max(b));
                mids[k] = *midpoints.entry(key).or_insert_with(|| {
                    let mid = (vertices[a].coords + vertices[b].coords).normalize();
                    vertices.push(Point3::from(mid));
                    vertices.len() - 1
                });
            }

            next_faces.push([face[0], mids[0], mids[2]]);
            next_faces.push([face[1], mids[1], mids[0]]);
            next_faces.push([face[2], mids[2], mids[1]]);
            next_faces.push([mids[0], mids[1], mids[2]]);
        }

        faces = next_faces;
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

/// A closed, irregular tetrahedron.
pub fn tetrahedron() -> HalfEdgeMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    build_from_triangles(&vertices, &faces).unwrap()
}

/// A single triangle with the given corners.
pub fn triangle(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> HalfEdgeMesh {
    build_from_triangles(&[p0, p1, p2], &[[0, 1, 2]]).unwrap()
}
