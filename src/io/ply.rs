//! PLY (Stanford polygon) format support.
//!
//! Meshes are read with `ply-rs`, so ASCII and binary files both work.
//! Polygons with more than three corners are fan-triangulated. Files are
//! written as ASCII, optionally with one color per vertex or per face.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, to_face_vertex, HalfEdgeMesh, MeshIndex};
use crate::visual::{ColorBuffer, Domain, Rgb};

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use dgview::io::ply;
/// use dgview::mesh::HalfEdgeMesh;
///
/// let mesh: HalfEdgeMesh = ply::load("bunny.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let load_error = |message: &str| MeshError::LoadError {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| load_error(&e.to_string()))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element"))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(&format!("vertex missing {} coordinate", name)))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| load_error("PLY file has no face element"))?;

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(face_element.len());
    for face in face_element {
        let indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| load_error("face missing vertex_indices property"))?;

        // Fan triangulation; anything under three corners is dropped.
        for i in 1..indices.len().saturating_sub(1) {
            faces.push([indices[0], indices[i], indices[i + 1]]);
        }
    }

    if faces.is_empty() {
        return Err(load_error("PLY file contains no faces"));
    }

    build_from_triangles(&vertices, &faces)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a mesh to an ASCII PLY file.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    write_ply(mesh, path.as_ref(), None)
}

/// Save a mesh to an ASCII PLY file with the colors of `buffer`.
///
/// Vertex buffers become `red`/`green`/`blue` vertex properties, face
/// buffers the same properties on the face element. The buffer must hold
/// exactly one color per element of its domain.
///
/// # Example
///
/// ```no_run
/// use dgview::io::ply;
/// use dgview::visual::{DrawMode, PresenterOptions, ScalarFieldPresenter};
///
/// let mesh = dgview::io::load("bunny.ply").unwrap();
/// let presenter: ScalarFieldPresenter = ScalarFieldPresenter::load(mesh, PresenterOptions::default());
/// let colors = presenter.colors(DrawMode::MeanCurvature).unwrap();
/// ply::save_colored(presenter.mesh(), "bunny_mean.ply", &colors).unwrap();
/// ```
pub fn save_colored<P: AsRef<Path>, I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    path: P,
    buffer: &ColorBuffer,
) -> Result<()> {
    let expected = match buffer.domain {
        Domain::Vertex => mesh.num_vertices(),
        Domain::Face => mesh.num_faces(),
    };
    if buffer.len() != expected {
        return Err(MeshError::invalid_param(
            "colors",
            buffer.len(),
            "must match the number of colored elements",
        ));
    }
    write_ply(mesh, path.as_ref(), Some(buffer))
}

fn write_ply<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    path: &Path,
    buffer: Option<&ColorBuffer>,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let (vertices, faces) = to_face_vertex(mesh);
    let colors_on = |domain: Domain| buffer.filter(|b| b.domain == domain).map(|b| &b.colors);
    let vertex_colors = colors_on(Domain::Vertex);
    let face_colors = colors_on(Domain::Face);

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by dgview")?;
    writeln!(writer, "element vertex {}", vertices.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    if vertex_colors.is_some() {
        write_color_properties(&mut writer)?;
    }
    writeln!(writer, "element face {}", faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    if face_colors.is_some() {
        write_color_properties(&mut writer)?;
    }
    writeln!(writer, "end_header")?;

    for (i, v) in vertices.iter().enumerate() {
        write!(writer, "{} {} {}", v.x, v.y, v.z)?;
        write_color(&mut writer, vertex_colors.map(|c| c[i]))?;
    }

    for (i, f) in faces.iter().enumerate() {
        write!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
        write_color(&mut writer, face_colors.map(|c| c[i]))?;
    }

    writer.flush()?;
    log::info!(
        "wrote {} vertices and {} faces to {}",
        vertices.len(),
        faces.len(),
        path.display()
    );
    Ok(())
}

fn write_color_properties<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")
}

fn write_color<W: Write>(writer: &mut W, color: Option<Rgb>) -> std::io::Result<()> {
    match color {
        Some(c) => writeln!(writer, " {} {} {}", c.r, c.g, c.b),
        None => writeln!(writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_meshes::{flat_grid, tetrahedron};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dgview_ply_{}_{}.ply", name, std::process::id()))
    }

    fn read_color_rows(path: &Path, element: &str) -> Vec<[u8; 3]> {
        let file = File::open(path).unwrap();
        let ply = Parser::<DefaultElement>::new()
            .read_ply(&mut BufReader::new(file))
            .unwrap();
        ply.payload
            .get(element)
            .unwrap()
            .iter()
            .map(|e| {
                let channel = |name: &str| match e.get(name) {
                    Some(Property::UChar(v)) => *v,
                    other => panic!("unexpected {} property: {:?}", name, other),
                };
                [channel("red"), channel("green"), channel("blue")]
            })
            .collect()
    }

    #[test]
    fn test_save_load_round_trip() {
        let mesh = tetrahedron();
        let path = temp_path("round_trip");
        save(&mesh, &path).unwrap();

        let loaded: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(loaded.num_vertices(), mesh.num_vertices());
        assert_eq!(loaded.num_faces(), mesh.num_faces());
        assert!(loaded.is_closed());
        for v in mesh.vertex_ids() {
            assert!((loaded.position(v) - mesh.position(v)).norm() < 1e-6);
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_triangulates_quads() {
        let path = temp_path("quad");
        std::fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\nproperty float y\n\
             property float z\nelement face 1\nproperty list uchar int vertex_indices\n\
             end_header\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n",
        )
        .unwrap();

        let mesh: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_faces() {
        let path = temp_path("no_faces");
        std::fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nproperty float y\n\
             property float z\nend_header\n0 0 0\n",
        )
        .unwrap();

        let result: Result<HalfEdgeMesh> = load(&path);
        assert!(matches!(result, Err(MeshError::LoadError { .. })));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_vertex_colors() {
        let mesh = tetrahedron();
        let colors = vec![Rgb::BLUE, Rgb::GREEN, Rgb::RED, Rgb::new(1, 2, 3)];
        let buffer = ColorBuffer {
            domain: Domain::Vertex,
            range: (0.0, 1.0),
            colors,
        };

        let path = temp_path("vertex_colors");
        save_colored(&mesh, &path, &buffer).unwrap();
        assert_eq!(
            read_color_rows(&path, "vertex"),
            vec![[0, 0, 255], [0, 255, 0], [255, 0, 0], [1, 2, 3]]
        );

        // Colors do not get in the way of loading the geometry back.
        let loaded: HalfEdgeMesh = load(&path).unwrap();
        assert_eq!(loaded.num_faces(), 4);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_face_colors() {
        let mesh = flat_grid(1);
        let buffer = ColorBuffer {
            domain: Domain::Face,
            range: (0.6, 2.0),
            colors: vec![Rgb::RED, Rgb::BLUE],
        };

        let path = temp_path("face_colors");
        save_colored(&mesh, &path, &buffer).unwrap();
        assert_eq!(read_color_rows(&path, "face"), vec![[255, 0, 0], [0, 0, 255]]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_color_count_mismatch() {
        let mesh = tetrahedron();
        let buffer = ColorBuffer {
            domain: Domain::Face,
            range: (0.0, 1.0),
            colors: vec![Rgb::RED],
        };
        let path = temp_path("mismatch");
        assert!(matches!(
            save_colored(&mesh, &path, &buffer),
            Err(MeshError::InvalidParameter { name: "colors", .. })
        ));
    }
}
