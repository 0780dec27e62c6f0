//! Mesh file I/O.
//!
//! Parsing is left to `ply-rs` and `stl_io`; this module turns their output
//! into a [`HalfEdgeMesh`] and back.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | PLY | `.ply` | ✓ | ✓ | Saving can attach vertex or face colors |
//! | STL | `.stl` | ✓ | ✓ | Binary and ASCII |
//!
//! # Usage
//!
//! ```no_run
//! use dgview::io::{load, save};
//! use dgview::mesh::HalfEdgeMesh;
//!
//! let mesh: HalfEdgeMesh = load("model.stl").unwrap();
//! save(&mesh, "model.ply").unwrap();
//! ```

pub mod ply;
pub mod stl;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PLY (Stanford polygon) format.
    Ply,
    /// STL (stereolithography) format.
    Stl,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "ply" => Some(Format::Ply),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    /// Detect format from file path, failing on unknown extensions.
    pub fn require<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a mesh from a file with automatic format detection.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<HalfEdgeMesh<I>> {
    let path = path.as_ref();
    let mesh = match Format::require(path)? {
        Format::Ply => ply::load(path)?,
        Format::Stl => stl::load(path)?,
    };
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Save a mesh to a file with automatic format detection.
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &HalfEdgeMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    match Format::require(path)? {
        Format::Ply => ply::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_meshes::tetrahedron;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/model.PLY"), Some(Format::Ply));
        assert_eq!(Format::from_path("model.stl"), Some(Format::Stl));
        assert_eq!(Format::from_path("model.obj"), None);
        assert_eq!(Format::from_path("model"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = save(&tetrahedron(), "model.obj").unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { ref extension } if extension == "obj"));

        let result: Result<HalfEdgeMesh> = load("model");
        assert!(matches!(
            result,
            Err(MeshError::UnsupportedFormat { ref extension }) if extension == "(none)"
        ));
    }

    #[test]
    fn test_dispatch_round_trip() {
        let mesh = tetrahedron();
        for ext in ["ply", "stl"] {
            let path = std::env::temp_dir().join(format!("dgview_io_{}.{}", std::process::id(), ext));
            save(&mesh, &path).unwrap();
            let loaded: HalfEdgeMesh = load(&path).unwrap();
            assert_eq!(loaded.num_faces(), 4, "{}", ext);
            std::fs::remove_file(&path).ok();
        }
    }
}
