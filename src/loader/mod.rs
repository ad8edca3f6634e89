//! Loader module: input provenance checks and session construction
//!
//! The [`Loader`] validates where the bytes come from (path existence, file
//! extension, base directory), feeds them to the JSON collaborator, and
//! hands back a [`Gltf`] session ready for the entity parse steps.

mod document;
mod entities;
mod extensions;
pub mod source;

pub use document::Gltf;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::error::{GltfError, Result};
use crate::options::Options;

/// Constructs document sessions from files or in-memory bytes.
///
/// Stateless; all configuration travels in [`Options`] per call, so one
/// loader can serve any number of loads with different settings.
#[derive(Debug, Default, Clone)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Load a `.gltf` document from a file.
    ///
    /// The path must exist and carry the `.gltf` extension unless
    /// [`Options::skip_extension_check`] is set. External URIs inside the
    /// document resolve relative to the file's parent directory.
    pub fn load_file<P: AsRef<Path>>(&self, path: P, options: Options) -> Result<Gltf> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GltfError::InvalidPath(path.display().to_string()));
        }
        if !options.skip_extension_check
            && path.extension().and_then(OsStr::to_str) != Some("gltf")
        {
            return Err(GltfError::InvalidPath(format!(
                "expected a .gltf file: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| GltfError::InvalidPath(format!("{}: {e}", path.display())))?;
        debug!("read {} bytes from {}", bytes.len(), path.display());

        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.parse_document(&bytes, directory, options)
    }

    /// Load a document from an in-memory byte buffer.
    ///
    /// `base_dir` must be an existing directory; external URIs inside the
    /// document resolve relative to it.
    pub fn load_bytes<P: AsRef<Path>>(
        &self,
        bytes: &[u8],
        base_dir: P,
        options: Options,
    ) -> Result<Gltf> {
        let base_dir = base_dir.as_ref();
        if !base_dir.is_dir() {
            return Err(GltfError::InvalidPath(format!(
                "not a directory: {}",
                base_dir.display()
            )));
        }
        self.parse_document(bytes, base_dir.to_path_buf(), options)
    }

    fn parse_document(&self, bytes: &[u8], directory: PathBuf, options: Options) -> Result<Gltf> {
        // JSON documents shorter than 4 bytes cannot be a glTF root.
        if bytes.len() < 4 {
            return Err(GltfError::InvalidJson("document too short".into()));
        }

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| GltfError::InvalidJson(e.to_string()))?;
        let Value::Object(root) = value else {
            return Err(GltfError::InvalidJson("root is not an object".into()));
        };

        let mut gltf = Gltf::new(root, directory, options);
        if options.skip_asset_check {
            match gltf.read_asset_info() {
                Ok(info) => gltf.set_asset_info(info),
                Err(_) => warn!("document has no usable top-level asset object"),
            }
        } else {
            let info = gltf.read_asset_info()?;
            debug!("glTF version {}", info.version);
            gltf.set_asset_info(info);
        }

        Ok(gltf)
    }
}
