//! Document session: the state machine between a parsed JSON tree and the
//! released [`Asset`]
//!
//! A [`Gltf`] owns the generic tree and the asset under construction. The
//! entity parse steps are independently invokable; each one either splices a
//! fully built collection into the asset or records the session's first
//! error. A session that has recorded an error keeps running later steps but
//! never releases the asset.

use std::path::PathBuf;

use log::debug;
use serde_json::{Map, Value};

use super::entities::{
    build_accessor, build_buffer, build_buffer_view, build_image, build_mesh, build_node,
    build_scene, build_texture, ParseCtx,
};
use crate::error::{GltfError, Result};
use crate::options::Options;
use crate::types::{Asset, AssetInfo};

/// Iterate an optional named array, running `visit` per element.
///
/// Returns `Ok(false)` when the field is absent (not an error anywhere it is
/// used), `Ok(true)` after every element was visited. A present non-array
/// field, or the first failing element, aborts with a schema violation; no
/// partial recovery past a bad element.
pub(crate) fn iterate_array<F>(parent: &Map<String, Value>, name: &str, mut visit: F) -> Result<bool>
where
    F: FnMut(&Value) -> Result<()>,
{
    let Some(field) = parent.get(name) else {
        return Ok(false);
    };
    let Some(items) = field.as_array() else {
        return Err(GltfError::InvalidDocument(format!(
            "'{name}' is not an array"
        )));
    };

    for item in items {
        visit(item)?;
    }

    Ok(true)
}

/// A glTF document session over a parsed JSON tree.
///
/// Constructed by [`Loader`]; the caller drives the `parse_*` steps (or
/// [`Gltf::parse_all`]) and finishes with [`Gltf::into_asset`].
///
/// [`Loader`]: crate::Loader
pub struct Gltf {
    root: Map<String, Value>,
    directory: PathBuf,
    options: Options,
    asset: Asset,
    error: Option<GltfError>,
}

impl std::fmt::Debug for Gltf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gltf")
            .field("directory", &self.directory)
            .field("options", &self.options)
            .field("error", &self.error)
            .finish()
    }
}

impl Gltf {
    pub(crate) fn new(root: Map<String, Value>, directory: PathBuf, options: Options) -> Self {
        Self {
            root,
            directory,
            options,
            asset: Asset::default(),
            error: None,
        }
    }

    /// Read the required top-level `asset` object with its version string.
    pub(crate) fn read_asset_info(&self) -> Result<AssetInfo> {
        let asset = self
            .root
            .get("asset")
            .and_then(Value::as_object)
            .ok_or(GltfError::MissingAssetInfo)?;
        let version = asset
            .get("version")
            .and_then(Value::as_str)
            .ok_or(GltfError::MissingAssetInfo)?;

        Ok(AssetInfo {
            version: version.to_owned(),
            generator: asset
                .get("generator")
                .and_then(Value::as_str)
                .map(str::to_owned),
            copyright: asset
                .get("copyright")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    pub(crate) fn set_asset_info(&mut self, info: AssetInfo) {
        self.asset.info = Some(info);
    }

    /// Record a parse failure. The first error is sticky for the session's
    /// remaining life; later failures never overwrite it.
    fn record(&mut self, error: GltfError) -> GltfError {
        if self.error.is_none() {
            self.error = Some(error.clone());
        }
        error
    }

    fn splice<T>(
        &mut self,
        staged: Result<Vec<T>>,
        what: &str,
        apply: impl FnOnce(&mut Asset, Vec<T>),
    ) -> Result<()> {
        match staged {
            Ok(items) => {
                debug!("parsed {} {what}", items.len());
                apply(&mut self.asset, items);
                Ok(())
            }
            Err(error) => Err(self.record(error)),
        }
    }

    pub fn parse_buffers(&mut self) -> Result<()> {
        let staged = {
            let ctx = ParseCtx {
                base_dir: &self.directory,
                options: &self.options,
            };
            let mut staged = Vec::new();
            iterate_array(&self.root, "buffers", |value| {
                staged.push(build_buffer(value, &ctx)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "buffers", |asset, items| asset.buffers = items)
    }

    pub fn parse_buffer_views(&mut self) -> Result<()> {
        let staged = {
            let mut staged = Vec::new();
            iterate_array(&self.root, "bufferViews", |value| {
                staged.push(build_buffer_view(value)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "buffer views", |asset, items| {
            asset.buffer_views = items
        })
    }

    pub fn parse_accessors(&mut self) -> Result<()> {
        let staged = {
            let options = &self.options;
            let mut staged = Vec::new();
            iterate_array(&self.root, "accessors", |value| {
                staged.push(build_accessor(value, options)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "accessors", |asset, items| asset.accessors = items)
    }

    pub fn parse_images(&mut self) -> Result<()> {
        let staged = {
            let ctx = ParseCtx {
                base_dir: &self.directory,
                options: &self.options,
            };
            let mut staged = Vec::new();
            iterate_array(&self.root, "images", |value| {
                staged.push(build_image(value, &ctx)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "images", |asset, items| asset.images = items)
    }

    pub fn parse_textures(&mut self) -> Result<()> {
        let staged = {
            let options = &self.options;
            let mut staged = Vec::new();
            iterate_array(&self.root, "textures", |value| {
                staged.push(build_texture(value, options)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "textures", |asset, items| asset.textures = items)
    }

    pub fn parse_meshes(&mut self) -> Result<()> {
        let staged = {
            let mut staged = Vec::new();
            iterate_array(&self.root, "meshes", |value| {
                staged.push(build_mesh(value)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "meshes", |asset, items| asset.meshes = items)
    }

    pub fn parse_nodes(&mut self) -> Result<()> {
        let staged = {
            let mut staged = Vec::new();
            iterate_array(&self.root, "nodes", |value| {
                staged.push(build_node(value)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "nodes", |asset, items| asset.nodes = items)
    }

    pub fn parse_scenes(&mut self) -> Result<()> {
        let staged = {
            let mut staged = Vec::new();
            iterate_array(&self.root, "scenes", |value| {
                staged.push(build_scene(value)?);
                Ok(())
            })
            .map(|_| staged)
        };
        self.splice(staged, "scenes", |asset, items| asset.scenes = items)
    }

    /// Run every parse step in document order.
    ///
    /// A failing step does not stop the siblings: the whole document is
    /// still walked, but the first recorded error dooms the session.
    pub fn parse_all(&mut self) -> Result<()> {
        let _ = self.parse_buffers();
        let _ = self.parse_buffer_views();
        let _ = self.parse_accessors();
        let _ = self.parse_images();
        let _ = self.parse_textures();
        let _ = self.parse_meshes();
        let _ = self.parse_nodes();
        let _ = self.parse_scenes();

        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// The first error recorded by any parse step, if any.
    pub fn error(&self) -> Option<&GltfError> {
        self.error.as_ref()
    }

    /// Borrow the asset under construction, unless the session is doomed.
    pub fn asset(&self) -> Option<&Asset> {
        match self.error {
            Some(_) => None,
            None => Some(&self.asset),
        }
    }

    /// Release the decoded asset, consuming the session.
    ///
    /// Fails with the first recorded error if any parse step failed; the
    /// partially populated asset is never exposed.
    pub fn into_asset(self) -> Result<Asset> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.asset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(document: Value) -> Gltf {
        let Value::Object(root) = document else {
            panic!("test document must be an object");
        };
        Gltf::new(root, PathBuf::from("."), Options::default())
    }

    #[test]
    fn test_iterate_array_absent_is_not_an_error() {
        let root = Map::new();
        let found = iterate_array(&root, "buffers", |_| Ok(())).unwrap();
        assert!(!found);
    }

    #[test]
    fn test_iterate_array_non_array_is_schema_violation() {
        let Value::Object(root) = json!({ "buffers": 4 }) else {
            unreachable!();
        };
        let result = iterate_array(&root, "buffers", |_| Ok(()));
        assert!(matches!(result, Err(GltfError::InvalidDocument(_))));
    }

    #[test]
    fn test_iterate_array_stops_at_first_failure() {
        let Value::Object(root) = json!({ "items": [1, 2, 3] }) else {
            unreachable!();
        };
        let mut seen = 0;
        let result = iterate_array(&root, "items", |value| {
            seen += 1;
            if value.as_u64() == Some(2) {
                return Err(GltfError::InvalidDocument("bad element".into()));
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_failed_collection_is_not_spliced() {
        let mut gltf = session(json!({
            "nodes": [ { "mesh": 0 }, "not-an-object", { "mesh": 1 } ],
        }));
        assert!(gltf.parse_nodes().is_err());
        // The staged nodes were discarded; nothing reached the asset.
        assert!(gltf.asset.nodes.is_empty());
    }

    #[test]
    fn test_first_error_is_sticky() {
        let mut gltf = session(json!({
            "nodes": "bad",
            "scenes": [ 7 ],
        }));
        let first = gltf.parse_nodes().unwrap_err();
        let _ = gltf.parse_scenes();
        assert_eq!(gltf.error(), Some(&first));
        assert!(gltf.into_asset().is_err());
    }

    #[test]
    fn test_error_free_session_releases_asset() {
        let mut gltf = session(json!({ "scenes": [ { "nodes": [0] } ] }));
        gltf.parse_all().unwrap();
        let asset = gltf.into_asset().unwrap();
        assert_eq!(asset.scenes.len(), 1);
        assert_eq!(asset.scenes[0].nodes, vec![0]);
    }

    #[test]
    fn test_asset_accessor_refuses_doomed_session() {
        let mut gltf = session(json!({ "meshes": 3 }));
        assert!(gltf.parse_meshes().is_err());
        assert!(gltf.asset().is_none());
    }

    #[test]
    fn test_read_asset_info() {
        let gltf = session(json!({
            "asset": { "version": "2.0", "generator": "quickgltf tests" },
        }));
        let info = gltf.read_asset_info().unwrap();
        assert_eq!(info.version, "2.0");
        assert_eq!(info.generator.as_deref(), Some("quickgltf tests"));
        assert_eq!(info.copyright, None);
    }

    #[test]
    fn test_read_asset_info_requires_version() {
        let gltf = session(json!({ "asset": { "generator": "x" } }));
        assert_eq!(
            gltf.read_asset_info().unwrap_err(),
            GltfError::MissingAssetInfo
        );
    }
}
