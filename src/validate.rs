//! Optional cross-reference validation
//!
//! Decoding never range-checks indices into other collections; consumers
//! validate lazily on first use. This pass makes that check explicit and
//! reproducible as a separate step for callers that want a fully vetted
//! asset up front.

use crate::error::{GltfError, Result};
use crate::types::{Asset, DataSource};

fn check_index(what: &str, position: usize, field: &str, index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(GltfError::InvalidDocument(format!(
            "{what} {position} references {field} {index}, but only {len} exist"
        )));
    }
    Ok(())
}

/// Check that every cross-collection index in `asset` is in range.
///
/// Fails with the first dangling reference found. Samplers and materials are
/// not decoded, so references to them are not checked.
pub fn validate(asset: &Asset) -> Result<()> {
    for (i, view) in asset.buffer_views.iter().enumerate() {
        check_index("bufferView", i, "buffer", view.buffer, asset.buffers.len())?;
    }

    for (i, accessor) in asset.accessors.iter().enumerate() {
        if let Some(view) = accessor.buffer_view {
            check_index("accessor", i, "bufferView", view, asset.buffer_views.len())?;
        }
    }

    for (i, image) in asset.images.iter().enumerate() {
        if let DataSource::BufferView { index, .. } = image.data {
            check_index("image", i, "bufferView", index, asset.buffer_views.len())?;
        }
    }

    for (i, texture) in asset.textures.iter().enumerate() {
        check_index("texture", i, "image", texture.image, asset.images.len())?;
        if let Some(fallback) = texture.fallback_image {
            check_index("texture", i, "fallback image", fallback, asset.images.len())?;
        }
    }

    for (i, mesh) in asset.meshes.iter().enumerate() {
        for primitive in &mesh.primitives {
            for (semantic, &accessor) in &primitive.attributes {
                check_index(
                    "mesh",
                    i,
                    &format!("accessor (attribute '{semantic}')"),
                    accessor,
                    asset.accessors.len(),
                )?;
            }
            if let Some(indices) = primitive.indices {
                check_index("mesh", i, "indices accessor", indices, asset.accessors.len())?;
            }
        }
    }

    for (i, node) in asset.nodes.iter().enumerate() {
        if let Some(mesh) = node.mesh {
            check_index("node", i, "mesh", mesh, asset.meshes.len())?;
        }
    }

    for (i, scene) in asset.scenes.iter().enumerate() {
        for &node in &scene.nodes {
            check_index("scene", i, "node", node, asset.nodes.len())?;
        }
    }

    Ok(())
}
