//! Vendor extensions that override a texture's image source
//!
//! `KHR_texture_basisu` and `MSFT_texture_dds` both let a texture point at
//! an alternative image. Candidates are consulted in that fixed order, each
//! gated by its [`Options`] flag; the first one that supplies a `source`
//! index wins.

use serde_json::{Map, Value};

use crate::error::{GltfError, Result};
use crate::options::Options;

const BASISU_EXTENSION: &str = "KHR_texture_basisu";
const DDS_EXTENSION: &str = "MSFT_texture_dds";

/// Look up one extension candidate inside a texture's extensions map.
///
/// Returns `Ok(None)` both when the key is absent and when the extension
/// object carries no `source` index; either way the next candidate is tried.
/// A key whose value is not an object is a schema violation.
fn image_index_for_extension(
    extensions: &Map<String, Value>,
    extension: &str,
) -> Result<Option<usize>> {
    let Some(value) = extensions.get(extension) else {
        return Ok(None);
    };
    let Some(object) = value.as_object() else {
        return Err(GltfError::InvalidDocument(format!(
            "texture extension '{extension}' is not an object"
        )));
    };
    Ok(object
        .get("source")
        .and_then(Value::as_u64)
        .map(|index| index as usize))
}

/// Resolve the image source override from a texture's extensions map.
///
/// `Ok(None)` means no enabled candidate supplied a source; the caller
/// treats that as a decode failure, because an extensions map on a texture
/// is a commitment to an image source override.
pub(crate) fn resolve_image_source(
    extensions: &Map<String, Value>,
    options: &Options,
) -> Result<Option<usize>> {
    let candidates = [
        (BASISU_EXTENSION, options.load_basisu_extension),
        (DDS_EXTENSION, options.load_dds_extension),
    ];

    for (extension, enabled) in candidates {
        if !enabled {
            continue;
        }
        if let Some(index) = image_index_for_extension(extensions, extension)? {
            return Ok(Some(index));
        }
    }

    Ok(None)
}
