//! URI and MIME resolution for buffer and image data
//!
//! Turns a `uri` field into a concrete [`DataSource`]: embedded base64
//! payloads are decoded in-process, anything else becomes an external file
//! path joined to the document's base directory. Buffer-view references are
//! the caller's responsibility; they come from a different field entirely.

use std::path::Path;

use crate::codec::decode_base64;
use crate::error::{GltfError, Result};
use crate::options::CodecPolicy;
use crate::types::{DataSource, MimeType};

/// Classify a MIME string against the supported image and buffer encodings.
///
/// Unrecognized strings classify as [`MimeType::None`]; that is not an error.
pub fn classify_mime(mime: &str) -> MimeType {
    match mime {
        "image/jpeg" => MimeType::Jpeg,
        "image/png" => MimeType::Png,
        "image/ktx2" => MimeType::Ktx2,
        "image/vnd-ms.dds" => MimeType::Dds,
        "application/gltf-buffer" => MimeType::GltfBuffer,
        "application/octet-stream" => MimeType::OctetStream,
        _ => MimeType::None,
    }
}

/// Resolve a `uri` field into a [`DataSource`].
///
/// Data URIs must name `base64` as their encoding; any other encoding, or a
/// missing `;`/`,` delimiter pair, is a schema violation. External paths are
/// joined to `base_dir` without an existence check.
pub(crate) fn decode_uri(uri: &str, base_dir: &Path, policy: CodecPolicy) -> Result<DataSource> {
    if let Some(rest) = uri.strip_prefix("data:") {
        let Some(semi) = rest.find(';') else {
            return Err(GltfError::InvalidDocument(
                "data URI without an encoding separator".into(),
            ));
        };
        let Some(comma) = rest[semi + 1..].find(',').map(|c| semi + 1 + c) else {
            return Err(GltfError::InvalidDocument(
                "data URI without a payload separator".into(),
            ));
        };

        let encoding = &rest[semi + 1..comma];
        if encoding != "base64" {
            return Err(GltfError::InvalidDocument(format!(
                "unsupported data URI encoding '{encoding}'"
            )));
        }

        let bytes = decode_base64(&rest[comma + 1..], policy)?;
        Ok(DataSource::Bytes {
            mime_type: classify_mime(&rest[..semi]),
            bytes,
        })
    } else {
        Ok(DataSource::FilePath(base_dir.join(uri)))
    }
}
