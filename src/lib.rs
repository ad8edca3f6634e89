//! quickgltf - Defensive glTF 2.0 document decoding
//!
//! Decodes a glTF JSON document into a strongly-typed [`Asset`] graph,
//! failing precisely on malformed input instead of silently accepting it.
//! Binary payloads resolve to embedded bytes (data URIs), external file
//! paths, or buffer-view references; vendor extensions that override a
//! texture's image source are resolved in a fixed priority order.
//!
//! # Quick Start
//!
//! ```
//! use quickgltf::{Loader, Options};
//!
//! let document = br#"{
//!     "asset": { "version": "2.0" },
//!     "scenes": [ { "nodes": [] } ]
//! }"#;
//!
//! let mut gltf = Loader::new().load_bytes(document, ".", Options::default())?;
//! gltf.parse_all()?;
//! let asset = gltf.into_asset()?;
//! assert_eq!(asset.scenes.len(), 1);
//! # Ok::<(), quickgltf::GltfError>(())
//! ```
//!
//! Decoding never range-checks cross-collection indices; run
//! [`validate`] afterwards for a fully vetted asset.

// Core modules
pub mod codec;
pub mod loader;
pub mod types;
pub mod validate;

// Support modules
mod options;

// Error types
mod error;
pub use error::{GltfError, Result};

// Re-export the loading entry points
pub use loader::source::classify_mime;
pub use loader::{Gltf, Loader};

// Re-export configuration
pub use options::{CodecPolicy, Options};

// Re-export the asset graph
pub use types::{
    Accessor, AccessorType, Asset, AssetInfo, Buffer, BufferTarget, BufferView, ComponentType,
    DataSource, Image, Mesh, MimeType, Node, Primitive, PrimitiveMode, Scene, Texture,
};

// Re-export the validation pass
pub use validate::validate;

// Version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_loader_available() {
        let _loader = Loader::new();
    }
}
