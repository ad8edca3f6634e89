//! The decoded asset graph
//!
//! All collections are ordered sequences in document order; downstream code
//! addresses entities by position. Cross-entity references are plain indices
//! wrapped in `Option` when the field is optional. No index is range-checked
//! at decode time; see [`crate::validate`] for the optional pass that does.

use std::collections::HashMap;
use std::path::PathBuf;

/// Aggregate root owning every decoded collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Asset {
    /// Top-level asset metadata. `None` only when the asset check was skipped
    /// and the document carried no usable `asset` object.
    pub info: Option<AssetInfo>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub images: Vec<Image>,
    pub textures: Vec<Texture>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
}

/// Metadata from the required top-level `asset` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

/// Where an entity's bytes live.
///
/// Every [`Buffer`] and [`Image`] owns exactly one data source; an entity
/// for which no source could be resolved fails to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Payload decoded in-process from an embedded data URI.
    Bytes {
        mime_type: MimeType,
        bytes: Vec<u8>,
    },
    /// External file, already joined to the document's base directory.
    /// Existence is checked by whoever opens the file, not here.
    FilePath(PathBuf),
    /// Payload lives in a binary chunk addressed through a buffer view.
    BufferView { index: usize, mime_type: MimeType },
}

/// MIME classification for image and buffer payloads.
///
/// `None` means unclassified, which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MimeType {
    Jpeg,
    Png,
    Ktx2,
    Dds,
    GltfBuffer,
    OctetStream,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub byte_length: u64,
    pub data: DataSource,
    pub name: Option<String>,
}

/// GPU buffer usage hint for a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl BufferTarget {
    /// Map a raw glTF target code. Unrecognized codes classify as `None`.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            34962 => Some(Self::ArrayBuffer),
            34963 => Some(Self::ElementArrayBuffer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_length: u64,
    /// Defaults to 0 when unspecified.
    pub byte_offset: u64,
    pub target: Option<BufferTarget>,
    pub name: Option<String>,
}

/// Scalar component type of an accessor, from the raw glTF code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
    /// Only accepted with [`Options::allow_double_precision`].
    ///
    /// [`Options::allow_double_precision`]: crate::Options::allow_double_precision
    Double,
}

impl ComponentType {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            5120 => Some(Self::Byte),
            5121 => Some(Self::UnsignedByte),
            5122 => Some(Self::Short),
            5123 => Some(Self::UnsignedShort),
            5125 => Some(Self::UnsignedInt),
            5126 => Some(Self::Float),
            5130 => Some(Self::Double),
            _ => None,
        }
    }

    /// Size of one component in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::UnsignedInt | Self::Float => 4,
            Self::Double => 8,
        }
    }
}

/// Element shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    pub fn from_gltf(name: &str) -> Option<Self> {
        match name {
            "SCALAR" => Some(Self::Scalar),
            "VEC2" => Some(Self::Vec2),
            "VEC3" => Some(Self::Vec3),
            "VEC4" => Some(Self::Vec4),
            "MAT2" => Some(Self::Mat2),
            "MAT3" => Some(Self::Mat3),
            "MAT4" => Some(Self::Mat4),
            _ => None,
        }
    }

    /// Number of components per element.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub component_type: ComponentType,
    pub element_type: AccessorType,
    pub count: u64,
    /// Absent for sparse or zero-filled accessors.
    pub buffer_view: Option<usize>,
    /// Defaults to 0 when unspecified.
    pub byte_offset: u64,
    /// Defaults to false when unspecified.
    pub normalized: bool,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub data: DataSource,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Resolved image index, possibly rewritten by a vendor extension.
    pub image: usize,
    /// The plain `source` field's value, kept as a fallback when an
    /// extension overrode [`Texture::image`]. Set only when the texture
    /// carried an extensions map.
    pub fallback_image: Option<usize>,
    pub sampler: Option<usize>,
    pub name: Option<String>,
}

/// Type of primitive to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveMode {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Points),
            1 => Some(Self::Lines),
            2 => Some(Self::LineLoop),
            3 => Some(Self::LineStrip),
            4 => Some(Self::Triangles),
            5 => Some(Self::TriangleStrip),
            6 => Some(Self::TriangleFan),
            _ => None,
        }
    }
}

impl Default for PrimitiveMode {
    fn default() -> Self {
        Self::Triangles
    }
}

/// A single drawable geometry unit within a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    /// Attribute semantic name (e.g. `POSITION`) to accessor index.
    pub attributes: HashMap<String, usize>,
    /// Defaults to triangles when unspecified.
    pub mode: PrimitiveMode,
    pub indices: Option<usize>,
    pub material: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub mesh: Option<usize>,
    /// Column-major local transform. Present only when the document carried
    /// exactly 16 numeric entries; anything else decodes as `None`.
    pub matrix: Option<[f32; 16]>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Node indices in traversal order.
    pub nodes: Vec<usize>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_codes() {
        assert_eq!(ComponentType::from_code(5120), Some(ComponentType::Byte));
        assert_eq!(ComponentType::from_code(5126), Some(ComponentType::Float));
        assert_eq!(ComponentType::from_code(5130), Some(ComponentType::Double));
        assert_eq!(ComponentType::from_code(5124), None);
    }

    #[test]
    fn test_component_byte_sizes() {
        assert_eq!(ComponentType::UnsignedShort.byte_size(), 2);
        assert_eq!(ComponentType::Double.byte_size(), 8);
    }

    #[test]
    fn test_accessor_type_names() {
        assert_eq!(AccessorType::from_gltf("VEC3"), Some(AccessorType::Vec3));
        assert_eq!(AccessorType::from_gltf("MAT4"), Some(AccessorType::Mat4));
        assert_eq!(AccessorType::from_gltf("vec3"), None);
        assert_eq!(AccessorType::Mat3.component_count(), 9);
    }

    #[test]
    fn test_primitive_mode_default_is_triangles() {
        assert_eq!(PrimitiveMode::default(), PrimitiveMode::Triangles);
        assert_eq!(PrimitiveMode::from_code(4), Some(PrimitiveMode::Triangles));
        assert_eq!(PrimitiveMode::from_code(7), None);
    }

    #[test]
    fn test_buffer_target_codes() {
        assert_eq!(
            BufferTarget::from_code(34962),
            Some(BufferTarget::ArrayBuffer)
        );
        assert_eq!(
            BufferTarget::from_code(34963),
            Some(BufferTarget::ElementArrayBuffer)
        );
        assert_eq!(BufferTarget::from_code(1), None);
    }
}
