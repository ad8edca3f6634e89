//! Per-entity builders
//!
//! Every builder consumes one element of a top-level array and applies the
//! format's field rules: fail on any missing or mistyped required field,
//! substitute the documented default for absent optional fields, then apply
//! the entity's cross-field rules.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use super::document::iterate_array;
use super::extensions::resolve_image_source;
use super::source::{classify_mime, decode_uri};
use crate::error::{GltfError, Result};
use crate::options::Options;
use crate::types::{
    Accessor, AccessorType, Buffer, BufferTarget, BufferView, ComponentType, DataSource, Image,
    Mesh, Node, Primitive, PrimitiveMode, Scene, Texture,
};

/// Shared context for builders that resolve data sources.
pub(crate) struct ParseCtx<'a> {
    pub base_dir: &'a Path,
    pub options: &'a Options,
}

fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| GltfError::InvalidDocument(format!("{what} element is not an object")))
}

fn required_u64(obj: &Map<String, Value>, field: &str, what: &str) -> Result<u64> {
    obj.get(field).and_then(Value::as_u64).ok_or_else(|| {
        GltfError::InvalidDocument(format!("{what} is missing required field '{field}'"))
    })
}

/// Optional index fields substitute `None` when absent or mistyped.
fn optional_index(obj: &Map<String, Value>, field: &str) -> Option<usize> {
    obj.get(field).and_then(Value::as_u64).map(|i| i as usize)
}

fn optional_name(obj: &Map<String, Value>) -> Option<String> {
    obj.get("name").and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn build_buffer(value: &Value, ctx: &ParseCtx) -> Result<Buffer> {
    let obj = object(value, "buffer")?;
    let byte_length = required_u64(obj, "byteLength", "buffer")?;

    // A GLB buffer would point at the binary chunk instead of carrying a
    // "uri" field; chunk parsing is out of scope, so a buffer without a URI
    // has no usable data source.
    let data = match obj.get("uri").and_then(Value::as_str) {
        Some(uri) => decode_uri(uri, ctx.base_dir, ctx.options.codec_policy)?,
        None => {
            return Err(GltfError::InvalidDocument(
                "buffer has no data source".into(),
            ))
        }
    };

    Ok(Buffer {
        byte_length,
        data,
        name: optional_name(obj),
    })
}

pub(crate) fn build_buffer_view(value: &Value) -> Result<BufferView> {
    let obj = object(value, "bufferView")?;

    Ok(BufferView {
        buffer: required_u64(obj, "buffer", "bufferView")? as usize,
        byte_length: required_u64(obj, "byteLength", "bufferView")?,
        byte_offset: obj.get("byteOffset").and_then(Value::as_u64).unwrap_or(0),
        target: obj
            .get("target")
            .and_then(Value::as_u64)
            .and_then(BufferTarget::from_code),
        name: optional_name(obj),
    })
}

pub(crate) fn build_accessor(value: &Value, options: &Options) -> Result<Accessor> {
    let obj = object(value, "accessor")?;

    let code = required_u64(obj, "componentType", "accessor")?;
    let component_type = ComponentType::from_code(code)
        .ok_or_else(|| GltfError::InvalidDocument(format!("unknown component type {code}")))?;
    if component_type == ComponentType::Double && !options.allow_double_precision {
        return Err(GltfError::InvalidDocument(
            "double-precision accessors require Options::allow_double_precision".into(),
        ));
    }

    let type_name = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
        GltfError::InvalidDocument("accessor is missing required field 'type'".into())
    })?;
    let element_type = AccessorType::from_gltf(type_name).ok_or_else(|| {
        GltfError::InvalidDocument(format!("unknown accessor type '{type_name}'"))
    })?;

    Ok(Accessor {
        component_type,
        element_type,
        count: required_u64(obj, "count", "accessor")?,
        buffer_view: optional_index(obj, "bufferView"),
        byte_offset: obj.get("byteOffset").and_then(Value::as_u64).unwrap_or(0),
        normalized: obj
            .get("normalized")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        name: optional_name(obj),
    })
}

pub(crate) fn build_image(value: &Value, ctx: &ParseCtx) -> Result<Image> {
    let obj = object(value, "image")?;

    let data = if let Some(uri) = obj.get("uri").and_then(Value::as_str) {
        if obj.contains_key("bufferView") {
            return Err(GltfError::InvalidDocument(
                "image declares both 'uri' and 'bufferView'".into(),
            ));
        }
        let mut source = decode_uri(uri, ctx.base_dir, ctx.options.codec_policy)?;
        // An explicit mimeType overrides whatever the data URI declared.
        if let Some(mime) = obj.get("mimeType").and_then(Value::as_str) {
            if let DataSource::Bytes { mime_type, .. } = &mut source {
                *mime_type = classify_mime(mime);
            }
        }
        source
    } else if let Some(index) = obj.get("bufferView").and_then(Value::as_u64) {
        let Some(mime) = obj.get("mimeType").and_then(Value::as_str) else {
            return Err(GltfError::InvalidDocument(
                "image with 'bufferView' requires 'mimeType'".into(),
            ));
        };
        DataSource::BufferView {
            index: index as usize,
            mime_type: classify_mime(mime),
        }
    } else {
        return Err(GltfError::InvalidDocument(
            "image has no data source".into(),
        ));
    };

    Ok(Image {
        data,
        name: optional_name(obj),
    })
}

pub(crate) fn build_texture(value: &Value, options: &Options) -> Result<Texture> {
    let obj = object(value, "texture")?;
    let extensions = obj.get("extensions").and_then(Value::as_object);
    let source = optional_index(obj, "source");

    let (image, fallback_image) = match extensions {
        // An extensions map is a commitment to an image source override; the
        // plain "source" field is kept only as the fallback.
        Some(extensions) => {
            let Some(image) = resolve_image_source(extensions, options)? else {
                return Err(GltfError::InvalidDocument(
                    "texture extensions supply no image source".into(),
                ));
            };
            (image, source)
        }
        None => {
            let Some(image) = source else {
                return Err(GltfError::InvalidDocument(
                    "texture has no image source".into(),
                ));
            };
            (image, None)
        }
    };

    Ok(Texture {
        image,
        fallback_image,
        sampler: optional_index(obj, "sampler"),
        name: optional_name(obj),
    })
}

pub(crate) fn build_mesh(value: &Value) -> Result<Mesh> {
    let obj = object(value, "mesh")?;

    let mut primitives = Vec::new();
    iterate_array(obj, "primitives", |value| {
        primitives.push(build_primitive(value)?);
        Ok(())
    })?;

    Ok(Mesh {
        primitives,
        name: optional_name(obj),
    })
}

fn build_primitive(value: &Value) -> Result<Primitive> {
    let obj = object(value, "primitive")?;

    let attributes_obj = obj.get("attributes").and_then(Value::as_object).ok_or_else(|| {
        GltfError::InvalidDocument("primitive is missing required field 'attributes'".into())
    })?;
    let mut attributes = HashMap::with_capacity(attributes_obj.len());
    for (semantic, accessor) in attributes_obj {
        let Some(index) = accessor.as_u64() else {
            return Err(GltfError::InvalidDocument(format!(
                "attribute '{semantic}' is not an accessor index"
            )));
        };
        attributes.insert(semantic.clone(), index as usize);
    }

    let mode = match obj.get("mode").and_then(Value::as_u64) {
        Some(code) => PrimitiveMode::from_code(code)
            .ok_or_else(|| GltfError::InvalidDocument(format!("unknown primitive mode {code}")))?,
        None => PrimitiveMode::default(),
    };

    Ok(Primitive {
        attributes,
        mode,
        indices: optional_index(obj, "indices"),
        material: optional_index(obj, "material"),
    })
}

pub(crate) fn build_node(value: &Value) -> Result<Node> {
    let obj = object(value, "node")?;

    // All-or-nothing: the matrix is present only when the document carries
    // exactly 16 numeric entries. Partial data never reaches the node.
    let matrix = obj.get("matrix").and_then(Value::as_array).and_then(|items| {
        if items.len() != 16 {
            return None;
        }
        let mut matrix = [0.0f32; 16];
        for (slot, item) in matrix.iter_mut().zip(items) {
            *slot = item.as_f64()? as f32;
        }
        Some(matrix)
    });

    Ok(Node {
        mesh: optional_index(obj, "mesh"),
        matrix,
        name: optional_name(obj),
    })
}

pub(crate) fn build_scene(value: &Value) -> Result<Scene> {
    let obj = object(value, "scene")?;

    let mut nodes = Vec::new();
    iterate_array(obj, "nodes", |value| {
        let Some(index) = value.as_u64() else {
            return Err(GltfError::InvalidDocument(
                "scene node reference is not an index".into(),
            ));
        };
        nodes.push(index as usize);
        Ok(())
    })?;

    Ok(Scene {
        nodes,
        name: optional_name(obj),
    })
}
