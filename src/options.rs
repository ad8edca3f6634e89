//! Per-call decoding configuration
//!
//! Every toggle is threaded through [`Options`] on each load call. There is
//! no process-wide state; two loads with different options never interfere.

/// Selects which codec implementation decodes embedded base64 payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodecPolicy {
    /// Use the vectorized `base64` crate engine.
    #[default]
    Accelerated,
    /// Use the in-crate scalar decoder.
    Scalar,
}

/// Configuration for a single decode call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Accept accessors with the double-precision component type (5130).
    pub allow_double_precision: bool,

    /// Skip the `.gltf` file extension check in [`Loader::load_file`].
    ///
    /// [`Loader::load_file`]: crate::Loader::load_file
    pub skip_extension_check: bool,

    /// Do not require a valid top-level `asset` object with a version string.
    pub skip_asset_check: bool,

    /// Recognize the `KHR_texture_basisu` texture source extension.
    pub load_basisu_extension: bool,

    /// Recognize the `MSFT_texture_dds` texture source extension.
    pub load_dds_extension: bool,

    /// Codec implementation for embedded base64 payloads.
    pub codec_policy: CodecPolicy,
}

impl Options {
    /// Strict defaults: no double precision, extension and asset checks on,
    /// no vendor extensions, accelerated codecs.
    pub fn new() -> Self {
        Self::default()
    }
}
