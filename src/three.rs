//! Bindings to the parts of three.js used by this crate.
//!
//! The classes are imported from the three.js 0.136.0 ES module build. Only the members that are
//! actually used are bound.

use js_sys::{Array, Float64Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::diagnostics::Diagnostics;
use crate::loader::{DecoderConfig, LoaderFactory};
use crate::vertex::{
    InterleavedAttribute, InterleavedBuffer, InvalidInterleavedLayout, VertexAttribute,
};

#[wasm_bindgen(module = "https://cdn.skypack.dev/three@0.136.0")]
extern "C" {
    /// A `THREE.BufferAttribute`: tightly packed attribute data.
    pub type BufferAttribute;

    /// The backing typed array.
    #[wasm_bindgen(method, getter)]
    pub fn array(this: &BufferAttribute) -> JsValue;

    /// A `THREE.InterleavedBufferAttribute`: a view of one attribute in an interleaved buffer.
    pub type InterleavedBufferAttribute;

    #[wasm_bindgen(method, getter)]
    pub fn data(this: &InterleavedBufferAttribute) -> InterleavedBufferData;

    #[wasm_bindgen(method, getter, js_name = itemSize)]
    pub fn item_size(this: &InterleavedBufferAttribute) -> u32;

    #[wasm_bindgen(method, getter)]
    pub fn offset(this: &InterleavedBufferAttribute) -> u32;
}

#[wasm_bindgen(module = "https://cdn.skypack.dev/three@0.136.0")]
extern "C" {
    /// A `THREE.InterleavedBuffer`.
    #[wasm_bindgen(js_name = InterleavedBuffer)]
    pub type InterleavedBufferData;

    #[wasm_bindgen(method, getter, js_class = "InterleavedBuffer")]
    pub fn array(this: &InterleavedBufferData) -> JsValue;

    #[wasm_bindgen(method, getter, js_class = "InterleavedBuffer")]
    pub fn stride(this: &InterleavedBufferData) -> u32;

    #[wasm_bindgen(method, getter, js_class = "InterleavedBuffer")]
    pub fn count(this: &InterleavedBufferData) -> u32;
}

#[wasm_bindgen(module = "https://cdn.skypack.dev/three@0.136.0/examples/jsm/loaders/DRACOLoader.js")]
extern "C" {
    #[wasm_bindgen(js_name = DRACOLoader)]
    pub type DracoLoader;

    #[wasm_bindgen(constructor, js_class = "DRACOLoader")]
    pub fn new() -> DracoLoader;

    #[wasm_bindgen(method, js_class = "DRACOLoader", js_name = setDecoderPath)]
    pub fn set_decoder_path(this: &DracoLoader, path: &str);

    #[wasm_bindgen(method, js_class = "DRACOLoader", js_name = setDecoderConfig)]
    pub fn set_decoder_config(this: &DracoLoader, config: &JsValue);

    #[wasm_bindgen(method, js_class = "DRACOLoader", js_name = setWorkerLimit)]
    pub fn set_worker_limit(this: &DracoLoader, worker_limit: u32);
}

#[wasm_bindgen(module = "https://cdn.skypack.dev/three@0.136.0/examples/jsm/loaders/GLTFLoader.js")]
extern "C" {
    #[wasm_bindgen(js_name = GLTFLoader)]
    pub type GltfLoader;

    #[wasm_bindgen(constructor, js_class = "GLTFLoader")]
    pub fn new() -> GltfLoader;

    #[wasm_bindgen(method, js_class = "GLTFLoader", js_name = setDRACOLoader)]
    pub fn set_draco_loader(this: &GltfLoader, draco_loader: &DracoLoader);
}

/// Creates the three.js loader classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreeJs;

impl LoaderFactory for ThreeJs {
    type Loader = GltfLoader;

    type Decoder = DracoLoader;

    fn create_decoder(&self) -> DracoLoader {
        DracoLoader::new()
    }

    fn set_decoder_path(&self, decoder: &DracoLoader, path: &str) {
        decoder.set_decoder_path(path);
    }

    fn set_decoder_config(&self, decoder: &DracoLoader, config: &DecoderConfig) {
        // `DecoderConfig` holds only a unit enum, which has no failing serialization path.
        let config =
            JsValue::from_serde(config).expect("a decoder config always serializes to an object");

        decoder.set_decoder_config(&config);
    }

    fn set_worker_limit(&self, decoder: &DracoLoader, worker_limit: u32) {
        decoder.set_worker_limit(worker_limit);
    }

    fn create_loader(&self) -> GltfLoader {
        GltfLoader::new()
    }

    fn attach_decoder(&self, loader: &GltfLoader, decoder: &DracoLoader) {
        loader.set_draco_loader(decoder);
    }
}

/// Turns a three.js vertex attribute into a flat array of its components.
///
/// - `null` and `undefined` give `null`;
/// - a `BufferAttribute` gives its backing typed array (the same object, not a copy);
/// - an `InterleavedBufferAttribute` gives a new `Array` of numbers;
/// - anything else is reported with one warning on `diagnostics` and gives `undefined`.
pub fn attribute_to_array<D>(
    value: &JsValue,
    diagnostics: &D,
) -> Result<JsValue, InvalidInterleavedLayout>
where
    D: Diagnostics + ?Sized,
{
    if value.is_null() || value.is_undefined() {
        return Ok(JsValue::NULL);
    }

    if let Some(attribute) = value.dyn_ref::<BufferAttribute>() {
        return Ok(attribute.array());
    }

    if let Some(js_attribute) = value.dyn_ref::<InterleavedBufferAttribute>() {
        let data = js_attribute.data();

        // Copies any numeric typed array into doubles, which represent all of them exactly.
        let array = Float64Array::new(&data.array()).to_vec();
        let buffer =
            InterleavedBuffer::with_count(&array, data.stride() as usize, data.count() as usize)?;
        let attribute = InterleavedAttribute::new(
            buffer,
            js_attribute.item_size() as usize,
            js_attribute.offset() as usize,
        )?;

        let result: Array = VertexAttribute::from(attribute)
            .to_flat_array()
            .iter()
            .map(|value| JsValue::from_f64(*value))
            .collect();

        return Ok(result.into());
    }

    diagnostics.warn(&format!("unknown vertex attribute type: {:?}", value));

    Ok(JsValue::UNDEFINED)
}
