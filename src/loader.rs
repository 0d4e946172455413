//! Configures glTF loaders with Draco mesh decompression.
//!
//! The loader itself is provided by three.js (see [crate::three]); this module only decides how
//! it is composed. A [GltfLoaderDescriptor] describes the loader, [create_gltf_loader] builds it
//! through a [LoaderFactory], and [new_gltf_loader] builds the default configuration: a loader
//! with a Draco decoder fetched from [DRACO_DECODER_PATH].

use serde_derive::Serialize;

use crate::three::{GltfLoader, ThreeJs};

/// Where the Draco decoder scripts and WebAssembly module are fetched from.
pub const DRACO_DECODER_PATH: &str = "https://threejs.org/examples/js/libs/draco/";

/// Which build of the Draco decoder to load.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderType {
    Js,
    Wasm,
}

/// The object passed to the decoder's `setDecoderConfig`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct DecoderConfig {
    #[serde(rename = "type")]
    pub decoder_type: DecoderType,
}

#[derive(Clone, PartialEq, Debug)]
pub struct DracoLoaderDescriptor {
    decoder_path: String,
    decoder_type: Option<DecoderType>,
    worker_limit: Option<u32>,
}

impl DracoLoaderDescriptor {
    pub fn begin() -> DracoLoaderDescriptorBuilder {
        DracoLoaderDescriptorBuilder {
            decoder_path: DRACO_DECODER_PATH.to_string(),
            decoder_type: None,
            worker_limit: None,
        }
    }

    pub fn decoder_path(&self) -> &str {
        &self.decoder_path
    }

    /// `None` leaves the choice to the decoder, which prefers WebAssembly when available.
    pub fn decoder_type(&self) -> Option<DecoderType> {
        self.decoder_type
    }

    pub fn worker_limit(&self) -> Option<u32> {
        self.worker_limit
    }
}

impl Default for DracoLoaderDescriptor {
    fn default() -> Self {
        DracoLoaderDescriptor::begin().finish()
    }
}

pub struct DracoLoaderDescriptorBuilder {
    decoder_path: String,
    decoder_type: Option<DecoderType>,
    worker_limit: Option<u32>,
}

impl DracoLoaderDescriptorBuilder {
    pub fn decoder_path<S>(mut self, decoder_path: S) -> Self
    where
        S: Into<String>,
    {
        self.decoder_path = decoder_path.into();

        self
    }

    pub fn decoder_type(mut self, decoder_type: DecoderType) -> Self {
        self.decoder_type = Some(decoder_type);

        self
    }

    pub fn worker_limit(mut self, worker_limit: u32) -> Self {
        self.worker_limit = Some(worker_limit);

        self
    }

    pub fn finish(self) -> DracoLoaderDescriptor {
        DracoLoaderDescriptor {
            decoder_path: self.decoder_path,
            decoder_type: self.decoder_type,
            worker_limit: self.worker_limit,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct GltfLoaderDescriptor {
    draco: Option<DracoLoaderDescriptor>,
}

impl GltfLoaderDescriptor {
    pub fn begin() -> GltfLoaderDescriptorBuilder {
        GltfLoaderDescriptorBuilder {
            draco: Some(DracoLoaderDescriptor::default()),
        }
    }

    pub fn draco(&self) -> Option<&DracoLoaderDescriptor> {
        self.draco.as_ref()
    }
}

impl Default for GltfLoaderDescriptor {
    fn default() -> Self {
        GltfLoaderDescriptor::begin().finish()
    }
}

pub struct GltfLoaderDescriptorBuilder {
    draco: Option<DracoLoaderDescriptor>,
}

impl GltfLoaderDescriptorBuilder {
    pub fn draco(mut self, draco: DracoLoaderDescriptor) -> Self {
        self.draco = Some(draco);

        self
    }

    /// Builds a loader that cannot decode Draco-compressed meshes.
    pub fn disable_draco(mut self) -> Self {
        self.draco = None;

        self
    }

    pub fn finish(self) -> GltfLoaderDescriptor {
        GltfLoaderDescriptor { draco: self.draco }
    }
}

/// Constructs loaders and decoders and wires them together.
pub trait LoaderFactory {
    type Loader;

    type Decoder;

    fn create_decoder(&self) -> Self::Decoder;

    fn set_decoder_path(&self, decoder: &Self::Decoder, path: &str);

    fn set_decoder_config(&self, decoder: &Self::Decoder, config: &DecoderConfig);

    fn set_worker_limit(&self, decoder: &Self::Decoder, worker_limit: u32);

    fn create_loader(&self) -> Self::Loader;

    fn attach_decoder(&self, loader: &Self::Loader, decoder: &Self::Decoder);
}

/// Builds a glTF loader as described by the `descriptor`.
///
/// Nothing is fetched here: a decoder that cannot be downloaded only fails once a compressed
/// asset is loaded.
pub fn create_gltf_loader<F>(factory: &F, descriptor: &GltfLoaderDescriptor) -> F::Loader
where
    F: LoaderFactory,
{
    let loader = factory.create_loader();

    if let Some(draco) = descriptor.draco() {
        let decoder = factory.create_decoder();

        factory.set_decoder_path(&decoder, draco.decoder_path());

        if let Some(decoder_type) = draco.decoder_type() {
            factory.set_decoder_config(&decoder, &DecoderConfig { decoder_type });
        }

        if let Some(worker_limit) = draco.worker_limit() {
            factory.set_worker_limit(&decoder, worker_limit);
        }

        factory.attach_decoder(&loader, &decoder);
    }

    loader
}

/// Creates a three.js `GLTFLoader` that decodes Draco-compressed meshes with the decoder found at
/// [DRACO_DECODER_PATH].
pub fn new_gltf_loader() -> GltfLoader {
    create_gltf_loader(&ThreeJs, &GltfLoaderDescriptor::default())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Debug)]
    struct MockDecoder {
        path: RefCell<Option<String>>,
        config: RefCell<Option<DecoderConfig>>,
        worker_limit: RefCell<Option<u32>>,
    }

    #[derive(Default)]
    struct MockLoader {
        decoder: RefCell<Option<Rc<MockDecoder>>>,
    }

    struct MockFactory;

    impl LoaderFactory for MockFactory {
        type Loader = MockLoader;

        type Decoder = Rc<MockDecoder>;

        fn create_decoder(&self) -> Rc<MockDecoder> {
            Rc::new(MockDecoder::default())
        }

        fn set_decoder_path(&self, decoder: &Rc<MockDecoder>, path: &str) {
            *decoder.path.borrow_mut() = Some(path.to_string());
        }

        fn set_decoder_config(&self, decoder: &Rc<MockDecoder>, config: &DecoderConfig) {
            *decoder.config.borrow_mut() = Some(*config);
        }

        fn set_worker_limit(&self, decoder: &Rc<MockDecoder>, worker_limit: u32) {
            *decoder.worker_limit.borrow_mut() = Some(worker_limit);
        }

        fn create_loader(&self) -> MockLoader {
            MockLoader::default()
        }

        fn attach_decoder(&self, loader: &MockLoader, decoder: &Rc<MockDecoder>) {
            *loader.decoder.borrow_mut() = Some(decoder.clone());
        }
    }

    #[test]
    fn test_default_descriptor_has_draco_decoder_path() {
        let descriptor = GltfLoaderDescriptor::default();
        let draco = descriptor.draco().unwrap();

        assert_eq!(draco.decoder_path(), "https://threejs.org/examples/js/libs/draco/");
        assert_eq!(draco.decoder_type(), None);
        assert_eq!(draco.worker_limit(), None);
    }

    #[test]
    fn test_create_default_loader_attaches_configured_decoder() {
        let loader = create_gltf_loader(&MockFactory, &GltfLoaderDescriptor::default());

        let decoder = loader.decoder.borrow().clone().unwrap();

        assert_eq!(decoder.path.borrow().as_ref().unwrap(), DRACO_DECODER_PATH);
        assert!(decoder.config.borrow().is_none());
        assert!(decoder.worker_limit.borrow().is_none());
    }

    #[test]
    fn test_create_loader_with_decoder_options() {
        let descriptor = GltfLoaderDescriptor::begin()
            .draco(
                DracoLoaderDescriptor::begin()
                    .decoder_path("/draco/")
                    .decoder_type(DecoderType::Js)
                    .worker_limit(2)
                    .finish(),
            )
            .finish();

        let loader = create_gltf_loader(&MockFactory, &descriptor);
        let decoder = loader.decoder.borrow().clone().unwrap();

        assert_eq!(decoder.path.borrow().as_ref().unwrap(), "/draco/");
        assert_eq!(
            *decoder.config.borrow(),
            Some(DecoderConfig {
                decoder_type: DecoderType::Js
            })
        );
        assert_eq!(*decoder.worker_limit.borrow(), Some(2));
    }

    #[test]
    fn test_create_loader_without_draco() {
        let descriptor = GltfLoaderDescriptor::begin().disable_draco().finish();

        let loader = create_gltf_loader(&MockFactory, &descriptor);

        assert!(loader.decoder.borrow().is_none());
    }
}
