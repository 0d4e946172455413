use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;

use web_gltf_helpers::diagnostics::{DiagnosticLog, Level};
use web_gltf_helpers::gl::GraphicsContext;
use web_gltf_helpers::loader::{
    create_gltf_loader, DecoderConfig, GltfLoaderDescriptor, LoaderFactory, DRACO_DECODER_PATH,
};
use web_gltf_helpers::program::{create_program, CreateProgramError, FailurePolicy, ProgramOptions};
use web_gltf_helpers::shader::ShaderKind;
use web_gltf_helpers::vertex::{
    gltf_buffer_to_array, InterleavedAttribute, InterleavedBuffer, VertexAttribute,
};

/// Every shader fails to compile and every program fails to link, each with a fixed log.
#[derive(Default)]
struct BrokenDriver {
    shaders: RefCell<Vec<ShaderKind>>,
}

impl GraphicsContext for BrokenDriver {
    type Shader = usize;

    type Program = &'static str;

    fn create_shader(&self, kind: ShaderKind) -> Option<usize> {
        let mut shaders = self.shaders.borrow_mut();

        shaders.push(kind);

        Some(shaders.len() - 1)
    }

    fn shader_source(&self, _shader: &usize, _source: &str) {}

    fn compile_shader(&self, _shader: &usize) {}

    fn shader_compile_status(&self, _shader: &usize) -> bool {
        false
    }

    fn shader_info_log(&self, shader: &usize) -> Option<String> {
        Some(format!("{} shader error", self.shaders.borrow()[*shader]))
    }

    fn create_program(&self) -> Option<&'static str> {
        Some("program")
    }

    fn attach_shader(&self, _program: &&'static str, _shader: &usize) {}

    fn link_program(&self, _program: &&'static str) {}

    fn program_link_status(&self, _program: &&'static str) -> bool {
        false
    }

    fn program_info_log(&self, _program: &&'static str) -> Option<String> {
        Some("link error".to_string())
    }
}

fn shader_sources() -> HashMap<String, &'static str> {
    let mut sources = HashMap::new();

    sources.insert("vertex-shader".to_string(), "\n  garbage  \n");
    sources.insert("fragment-shader".to_string(), "\n  garbage  \n");

    sources
}

#[test]
fn test_program_handle_is_returned_despite_invalid_sources() {
    let diagnostics = DiagnosticLog::new();

    let built = create_program(
        &BrokenDriver::default(),
        &shader_sources(),
        "vertex-shader",
        "fragment-shader",
        &diagnostics,
        &ProgramOptions::default(),
    )
    .unwrap();

    assert_eq!(*built.program(), "program");
    assert!(!built.is_usable());

    let messages: Vec<_> = diagnostics
        .entries()
        .into_iter()
        .map(|entry| {
            assert_eq!(entry.level, Level::Log);

            entry.message
        })
        .collect();

    assert_eq!(
        messages,
        vec![
            "link error".to_string(),
            "vertex shader error".to_string(),
            "fragment shader error".to_string(),
        ]
    );
}

#[test]
fn test_abort_policy_reports_first_compile_failure() {
    let diagnostics = DiagnosticLog::new();
    let options = ProgramOptions::begin()
        .failure_policy(FailurePolicy::Abort)
        .finish();

    let error = create_program(
        &BrokenDriver::default(),
        &shader_sources(),
        "vertex-shader",
        "fragment-shader",
        &diagnostics,
        &options,
    )
    .unwrap_err();

    assert_eq!(
        error,
        CreateProgramError::ShaderCompilation {
            kind: ShaderKind::Vertex,
            log: "vertex shader error".to_string()
        }
    );
    assert_eq!(
        error.to_string(),
        "The vertex shader failed to compile: vertex shader error"
    );
}

#[test]
fn test_missing_shader_element_is_an_error() {
    let diagnostics = DiagnosticLog::new();

    let error = create_program(
        &BrokenDriver::default(),
        &shader_sources(),
        "vertex-shader",
        "no-such-element",
        &diagnostics,
        &ProgramOptions::default(),
    )
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "No element with id `no-such-element` to read shader source from"
    );
}

#[test]
fn test_vertex_buffer_normalization() {
    let flat = [1.0f32, 2.0, 3.0];
    let flat_attribute = VertexAttribute::from(&flat[..]);

    match gltf_buffer_to_array(Some(&flat_attribute)) {
        Some(Cow::Borrowed(array)) => assert!(std::ptr::eq(array, &flat[..])),
        other => panic!("unexpected result: {:?}", other),
    }

    let interleaved: Vec<f32> = (0..12).map(|x| x as f32).collect();
    let buffer = InterleavedBuffer::with_count(&interleaved, 4, 2).unwrap();
    let attribute = VertexAttribute::from(InterleavedAttribute::new(buffer, 3, 1).unwrap());

    assert_eq!(
        gltf_buffer_to_array(Some(&attribute)).unwrap().into_owned(),
        vec![1.0, 2.0, 3.0, 5.0, 6.0, 7.0]
    );
    assert_eq!(gltf_buffer_to_array::<f32>(None), None);
}

#[derive(Default)]
struct RecordingFactory {
    events: RefCell<Vec<String>>,
}

impl LoaderFactory for RecordingFactory {
    type Loader = ();

    type Decoder = ();

    fn create_decoder(&self) {
        self.events.borrow_mut().push("create decoder".to_string());
    }

    fn set_decoder_path(&self, _decoder: &(), path: &str) {
        self.events.borrow_mut().push(format!("decoder path {}", path));
    }

    fn set_decoder_config(&self, _decoder: &(), config: &DecoderConfig) {
        self.events
            .borrow_mut()
            .push(format!("decoder config {:?}", config.decoder_type));
    }

    fn set_worker_limit(&self, _decoder: &(), worker_limit: u32) {
        self.events
            .borrow_mut()
            .push(format!("worker limit {}", worker_limit));
    }

    fn create_loader(&self) {
        self.events.borrow_mut().push("create loader".to_string());
    }

    fn attach_decoder(&self, _loader: &(), _decoder: &()) {
        self.events.borrow_mut().push("attach decoder".to_string());
    }
}

#[test]
fn test_default_loader_composition() {
    let factory = RecordingFactory::default();

    create_gltf_loader(&factory, &GltfLoaderDescriptor::default());

    assert_eq!(
        *factory.events.borrow(),
        vec![
            "create loader".to_string(),
            "create decoder".to_string(),
            format!("decoder path {}", DRACO_DECODER_PATH),
            "attach decoder".to_string(),
        ]
    );
}
