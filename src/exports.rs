//! JavaScript entry points.
//!
//! These mirror the helper functions the glTF demo pages call, under the same names, so a page can
//! import them from the generated module instead of a hand-written script. Errors are thrown as
//! JavaScript `Error` objects.

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, WebGl2RenderingContext, WebGlProgram, WebGlRenderingContext, WebGlShader};

use crate::diagnostics::Console;
use crate::gl::GraphicsContext;
use crate::loader;
use crate::program::{self, ProgramOptions};
use crate::shader::{self, ShaderKind};
use crate::shader_source;
use crate::three::{self, GltfLoader};

enum Context<'a> {
    WebGl(&'a WebGlRenderingContext),
    WebGl2(&'a WebGl2RenderingContext),
}

impl<'a> Context<'a> {
    fn from_js(value: &'a JsValue) -> Result<Self, JsValue> {
        if let Some(gl) = value.dyn_ref::<WebGl2RenderingContext>() {
            Ok(Context::WebGl2(gl))
        } else if let Some(gl) = value.dyn_ref::<WebGlRenderingContext>() {
            Ok(Context::WebGl(gl))
        } else {
            Err(js_error("expected a WebGL rendering context"))
        }
    }
}

fn js_error<E>(error: E) -> JsValue
where
    E: Display,
{
    js_sys::Error::new(&error.to_string()).into()
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| js_error("no document is available"))
}

/// Returns the trimmed text content of the element with the given `id`.
#[wasm_bindgen(js_name = getShaderSource)]
pub fn get_shader_source(id: &str) -> Result<String, JsValue> {
    shader_source::shader_source(&document()?, id).map_err(js_error)
}

/// Creates and compiles a shader of type `kind` (`gl.VERTEX_SHADER` or `gl.FRAGMENT_SHADER`).
#[wasm_bindgen(js_name = createShader)]
pub fn create_shader(gl: &JsValue, source: &str, kind: u32) -> Result<WebGlShader, JsValue> {
    let kind = ShaderKind::from_gl_id(kind)
        .ok_or_else(|| js_error(format!("unknown shader type: {}", kind)))?;

    let shader = match Context::from_js(gl)? {
        Context::WebGl(gl) => shader::compile_shader(gl, source, kind),
        Context::WebGl2(gl) => shader::compile_shader(gl, source, kind),
    };

    shader.map_err(js_error)
}

/// Builds a program from the shader sources embedded in the elements with the given ids.
///
/// Info logs are written to the console; the program is returned even if it failed to link.
#[wasm_bindgen(js_name = createProgram)]
pub fn create_program(
    gl: &JsValue,
    vertex_shader_id: &str,
    fragment_shader_id: &str,
) -> Result<WebGlProgram, JsValue> {
    let document = document()?;

    match Context::from_js(gl)? {
        Context::WebGl(gl) => build_program(gl, &document, vertex_shader_id, fragment_shader_id),
        Context::WebGl2(gl) => build_program(gl, &document, vertex_shader_id, fragment_shader_id),
    }
}

fn build_program<C>(
    gl: &C,
    document: &Document,
    vertex_shader_id: &str,
    fragment_shader_id: &str,
) -> Result<WebGlProgram, JsValue>
where
    C: GraphicsContext<Program = WebGlProgram>,
{
    program::create_program(
        gl,
        document,
        vertex_shader_id,
        fragment_shader_id,
        &Console,
        &ProgramOptions::default(),
    )
    .map(|built| built.into_program())
    .map_err(js_error)
}

/// Flattens a three.js `BufferAttribute` or `InterleavedBufferAttribute`.
#[wasm_bindgen(js_name = gltfBufferToArray)]
pub fn gltf_buffer_to_array(attribute: JsValue) -> Result<JsValue, JsValue> {
    three::attribute_to_array(&attribute, &Console).map_err(js_error)
}

/// Creates a `GLTFLoader` that can decode Draco-compressed meshes.
#[wasm_bindgen(js_name = newGltfLoader)]
pub fn new_gltf_loader() -> GltfLoader {
    loader::new_gltf_loader()
}
