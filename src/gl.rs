//! The subset of the WebGL API used to compile shaders and link programs.
//!
//! [GraphicsContext] is implemented for both `web_sys::WebGlRenderingContext` and
//! `web_sys::WebGl2RenderingContext`; the shader and program objects are the same `web_sys` types
//! for either version.

use web_sys::{
    WebGl2RenderingContext, WebGlProgram, WebGlRenderingContext, WebGlShader,
};

use crate::shader::ShaderKind;

pub trait GraphicsContext {
    type Shader;

    type Program;

    /// Returns `None` if the context could not allocate a shader object, which happens when the
    /// context is lost.
    fn create_shader(&self, kind: ShaderKind) -> Option<Self::Shader>;

    fn shader_source(&self, shader: &Self::Shader, source: &str);

    fn compile_shader(&self, shader: &Self::Shader);

    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    /// Returns `None` if the context could not allocate a program object, which happens when the
    /// context is lost.
    fn create_program(&self) -> Option<Self::Program>;

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn link_program(&self, program: &Self::Program);

    fn program_link_status(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
}

macro_rules! impl_graphics_context {
    ($context:ident) => {
        impl GraphicsContext for $context {
            type Shader = WebGlShader;

            type Program = WebGlProgram;

            fn create_shader(&self, kind: ShaderKind) -> Option<WebGlShader> {
                $context::create_shader(self, kind.gl_id())
            }

            fn shader_source(&self, shader: &WebGlShader, source: &str) {
                $context::shader_source(self, shader, source);
            }

            fn compile_shader(&self, shader: &WebGlShader) {
                $context::compile_shader(self, shader);
            }

            fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
                // A lost context answers `null` to every parameter query.
                $context::get_shader_parameter(self, shader, $context::COMPILE_STATUS)
                    .as_bool()
                    .unwrap_or(false)
            }

            fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
                $context::get_shader_info_log(self, shader)
            }

            fn create_program(&self) -> Option<WebGlProgram> {
                $context::create_program(self)
            }

            fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
                $context::attach_shader(self, program, shader);
            }

            fn link_program(&self, program: &WebGlProgram) {
                $context::link_program(self, program);
            }

            fn program_link_status(&self, program: &WebGlProgram) -> bool {
                $context::get_program_parameter(self, program, $context::LINK_STATUS)
                    .as_bool()
                    .unwrap_or(false)
            }

            fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
                $context::get_program_info_log(self, program)
            }
        }
    };
}

impl_graphics_context!(WebGlRenderingContext);
impl_graphics_context!(WebGl2RenderingContext);
