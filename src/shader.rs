use std::fmt;

use failure::Fail;
use web_sys::WebGl2RenderingContext as Gl;

use crate::gl::GraphicsContext;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    /// The `VERTEX_SHADER`/`FRAGMENT_SHADER` constant; WebGL 1 and 2 share the values.
    pub fn gl_id(&self) -> u32 {
        match self {
            ShaderKind::Vertex => Gl::VERTEX_SHADER,
            ShaderKind::Fragment => Gl::FRAGMENT_SHADER,
        }
    }

    pub fn from_gl_id(id: u32) -> Option<Self> {
        match id {
            Gl::VERTEX_SHADER => Some(ShaderKind::Vertex),
            Gl::FRAGMENT_SHADER => Some(ShaderKind::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GlObject {
    Shader(ShaderKind),
    Program,
}

impl fmt::Display for GlObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GlObject::Shader(kind) => write!(f, "{} shader", kind),
            GlObject::Program => f.write_str("program"),
        }
    }
}

/// Returned when the context hands out no object, typically because the context was lost.
#[derive(Fail, Clone, Copy, PartialEq, Debug)]
#[fail(display = "The graphics context failed to allocate a {} object", object)]
pub struct ObjectAllocationError {
    pub object: GlObject,
}

/// Creates a shader object of the given `kind`, uploads `source` and compiles it.
///
/// The compile status is not inspected: a shader that fails to compile is returned all the same
/// and its info log is available through [GraphicsContext::shader_info_log].
pub fn compile_shader<C>(
    context: &C,
    source: &str,
    kind: ShaderKind,
) -> Result<C::Shader, ObjectAllocationError>
where
    C: GraphicsContext,
{
    let shader = context.create_shader(kind).ok_or(ObjectAllocationError {
        object: GlObject::Shader(kind),
    })?;

    context.shader_source(&shader, source);
    context.compile_shader(&shader);

    Ok(shader)
}
