//! Builds a shader program from a vertex shader and a fragment shader whose sources are embedded
//! in document elements.
//!
//! Compiler and linker info logs are always written to the [Diagnostics] channel. What happens
//! when compilation or linking fails is decided by the [FailurePolicy]: with
//! [FailurePolicy::Continue] (the default) the program handle is returned whether or not it is
//! usable, with [FailurePolicy::Abort] the failure is returned as a [CreateProgramError].

use failure::Fail;

use crate::diagnostics::Diagnostics;
use crate::gl::GraphicsContext;
use crate::shader::{compile_shader, GlObject, ObjectAllocationError, ShaderKind};
use crate::shader_source::{shader_source, MissingShaderSource, ShaderSourceLookup};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FailurePolicy {
    /// Return the program even if a shader failed to compile or the program failed to link.
    Continue,

    /// Stop at the first shader that fails to compile, or return an error if linking fails.
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Continue
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct ProgramOptions {
    failure_policy: FailurePolicy,
}

impl ProgramOptions {
    pub fn begin() -> ProgramOptionsBuilder {
        ProgramOptionsBuilder {
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

pub struct ProgramOptionsBuilder {
    failure_policy: FailurePolicy,
}

impl ProgramOptionsBuilder {
    pub fn failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;

        self
    }

    pub fn finish(self) -> ProgramOptions {
        ProgramOptions {
            failure_policy: self.failure_policy,
        }
    }
}

/// The non-empty info logs produced while building a program.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ProgramInfoLogs {
    pub program: Option<String>,
    pub vertex_shader: Option<String>,
    pub fragment_shader: Option<String>,
}

impl ProgramInfoLogs {
    pub fn is_empty(&self) -> bool {
        self.program.is_none() && self.vertex_shader.is_none() && self.fragment_shader.is_none()
    }
}

/// A program returned by [create_program], along with the status of each build step.
#[derive(Debug)]
pub struct BuiltProgram<P> {
    program: P,
    vertex_shader_compiled: bool,
    fragment_shader_compiled: bool,
    linked: bool,
    info_logs: ProgramInfoLogs,
}

impl<P> BuiltProgram<P> {
    pub fn program(&self) -> &P {
        &self.program
    }

    pub fn into_program(self) -> P {
        self.program
    }

    pub fn vertex_shader_compiled(&self) -> bool {
        self.vertex_shader_compiled
    }

    pub fn fragment_shader_compiled(&self) -> bool {
        self.fragment_shader_compiled
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Whether both shaders compiled and the program linked.
    pub fn is_usable(&self) -> bool {
        self.vertex_shader_compiled && self.fragment_shader_compiled && self.linked
    }

    pub fn info_logs(&self) -> &ProgramInfoLogs {
        &self.info_logs
    }
}

#[derive(Fail, Clone, PartialEq, Debug)]
pub enum CreateProgramError {
    #[fail(display = "{}", _0)]
    MissingShaderSource(#[cause] MissingShaderSource),
    #[fail(display = "{}", _0)]
    ObjectAllocation(#[cause] ObjectAllocationError),
    #[fail(display = "The {} shader failed to compile: {}", kind, log)]
    ShaderCompilation { kind: ShaderKind, log: String },
    #[fail(display = "The program failed to link: {}", log)]
    ShaderLinking { log: String },
}

impl From<MissingShaderSource> for CreateProgramError {
    fn from(error: MissingShaderSource) -> Self {
        CreateProgramError::MissingShaderSource(error)
    }
}

impl From<ObjectAllocationError> for CreateProgramError {
    fn from(error: ObjectAllocationError) -> Self {
        CreateProgramError::ObjectAllocation(error)
    }
}

/// Compiles the shader sources embedded in the elements identified by `vertex_shader_id` and
/// `fragment_shader_id` and links them into a program.
///
/// Both sources are read before any graphics object is created, so a missing element never leaves
/// orphaned shader objects behind. After linking, the program's info log, the vertex shader's info
/// log and the fragment shader's info log are each written to `diagnostics` (in that order) if
/// they are non-empty.
///
/// # Example
///
/// ```no_run
/// use web_gltf_helpers::diagnostics::Console;
/// use web_gltf_helpers::program::{create_program, ProgramOptions};
/// use web_sys::{Document, WebGl2RenderingContext};
///
/// # fn wrapper(gl: &WebGl2RenderingContext, document: &Document) {
/// let built = create_program(
///     gl,
///     document,
///     "vertex-shader",
///     "fragment-shader",
///     &Console,
///     &ProgramOptions::default(),
/// )
/// .unwrap();
///
/// gl.use_program(Some(built.program()));
/// # }
/// ```
pub fn create_program<C, L, D>(
    context: &C,
    lookup: &L,
    vertex_shader_id: &str,
    fragment_shader_id: &str,
    diagnostics: &D,
    options: &ProgramOptions,
) -> Result<BuiltProgram<C::Program>, CreateProgramError>
where
    C: GraphicsContext,
    L: ShaderSourceLookup + ?Sized,
    D: Diagnostics + ?Sized,
{
    let abort = options.failure_policy() == FailurePolicy::Abort;
    let vertex_source = shader_source(lookup, vertex_shader_id)?;
    let fragment_source = shader_source(lookup, fragment_shader_id)?;

    let vertex_shader = compile_shader(context, &vertex_source, ShaderKind::Vertex)?;
    let vertex_shader_compiled = context.shader_compile_status(&vertex_shader);

    if abort && !vertex_shader_compiled {
        let log = non_empty(context.shader_info_log(&vertex_shader));

        emit(diagnostics, &log);

        return Err(CreateProgramError::ShaderCompilation {
            kind: ShaderKind::Vertex,
            log: log.unwrap_or_default(),
        });
    }

    let fragment_shader = compile_shader(context, &fragment_source, ShaderKind::Fragment)?;
    let fragment_shader_compiled = context.shader_compile_status(&fragment_shader);

    if abort && !fragment_shader_compiled {
        let log = non_empty(context.shader_info_log(&fragment_shader));

        emit(diagnostics, &non_empty(context.shader_info_log(&vertex_shader)));
        emit(diagnostics, &log);

        return Err(CreateProgramError::ShaderCompilation {
            kind: ShaderKind::Fragment,
            log: log.unwrap_or_default(),
        });
    }

    let program = context.create_program().ok_or(ObjectAllocationError {
        object: GlObject::Program,
    })?;

    context.attach_shader(&program, &vertex_shader);
    context.attach_shader(&program, &fragment_shader);
    context.link_program(&program);

    let linked = context.program_link_status(&program);
    let info_logs = ProgramInfoLogs {
        program: non_empty(context.program_info_log(&program)),
        vertex_shader: non_empty(context.shader_info_log(&vertex_shader)),
        fragment_shader: non_empty(context.shader_info_log(&fragment_shader)),
    };

    emit(diagnostics, &info_logs.program);
    emit(diagnostics, &info_logs.vertex_shader);
    emit(diagnostics, &info_logs.fragment_shader);

    if abort && !linked {
        return Err(CreateProgramError::ShaderLinking {
            log: info_logs.program.unwrap_or_default(),
        });
    }

    Ok(BuiltProgram {
        program,
        vertex_shader_compiled,
        fragment_shader_compiled,
        linked,
        info_logs,
    })
}

fn non_empty(log: Option<String>) -> Option<String> {
    log.filter(|log| !log.is_empty())
}

fn emit<D>(diagnostics: &D, log: &Option<String>)
where
    D: Diagnostics + ?Sized,
{
    if let Some(log) = log {
        diagnostics.log(log);
    }
}
