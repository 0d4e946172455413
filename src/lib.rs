//! Helpers for WebGL pages that render glTF scenes.
//!
//! - [shader_source] reads shader source embedded in a document element;
//! - [shader] and [program] compile shaders and link them into programs through any
//!   [gl::GraphicsContext], writing compiler and linker info logs to a
//!   [diagnostics::Diagnostics] channel;
//! - [vertex] flattens glTF vertex attribute data, whether tightly packed or interleaved;
//! - [loader] builds a three.js glTF loader with Draco mesh decompression.
//!
//! The [exports] module exposes the same operations to JavaScript.

pub mod diagnostics;
pub mod exports;
pub mod gl;
pub mod loader;
pub mod program;
pub mod shader;
pub mod shader_source;
pub mod three;
pub mod vertex;
