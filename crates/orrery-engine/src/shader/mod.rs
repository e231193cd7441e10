//! Shader program construction.
//!
//! The caller supplies two opaque WGSL sources (vertex + fragment). This
//! module compiles each stage through the naga front-end so failures carry a
//! per-stage, source-annotated diagnostic, then links them into a render
//! pipeline and resolves which wire-contract slots the shader actually
//! declares.
//!
//! Construction is atomic: compile vertex, compile fragment, link, resolve.
//! Any failure propagates the specific error and nothing partially built
//! escapes. Programs are compiled once at startup and never recompiled;
//! compilation is deterministic, so there is no retry path.

mod error;
mod program;
mod stage;

pub use error::ShaderError;
pub use program::{
    FRAME_UNIFORMS_BINDING, FRAME_UNIFORMS_GROUP, POSITION_LOCATION, ProgramBindings,
    ShaderProgram,
};
pub use stage::{CompiledStage, StageKind, compile_stage};
