use thiserror::Error;

use super::stage::StageKind;

/// Shader program construction failure.
///
/// Both variants are unrecoverable for the run: the sources are fixed at
/// startup and a retry without source changes cannot succeed.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A single stage failed to parse or validate.
    #[error("{stage} shader failed to compile:\n{diagnostic}")]
    Compile {
        /// Which stage the diagnostic belongs to.
        stage: StageKind,
        /// Source-annotated compiler diagnostic.
        diagnostic: String,
    },

    /// Both stages compiled but could not be combined into a pipeline,
    /// commonly a vertex/fragment interface mismatch.
    #[error("shader program failed to link:\n{diagnostic}")]
    Link { diagnostic: String },
}

impl ShaderError {
    /// The stage a compile diagnostic belongs to, if this is a compile error.
    pub fn stage(&self) -> Option<StageKind> {
        match self {
            Self::Compile { stage, .. } => Some(*stage),
            Self::Link { .. } => None,
        }
    }
}
