use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::error::ShaderError;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// A parsed and validated shader stage.
///
/// Holding one of these proves the stage compiled; it is consumed by program
/// linking and by binding reflection, never used on its own.
#[derive(Debug)]
pub struct CompiledStage {
    pub kind: StageKind,
    pub module: naga::Module,
}

/// Compiles one WGSL stage.
///
/// Runs the full front-end (parse + validation) so the returned diagnostic
/// is the same annotated rendering the GPU layer would produce, but tagged
/// with the stage it came from. Empty source fails parse like any other
/// syntax error.
pub fn compile_stage(source: &str, kind: StageKind) -> Result<CompiledStage, ShaderError> {
    // An empty module parses cleanly but can never provide an entry point;
    // reject it up front with a diagnostic that says so.
    if source.trim().is_empty() {
        return Err(ShaderError::Compile {
            stage: kind,
            diagnostic: "shader source is empty".to_string(),
        });
    }

    let module = naga::front::wgsl::parse_str(source).map_err(|err| ShaderError::Compile {
        stage: kind,
        diagnostic: err.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|err| ShaderError::Compile {
            stage: kind,
            diagnostic: err.emit_to_string(source),
        })?;

    Ok(CompiledStage { kind, module })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_VERTEX: &str = r"
        @vertex
        fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 0.0, 1.0);
        }
    ";

    const MINIMAL_FRAGMENT: &str = r"
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 1.0, 1.0);
        }
    ";

    #[test]
    fn valid_stages_compile() {
        assert!(compile_stage(MINIMAL_VERTEX, StageKind::Vertex).is_ok());
        assert!(compile_stage(MINIMAL_FRAGMENT, StageKind::Fragment).is_ok());
    }

    #[test]
    fn syntax_error_reports_the_failing_stage() {
        let err = compile_stage("this is not wgsl", StageKind::Fragment).unwrap_err();
        match err {
            ShaderError::Compile { stage, diagnostic } => {
                assert_eq!(stage, StageKind::Fragment);
                assert!(!diagnostic.is_empty());
            }
            other => panic!("expected a compile error, got {other}"),
        }
        let err = compile_stage("@vertex fn", StageKind::Vertex).unwrap_err();
        assert_eq!(err.stage(), Some(StageKind::Vertex));
    }

    #[test]
    fn empty_source_is_a_compile_error() {
        let err = compile_stage("", StageKind::Vertex).unwrap_err();
        assert_eq!(err.stage(), Some(StageKind::Vertex));

        let err = compile_stage("   \n\t", StageKind::Fragment).unwrap_err();
        assert_eq!(err.stage(), Some(StageKind::Fragment));
    }

    #[test]
    fn type_error_is_a_compile_error() {
        // Parses, fails in validation: returning a scalar where the position
        // builtin requires vec4.
        let src = r"
            @vertex
            fn vs_main() -> @builtin(position) f32 {
                return 1.0;
            }
        ";
        let err = compile_stage(src, StageKind::Vertex).unwrap_err();
        assert_eq!(err.stage(), Some(StageKind::Vertex));
    }

    #[test]
    fn stage_kind_display_names() {
        assert_eq!(StageKind::Vertex.to_string(), "vertex");
        assert_eq!(StageKind::Fragment.to_string(), "fragment");
    }
}
