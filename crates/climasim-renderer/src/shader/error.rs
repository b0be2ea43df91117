use std::fmt;

/// Pipeline stage a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shader failures. Both variants are fatal for the program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{diagnostic}")]
    Compile {
        stage: ShaderStage,
        diagnostic: String,
    },

    #[error("shader program failed to link: {diagnostic}")]
    Link { diagnostic: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            diagnostic: "unexpected token".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("fragment shader"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn link_error_display() {
        let err = ShaderError::Link {
            diagnostic: "missing entry point".into(),
        };
        assert_eq!(
            err.to_string(),
            "shader program failed to link: missing entry point"
        );
    }
}
