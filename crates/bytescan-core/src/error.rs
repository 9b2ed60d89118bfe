//! Errors raised while loading or validating an intermediate graph.

/// Error reading an intermediate graph.
#[derive(Debug)]
pub enum GraphError {
    Json(serde_json::Error),
    Binary(postcard::Error),
    UnsupportedVersion(u32),
    MissingStart(usize),
    DanglingNode { from: usize, target: usize },
    DanglingOutput { from: String, output: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported graph format version {v}"),
            Self::MissingStart(id) => write!(f, "start node {id} does not exist"),
            Self::DanglingNode { from, target } => {
                write!(f, "node {from} refers to missing node {target}")
            }
            Self::DanglingOutput { from, output } => {
                write!(f, "{from} refers to missing output {output}")
            }
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
            _ => None,
        }
    }
}
