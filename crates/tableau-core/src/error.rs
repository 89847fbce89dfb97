use thiserror::Error;

/// Every way a model load can fail. All of them end in the placeholder.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("failed to parse glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("buffer {index} is external ({uri}); only self-contained .glb files are supported")]
    ExternalBuffer { index: usize, uri: String },
    #[error("malformed Draco extension: {0}")]
    DracoExtension(String),
    #[error("Draco decode failed: {0}")]
    DracoDecode(String),
    #[error("model contains no renderable geometry")]
    Empty,
}
