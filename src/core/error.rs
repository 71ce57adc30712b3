use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("texture decode failed for {src}: {reason}")]
    TextureDecode { src: String, reason: String },
    #[error("image {src} has no pixels")]
    EmptyImage { src: String },
    #[error("media can only be added while the scene is initializing")]
    AlreadyRunning,
    #[error("gpu: {0}")]
    Gpu(String),
}
