use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RouletteError {
    #[error("Cannot draw from an exhausted deck")]
    DeckExhausted,

    #[error("Cannot pick from an empty image set")]
    EmptyImageSet,

    #[error("No image files found in directory: {}", .0.display())]
    NoImages(PathBuf),

    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {}: {source}", .path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load image {}: {reason}", .path.display())]
    DecodeImage { path: PathBuf, reason: String },

    #[error("Roulette worker stopped unexpectedly")]
    WorkerLost,
}

pub type Result<T> = std::result::Result<T, RouletteError>;
