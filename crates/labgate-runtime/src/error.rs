use labgate_sync::{Class, LabError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("lab error: {0}")]
    Lab(#[from] LabError),

    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{class} visitor {index} panicked")]
    VisitorPanicked { class: Class, index: usize },

    #[error("occupancy monitor panicked")]
    MonitorPanicked,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
