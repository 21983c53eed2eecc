use crate::types::Class;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    #[error("unbalanced exit: no {class} is in the lab")]
    UnbalancedExit { class: Class },

    #[error("lab capacity must be non-zero")]
    ZeroCapacity,

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}
