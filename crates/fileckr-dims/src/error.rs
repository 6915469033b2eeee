/// Errors that can occur while choosing canvas dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimsError {
    /// The aspect bounds cannot be satisfied by any rectangle.
    #[error("invalid aspect bounds (max_ratio {max_ratio}, min_side {min_side}): {reason}")]
    InvalidBounds {
        max_ratio: u64,
        min_side: u64,
        reason: &'static str,
    },

    /// The search for a qualifying pair ran past its upper bound.
    #[error("no nearly-square pair found between {start} and {limit}")]
    SearchExhausted { start: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, DimsError>;
