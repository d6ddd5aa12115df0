//! Error types.

/// Failures of the projection math.
///
/// Each one means "this primitive cannot be drawn this frame"; callers
/// absorb them per primitive rather than aborting the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("vector has zero length and no direction")]
    ZeroLength,
    #[error("plane normal is the zero vector")]
    DegeneratePlane,
    #[error("change-of-basis system is singular")]
    SingularSystem,
}

/// A configuration value outside the range the viewer can run with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config field `{field}` {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

/// Failures editing the record slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record slot {index} out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },
}
