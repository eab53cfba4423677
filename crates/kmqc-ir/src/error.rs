//! Error types for the IR crate.

use thiserror::Error;

/// Errors raised while building or compiling a program.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Unit index is negative.
    #[error("Index must be a non-negative integer, got {index}")]
    NegativeIndex {
        /// The rejected index.
        index: i64,
    },

    /// Unit index does not fit the wire representation.
    #[error("Index {index} exceeds the maximum unit index {}", u32::MAX)]
    IndexOverflow {
        /// The rejected index.
        index: u64,
    },

    /// Gate name is empty.
    #[error("Gate name must be a non-empty string")]
    EmptyGateName,

    /// Gate was given no targets.
    #[error("Gate '{0}' must target at least one unit")]
    EmptyTargets(String),

    /// Gate requires a different number of targets.
    #[error("Gate '{gate}' requires {expected} units, got {got}")]
    ArityMismatch {
        /// Catalog name of the gate.
        gate: String,
        /// Declared arity.
        expected: usize,
        /// Number of targets provided.
        got: usize,
    },

    /// Gate requires a different number of parameters.
    #[error("Gate '{gate}' takes {expected} parameters, got {got}")]
    ParamCountMismatch {
        /// Catalog name of the gate.
        gate: String,
        /// Number of free parameters.
        expected: usize,
        /// Number of parameters provided.
        got: usize,
    },

    /// Name is not present in the gate catalog.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Register dimension must be positive.
    #[error("Dimension must be positive, got {0}")]
    InvalidDimension(usize),

    /// Register size used for phase scaling must be positive.
    #[error("Register size must be positive, got {0}")]
    InvalidRegisterSize(u64),

    /// Index list length does not match the register dimension.
    #[error("Index list has {got} entries, dimension is {expected}")]
    LengthMismatch {
        /// The register dimension.
        expected: usize,
        /// The index list length.
        got: usize,
    },

    /// Phase index list is empty.
    #[error("Index list must not be empty")]
    EmptyIndexList,

    /// Register position lies outside `0..dim`.
    #[error("Position {position} is out of range for dimension {dim}")]
    PositionOutOfRange {
        /// The rejected position.
        position: u32,
        /// The register dimension.
        dim: u32,
    },

    /// Program has no circuit operations to compile.
    #[error("Program contains no circuit operations")]
    EmptyProgram,

    /// Dimension declaration found after the first position.
    #[error("Dimension declaration must be the first instruction, found at position {position}")]
    MisplacedDimension {
        /// Position of the offending instruction.
        position: usize,
    },
}

impl IrError {
    /// Whether this error is raised while compiling rather than constructing.
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            IrError::EmptyProgram | IrError::MisplacedDimension { .. }
        )
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_display() {
        let err = IrError::ArityMismatch {
            gate: "CNOT".into(),
            expected: 2,
            got: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("CNOT"));
        assert!(msg.contains('2'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_negative_index_display() {
        let err = IrError::NegativeIndex { index: -4 };
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_empty_index_list_display() {
        let msg = IrError::EmptyIndexList.to_string();
        assert!(msg.contains("Index list"));
        assert!(!msg.contains("Dimension"));
    }

    #[test]
    fn test_serialization_classification() {
        assert!(IrError::EmptyProgram.is_serialization());
        assert!(IrError::MisplacedDimension { position: 3 }.is_serialization());
        assert!(!IrError::EmptyGateName.is_serialization());
    }
}
