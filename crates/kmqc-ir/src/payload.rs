//! Compilation of a finished [`Program`] into the wire payload.
//!
//! Two payload shapes exist. A program whose first instruction is a
//! [`DimensionInit`](crate::DimensionInit) addresses multi-level units:
//!
//! ```json
//! {"count_qudits": 2, "dimension": 4, "circuit": [...]}
//! ```
//!
//! Any other program addresses plain qubits:
//!
//! ```json
//! {"count_qubits": 2, "circuit": [...]}
//! ```
//!
//! Each circuit entry is
//! `{"operator": <name>, "qubits"|"qudits": [<index>, ...], "params": <map or null>}`.
//!
//! The unit count is the number of distinct unit indices addressed anywhere
//! in the circuit, for both shapes.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, Params};
use crate::program::Program;
use crate::unit::Unit;

/// How units are named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Two-level units, serialized under `qubits`.
    Qubits,
    /// Multi-level units, serialized under `qudits`.
    Qudits,
}

/// Target indices of one operation, keyed by addressing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Targets {
    /// Plain qubit indices.
    #[serde(rename = "qubits")]
    Qubits(Vec<u32>),
    /// Qudit indices.
    #[serde(rename = "qudits")]
    Qudits(Vec<u32>),
}

impl Targets {
    /// The indices in target order.
    pub fn indices(&self) -> &[u32] {
        match self {
            Targets::Qubits(v) | Targets::Qudits(v) => v,
        }
    }
}

/// One serialized circuit operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Wire operator name.
    pub operator: String,
    /// Target indices.
    #[serde(flatten)]
    pub targets: Targets,
    /// Parameter mapping, `null` when the instruction has none.
    pub params: Option<Params>,
}

/// The compiled wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// Circuit over multi-level units.
    Qudits {
        /// Number of distinct qudits addressed.
        count_qudits: usize,
        /// Levels per qudit.
        dimension: usize,
        /// Operations in execution order.
        circuit: Vec<Operation>,
    },
    /// Circuit over plain qubits.
    Qubits {
        /// Number of distinct qubits addressed.
        count_qubits: usize,
        /// Operations in execution order.
        circuit: Vec<Operation>,
    },
}

impl Payload {
    /// The operations in execution order.
    pub fn circuit(&self) -> &[Operation] {
        match self {
            Payload::Qudits { circuit, .. } | Payload::Qubits { circuit, .. } => circuit,
        }
    }

    /// Number of distinct units addressed.
    pub fn count_units(&self) -> usize {
        match *self {
            Payload::Qudits { count_qudits, .. } => count_qudits,
            Payload::Qubits { count_qubits, .. } => count_qubits,
        }
    }

    /// Register dimension for qudit payloads.
    pub fn dimension(&self) -> Option<usize> {
        match *self {
            Payload::Qudits { dimension, .. } => Some(dimension),
            Payload::Qubits { .. } => None,
        }
    }

    /// Addressing mode of the payload.
    pub fn addressing(&self) -> Addressing {
        match self {
            Payload::Qudits { .. } => Addressing::Qudits,
            Payload::Qubits { .. } => Addressing::Qubits,
        }
    }
}

impl Instruction {
    /// Serialize this instruction as a circuit operation.
    ///
    /// Returns `None` for a [`DimensionInit`](crate::DimensionInit), which is
    /// program metadata rather than a circuit operation.
    pub fn to_operation(&self, addressing: Addressing) -> Option<Operation> {
        let params = match self {
            Instruction::DimensionInit(_) => return None,
            Instruction::Gate(g) => g.params().cloned(),
            Instruction::Measure(m) => Some(m.params()),
        };
        let indices: Vec<u32> = self.units().iter().map(Unit::index).collect();
        let targets = match addressing {
            Addressing::Qubits => Targets::Qubits(indices),
            Addressing::Qudits => Targets::Qudits(indices),
        };
        Some(Operation {
            operator: self.name().to_string(),
            targets,
            params,
        })
    }
}

/// Compile a program into its wire payload.
///
/// A leading dimension declaration selects the qudit shape and is left out of
/// the circuit. Fails with [`IrError::EmptyProgram`] when no circuit operation
/// remains and with [`IrError::MisplacedDimension`] when a dimension
/// declaration appears anywhere but first.
pub fn compile(program: &Program) -> IrResult<Payload> {
    let (dimension, body, offset) = match program.instructions().split_first() {
        Some((Instruction::DimensionInit(init), rest)) => (Some(init.dimension()), rest, 1),
        _ => (None, program.instructions(), 0),
    };
    let addressing = if dimension.is_some() {
        Addressing::Qudits
    } else {
        Addressing::Qubits
    };

    let mut units = FxHashSet::default();
    let mut circuit = Vec::with_capacity(body.len());
    for (i, inst) in body.iter().enumerate() {
        let op = inst
            .to_operation(addressing)
            .ok_or_else(|| IrError::MisplacedDimension {
                position: i + offset,
            })?;
        units.extend(inst.units().iter().map(Unit::index));
        circuit.push(op);
    }

    if circuit.is_empty() {
        return Err(IrError::EmptyProgram);
    }

    debug!(
        ops = circuit.len(),
        units = units.len(),
        ?dimension,
        "compiled program"
    );

    Ok(match dimension {
        Some(dimension) => Payload::Qudits {
            count_qudits: units.len(),
            dimension,
            circuit,
        },
        None => Payload::Qubits {
            count_qubits: units.len(),
            circuit,
        },
    })
}
