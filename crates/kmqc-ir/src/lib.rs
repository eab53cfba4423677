//! KMQC Program Model
//!
//! This crate describes a sequence of quantum operations (a [`Program`]) and
//! compiles it into the JSON payload a remote execution backend consumes. It
//! performs no simulation: it only builds and serializes circuit descriptions.
//!
//! # Core Components
//!
//! - **Units**: [`Unit`] addresses a qubit or a slot of a multi-level register;
//!   [`IntoUnit`] lets every factory accept a raw index or an existing unit
//! - **Instructions**: [`Instruction`] over dimension declarations, [`Gate`]s
//!   and [`Measurement`]s
//! - **Gate catalog**: [`gate::CATALOG`] maps names to arity and parameter
//!   schema; [`gate::lookup`] dispatches by name
//! - **Program**: [`Program`] flattens nested sources on append and combines
//!   with `+`
//! - **Payload**: [`compile`] turns a program into a [`Payload`]
//!
//! # Example: Qubit Circuit
//!
//! ```rust
//! use kmqc_ir::{Program, compile, gate};
//!
//! let program = Program::from_sources((
//!     gate::h(0_u32).unwrap(),
//!     gate::cnot(0_u32, 1_u32).unwrap(),
//! ));
//!
//! let payload = compile(&program).unwrap();
//! assert_eq!(payload.count_units(), 2);
//! assert_eq!(payload.circuit()[1].operator, "CNOT");
//! ```
//!
//! # Example: Qudit Circuit
//!
//! ```rust
//! use kmqc_ir::{Program, compile, gate};
//!
//! let mut program = Program::from_sources(gate::init_dim(4).unwrap());
//! program.append(gate::apply_z(0, 0.25, 0_u32).unwrap());
//!
//! let payload = compile(&program).unwrap();
//! assert_eq!(payload.dimension(), Some(4));
//! assert_eq!(payload.circuit().len(), 1);
//! ```

pub mod error;
pub mod gate;
pub mod instruction;
pub mod payload;
pub mod program;
pub mod unit;

pub use error::{IrError, IrResult};
pub use gate::{GateSpec, ParamSchema};
pub use instruction::{DimensionInit, Gate, Instruction, Measurement, ParamValue, Params};
pub use payload::{Addressing, Operation, Payload, Targets, compile};
pub use program::{Program, Source};
pub use unit::{IntoUnit, Qubit, Qudit, Unit, to_unit};
