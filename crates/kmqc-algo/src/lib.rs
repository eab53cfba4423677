//! KMQC Program Generators
//!
//! Builds the parameterized gate sequences of the qudit hash and
//! reverse-test protocol. Each generator returns a [`Program`](kmqc_ir::Program)
//! or fails with an [`IrError`](kmqc_ir::IrError) before emitting any gate.
//!
//! # Example
//!
//! ```rust
//! use kmqc_algo::{hash_fun, reverse_test};
//! use kmqc_ir::{Program, Unit, compile, gate};
//!
//! let dim = 4;
//! let k_list: Vec<i64> = (0..4).collect();
//! let unit = Unit::new(0);
//!
//! let mut program = Program::from_sources(gate::init_dim(dim).unwrap());
//! program += hash_fun(dim, 15, 8, &k_list, unit).unwrap();
//! program += reverse_test(dim, 15, 8, &k_list, unit).unwrap();
//!
//! let payload = compile(&program).unwrap();
//! assert_eq!(payload.circuit().len(), 4 * dim);
//! ```

pub mod hash;

pub use hash::{
    apply_f0, apply_f0_conjugate, apply_z_all, apply_z_conjugate_all, hash_fun, mix_amplitudes,
    phase, reverse_test,
};
