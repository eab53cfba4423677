//! Property-based tests for the program composition algebra.
//!
//! Checks the laws the rest of the stack relies on: unit coercion is
//! idempotent, `+` is associative, the empty program is its identity, and
//! nested appends flatten depth-first, left to right.

use kmqc_ir::{Instruction, Program, Source, Unit, compile, gate, to_unit};
use proptest::prelude::*;

/// Gate operations used to generate random programs.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(f64, u32),
    Cnot(u32, u32),
}

impl GateOp {
    fn build(&self) -> Instruction {
        let gate = match *self {
            GateOp::H(q) => gate::h(q),
            GateOp::X(q) => gate::x(q),
            GateOp::Rz(phi, q) => gate::rz(phi, q),
            GateOp::Cnot(c, t) => gate::cnot(c, t),
        };
        gate.expect("generated gate is valid").into()
    }
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0_u32..8).prop_map(GateOp::H),
        (0_u32..8).prop_map(GateOp::X),
        (-3.0_f64..3.0, 0_u32..8).prop_map(|(phi, q)| GateOp::Rz(phi, q)),
        (0_u32..8, 0_u32..8)
            .prop_filter("Control and target must differ", |(c, t)| c != t)
            .prop_map(|(c, t)| GateOp::Cnot(c, t)),
    ]
}

fn arb_program() -> impl Strategy<Value = Program> {
    prop::collection::vec(arb_gate_op(), 0..12)
        .prop_map(|ops| ops.iter().map(GateOp::build).collect::<Program>())
}

proptest! {
    /// Coercing an index and then the resulting unit yields the same unit.
    #[test]
    fn test_unit_coercion_is_idempotent(index in 0_u32..=u32::MAX) {
        let unit = to_unit(index).unwrap();
        prop_assert_eq!(to_unit(unit).unwrap(), unit);
        prop_assert_eq!(unit, Unit::new(index));
    }

    /// Negative indices never produce a unit.
    #[test]
    fn test_negative_indices_rejected(index in i64::MIN..0) {
        prop_assert!(to_unit(index).is_err());
    }

    /// `(a + b) + c` and `a + (b + c)` flatten to the same sequence.
    #[test]
    fn test_combine_is_associative(a in arb_program(), b in arb_program(), c in arb_program()) {
        let left = (&(&a + &b)) + &c;
        let right = &a + &(&b + &c);
        prop_assert_eq!(left.instructions(), right.instructions());
    }

    /// The empty program is a two-sided identity of `+`.
    #[test]
    fn test_empty_program_is_identity(a in arb_program()) {
        let identity = Program::default();
        let left = &identity + &a;
        let right = &a + &identity;
        prop_assert_eq!(left.instructions(), a.instructions());
        prop_assert_eq!(right.instructions(), a.instructions());
    }

    /// Summing fragments equals appending each fragment in turn.
    #[test]
    fn test_sum_matches_sequential_append(parts in prop::collection::vec(arb_program(), 0..5)) {
        let summed: Program = parts.iter().sum();
        let mut appended = Program::new();
        for part in &parts {
            appended.append(part);
        }
        prop_assert_eq!(summed, appended);
    }

    /// A list holding a tuple holding a program flattens like direct appends.
    #[test]
    fn test_nested_append_flattens_in_order(ops in prop::collection::vec(arb_gate_op(), 3..10)) {
        let insts: Vec<Instruction> = ops.iter().map(GateOp::build).collect();
        let (head, rest) = insts.split_at(1);
        let (middle, tail) = rest.split_at(1);

        let inner: Program = tail.iter().cloned().collect();
        let nested = Program::from_sources(vec![
            Source::from(head[0].clone()),
            Source::from((middle[0].clone(), inner)),
        ]);

        let mut direct = Program::new();
        for inst in &insts {
            direct.append(inst.clone());
        }
        prop_assert_eq!(nested.instructions(), direct.instructions());
    }

    /// Compiling is deterministic and counts distinct addressed units.
    #[test]
    fn test_compile_counts_distinct_units(ops in prop::collection::vec(arb_gate_op(), 1..12)) {
        let program: Program = ops.iter().map(GateOp::build).collect();
        let payload = compile(&program).unwrap();

        let mut seen: Vec<u32> = program
            .iter()
            .flat_map(|inst| inst.units().iter().map(Unit::index))
            .collect();
        seen.sort_unstable();
        seen.dedup();

        prop_assert_eq!(payload.count_units(), seen.len());
        prop_assert_eq!(payload.circuit().len(), program.len());
        prop_assert_eq!(compile(&program).unwrap(), payload);
    }
}
