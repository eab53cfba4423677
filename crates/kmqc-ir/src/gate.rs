//! The gate catalog.
//!
//! Every named gate is one row of a static table: its wire operator, its
//! arity and its parameter schema. A single generic constructor,
//! [`GateSpec::apply`], builds any gate from its row, so generic re-dispatch
//! by name needs no per-gate code.
//!
//! Gates without a free parameter that belong to a rotation family are rows
//! pre-bound to literal constants: `Z` is `U1(mu = π)`, `X` is
//! `U3(π, 0, π)`, and so on. They serialize under the family's operator.
//!
//! | Name | Operator | Units | Parameters |
//! |------|----------|-------|------------|
//! | `Rx`, `Ry`, `Rz`, `U1` | same | 1 | one angle |
//! | `U2` | `U2` | 1 | `phi`, `mu` |
//! | `U3` | `U3` | 1 | `theta`, `phi`, `mu` |
//! | `Z`, `S_H` | `U1` | 1 | bound |
//! | `X`, `Y` | `U3` | 1 | bound |
//! | `H`, `S`, `T`, `T_H` | `Hadamard`, `S`, `T`, `THerm` | 1 | none |
//! | `CNOT` | `CNOT` | 2 | none |
//! | `CCNOT` | `CCNOT` | 3 | none |
//! | `ApplyX`, `ApplyXconjugate` | same | 1 | `index`, `a`, `b` |
//! | `ApplyZ`, `ApplyZconjugate` | same | 1 | `index`, `phi` |

use rustc_hash::FxHashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::LazyLock;

use crate::error::{IrError, IrResult};
use crate::instruction::{DimensionInit, Gate, Measurement, ParamValue, Params};
use crate::unit::{IntoUnit, Unit};

/// How a catalog entry fills the gate's parameter mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSchema {
    /// The gate carries no parameters (`params` is null on the wire).
    None,
    /// Caller-supplied values, one per name, in this order.
    Free(&'static [&'static str]),
    /// Literal values fixed by the catalog.
    Bound(&'static [(&'static str, f64)]),
}

/// One row of the gate catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSpec {
    /// Catalog name used for lookup.
    pub name: &'static str,
    /// Operator name emitted on the wire.
    pub operator: &'static str,
    /// Exact number of target units.
    pub arity: usize,
    /// Parameter schema.
    pub params: ParamSchema,
}

impl GateSpec {
    /// Number of parameters the caller has to supply.
    pub fn num_free_params(&self) -> usize {
        match self.params {
            ParamSchema::Free(names) => names.len(),
            ParamSchema::None | ParamSchema::Bound(_) => 0,
        }
    }

    /// Build a gate from this row, coercing every target to a [`Unit`].
    ///
    /// Fails if the number of targets differs from the arity or the number
    /// of parameters differs from the free parameter count.
    pub fn apply<U: IntoUnit>(
        &self,
        params: &[ParamValue],
        targets: impl IntoIterator<Item = U>,
    ) -> IrResult<Gate> {
        let targets = targets
            .into_iter()
            .map(IntoUnit::into_unit)
            .collect::<IrResult<Vec<Unit>>>()?;
        self.build(params, targets)
    }

    fn build(&self, params: &[ParamValue], targets: Vec<Unit>) -> IrResult<Gate> {
        if targets.len() != self.arity {
            return Err(IrError::ArityMismatch {
                gate: self.name.to_string(),
                expected: self.arity,
                got: targets.len(),
            });
        }
        if params.len() != self.num_free_params() {
            return Err(IrError::ParamCountMismatch {
                gate: self.name.to_string(),
                expected: self.num_free_params(),
                got: params.len(),
            });
        }

        let params = match self.params {
            ParamSchema::None => None,
            ParamSchema::Free(names) => Some(
                names
                    .iter()
                    .zip(params)
                    .map(|(name, value)| ((*name).to_string(), *value))
                    .collect::<Params>(),
            ),
            ParamSchema::Bound(values) => Some(
                values
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), ParamValue::Float(*value)))
                    .collect::<Params>(),
            ),
        };

        Gate::new(self.operator, params, targets)
    }
}

const fn free(
    name: &'static str,
    arity: usize,
    names: &'static [&'static str],
) -> GateSpec {
    GateSpec {
        name,
        operator: name,
        arity,
        params: ParamSchema::Free(names),
    }
}

const fn bound(
    name: &'static str,
    operator: &'static str,
    values: &'static [(&'static str, f64)],
) -> GateSpec {
    GateSpec {
        name,
        operator,
        arity: 1,
        params: ParamSchema::Bound(values),
    }
}

const fn fixed(name: &'static str, operator: &'static str, arity: usize) -> GateSpec {
    GateSpec {
        name,
        operator,
        arity,
        params: ParamSchema::None,
    }
}

// Rotation families
const RX: GateSpec = free("Rx", 1, &["mu"]);
const RY: GateSpec = free("Ry", 1, &["theta"]);
const RZ: GateSpec = free("Rz", 1, &["phi"]);
const U1: GateSpec = free("U1", 1, &["mu"]);
const U2: GateSpec = free("U2", 1, &["phi", "mu"]);
const U3: GateSpec = free("U3", 1, &["theta", "phi", "mu"]);

// Pre-bound members of the rotation families
const Z: GateSpec = bound("Z", "U1", &[("mu", PI)]);
const S_H: GateSpec = bound("S_H", "U1", &[("mu", -FRAC_PI_2)]);
const X: GateSpec = bound("X", "U3", &[("theta", PI), ("phi", 0.0), ("mu", PI)]);
const Y: GateSpec = bound("Y", "U3", &[("theta", PI), ("phi", FRAC_PI_2), ("mu", FRAC_PI_2)]);

// Fixed gates
const H: GateSpec = fixed("H", "Hadamard", 1);
const S: GateSpec = fixed("S", "S", 1);
const T: GateSpec = fixed("T", "T", 1);
const T_H: GateSpec = fixed("T_H", "THerm", 1);
const CNOT: GateSpec = fixed("CNOT", "CNOT", 2);
const CCNOT: GateSpec = fixed("CCNOT", "CCNOT", 3);

// Qudit mix and phase gates
const APPLY_X: GateSpec = free("ApplyX", 1, &["index", "a", "b"]);
const APPLY_X_CONJUGATE: GateSpec = free("ApplyXconjugate", 1, &["index", "a", "b"]);
const APPLY_Z: GateSpec = free("ApplyZ", 1, &["index", "phi"]);
const APPLY_Z_CONJUGATE: GateSpec = free("ApplyZconjugate", 1, &["index", "phi"]);

/// Every catalog entry.
pub static CATALOG: &[GateSpec] = &[
    RX,
    RY,
    RZ,
    U1,
    U2,
    U3,
    H,
    S,
    S_H,
    T,
    T_H,
    X,
    Y,
    Z,
    CNOT,
    CCNOT,
    APPLY_X,
    APPLY_X_CONJUGATE,
    APPLY_Z,
    APPLY_Z_CONJUGATE,
];

static BY_NAME: LazyLock<FxHashMap<&'static str, &'static GateSpec>> =
    LazyLock::new(|| CATALOG.iter().map(|spec| (spec.name, spec)).collect());

/// Find a catalog entry by name.
pub fn lookup(name: &str) -> IrResult<&'static GateSpec> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| IrError::UnknownGate(name.to_string()))
}

// =========================================================================
// Rotation gates
// =========================================================================

/// `Rx(mu)`: rotation about X.
pub fn rx(mu: f64, target: impl IntoUnit) -> IrResult<Gate> {
    RX.apply(&[mu.into()], [target])
}

/// `Ry(theta)`: rotation about Y.
pub fn ry(theta: f64, target: impl IntoUnit) -> IrResult<Gate> {
    RY.apply(&[theta.into()], [target])
}

/// `Rz(phi)`: rotation about Z.
pub fn rz(phi: f64, target: impl IntoUnit) -> IrResult<Gate> {
    RZ.apply(&[phi.into()], [target])
}

/// `U1(mu) = diag(1, exp(i mu))`.
pub fn u1(mu: f64, target: impl IntoUnit) -> IrResult<Gate> {
    U1.apply(&[mu.into()], [target])
}

/// `U2(phi, mu) = Rz(phi + π/2) Rx(π/2) Rz(mu - π/2)`.
pub fn u2(phi: f64, mu: f64, target: impl IntoUnit) -> IrResult<Gate> {
    U2.apply(&[phi.into(), mu.into()], [target])
}

/// `U3(theta, phi, mu) = Rz(phi + 3π) Rx(π/2) Rz(theta + π) Rx(π/2) Rz(mu)`.
pub fn u3(theta: f64, phi: f64, mu: f64, target: impl IntoUnit) -> IrResult<Gate> {
    U3.apply(&[theta.into(), phi.into(), mu.into()], [target])
}

/// Pauli-Z, emitted as `U1(π)`.
pub fn z(target: impl IntoUnit) -> IrResult<Gate> {
    Z.apply(&[], [target])
}

/// S-dagger, emitted as `U1(-π/2)`.
pub fn s_h(target: impl IntoUnit) -> IrResult<Gate> {
    S_H.apply(&[], [target])
}

/// Pauli-X, emitted as `U3(π, 0, π)`.
pub fn x(target: impl IntoUnit) -> IrResult<Gate> {
    X.apply(&[], [target])
}

/// Pauli-Y, emitted as `U3(π, π/2, π/2)`.
pub fn y(target: impl IntoUnit) -> IrResult<Gate> {
    Y.apply(&[], [target])
}

// =========================================================================
// Fixed gates
// =========================================================================

/// Hadamard.
pub fn h(target: impl IntoUnit) -> IrResult<Gate> {
    H.apply(&[], [target])
}

/// S gate.
pub fn s(target: impl IntoUnit) -> IrResult<Gate> {
    S.apply(&[], [target])
}

/// T gate.
pub fn t(target: impl IntoUnit) -> IrResult<Gate> {
    T.apply(&[], [target])
}

/// T-dagger.
pub fn t_h(target: impl IntoUnit) -> IrResult<Gate> {
    T_H.apply(&[], [target])
}

/// Controlled NOT.
pub fn cnot(control: impl IntoUnit, target: impl IntoUnit) -> IrResult<Gate> {
    CNOT.apply(&[], [control.into_unit()?, target.into_unit()?])
}

/// Doubly-controlled NOT (Toffoli).
pub fn ccnot(
    control1: impl IntoUnit,
    control2: impl IntoUnit,
    target: impl IntoUnit,
) -> IrResult<Gate> {
    CCNOT.apply(
        &[],
        [control1.into_unit()?, control2.into_unit()?, target.into_unit()?],
    )
}

// =========================================================================
// Qudit gates
// =========================================================================

/// Mix gate at position `index` with amplitudes `(a, b)`.
pub fn apply_x(index: u32, a: f64, b: f64, target: impl IntoUnit) -> IrResult<Gate> {
    APPLY_X.apply(&[index.into(), a.into(), b.into()], [target])
}

/// Conjugate of [`apply_x`].
pub fn apply_x_conjugate(index: u32, a: f64, b: f64, target: impl IntoUnit) -> IrResult<Gate> {
    APPLY_X_CONJUGATE.apply(&[index.into(), a.into(), b.into()], [target])
}

/// Phase gate at position `index` with phase `phi`.
pub fn apply_z(index: u32, phi: f64, target: impl IntoUnit) -> IrResult<Gate> {
    APPLY_Z.apply(&[index.into(), phi.into()], [target])
}

/// Conjugate of [`apply_z`].
pub fn apply_z_conjugate(index: u32, phi: f64, target: impl IntoUnit) -> IrResult<Gate> {
    APPLY_Z_CONJUGATE.apply(&[index.into(), phi.into()], [target])
}

/// Measure `target` into classical register `register`.
pub fn measure(register: u32, target: impl IntoUnit) -> IrResult<Measurement> {
    Measurement::new(register, target)
}

/// Declare a multi-level register of `dimension` levels.
pub fn init_dim(dimension: usize) -> IrResult<DimensionInit> {
    DimensionInit::new(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        assert_eq!(BY_NAME.len(), CATALOG.len());
    }

    #[test]
    fn test_lookup_unknown_gate() {
        assert_eq!(
            lookup("Frobnicate"),
            Err(IrError::UnknownGate("Frobnicate".into()))
        );
    }

    #[test]
    fn test_rotation_gate_params() {
        let gate = rx(0.25, 0_u32).unwrap();
        assert_eq!(gate.name(), "Rx");
        assert_eq!(gate.param("mu"), Some(ParamValue::Float(0.25)));
        assert_eq!(gate.targets(), &[Unit::new(0)]);
    }

    #[test]
    fn test_u3_param_order() {
        let gate = u3(1.0, 2.0, 3.0, Unit::new(1)).unwrap();
        let keys: Vec<&str> = gate.params().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["theta", "phi", "mu"]);
    }

    #[test]
    fn test_bound_gates_use_family_operator() {
        let gate = z(0_u32).unwrap();
        assert_eq!(gate.name(), "U1");
        assert_eq!(gate.param("mu"), Some(ParamValue::Float(PI)));

        let gate = s_h(0_u32).unwrap();
        assert_eq!(gate.param("mu"), Some(ParamValue::Float(-FRAC_PI_2)));

        let gate = x(2_u32).unwrap();
        assert_eq!(gate.name(), "U3");
        assert_eq!(gate.param("theta"), Some(ParamValue::Float(PI)));
        assert_eq!(gate.param("phi"), Some(ParamValue::Float(0.0)));
        assert_eq!(gate.param("mu"), Some(ParamValue::Float(PI)));

        let gate = y(2_u32).unwrap();
        assert_eq!(gate.param("phi"), Some(ParamValue::Float(FRAC_PI_2)));
    }

    #[test]
    fn test_fixed_gate_has_no_params() {
        let gate = h(0_u32).unwrap();
        assert_eq!(gate.name(), "Hadamard");
        assert!(gate.params().is_none());
        assert_eq!(t_h(0_u32).unwrap().name(), "THerm");
    }

    #[test]
    fn test_two_unit_gate_arity() {
        let spec = lookup("CNOT").unwrap();
        assert!(spec.apply(&[], [0_u32]).is_err());
        assert!(spec.apply(&[], [0_u32, 1, 2]).is_err());
        let gate = spec.apply(&[], [0_u32, 1]).unwrap();
        assert_eq!(gate.targets(), &[Unit::new(0), Unit::new(1)]);
    }

    #[test]
    fn test_arity_error_names_gate() {
        let err = lookup("CCNOT").unwrap().apply(&[], [0_u32]).unwrap_err();
        assert_eq!(
            err,
            IrError::ArityMismatch {
                gate: "CCNOT".into(),
                expected: 3,
                got: 1,
            }
        );
    }

    #[test]
    fn test_param_count_checked() {
        let err = lookup("U2")
            .unwrap()
            .apply(&[ParamValue::Float(1.0)], [0_u32])
            .unwrap_err();
        assert!(matches!(err, IrError::ParamCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_negative_target_rejected() {
        assert_eq!(cnot(0_i32, -1_i32), Err(IrError::NegativeIndex { index: -1 }));
    }

    #[test]
    fn test_dispatch_by_name_matches_factory() {
        let by_name = lookup("CCNOT").unwrap().apply(&[], [0_u32, 1, 2]).unwrap();
        assert_eq!(by_name, ccnot(0_u32, 1_u32, 2_u32).unwrap());
    }

    #[test]
    fn test_qudit_gate_index_is_integral() {
        let gate = apply_z(4, 0.5, 0_u32).unwrap();
        assert_eq!(gate.param("index"), Some(ParamValue::Int(4)));
        assert_eq!(gate.param("phi"), Some(ParamValue::Float(0.5)));
    }
}
