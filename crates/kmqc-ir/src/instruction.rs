//! Program instructions: dimension declarations, gates and measurements.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::unit::{IntoUnit, Unit};

/// A numeric gate parameter.
///
/// Integral parameters (positions, register indices) stay integral on the
/// wire; angles and amplitudes are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// An integral value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
}

impl ParamValue {
    /// The value as a float.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(v) => v as f64,
            ParamValue::Float(v) => v,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

/// Named gate parameters in declaration order.
pub type Params = IndexMap<String, ParamValue>;

/// Marks every unit of the program as a multi-level unit of `dimension` levels.
///
/// Only meaningful as the first instruction of a program. It addresses no unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensionInit")]
pub struct DimensionInit {
    dimension: usize,
}

#[derive(Deserialize)]
struct RawDimensionInit {
    dimension: usize,
}

impl TryFrom<RawDimensionInit> for DimensionInit {
    type Error = IrError;

    fn try_from(raw: RawDimensionInit) -> IrResult<Self> {
        DimensionInit::new(raw.dimension)
    }
}

impl DimensionInit {
    /// Declare a positive register dimension.
    pub fn new(dimension: usize) -> IrResult<Self> {
        if dimension == 0 {
            return Err(IrError::InvalidDimension(dimension));
        }
        Ok(Self { dimension })
    }

    /// The declared dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// A named operation applied to one or more units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGate")]
pub struct Gate {
    name: String,
    params: Option<Params>,
    targets: Vec<Unit>,
}

#[derive(Deserialize)]
struct RawGate {
    name: String,
    params: Option<Params>,
    targets: Vec<Unit>,
}

impl TryFrom<RawGate> for Gate {
    type Error = IrError;

    fn try_from(raw: RawGate) -> IrResult<Self> {
        Gate::new(raw.name, raw.params, raw.targets)
    }
}

impl Gate {
    /// Create a gate.
    ///
    /// Fails if `name` is empty or `targets` is empty.
    pub fn new(
        name: impl Into<String>,
        params: Option<Params>,
        targets: impl IntoIterator<Item = Unit>,
    ) -> IrResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(IrError::EmptyGateName);
        }
        let targets: Vec<Unit> = targets.into_iter().collect();
        if targets.is_empty() {
            return Err(IrError::EmptyTargets(name));
        }
        Ok(Self {
            name,
            params,
            targets,
        })
    }

    /// The wire operator name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter mapping, if the gate has one.
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Look up one parameter by name.
    pub fn param(&self, key: &str) -> Option<ParamValue> {
        self.params.as_ref().and_then(|p| p.get(key).copied())
    }

    /// Target units in order.
    pub fn targets(&self) -> &[Unit] {
        &self.targets
    }

    /// Number of targets.
    pub fn num_units(&self) -> usize {
        self.targets.len()
    }
}

/// Measurement of one unit into a classical register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    register: u32,
    target: Unit,
}

impl Measurement {
    /// Wire operator name of a measurement.
    pub const NAME: &'static str = "Measure";

    /// Measure `target` into classical register `register`.
    pub fn new(register: u32, target: impl IntoUnit) -> IrResult<Self> {
        Ok(Self {
            register,
            target: target.into_unit()?,
        })
    }

    /// The classical register index.
    pub fn register(&self) -> u32 {
        self.register
    }

    /// The measured unit.
    pub fn target(&self) -> Unit {
        self.target
    }

    /// Parameter mapping sent on the wire.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("register".into(), self.register.into());
        params
    }
}

/// Anything that can be placed into a [`Program`](crate::Program).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Register dimension declaration.
    DimensionInit(DimensionInit),
    /// Gate application.
    Gate(Gate),
    /// Measurement.
    Measure(Measurement),
}

impl Instruction {
    /// Operator name of the instruction.
    pub fn name(&self) -> &str {
        match self {
            Instruction::DimensionInit(_) => "DimensionInit",
            Instruction::Gate(g) => g.name(),
            Instruction::Measure(_) => Measurement::NAME,
        }
    }

    /// Units touched by the instruction, in target order.
    pub fn units(&self) -> &[Unit] {
        match self {
            Instruction::DimensionInit(_) => &[],
            Instruction::Gate(g) => g.targets(),
            Instruction::Measure(m) => std::slice::from_ref(&m.target),
        }
    }

    /// Declared dimension if this is a [`DimensionInit`].
    pub fn dimension(&self) -> Option<usize> {
        match self {
            Instruction::DimensionInit(d) => Some(d.dimension()),
            _ => None,
        }
    }

    /// Check if this is a dimension declaration.
    pub fn is_dimension_init(&self) -> bool {
        matches!(self, Instruction::DimensionInit(_))
    }

    /// Check if this is a gate.
    pub fn is_gate(&self) -> bool {
        matches!(self, Instruction::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Instruction::Measure(_))
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match self {
            Instruction::Gate(g) => Some(g),
            _ => None,
        }
    }
}

impl From<DimensionInit> for Instruction {
    fn from(d: DimensionInit) -> Self {
        Instruction::DimensionInit(d)
    }
}

impl From<Gate> for Instruction {
    fn from(g: Gate) -> Self {
        Instruction::Gate(g)
    }
}

impl From<Measurement> for Instruction {
    fn from(m: Measurement) -> Self {
        Instruction::Measure(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_requires_name() {
        assert_eq!(
            Gate::new("", None, [Unit::new(0)]),
            Err(IrError::EmptyGateName)
        );
    }

    #[test]
    fn test_gate_requires_targets() {
        assert!(matches!(
            Gate::new("H", None, Vec::new()),
            Err(IrError::EmptyTargets(name)) if name == "H"
        ));
    }

    #[test]
    fn test_gate_params_keep_declaration_order() {
        let mut params = Params::new();
        params.insert("theta".into(), 1.0.into());
        params.insert("phi".into(), 2.0.into());
        params.insert("mu".into(), 3.0.into());
        let gate = Gate::new("U3", Some(params), [Unit::new(0)]).unwrap();
        let keys: Vec<_> = gate.params().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["theta", "phi", "mu"]);
        assert_eq!(gate.param("phi"), Some(ParamValue::Float(2.0)));
    }

    #[test]
    fn test_measurement_has_one_unit() {
        let inst = Instruction::from(Measurement::new(0, 3_u32).unwrap());
        assert!(inst.is_measure());
        assert_eq!(inst.units(), &[Unit::new(3)]);
        assert_eq!(inst.name(), "Measure");
    }

    #[test]
    fn test_dimension_init_addresses_nothing() {
        let inst = Instruction::from(DimensionInit::new(4).unwrap());
        assert!(inst.is_dimension_init());
        assert!(inst.units().is_empty());
        assert_eq!(inst.dimension(), Some(4));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(DimensionInit::new(0), Err(IrError::InvalidDimension(0)));
    }

    #[test]
    fn test_deserialize_enforces_gate_invariants() {
        let err = serde_json::from_str::<Gate>(r#"{"name":"","params":null,"targets":[0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("non-empty"));

        let err = serde_json::from_str::<Gate>(r#"{"name":"H","params":null,"targets":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("at least one unit"));

        let gate: Gate =
            serde_json::from_str(r#"{"name":"Rx","params":{"mu":0.5},"targets":[2]}"#).unwrap();
        assert_eq!(gate.targets(), &[Unit::new(2)]);
        assert_eq!(gate.param("mu"), Some(ParamValue::Float(0.5)));
    }

    #[test]
    fn test_deserialize_enforces_positive_dimension() {
        assert!(serde_json::from_str::<DimensionInit>(r#"{"dimension":0}"#).is_err());
        let dim: DimensionInit = serde_json::from_str(r#"{"dimension":4}"#).unwrap();
        assert_eq!(dim.dimension(), 4);

        let inst = serde_json::from_str::<Instruction>(r#"{"DimensionInit":{"dimension":0}}"#);
        assert!(inst.is_err());
    }

    #[test]
    fn test_param_value_json() {
        assert_eq!(serde_json::to_string(&ParamValue::Int(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&ParamValue::Float(0.5)).unwrap(), "0.5");
    }
}
