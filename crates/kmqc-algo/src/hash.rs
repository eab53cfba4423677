//! Hash and reverse-test program generators.
//!
//! The forward encoding of a word into a `dim`-level register is a mix
//! layer followed by a phase layer:
//!
//! ```text
//! HashFun    = ApplyF0          · ApplyZ_all
//! ReversTest = ApplyF0conjugate · ApplyZconjugate_all
//! ```
//!
//! The forward layers iterate positions in ascending order, the conjugate
//! layers in descending order, with identical per-position parameters. The
//! mix amplitude at position `i` is `b = sqrt((dim - i) / dim)` and the
//! phase is `word * k_list[i] / n`.

use tracing::debug;

use kmqc_ir::{IntoUnit, IrError, IrResult, Program, Unit, gate};

/// Validate a register dimension and narrow it to the wire index type.
fn check_dim(dim: usize) -> IrResult<u32> {
    if dim == 0 {
        return Err(IrError::InvalidDimension(dim));
    }
    u32::try_from(dim).map_err(|_| IrError::IndexOverflow { index: dim as u64 })
}

/// Validate the phase inputs and return the index list length.
fn check_phase_inputs(n: u64, k_list: &[i64]) -> IrResult<u32> {
    if n == 0 {
        return Err(IrError::InvalidRegisterSize(n));
    }
    if k_list.is_empty() {
        return Err(IrError::EmptyIndexList);
    }
    u32::try_from(k_list.len()).map_err(|_| IrError::IndexOverflow {
        index: k_list.len() as u64,
    })
}

/// Validate that the index list covers the register exactly.
fn check_protocol_inputs(dim: usize, n: u64, k_list: &[i64]) -> IrResult<()> {
    check_dim(dim)?;
    if k_list.len() != dim {
        return Err(IrError::LengthMismatch {
            expected: dim,
            got: k_list.len(),
        });
    }
    check_phase_inputs(n, k_list)?;
    Ok(())
}

/// Mix amplitudes `(a, b)` at position `i` of a `dim`-level register.
///
/// Fails unless `i < dim`.
pub fn mix_amplitudes(dim: u32, i: u32) -> IrResult<(f64, f64)> {
    if dim == 0 {
        return Err(IrError::InvalidDimension(0));
    }
    if i >= dim {
        return Err(IrError::PositionOutOfRange { position: i, dim });
    }
    let a = (1.0 / f64::from(dim)).sqrt();
    let b = (f64::from(dim - i) / f64::from(dim)).sqrt();
    Ok((a, b))
}

/// Phase `word * k / n`.
#[allow(clippy::cast_precision_loss)]
pub fn phase(word: i64, k: i64, n: u64) -> f64 {
    (i128::from(word) * i128::from(k)) as f64 / n as f64
}

/// Forward mix layer: one `ApplyX` per position, ascending.
pub fn apply_f0(dim: usize, target: impl IntoUnit) -> IrResult<Program> {
    let dim = check_dim(dim)?;
    let target = target.into_unit()?;
    let mut program = Program::new();
    for i in 0..dim {
        let (a, b) = mix_amplitudes(dim, i)?;
        program.append(gate::apply_x(i, a, b, target)?);
    }
    Ok(program)
}

/// Conjugate mix layer: one `ApplyXconjugate` per position, descending.
pub fn apply_f0_conjugate(dim: usize, target: impl IntoUnit) -> IrResult<Program> {
    let dim = check_dim(dim)?;
    let target = target.into_unit()?;
    let mut program = Program::new();
    for i in (0..dim).rev() {
        let (a, b) = mix_amplitudes(dim, i)?;
        program.append(gate::apply_x_conjugate(i, a, b, target)?);
    }
    Ok(program)
}

/// Forward phase layer: one `ApplyZ` per entry of `k_list`, ascending.
pub fn apply_z_all(word: i64, n: u64, k_list: &[i64], target: impl IntoUnit) -> IrResult<Program> {
    let len = check_phase_inputs(n, k_list)?;
    let target = target.into_unit()?;
    let mut program = Program::new();
    for (i, &k) in (0..len).zip(k_list) {
        program.append(gate::apply_z(i, phase(word, k, n), target)?);
    }
    Ok(program)
}

/// Conjugate phase layer: one `ApplyZconjugate` per entry of `k_list`, descending.
pub fn apply_z_conjugate_all(
    word: i64,
    n: u64,
    k_list: &[i64],
    target: impl IntoUnit,
) -> IrResult<Program> {
    let len = check_phase_inputs(n, k_list)?;
    let target = target.into_unit()?;
    let mut program = Program::new();
    for (i, &k) in (0..len).zip(k_list).rev() {
        program.append(gate::apply_z_conjugate(i, phase(word, k, n), target)?);
    }
    Ok(program)
}

/// Forward encoding of `word`: [`apply_f0`] then [`apply_z_all`].
///
/// `k_list` must hold exactly `dim` entries.
pub fn hash_fun(
    dim: usize,
    word: i64,
    n: u64,
    k_list: &[i64],
    target: impl IntoUnit,
) -> IrResult<Program> {
    check_protocol_inputs(dim, n, k_list)?;
    let target: Unit = target.into_unit()?;
    let program = apply_f0(dim, target)? + apply_z_all(word, n, k_list, target)?;
    debug!(dim, word, n, ops = program.len(), "built hash program");
    Ok(program)
}

/// Reverse test of `word`: [`apply_f0_conjugate`] then [`apply_z_conjugate_all`].
///
/// `k_list` must hold exactly `dim` entries.
pub fn reverse_test(
    dim: usize,
    word: i64,
    n: u64,
    k_list: &[i64],
    target: impl IntoUnit,
) -> IrResult<Program> {
    check_protocol_inputs(dim, n, k_list)?;
    let target: Unit = target.into_unit()?;
    let program =
        apply_f0_conjugate(dim, target)? + apply_z_conjugate_all(word, n, k_list, target)?;
    debug!(dim, word, n, ops = program.len(), "built reverse-test program");
    Ok(program)
}
