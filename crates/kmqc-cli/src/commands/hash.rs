//! Hash command implementation.

use anyhow::{Context, Result};
use console::style;

use kmqc_algo::{hash_fun, reverse_test};
use kmqc_ir::{Program, Unit, gate};

use super::common::{RunOptions, run_program};

/// Inputs of the hash and reverse-test program.
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    /// Levels per qudit.
    pub dim: usize,
    /// Word encoded by the hash layer.
    pub word: i64,
    /// Word undone by the reverse test.
    pub reverse_word: i64,
    /// Register size.
    pub n: u64,
}

/// Dimension declaration, hash, reverse test and a measurement of qudit 0.
///
/// The phase index list is `0..dim`.
pub fn program(params: &HashParams) -> Result<Program> {
    let k_list: Vec<i64> = (0..params.dim)
        .map(|k| i64::try_from(k).context("dimension exceeds i64"))
        .collect::<Result<_>>()?;
    let qudit = Unit::new(0);

    let mut program = Program::from_sources(gate::init_dim(params.dim)?);
    program += hash_fun(params.dim, params.word, params.n, &k_list, qudit)?;
    program += reverse_test(params.dim, params.reverse_word, params.n, &k_list, qudit)?;
    program.append(gate::measure(0, qudit)?);
    Ok(program)
}

/// Execute the hash command.
pub async fn execute(params: &HashParams, opts: &RunOptions) -> Result<()> {
    println!(
        "{} Building hash program (dim {}, word {}, reverse word {}, n {})",
        style("→").cyan().bold(),
        style(params.dim).green(),
        params.word,
        params.reverse_word,
        params.n
    );
    let program = program(params)?;
    run_program(&program, opts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmqc_ir::{IrError, compile};

    fn params(dim: usize) -> HashParams {
        HashParams {
            dim,
            word: 15,
            reverse_word: 15,
            n: 8,
        }
    }

    #[test]
    fn test_reference_program_shape() {
        let program = program(&params(200)).unwrap();
        assert_eq!(program.len(), 1 + 4 * 200 + 1);
        assert_eq!(program.dimension(), Some(200));

        let payload = compile(&program).unwrap();
        assert_eq!(payload.count_units(), 1);
        assert_eq!(payload.circuit().last().unwrap().operator, "Measure");
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let err = program(&params(0)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<IrError>(),
            Some(&IrError::InvalidDimension(0))
        );
    }

    #[test]
    fn test_reverse_word_changes_only_conjugate_phases() {
        let same = program(&params(4)).unwrap();
        let other = program(&HashParams {
            reverse_word: 3,
            ..params(4)
        })
        .unwrap();

        // init + 4 mix + 4 phase + 4 conjugate mix share parameters
        assert_eq!(same.instructions()[..13], other.instructions()[..13]);
        assert_ne!(same.instructions()[13..17], other.instructions()[13..17]);
    }
}
