//! Bell command implementation.

use anyhow::Result;
use console::style;

use kmqc_ir::{Program, gate};

use super::common::{RunOptions, run_program};

/// `X(1) H(0) H(1) CNOT(0, 1) H(0)` on two qubits.
pub fn program() -> Result<Program> {
    Ok(Program::from_sources((
        gate::x(1_u32)?,
        gate::h(0_u32)?,
        gate::h(1_u32)?,
        gate::cnot(0_u32, 1_u32)?,
        gate::h(0_u32)?,
    )))
}

/// Execute the bell command.
pub async fn execute(opts: &RunOptions) -> Result<()> {
    println!("{} Building Bell-style program", style("→").cyan().bold());
    let program = program()?;
    run_program(&program, opts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmqc_ir::compile;

    #[test]
    fn test_bell_program_payload() {
        let payload = compile(&program().unwrap()).unwrap();
        let ops: Vec<&str> = payload.circuit().iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(ops, ["U3", "Hadamard", "Hadamard", "CNOT", "Hadamard"]);
        assert_eq!(payload.count_units(), 2);
        assert_eq!(payload.dimension(), None);
    }
}
