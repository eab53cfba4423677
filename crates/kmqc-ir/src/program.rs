//! Ordered, flattening programs and their composition algebra.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::instruction::{DimensionInit, Gate, Instruction, Measurement};

/// Anything that can be appended to a [`Program`].
///
/// `append` accepts exactly these shapes; any other type is rejected when
/// the caller's code is compiled rather than silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A single instruction.
    Instruction(Instruction),
    /// Another program; its already-flat instructions are appended in order.
    Program(Program),
    /// An ordered group of sources, flattened depth-first, left to right.
    Sequence(Vec<Source>),
}

impl From<Instruction> for Source {
    fn from(inst: Instruction) -> Self {
        Source::Instruction(inst)
    }
}

impl From<Gate> for Source {
    fn from(gate: Gate) -> Self {
        Source::Instruction(gate.into())
    }
}

impl From<Measurement> for Source {
    fn from(m: Measurement) -> Self {
        Source::Instruction(m.into())
    }
}

impl From<DimensionInit> for Source {
    fn from(d: DimensionInit) -> Self {
        Source::Instruction(d.into())
    }
}

impl From<Program> for Source {
    fn from(program: Program) -> Self {
        Source::Program(program)
    }
}

impl From<&Program> for Source {
    fn from(program: &Program) -> Self {
        Source::Program(program.clone())
    }
}

impl<T: Into<Source>> From<Vec<T>> for Source {
    fn from(items: Vec<T>) -> Self {
        Source::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Source>, const N: usize> From<[T; N]> for Source {
    fn from(items: [T; N]) -> Self {
        Source::Sequence(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_source_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Source>),+> From<($($name,)+)> for Source {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Source::Sequence(vec![$($name.into()),+])
            }
        }
    };
}

impl_source_for_tuple!(A, B);
impl_source_for_tuple!(A, B, C);
impl_source_for_tuple!(A, B, C, D);
impl_source_for_tuple!(A, B, C, D, E);
impl_source_for_tuple!(A, B, C, D, E, F);

/// An ordered sequence of instructions: one circuit in execution order.
///
/// A program owns its instruction list. Nested sources are flattened when
/// they are appended, so iteration never has to flatten.
///
/// Programs combine with `+`, which builds a new program and leaves both
/// operands untouched. The empty program is the identity of `+`, so a
/// collection of fragments can be folded with [`Iterator::sum`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a program from a bundle of sources.
    pub fn from_sources(source: impl Into<Source>) -> Self {
        let mut program = Self::new();
        program.append(source);
        program
    }

    /// Append a source, flattening nested sequences and programs.
    ///
    /// Sources are visited depth-first, left to right, using an explicit
    /// stack. Borrowing rules already forbid passing the receiver to itself;
    /// appending a clone of it appends that copy's instructions.
    pub fn append(&mut self, source: impl Into<Source>) -> &mut Self {
        let mut stack = vec![source.into()];
        while let Some(next) = stack.pop() {
            match next {
                Source::Instruction(inst) => self.instructions.push(inst),
                Source::Program(program) => self.instructions.extend(program.instructions),
                Source::Sequence(items) => stack.extend(items.into_iter().rev()),
            }
        }
        self
    }

    /// Combine two programs into a new one: `a`'s instructions, then `b`'s.
    pub fn combine(a: &Program, b: &Program) -> Program {
        let mut program = Program::new();
        program.append(a);
        program.append(b);
        program
    }

    /// Iterate over the instructions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// The instructions in insertion order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate and measurement instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| !inst.is_dimension_init())
            .count()
    }

    /// The declared register dimension, if the program starts with one.
    pub fn dimension(&self) -> Option<usize> {
        self.instructions.first().and_then(Instruction::dimension)
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl IntoIterator for Program {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

impl<S: Into<Source>> Extend<S> for Program {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for source in iter {
            self.append(source);
        }
    }
}

impl<S: Into<Source>> FromIterator<S> for Program {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut program = Program::new();
        program.extend(iter);
        program
    }
}

impl Add for Program {
    type Output = Program;

    fn add(self, rhs: Program) -> Program {
        let mut program = Program::new();
        program.append(self);
        program.append(rhs);
        program
    }
}

impl Add<&Program> for &Program {
    type Output = Program;

    fn add(self, rhs: &Program) -> Program {
        Program::combine(self, rhs)
    }
}

impl AddAssign for Program {
    fn add_assign(&mut self, rhs: Program) {
        self.append(rhs);
    }
}

impl AddAssign<&Program> for Program {
    fn add_assign(&mut self, rhs: &Program) {
        self.append(rhs);
    }
}

impl Sum for Program {
    fn sum<I: Iterator<Item = Program>>(iter: I) -> Program {
        iter.fold(Program::new(), |acc, p| acc + p)
    }
}

impl<'a> Sum<&'a Program> for Program {
    fn sum<I: Iterator<Item = &'a Program>>(iter: I) -> Program {
        iter.fold(Program::new(), |acc, p| &acc + p)
    }
}
