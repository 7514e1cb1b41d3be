//! Three-address code: instruction model, literal spelling and the generator.
mod generator;
mod instr;
mod literal;

pub use generator::TacGenerator;
pub use instr::{Opcode, TacInstr, dump, is_temporary};
pub use literal::Literal;
