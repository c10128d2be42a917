//! An interpreter for the Universal Machine, the 32-bit abstract computer
//! defined by the ICFP 2006 programming contest.
//!
//! The crate is split leaf-first, matching the data flow from a scroll file
//! on disk to a halted (or faulted) machine:
//!
//! - [`loader`] turns scroll bytes into the codewords that seed platter 0.
//! - [`heap`] is the platter heap: allocation, abandonment, and cell access.
//! - [`decode`] projects a codeword into its opcode and operand fields.
//! - [`ops`] is the fourteen operations, dispatched through [`ops::OPERATIONS`].
//! - [`machine`] owns the registers, finger, halt flag, and heap, and drives
//!   the fetch/decode/execute loop.
//! - [`io`] is the character-stream adapter the Input/Output operations use.
//! - [`error`] is the fault taxonomy shared by every fallible operation here.

pub mod decode;
pub mod error;
pub mod heap;
pub mod io;
pub mod loader;
pub mod machine;
pub mod ops;

pub use error::Fault;
pub use machine::Machine;

/// Loads a scroll's raw bytes and runs it to completion against `io`.
///
/// A convenience wrapper around [`loader::load`] and [`Machine::run`] for
/// callers that don't need to inspect the machine after it halts.
pub fn run(scroll: &[u8], io: &mut dyn io::Io) -> Result<(), Fault> {
    let program = loader::load(scroll)?;
    Machine::new(program).run(io)
}
