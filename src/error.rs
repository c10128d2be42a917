//! The fault taxonomy a machine can raise while executing a scroll.
//!
//! Every variant here corresponds to a condition the hosted program cannot
//! observe or recover from: once raised, execution stops and the fault is
//! reported on the diagnostic stream by the caller.

use std::io;
use thiserror::Error;

/// A non-recoverable condition raised while loading or executing a scroll.
#[derive(Error, Debug)]
pub enum Fault {
    /// The scroll's byte length was not a multiple of four.
    #[error("malformed scroll: length {0} is not a multiple of 4")]
    MalformedScroll(usize),

    /// Opcode 14 or 15 was fetched.
    #[error("illegal instruction: opcode {opcode} at finger {finger:#010x}")]
    IllegalInstruction {
        /// The offending opcode (always 14 or 15).
        opcode: u32,
        /// The finger value at the time of the fault.
        finger: u32,
    },

    /// Division with a zero divisor.
    #[error("divide by zero at finger {finger:#010x}")]
    DivideByZero {
        /// The finger value at the time of the fault.
        finger: u32,
    },

    /// An operation referenced an unknown platter, or tried to abandon platter 0.
    #[error("bad platter id {id:#010x} at finger {finger:#010x}")]
    BadPlatter {
        /// The offending identifier.
        id: u32,
        /// The finger value at the time of the fault.
        finger: u32,
    },

    /// A read, write, or fetch addressed a cell beyond a platter's length.
    #[error("out of bounds: platter {platter:#010x} offset {offset:#010x} at finger {finger:#010x}")]
    OutOfBounds {
        /// The platter identifier that was addressed.
        platter: u32,
        /// The offset that exceeded the platter's length.
        offset: u32,
        /// The finger value at the time of the fault.
        finger: u32,
    },

    /// Output was asked to emit a register value greater than 255.
    #[error("bad character {value:#010x} at finger {finger:#010x}")]
    BadCharacter {
        /// The offending register value.
        value: u32,
        /// The finger value at the time of the fault.
        finger: u32,
    },

    /// The heap could not satisfy an allocation request.
    #[error("out of memory: could not allocate {size} cells")]
    OutOfMemory {
        /// The requested platter size, in cells.
        size: u32,
    },

    /// The input stream failed in a way distinct from end-of-file.
    #[error("input error: {0}")]
    InputError(#[from] io::Error),
}
