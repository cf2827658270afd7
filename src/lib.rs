//! # Altair BASIC
//!
//! A small 8080 core and an interactive BASIC interpreter, wired together
//! the way an Altair 8800 runs BASIC over its serial console.
//!
//! Run the executable and type BASIC at the `OK` prompt. Numbered lines are
//! stored; anything else runs immediately.
//! ```text
//! ALTAIR BASIC VERSION 4.0
//! COPYRIGHT 1975 BY MITS AND BILL GATES
//! OK
//! 10 PRINT "HELLO"
//! RUN
//! HELLO
//! OK
//! ```
//!
//! Set `RUST_LOG=debug` to trace machine and program lifecycle on stderr.

pub mod altair;
pub mod cpu;
pub mod io;
pub mod lang;
pub mod mach;
pub mod term;
