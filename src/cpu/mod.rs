/*!
## Rust CPU Module

A fetch-decode-execute core for a small subset of the Intel 8080,
with the 64K memory it runs from.

*/

mod engine;
mod memory;
mod opcode;

pub use engine::Cpu;
pub use engine::Flags;
pub use engine::Status;
pub use memory::Memory;
pub use memory::MEMORY_SIZE;
pub use opcode::Opcode;
