/*!
## Rust I/O Module

Port space for the CPU and the text terminal both engines print to.

*/

mod port;
mod terminal;

pub use port::Device;
pub use port::Io;
pub use port::PortIo;
pub use port::CONSOLE_PORT;
pub use terminal::Terminal;
pub use terminal::Transcript;
