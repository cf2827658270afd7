/*!
## Rust Machine Module

This Rust module stores and runs BASIC programs. Lines are kept as text,
lexed when the cursor reaches them, and expressions are evaluated by
walking their parse trees.

*/

mod eval;
mod function;
mod listing;
mod operation;
mod runtime;
mod stack;
mod val;
mod var;

pub use eval::Evaluator;
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Event;
pub use runtime::Runtime;
pub use runtime::READY;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
