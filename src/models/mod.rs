pub mod hook;

pub use hook::{StatusSnapshot, UnparseableInput, parse_hook};
