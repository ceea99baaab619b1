//! Structs to help parse operator tokens.

pub mod op;
