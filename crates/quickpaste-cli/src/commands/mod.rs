pub mod common;
pub mod format;
pub mod listen;
pub mod opacity;
pub mod paste;
pub mod reset;
pub mod set;
pub mod show;
