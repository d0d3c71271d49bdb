#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod ast;
pub mod enc;
pub mod err;
pub mod fmt;
pub mod reduce;

pub use ast::{Dict, Exp};
pub use enc::core::par::{parse, try_parse};
pub use reduce::{solve, try_solve};
