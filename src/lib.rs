#![doc = include_str!("../README.md")]
#![doc(html_root_url = "https://docs.rs/yaml-graph/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::struct_excessive_bools
)]
#![deny(unsafe_code)]

extern crate alloc;

mod builder;
mod error;
mod event;
mod halt;
mod node;
mod parser;
mod reader;
mod symbols;

pub use crate::error::*;
pub use crate::event::*;
pub use crate::halt::ParserState;
pub use crate::node::*;
pub use crate::parser::*;
pub use crate::symbols::*;
