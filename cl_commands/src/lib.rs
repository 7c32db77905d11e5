#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use cl_core::structs::{Command, Context, Error};

mod collector;
mod meta;
mod paginate;

#[must_use]
pub fn commands() -> Vec<Command> {
    meta::commands()
        .into_iter()
        .chain(collector::commands())
        .collect()
}
