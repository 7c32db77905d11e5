#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod catalog;
pub mod collector;
pub mod config;
pub mod db;
mod schema;
pub mod structs;
pub mod threshold;

pub(crate) use structs::Error;
