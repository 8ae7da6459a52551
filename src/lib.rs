//! Generates Flow / TypeScript type declarations from a GraphQL schema.
//!
//! The pipeline is: load a [`schema::Schema`] (introspection JSON or SDL),
//! render it with [`generate::render`] under a set of
//! [`options::GenerateOptions`], then wrap the result with
//! [`module::assemble`].

pub mod cli;
pub mod config;
pub mod generate;
pub mod module;
pub mod options;
pub mod resolve;
pub mod schema;
pub mod sdl;
