// src/context/mod.rs
//! Building the context document: the main page plus its hydrated relations.

mod assembler;
mod hydrator;

pub use assembler::ContextAssembler;
pub use hydrator::RelationHydrator;
