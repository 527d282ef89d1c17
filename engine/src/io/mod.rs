//! External interchange formats. Each submodule reads/writes exactly one of
//! the plain-text wire formats the engine's own components pass between
//! each other; none of them touch the apertium `.dix` XML format — that
//! parser/emitter belongs to an external collaborator this crate does not
//! implement.

pub mod config;
pub mod edgelist;
pub mod monodix;
pub mod preview;
pub mod stats;
