//! City lookup: fetching the remote catalogue and feeding selection controls.

pub mod client;
pub mod control;
