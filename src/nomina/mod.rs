//! Payroll derivation and document assembly for the electronic payroll
//! ("nómina electrónica") schema. Everything here is pure: no I/O and no
//! hidden clock reads.

pub mod assembly;
pub mod derivation;
pub mod export;
