//! Store access. Every function takes a generic connection so services can
//! run them inside a transaction.

pub mod members;
pub mod products;
pub mod wishes;
