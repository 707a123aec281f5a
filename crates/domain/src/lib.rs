//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod employee;
mod hierarchy;

pub use employee::{EmailAddress, EmployeeId, EmployeeInput, EmployeeRecord};
pub use hierarchy::Hierarchy;
