//! Parameterized query functions, one module per table.

pub mod employees;
pub mod projects;
pub mod tasks;
