//! Adapter implementations for the Rosterly application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_employee_repository;
mod in_memory_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_employee_repository::InMemoryEmployeeRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
