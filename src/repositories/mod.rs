pub mod user_repository;
pub mod mongo_user_repository;
#[cfg(test)]
pub mod memory_user_repository;

pub use user_repository::*;
pub use mongo_user_repository::*;
#[cfg(test)]
pub use memory_user_repository::*;
