//! Service layer providing business operations on top of repositories.
//! - Separates business logic from data access.
//! - Every service implements `conventions::Service` so controllers accept it.

pub mod pagination;
pub mod users;

pub use users::UserService;
