//! Controllers own exactly one validated service and turn its results into
//! HTTP responses. They never reach repositories directly.

pub mod users;

pub use users::UserController;
