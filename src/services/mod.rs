pub mod context;
pub mod crud_service;
pub mod list_service;
pub mod todo_service;

pub use context::ServiceContext;
