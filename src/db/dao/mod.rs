pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod list_dao;
pub mod todo_dao;

pub use base::{DaoBase, PaginatedResponse};
pub use base_traits::{HasIdActiveModel, HasIdColumn};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use list_dao::ListDao;
pub use todo_dao::{NewTodo, TodoChanges, TodoDao};
