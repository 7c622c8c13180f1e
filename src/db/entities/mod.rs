#[allow(unused_imports)]
pub mod prelude {
    pub use super::list::Entity as List;
    pub use super::todo::Entity as Todo;
}

pub mod list;
pub mod todo;
