pub mod api;
mod entry;

pub use entry::router;
