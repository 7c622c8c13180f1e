use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[source] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: i64 },
    #[error("Invalid pagination: page={page} page_size={page_size}")]
    InvalidPagination { page: u64, page_size: u64 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl DaoLayerError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(err) if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        )
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }
}

impl From<DbErr> for DaoLayerError {
    fn from(err: DbErr) -> Self {
        Self::Db(err)
    }
}
