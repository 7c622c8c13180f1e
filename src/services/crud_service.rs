use crate::{db::dao::DaoLayerError, error::AppError};

#[derive(Clone, Copy)]
pub struct CrudErrors {
    pub create_failed: &'static str,
    pub find_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

impl Default for CrudErrors {
    fn default() -> Self {
        Self {
            create_failed: "Create failed",
            find_failed: "Find failed",
            update_failed: "Update failed",
            delete_failed: "Delete failed",
        }
    }
}

#[derive(Clone, Copy)]
pub enum CrudOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

/// Turns storage errors into client-facing errors.
///
/// Database failures keep their cause for logging and only expose the
/// per-operation message from [`CrudErrors`]. Everything else converts as
/// `From<DaoLayerError>` does.
pub trait CrudService {
    fn errors(&self) -> CrudErrors {
        CrudErrors::default()
    }

    fn map_error(&self, op: CrudOp, err: DaoLayerError) -> AppError {
        let errors = self.errors();
        match err {
            DaoLayerError::Db(db_err) => {
                let context = match op {
                    CrudOp::Create => errors.create_failed,
                    CrudOp::Find | CrudOp::List => errors.find_failed,
                    CrudOp::Update => errors.update_failed,
                    CrudOp::Delete => errors.delete_failed,
                };
                let message = format!("{context}. Please check the logs for more details");
                AppError::internal_with_source(message, db_err)
            }
            other => AppError::from(other),
        }
    }
}

pub(crate) fn normalize_required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{field} required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::{CrudErrors, CrudOp, CrudService, normalize_required};
    use crate::{db::dao::DaoLayerError, error::AppError};

    struct Plain;

    impl CrudService for Plain {}

    struct Custom;

    impl CrudService for Custom {
        fn errors(&self) -> CrudErrors {
            CrudErrors {
                update_failed: "Could not save todo",
                ..CrudErrors::default()
            }
        }
    }

    #[test]
    fn database_errors_hide_details_from_clients() {
        let err = Plain.map_error(
            CrudOp::Create,
            DaoLayerError::Db(DbErr::Custom("disk I/O error".to_string())),
        );

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(
            err.message(),
            "Create failed. Please check the logs for more details"
        );
        assert!(err.source_error().is_some());
    }

    #[test]
    fn custom_messages_apply_per_operation() {
        let err = Custom.map_error(
            CrudOp::Update,
            DaoLayerError::Db(DbErr::Custom("locked".to_string())),
        );
        assert!(err.message().starts_with("Could not save todo."));
    }

    #[test]
    fn referential_errors_become_conflicts() {
        let err = Plain.map_error(
            CrudOp::Create,
            DaoLayerError::MissingReference {
                entity: "List",
                id: 999,
            },
        );
        assert!(matches!(err, AppError::Conflict(message) if message == "List 999 does not exist"));
    }

    #[test]
    fn missing_rows_become_not_found() {
        let err = Plain.map_error(
            CrudOp::Find,
            DaoLayerError::NotFound {
                entity: "Todo",
                id: 3,
            },
        );
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn non_database_errors_convert_like_from() {
        let duplicate = || DaoLayerError::DuplicateId {
            entity: "List",
            id: 1,
        };
        let mapped = Plain.map_error(CrudOp::Create, duplicate());
        let converted = AppError::from(duplicate());
        assert!(matches!(mapped, AppError::Conflict(_)));
        assert_eq!(mapped.message(), converted.message());

        let err = Custom.map_error(
            CrudOp::List,
            DaoLayerError::InvalidPagination {
                page: 0,
                page_size: 10,
            },
        );
        assert!(matches!(err, AppError::BadRequest(message) if message.contains("page=0")));
    }

    #[test]
    fn blank_values_are_rejected() {
        assert_eq!(normalize_required("  Milk ", "Text").ok(), Some("Milk"));
        let err = normalize_required(" \t", "Name").expect_err("blank name should fail");
        assert_eq!(err.message(), "Name required");
    }
}
