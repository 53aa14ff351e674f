use models::catalog::Collection;
use thiserror::Error;

/// Failures reported by a catalog store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection}: record {id} not found")]
    NotFound { collection: Collection, id: String },

    /// Unique or foreign-key violation
    #[error("{collection}: {message}")]
    Conflict {
        collection: Collection,
        message: String,
    },

    /// Anything else the backing store reported
    #[error("{collection}: {message}")]
    Remote {
        collection: Collection,
        message: String,
    },
}

impl StoreError {
    pub fn not_found(collection: Collection, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn conflict(collection: Collection, message: impl Into<String>) -> Self {
        Self::Conflict {
            collection,
            message: message.into(),
        }
    }

    pub fn remote(collection: Collection, message: impl Into<String>) -> Self {
        Self::Remote {
            collection,
            message: message.into(),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Self::NotFound { collection, .. }
            | Self::Conflict { collection, .. }
            | Self::Remote { collection, .. } => *collection,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        Self::Validation(format!("invalid fields: {}", fields.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::forms::CourseForm;
    use validator::Validate;

    #[test]
    fn test_store_error_names_collection() {
        let err = StoreError::not_found(Collection::Disciplines, 7);
        assert_eq!(err.to_string(), "disciplinas: record 7 not found");
        assert_eq!(err.collection(), Collection::Disciplines);
    }

    #[test]
    fn test_validation_errors_list_fields() {
        let form = CourseForm {
            eixo: " ".to_string(),
            nome: "".to_string(),
        };
        let err = ServiceError::from(form.validate().unwrap_err());
        assert_eq!(err.to_string(), "Invalid input: invalid fields: eixo, nome");
    }
}
