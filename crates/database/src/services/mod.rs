pub mod aggregate;
pub mod catalog;
pub mod import;
pub mod stats;
pub mod videos;

pub use catalog::CatalogService;
pub use import::ImportService;
pub use stats::StatsService;
pub use videos::VideoLessonService;

use crate::error::ServiceError;

pub type ServiceResult<T> = Result<T, ServiceError>;
