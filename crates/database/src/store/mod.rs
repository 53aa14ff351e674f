//! Typed access to the catalog collections
//!
//! The store returns raw rows; joining and aggregation happen in the services.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::SeaOrmStore;

use crate::error::StoreError;
use async_trait::async_trait;
use futures::try_join;
use models::{
    catalog::{
        Collection, Course, CourseDiscipline, Designer, Discipline, Offering, Professor,
        VideoLesson,
    },
    forms::{CourseForm, NewDiscipline, NewOffering, NewVideoLesson, OfferingForm, PersonForm},
    import::{ImportHistory, NewImportHistory},
};
use std::sync::Arc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Upper bound on the video lessons returned by a single listing
pub const DEFAULT_FETCH_LIMIT: u64 = 10_000;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_courses(&self) -> StoreResult<Vec<Course>>;
    async fn get_course(&self, id: i32) -> StoreResult<Course>;
    async fn insert_course(&self, form: &CourseForm) -> StoreResult<Course>;
    async fn update_course(&self, id: i32, form: &CourseForm) -> StoreResult<Course>;
    /// Removes the course's discipline links, then the course
    async fn delete_course(&self, id: i32) -> StoreResult<()>;

    async fn list_disciplines(&self) -> StoreResult<Vec<Discipline>>;
    async fn get_discipline(&self, id: i32) -> StoreResult<Discipline>;
    async fn find_discipline_by_code(&self, codigo: &str) -> StoreResult<Option<Discipline>>;
    /// Creates a discipline together with its course links, atomically
    async fn insert_discipline(
        &self,
        discipline: &NewDiscipline,
        curso_ids: &[i32],
    ) -> StoreResult<Discipline>;
    /// Updates a discipline; `Some` course ids replace its links in the same unit of work
    async fn update_discipline(
        &self,
        id: i32,
        discipline: &NewDiscipline,
        curso_ids: Option<&[i32]>,
    ) -> StoreResult<Discipline>;
    /// Removes the discipline's course links, then the discipline
    async fn delete_discipline(&self, id: i32) -> StoreResult<()>;

    async fn list_course_links(&self) -> StoreResult<Vec<CourseDiscipline>>;
    async fn course_links_for_course(&self, curso_id: i32) -> StoreResult<Vec<CourseDiscipline>>;

    async fn list_professors(&self) -> StoreResult<Vec<Professor>>;
    async fn get_professor(&self, id: i32) -> StoreResult<Professor>;
    /// Case-insensitive substring match on the name
    async fn find_professors_by_name(&self, nome: &str) -> StoreResult<Vec<Professor>>;
    async fn insert_professor(&self, form: &PersonForm) -> StoreResult<Professor>;
    async fn update_professor(&self, id: i32, form: &PersonForm) -> StoreResult<Professor>;
    async fn delete_professor(&self, id: i32) -> StoreResult<()>;

    async fn list_designers(&self) -> StoreResult<Vec<Designer>>;
    async fn get_designer(&self, id: i32) -> StoreResult<Designer>;
    /// Case-insensitive substring match on the name
    async fn find_designers_by_name(&self, nome: &str) -> StoreResult<Vec<Designer>>;
    async fn insert_designer(&self, form: &PersonForm) -> StoreResult<Designer>;
    async fn update_designer(&self, id: i32, form: &PersonForm) -> StoreResult<Designer>;
    async fn delete_designer(&self, id: i32) -> StoreResult<()>;

    async fn list_offerings(&self) -> StoreResult<Vec<Offering>>;
    async fn get_offering(&self, id: i32) -> StoreResult<Offering>;
    async fn find_offering(
        &self,
        disciplina_id: i32,
        ano: i32,
        bimestre_operacional: i32,
    ) -> StoreResult<Option<Offering>>;
    async fn insert_offering(&self, offering: &NewOffering) -> StoreResult<Offering>;
    /// A `None` type keeps the current one
    async fn update_offering(&self, id: i32, form: &OfferingForm) -> StoreResult<Offering>;
    async fn delete_offering(&self, id: i32) -> StoreResult<()>;

    /// Most recent lessons first, bounded by the store's fetch limit
    async fn list_video_lessons(&self) -> StoreResult<Vec<VideoLesson>>;
    async fn get_video_lesson(&self, id: i32) -> StoreResult<VideoLesson>;
    async fn insert_video_lesson(&self, lesson: &NewVideoLesson) -> StoreResult<VideoLesson>;
    async fn update_video_lesson(
        &self,
        id: i32,
        lesson: &NewVideoLesson,
    ) -> StoreResult<VideoLesson>;
    async fn delete_video_lesson(&self, id: i32) -> StoreResult<()>;

    async fn count(&self, collection: Collection) -> StoreResult<u64>;

    async fn insert_import_history(
        &self,
        history: &NewImportHistory,
    ) -> StoreResult<ImportHistory>;
    /// Newest first
    async fn list_import_history(&self) -> StoreResult<Vec<ImportHistory>>;
}

pub type SharedCatalogStore = Arc<dyn CatalogStore>;

/// Removes repeated ids while keeping the first occurrence order
pub fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Every collection the aggregation folds over, read in one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub courses: Vec<Course>,
    pub disciplines: Vec<Discipline>,
    pub links: Vec<CourseDiscipline>,
    pub professors: Vec<Professor>,
    pub designers: Vec<Designer>,
    pub offerings: Vec<Offering>,
    pub video_lessons: Vec<VideoLesson>,
}

impl CatalogSnapshot {
    /// Reads all collections concurrently; the first failure aborts the batch
    pub async fn fetch(store: &dyn CatalogStore) -> StoreResult<Self> {
        let (courses, disciplines, links, professors, designers, offerings, video_lessons) =
            try_join!(
                store.list_courses(),
                store.list_disciplines(),
                store.list_course_links(),
                store.list_professors(),
                store.list_designers(),
                store.list_offerings(),
                store.list_video_lessons(),
            )?;

        Ok(Self {
            courses,
            disciplines,
            links,
            professors,
            designers,
            offerings,
            video_lessons,
        })
    }
}
