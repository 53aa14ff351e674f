use crate::catalog::{Course, Designer, Discipline, Offering, Professor, VideoLesson};
use serde::{Deserialize, Serialize};

/// A video lesson joined with everything reachable through its offering
///
/// Any link that cannot be resolved is left as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VideoLessonDetails {
    pub videoaula: VideoLesson,
    pub oferta: Option<Offering>,
    pub disciplina: Option<Discipline>,
    pub professor: Option<Professor>,
    pub di: Option<Designer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DisciplineWithCourses {
    pub disciplina: Discipline,
    pub cursos: Vec<Course>,
}

/// Filters for the joined video lesson listing; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoLessonFilter {
    pub ano: Option<i32>,
    pub bimestre: Option<i32>,
    pub curso_id: Option<i32>,
    pub disciplina_id: Option<i32>,
    /// Case-insensitive fragment of the lesson title
    pub busca: Option<String>,
}
