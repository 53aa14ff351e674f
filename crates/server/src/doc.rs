use crate::{
    dtos::{
        import::DisciplineImportRequest,
        pagination::{PaginationMeta, VideoLessonPage},
    },
    routes::{courses, disciplines, health, import, offerings, people, stats, video_lessons},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::update_course,
        courses::delete_course,
        courses::course_disciplines,
        disciplines::list_disciplines,
        disciplines::disciplines_with_courses,
        disciplines::get_discipline_by_code,
        disciplines::get_discipline,
        disciplines::create_discipline,
        disciplines::update_discipline,
        disciplines::delete_discipline,
        people::list_professors,
        people::get_professor,
        people::create_professor,
        people::update_professor,
        people::delete_professor,
        people::list_designers,
        people::get_designer,
        people::create_designer,
        people::update_designer,
        people::delete_designer,
        offerings::list_offerings,
        offerings::get_offering,
        offerings::update_offering,
        offerings::delete_offering,
        video_lessons::list_video_lessons,
        video_lessons::get_video_lesson,
        video_lessons::create_video_lesson,
        video_lessons::update_video_lesson,
        video_lessons::delete_video_lesson,
        stats::overview,
        stats::accessibility,
        stats::per_course,
        stats::per_year,
        stats::per_bimester,
        stats::per_year_bimester,
        stats::evolution,
        import::import_disciplines,
        import::import_discipline_csv,
        import::discipline_template,
        import::history,
    ),
    components(schemas(DisciplineImportRequest, PaginationMeta, VideoLessonPage)),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Courses", description = "Course administration"),
        (name = "Disciplines", description = "Discipline administration and course links"),
        (name = "People", description = "Professors and instructional designers"),
        (name = "Offerings", description = "Discipline offerings per year and bimester"),
        (name = "Video lessons", description = "Video lessons and their joined listing"),
        (name = "Statistics", description = "Dashboard aggregates"),
        (name = "Import", description = "Bulk discipline import"),
    ),
    info(
        title = "Video Lesson Catalog API",
        version = "1.0.0",
        description = "Courses, disciplines, offerings and video lessons",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/cursos/{id}/disciplinas",
            "/disciplinas/codigo/{codigo}",
            "/videoaulas",
            "/estatisticas/por-ano-bimestre",
            "/importacao/disciplinas/csv",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
