pub mod course_disciplines;
pub mod courses;
pub mod designers;
pub mod disciplines;
pub mod import_history;
pub mod offerings;
pub mod professors;
pub mod video_lessons;
