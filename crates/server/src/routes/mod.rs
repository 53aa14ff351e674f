pub mod courses;
pub mod disciplines;
pub mod health;
pub mod import;
pub mod offerings;
pub mod people;
pub mod stats;
pub mod video_lessons;
