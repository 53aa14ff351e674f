use models::{forms::blank_to_none, views::VideoLessonFilter};
use serde::Deserialize;
use utoipa::IntoParams;

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

/// Filters and paging for the video lesson listing
///
/// Zero or negative ids, years and bimesters are treated as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VideoLessonQuery {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub ano: Option<i32>,
    pub bimestre: Option<i32>,
    pub curso_id: Option<i32>,
    pub disciplina_id: Option<i32>,
    /// Fragment of the lesson title
    pub busca: Option<String>,
}

impl VideoLessonQuery {
    pub fn filter(&self) -> VideoLessonFilter {
        let positive = |value: Option<i32>| value.filter(|v| *v > 0);

        VideoLessonFilter {
            ano: positive(self.ano),
            bimestre: positive(self.bimestre),
            curso_id: positive(self.curso_id),
            disciplina_id: positive(self.disciplina_id),
            busca: blank_to_none(self.busca.clone()),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive fragment of the name
    pub nome: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_drops_falsy_values() {
        let query = VideoLessonQuery {
            ano: Some(0),
            bimestre: Some(2),
            curso_id: Some(-1),
            busca: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            query.filter(),
            VideoLessonFilter {
                bimestre: Some(2),
                ..Default::default()
            }
        );
    }
}
