use serde::{Deserialize, Serialize};
use strum::Display;

/// The collections held by the catalog store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Collection {
    #[strum(serialize = "cursos")]
    Courses,
    #[strum(serialize = "disciplinas")]
    Disciplines,
    #[strum(serialize = "cursos_disciplinas")]
    CourseDisciplines,
    #[strum(serialize = "professores")]
    Professors,
    #[strum(serialize = "designers_instrucionais")]
    Designers,
    #[strum(serialize = "ofertas_disciplinas")]
    Offerings,
    #[strum(serialize = "videoaulas")]
    VideoLessons,
    #[strum(serialize = "historico_importacoes")]
    ImportHistory,
}

/// A course, the top-level grouping of disciplines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    /// Technological axis the course belongs to
    pub eixo: String,
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Discipline {
    pub id: i32,
    /// Unique discipline code, e.g. `MAT001`
    pub codigo: String,
    pub nome: String,
    /// Workload in hours
    pub carga_horaria: i32,
}

/// Association row between a course and a discipline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseDiscipline {
    pub curso_id: i32,
    pub disciplina_id: i32,
    /// Year of the course in which the discipline is taught
    pub ano_curso: Option<i32>,
    pub bimestre_pedagogico: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: i32,
    pub nome: String,
}

/// An instructional designer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Designer {
    pub id: i32,
    pub nome: String,
}

/// A discipline offered in a given year and operational bimester
///
/// Legacy rows may lack a year or a bimester, so both are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: i32,
    pub disciplina_id: i32,
    pub ano: Option<i32>,
    pub bimestre_operacional: Option<i32>,
    pub professor_id: Option<i32>,
    pub di_id: Option<i32>,
    pub tipo: String,
}

impl Offering {
    /// Default offering type for offerings created on demand
    pub const DEFAULT_TYPE: &'static str = "regular";

    /// The offering year, if it is usable as a grouping key
    pub fn year(&self) -> Option<i32> {
        self.ano.filter(|ano| *ano > 0)
    }

    /// The operational bimester, if it is usable as a grouping key
    pub fn bimester(&self) -> Option<i32> {
        self.bimestre_operacional.filter(|bimestre| *bimestre > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoLesson {
    pub id: i32,
    pub oferta_disciplina_id: i32,
    pub semana: Option<i32>,
    pub numero_aula: Option<i32>,
    pub titulo: String,
    pub sinopse: Option<String>,
    pub link_youtube_original: Option<String>,
    pub slides_disponivel: bool,
    pub status: Option<String>,
    pub id_tv_cultura: Option<String>,
    pub duracao_minutos: Option<i32>,
    /// Link to the sign-language (Libras) version
    pub link_libras: Option<String>,
    /// Link to the audio-described version
    pub link_audiodescricao: Option<String>,
    /// Whether closed captions are available
    pub cc_legenda: bool,
    pub link_download: Option<String>,
}

/// An optional text field counts as set only when it holds something
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

impl VideoLesson {
    pub fn has_libras(&self) -> bool {
        is_set(&self.link_libras)
    }

    pub fn has_audio_description(&self) -> bool {
        is_set(&self.link_audiodescricao)
    }

    pub fn has_captions(&self) -> bool {
        self.cc_legenda
    }

    /// Whether any accessibility resource is available
    pub fn has_accessibility(&self) -> bool {
        self.has_libras() || self.has_audio_description() || self.has_captions()
    }
}
