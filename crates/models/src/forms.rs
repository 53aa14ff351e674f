//! Write payloads accepted by the catalog
//!
//! Forms carry what an admin submits; the `New*` structs are what the store
//! persists once a form has been validated and resolved.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Rejects text that is empty once trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }

    Ok(())
}

/// Turns blank optional text into `None`
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    #[validate(custom(function = "not_blank"))]
    pub eixo: String,
    #[validate(custom(function = "not_blank"))]
    pub nome: String,
}

impl CourseForm {
    pub fn trimmed(self) -> Self {
        Self {
            eixo: self.eixo.trim().to_string(),
            nome: self.nome.trim().to_string(),
        }
    }
}

/// Discipline data plus the courses it should be linked to
///
/// On update, `curso_ids: None` leaves the existing links untouched while
/// `Some(vec![])` removes them all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DisciplineForm {
    #[validate(custom(function = "not_blank"))]
    pub codigo: String,
    #[validate(custom(function = "not_blank"))]
    pub nome: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub carga_horaria: i32,
    #[serde(default)]
    pub curso_ids: Option<Vec<i32>>,
}

impl DisciplineForm {
    pub fn discipline(&self) -> NewDiscipline {
        NewDiscipline {
            codigo: self.codigo.trim().to_string(),
            nome: self.nome.trim().to_string(),
            carga_horaria: self.carga_horaria,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscipline {
    pub codigo: String,
    pub nome: String,
    pub carga_horaria: i32,
}

/// Payload for professors and instructional designers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PersonForm {
    #[validate(custom(function = "not_blank"))]
    pub nome: String,
}

impl PersonForm {
    pub fn trimmed(self) -> Self {
        Self {
            nome: self.nome.trim().to_string(),
        }
    }
}

/// Editable part of an offering; its identifying key is immutable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OfferingForm {
    pub professor_id: Option<i32>,
    pub di_id: Option<i32>,
    pub tipo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOffering {
    pub disciplina_id: i32,
    pub ano: i32,
    pub bimestre_operacional: i32,
    pub professor_id: Option<i32>,
    pub di_id: Option<i32>,
    pub tipo: String,
}

/// A video lesson as submitted by the admin forms
///
/// The lesson is attached to the offering identified by
/// `(disciplina_id, ano, bimestre_operacional)`, which is created if missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoLessonForm {
    pub disciplina_id: i32,
    #[validate(range(min = 1))]
    pub ano: i32,
    #[validate(range(min = 1, max = 4))]
    pub bimestre_operacional: i32,
    #[serde(default)]
    pub professor_id: Option<i32>,
    #[serde(default)]
    pub di_id: Option<i32>,

    #[serde(default)]
    pub semana: Option<i32>,
    #[serde(default)]
    pub numero_aula: Option<i32>,
    #[validate(custom(function = "not_blank"))]
    pub titulo: String,
    #[serde(default)]
    pub sinopse: Option<String>,
    #[serde(default)]
    pub link_youtube_original: Option<String>,
    #[serde(default)]
    pub slides_disponivel: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub id_tv_cultura: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub duracao_minutos: Option<i32>,
    #[serde(default)]
    pub link_libras: Option<String>,
    #[serde(default)]
    pub link_audiodescricao: Option<String>,
    #[serde(default)]
    pub cc_legenda: bool,
    #[serde(default)]
    pub link_download: Option<String>,
}

impl VideoLessonForm {
    /// The offering this lesson belongs to, as a row to create if missing
    pub fn offering(&self) -> NewOffering {
        NewOffering {
            disciplina_id: self.disciplina_id,
            ano: self.ano,
            bimestre_operacional: self.bimestre_operacional,
            professor_id: self.professor_id,
            di_id: self.di_id,
            tipo: crate::catalog::Offering::DEFAULT_TYPE.to_string(),
        }
    }

    /// Builds the persisted lesson, normalising blank text to `None`
    pub fn into_lesson(self, oferta_disciplina_id: i32) -> NewVideoLesson {
        NewVideoLesson {
            oferta_disciplina_id,
            semana: self.semana,
            numero_aula: self.numero_aula,
            titulo: self.titulo.trim().to_string(),
            sinopse: blank_to_none(self.sinopse),
            link_youtube_original: blank_to_none(self.link_youtube_original),
            slides_disponivel: self.slides_disponivel,
            status: blank_to_none(self.status),
            id_tv_cultura: blank_to_none(self.id_tv_cultura),
            duracao_minutos: self.duracao_minutos,
            link_libras: blank_to_none(self.link_libras),
            link_audiodescricao: blank_to_none(self.link_audiodescricao),
            cc_legenda: self.cc_legenda,
            link_download: blank_to_none(self.link_download),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideoLesson {
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
    pub link_libras: Option<String>,
    pub link_audiodescricao: Option<String>,
    pub cc_legenda: bool,
    pub link_download: Option<String>,
}
