use crate::catalog::Course;
use serde::{Deserialize, Serialize};

/// Totals shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_videoaulas: u64,
    pub total_disciplinas: u64,
    pub total_cursos: u64,
    pub total_professores: u64,
}

/// Accessibility counts; a lesson may contribute to several of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityCoverage {
    pub com_libras: u64,
    pub com_audiodescricao: u64,
    #[serde(rename = "comCC")]
    pub com_cc: u64,
    /// Lessons with no accessibility resource at all
    pub sem_acessibilidade: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourseLessonStats {
    pub curso: Course,
    pub total: u64,
    pub com_libras: u64,
    pub com_audiodescricao: u64,
    #[serde(rename = "comCC")]
    pub com_cc: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearTotal {
    pub ano: i32,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BimesterTotal {
    pub bimestre: i32,
    pub total: u64,
}

/// Lessons of one year split by operational bimester
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearBimesterRow {
    pub ano: i32,
    pub bim1: u64,
    pub bim2: u64,
    pub bim3: u64,
    pub bim4: u64,
}

impl YearBimesterRow {
    pub fn new(ano: i32) -> Self {
        Self {
            ano,
            ..Default::default()
        }
    }

    /// Adds one lesson to the given bimester; bimesters outside 1-4 are ignored
    pub fn count(&mut self, bimestre: i32) {
        match bimestre {
            1 => self.bim1 += 1,
            2 => self.bim2 += 1,
            3 => self.bim3 += 1,
            4 => self.bim4 += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.bim1 + self.bim2 + self.bim3 + self.bim4
    }
}

/// Yearly totals with the running sum up to that year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct YearEvolution {
    pub ano: i32,
    pub total: u64,
    pub acumulado: u64,
}
