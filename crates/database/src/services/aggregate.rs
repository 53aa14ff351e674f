//! Joins and folds over a catalog snapshot
//!
//! Everything here is synchronous and works on rows that were already
//! fetched. References that cannot be resolved are treated as absent.

use crate::store::CatalogSnapshot;
use models::{
    catalog::{Course, Designer, Discipline, Offering, Professor, VideoLesson},
    stats::{
        AccessibilityCoverage, BimesterTotal, CourseLessonStats, YearBimesterRow, YearEvolution,
        YearTotal,
    },
    views::{DisciplineWithCourses, VideoLessonDetails, VideoLessonFilter},
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-request id lookups over a snapshot
pub struct CatalogIndex<'a> {
    courses: HashMap<i32, &'a Course>,
    disciplines: HashMap<i32, &'a Discipline>,
    professors: HashMap<i32, &'a Professor>,
    designers: HashMap<i32, &'a Designer>,
    offerings: HashMap<i32, &'a Offering>,
    /// Discipline id to the ids of the courses it is linked to
    course_ids: HashMap<i32, BTreeSet<i32>>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(snapshot: &'a CatalogSnapshot) -> Self {
        let mut course_ids: HashMap<i32, BTreeSet<i32>> = HashMap::new();
        for link in &snapshot.links {
            course_ids
                .entry(link.disciplina_id)
                .or_default()
                .insert(link.curso_id);
        }

        Self {
            courses: snapshot.courses.iter().map(|c| (c.id, c)).collect(),
            disciplines: snapshot.disciplines.iter().map(|d| (d.id, d)).collect(),
            professors: snapshot.professors.iter().map(|p| (p.id, p)).collect(),
            designers: snapshot.designers.iter().map(|d| (d.id, d)).collect(),
            offerings: snapshot.offerings.iter().map(|o| (o.id, o)).collect(),
            course_ids,
        }
    }

    pub fn offering(&self, lesson: &VideoLesson) -> Option<&'a Offering> {
        self.offerings.get(&lesson.oferta_disciplina_id).copied()
    }

    pub fn discipline(&self, lesson: &VideoLesson) -> Option<&'a Discipline> {
        self.offering(lesson)
            .and_then(|o| self.disciplines.get(&o.disciplina_id).copied())
    }

    /// Ids of the courses a discipline is linked to, each at most once
    pub fn course_ids_of(&self, disciplina_id: i32) -> impl Iterator<Item = i32> + '_ {
        self.course_ids
            .get(&disciplina_id)
            .into_iter()
            .flatten()
            .copied()
    }

    /// Linked courses that still exist, in name order
    pub fn courses_of(&self, disciplina_id: i32) -> Vec<Course> {
        let mut courses: Vec<Course> = self
            .course_ids_of(disciplina_id)
            .filter_map(|id| self.courses.get(&id).map(|c| (*c).clone()))
            .collect();
        courses.sort_by(|a, b| a.nome.cmp(&b.nome));
        courses
    }

    pub fn details(&self, lesson: &VideoLesson) -> VideoLessonDetails {
        let oferta = self.offering(lesson);
        let disciplina = oferta.and_then(|o| self.disciplines.get(&o.disciplina_id));
        let professor = oferta
            .and_then(|o| o.professor_id)
            .and_then(|id| self.professors.get(&id));
        let di = oferta
            .and_then(|o| o.di_id)
            .and_then(|id| self.designers.get(&id));

        VideoLessonDetails {
            videoaula: lesson.clone(),
            oferta: oferta.cloned(),
            disciplina: disciplina.map(|d| (*d).clone()),
            professor: professor.map(|p| (*p).clone()),
            di: di.map(|d| (*d).clone()),
        }
    }

    /// Whether a lesson passes every filter that is set
    pub fn matches(&self, lesson: &VideoLesson, filter: &VideoLessonFilter) -> bool {
        let offering = self.offering(lesson);

        if let Some(ano) = filter.ano
            && offering.and_then(|o| o.ano) != Some(ano)
        {
            return false;
        }
        if let Some(bimestre) = filter.bimestre
            && offering.and_then(|o| o.bimestre_operacional) != Some(bimestre)
        {
            return false;
        }
        if let Some(disciplina_id) = filter.disciplina_id
            && offering.map(|o| o.disciplina_id) != Some(disciplina_id)
        {
            return false;
        }
        if let Some(curso_id) = filter.curso_id {
            let linked = self
                .discipline(lesson)
                .is_some_and(|d| self.course_ids_of(d.id).any(|id| id == curso_id));
            if !linked {
                return false;
            }
        }
        if let Some(busca) = filter.busca.as_deref().map(str::trim)
            && !busca.is_empty()
            && !lesson
                .titulo
                .to_lowercase()
                .contains(&busca.to_lowercase())
        {
            return false;
        }

        true
    }
}

/// Joined view of every lesson, in the snapshot's order
pub fn lesson_details(snapshot: &CatalogSnapshot) -> Vec<VideoLessonDetails> {
    let index = CatalogIndex::new(snapshot);
    snapshot
        .video_lessons
        .iter()
        .map(|v| index.details(v))
        .collect()
}

/// Joined view of the lessons passing `filter`
pub fn filter_lessons(
    snapshot: &CatalogSnapshot,
    filter: &VideoLessonFilter,
) -> Vec<VideoLessonDetails> {
    let index = CatalogIndex::new(snapshot);
    snapshot
        .video_lessons
        .iter()
        .filter(|v| index.matches(v, filter))
        .map(|v| index.details(v))
        .collect()
}

pub fn disciplines_with_courses(snapshot: &CatalogSnapshot) -> Vec<DisciplineWithCourses> {
    let index = CatalogIndex::new(snapshot);
    snapshot
        .disciplines
        .iter()
        .map(|d| DisciplineWithCourses {
            disciplina: d.clone(),
            cursos: index.courses_of(d.id),
        })
        .collect()
}

pub fn accessibility(lessons: &[VideoLesson]) -> AccessibilityCoverage {
    lessons
        .iter()
        .fold(AccessibilityCoverage::default(), |mut acc, v| {
            acc.total += 1;
            acc.com_libras += u64::from(v.has_libras());
            acc.com_audiodescricao += u64::from(v.has_audio_description());
            acc.com_cc += u64::from(v.has_captions());
            acc.sem_acessibilidade += u64::from(!v.has_accessibility());
            acc
        })
}

/// Lesson counts per course, in course name order, skipping empty courses
pub fn per_course(snapshot: &CatalogSnapshot) -> Vec<CourseLessonStats> {
    let index = CatalogIndex::new(snapshot);

    let mut counts: HashMap<i32, CourseLessonStats> = HashMap::new();
    for lesson in &snapshot.video_lessons {
        let Some(discipline) = index.discipline(lesson) else {
            continue;
        };

        for curso_id in index.course_ids_of(discipline.id) {
            let Some(course) = index.courses.get(&curso_id) else {
                continue;
            };
            let stats = counts.entry(curso_id).or_insert_with(|| CourseLessonStats {
                curso: (*course).clone(),
                total: 0,
                com_libras: 0,
                com_audiodescricao: 0,
                com_cc: 0,
            });
            stats.total += 1;
            stats.com_libras += u64::from(lesson.has_libras());
            stats.com_audiodescricao += u64::from(lesson.has_audio_description());
            stats.com_cc += u64::from(lesson.has_captions());
        }
    }

    let mut rows: Vec<CourseLessonStats> = counts.into_values().collect();
    rows.sort_by(|a, b| {
        a.curso
            .nome
            .cmp(&b.curso.nome)
            .then(a.curso.id.cmp(&b.curso.id))
    });
    rows
}

/// Lessons per offering year, ascending
pub fn per_year(snapshot: &CatalogSnapshot) -> Vec<YearTotal> {
    let index = CatalogIndex::new(snapshot);

    let mut years: BTreeMap<i32, u64> = BTreeMap::new();
    for lesson in &snapshot.video_lessons {
        if let Some(ano) = index.offering(lesson).and_then(Offering::year) {
            *years.entry(ano).or_default() += 1;
        }
    }

    years
        .into_iter()
        .map(|(ano, total)| YearTotal { ano, total })
        .collect()
}

/// Lessons per operational bimester across all years, ascending
pub fn per_bimester(snapshot: &CatalogSnapshot) -> Vec<BimesterTotal> {
    let index = CatalogIndex::new(snapshot);

    let mut bimesters: BTreeMap<i32, u64> = BTreeMap::new();
    for lesson in &snapshot.video_lessons {
        if let Some(bimestre) = index
            .offering(lesson)
            .and_then(Offering::bimester)
            .filter(|b| (1..=4).contains(b))
        {
            *bimesters.entry(bimestre).or_default() += 1;
        }
    }

    bimesters
        .into_iter()
        .map(|(bimestre, total)| BimesterTotal { bimestre, total })
        .collect()
}

/// Lessons per year split into the four bimesters, ascending by year
pub fn per_year_bimester(snapshot: &CatalogSnapshot) -> Vec<YearBimesterRow> {
    let index = CatalogIndex::new(snapshot);

    let mut rows: BTreeMap<i32, YearBimesterRow> = BTreeMap::new();
    for lesson in &snapshot.video_lessons {
        let Some(offering) = index.offering(lesson) else {
            continue;
        };
        if let (Some(ano), Some(bimestre)) = (offering.year(), offering.bimester()) {
            rows.entry(ano)
                .or_insert_with(|| YearBimesterRow::new(ano))
                .count(bimestre);
        }
    }

    rows.into_values().collect()
}

/// Running totals over the yearly counts
pub fn evolution(years: &[YearTotal]) -> Vec<YearEvolution> {
    years
        .iter()
        .scan(0u64, |acumulado, year| {
            *acumulado += year.total;
            Some(YearEvolution {
                ano: year.ano,
                total: year.total,
                acumulado: *acumulado,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use models::catalog::CourseDiscipline;

    pub(crate) fn course(id: i32, nome: &str) -> Course {
        Course {
            id,
            eixo: "Gestão e Negócios".to_string(),
            nome: nome.to_string(),
        }
    }

    pub(crate) fn discipline(id: i32, codigo: &str) -> Discipline {
        Discipline {
            id,
            codigo: codigo.to_string(),
            nome: format!("Disciplina {codigo}"),
            carga_horaria: 40,
        }
    }

    pub(crate) fn link(curso_id: i32, disciplina_id: i32) -> CourseDiscipline {
        CourseDiscipline {
            curso_id,
            disciplina_id,
            ano_curso: None,
            bimestre_pedagogico: None,
        }
    }

    pub(crate) fn offering(id: i32, disciplina_id: i32, ano: i32, bimestre: i32) -> Offering {
        Offering {
            id,
            disciplina_id,
            ano: Some(ano),
            bimestre_operacional: Some(bimestre),
            professor_id: None,
            di_id: None,
            tipo: Offering::DEFAULT_TYPE.to_string(),
        }
    }

    pub(crate) fn lesson(id: i32, oferta_disciplina_id: i32) -> VideoLesson {
        VideoLesson {
            id,
            oferta_disciplina_id,
            semana: None,
            numero_aula: Some(id),
            titulo: format!("Aula {id}"),
            sinopse: None,
            link_youtube_original: None,
            slides_disponivel: false,
            status: None,
            id_tv_cultura: None,
            duracao_minutos: None,
            link_libras: None,
            link_audiodescricao: None,
            cc_legenda: false,
            link_download: None,
        }
    }

    /// Three courses, one discipline linked to two of them and one linked to
    /// none, one 2024 offering each in bimesters 1 and 2, lessons split 3/2
    pub(crate) fn scenario() -> CatalogSnapshot {
        CatalogSnapshot {
            courses: vec![
                course(1, "Administração"),
                course(2, "Logística"),
                course(3, "Marketing"),
            ],
            disciplines: vec![discipline(10, "ADM001"), discipline(20, "GER001")],
            links: vec![link(1, 10), link(2, 10)],
            offerings: vec![offering(100, 10, 2024, 1), offering(200, 20, 2024, 2)],
            video_lessons: vec![
                lesson(1, 100),
                lesson(2, 100),
                lesson(3, 100),
                lesson(4, 200),
                lesson(5, 200),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_per_course() {
        let rows = per_course(&scenario());
        let summary: Vec<_> = rows.iter().map(|r| (r.curso.id, r.total)).collect();
        assert_eq!(summary, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn test_per_course_accessibility_counts() {
        let mut snapshot = scenario();
        snapshot.links.push(link(1, 20));
        let lessons = &mut snapshot.video_lessons;
        lessons[0].link_libras = Some("https://libras/1".to_string());
        lessons[1].link_libras = Some("https://libras/2".to_string());
        lessons[1].cc_legenda = true;
        lessons[2].link_audiodescricao = Some("https://ad/3".to_string());
        lessons[3].link_libras = Some("https://libras/4".to_string());

        let rows = per_course(&snapshot);
        let counts: Vec<_> = rows
            .iter()
            .map(|r| {
                (
                    r.curso.id,
                    r.total,
                    r.com_libras,
                    r.com_audiodescricao,
                    r.com_cc,
                )
            })
            .collect();
        // lessons 1-3 count for both courses, lessons 4-5 only for course 1
        assert_eq!(counts, vec![(1, 5, 3, 1, 1), (2, 3, 2, 1, 1)]);
    }

    #[test]
    fn test_scenario_per_year_and_bimester() {
        let snapshot = scenario();
        assert_eq!(per_year(&snapshot), vec![YearTotal { ano: 2024, total: 5 }]);
        assert_eq!(
            per_year_bimester(&snapshot),
            vec![YearBimesterRow {
                ano: 2024,
                bim1: 3,
                bim2: 2,
                bim3: 0,
                bim4: 0,
            }]
        );
        assert_eq!(
            per_bimester(&snapshot),
            vec![
                BimesterTotal {
                    bimestre: 1,
                    total: 3
                },
                BimesterTotal {
                    bimestre: 2,
                    total: 2
                },
            ]
        );
    }

    #[test]
    fn test_single_course_link_sums_to_all_lessons() {
        let mut snapshot = scenario();
        snapshot.links = vec![link(1, 10), link(1, 20)];

        let rows = per_course(&snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].curso.nome, "Administração");
        assert_eq!(rows[0].total, 5);

        let sum: u64 = rows.iter().map(|r| r.total).sum();
        assert_eq!(sum, snapshot.video_lessons.len() as u64);
    }

    #[test]
    fn test_duplicated_links_count_once() {
        let mut snapshot = scenario();
        snapshot.links.push(link(1, 10));

        let rows = per_course(&snapshot);
        assert_eq!(rows[0].total, 3);
    }

    #[test]
    fn test_accessibility_counts_are_independent() {
        let mut a = lesson(1, 100);
        a.link_libras = Some("https://example.org/a".to_string());
        let mut b = lesson(2, 100);
        b.link_libras = Some("https://example.org/b".to_string());
        b.cc_legenda = true;
        let c = lesson(3, 100);
        let mut d = lesson(4, 100);
        d.link_audiodescricao = Some("https://example.org/d".to_string());

        let coverage = accessibility(&[a, b, c, d]);
        assert_eq!(
            coverage,
            AccessibilityCoverage {
                com_libras: 2,
                com_audiodescricao: 1,
                com_cc: 1,
                sem_acessibilidade: 1,
                total: 4,
            }
        );
    }

    #[test]
    fn test_unresolved_offering_only_appears_in_listing() {
        let mut snapshot = scenario();
        snapshot.video_lessons.push(lesson(6, 999));

        assert_eq!(per_year(&snapshot)[0].total, 5);
        assert_eq!(per_year_bimester(&snapshot)[0].total(), 5);

        let details = lesson_details(&snapshot);
        assert_eq!(details.len(), 6);
        let orphan = &details[5];
        assert!(orphan.oferta.is_none());
        assert!(orphan.disciplina.is_none());
    }

    #[test]
    fn test_legacy_offerings_are_excluded_from_time_buckets() {
        let mut snapshot = scenario();
        snapshot.offerings.push(Offering {
            ano: None,
            ..offering(300, 10, 0, 3)
        });
        snapshot.offerings.push(offering(400, 10, 2023, 0));
        snapshot.offerings.push(offering(500, 10, 2025, 6));
        snapshot.video_lessons.push(lesson(6, 300));
        snapshot.video_lessons.push(lesson(7, 400));
        snapshot.video_lessons.push(lesson(8, 500));

        let years: Vec<_> = per_year(&snapshot).iter().map(|y| y.ano).collect();
        assert_eq!(years, vec![2023, 2024, 2025]);

        let rows = per_year_bimester(&snapshot);
        let row_years: Vec<_> = rows.iter().map(|r| r.ano).collect();
        assert_eq!(row_years, vec![2024, 2025]);
        assert_eq!(rows[1].total(), 0);

        let bimesters: Vec<_> = per_bimester(&snapshot).iter().map(|b| b.bimestre).collect();
        assert_eq!(bimesters, vec![1, 2]);

        // Still counted for the course, since the discipline resolves
        assert_eq!(per_course(&snapshot)[0].total, 6);
    }

    #[test]
    fn test_details_resolve_people() {
        let mut snapshot = scenario();
        snapshot.professors = vec![Professor {
            id: 7,
            nome: "Ana".to_string(),
        }];
        snapshot.offerings[0].professor_id = Some(7);
        snapshot.offerings[0].di_id = Some(8);

        let details = lesson_details(&snapshot);
        assert_eq!(details[0].professor.as_ref().map(|p| p.id), Some(7));
        assert!(details[0].di.is_none());
        assert!(details[3].professor.is_none());
    }

    #[test]
    fn test_filters() {
        let snapshot = scenario();
        let ids = |filter: VideoLessonFilter| -> Vec<i32> {
            filter_lessons(&snapshot, &filter)
                .iter()
                .map(|d| d.videoaula.id)
                .collect()
        };

        assert_eq!(ids(VideoLessonFilter::default()), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            ids(VideoLessonFilter {
                bimestre: Some(2),
                ..Default::default()
            }),
            vec![4, 5]
        );
        assert_eq!(
            ids(VideoLessonFilter {
                curso_id: Some(2),
                ..Default::default()
            }),
            vec![1, 2, 3]
        );
        assert!(
            ids(VideoLessonFilter {
                curso_id: Some(3),
                ..Default::default()
            })
            .is_empty()
        );
        assert_eq!(
            ids(VideoLessonFilter {
                busca: Some("aula 4".to_string()),
                ano: Some(2024),
                ..Default::default()
            }),
            vec![4]
        );
    }

    #[test]
    fn test_disciplines_with_courses() {
        let views = disciplines_with_courses(&scenario());
        assert_eq!(views.len(), 2);
        let names: Vec<_> = views[0].cursos.iter().map(|c| c.nome.as_str()).collect();
        assert_eq!(names, vec!["Administração", "Logística"]);
        assert!(views[1].cursos.is_empty());
    }

    #[test]
    fn test_evolution_accumulates() {
        let years = vec![
            YearTotal {
                ano: 2022,
                total: 4,
            },
            YearTotal {
                ano: 2023,
                total: 0,
            },
            YearTotal {
                ano: 2024,
                total: 6,
            },
        ];
        let acumulado: Vec<_> = evolution(&years).iter().map(|e| e.acumulado).collect();
        assert_eq!(acumulado, vec![4, 4, 10]);
    }
}
