//! In-process catalog store used by tests and local runs
//!
//! Mirrors the relational constraints of the Postgres schema closely enough
//! for the services to observe the same errors.

use super::{CatalogSnapshot, CatalogStore, DEFAULT_FETCH_LIMIT, StoreResult, dedup_ids};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use models::{
    catalog::{
        Collection, Course, CourseDiscipline, Designer, Discipline, Offering, Professor,
        VideoLesson,
    },
    forms::{CourseForm, NewDiscipline, NewOffering, NewVideoLesson, OfferingForm, PersonForm},
    import::{ImportHistory, NewImportHistory},
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    courses: BTreeMap<i32, Course>,
    disciplines: BTreeMap<i32, Discipline>,
    links: Vec<CourseDiscipline>,
    professors: BTreeMap<i32, Professor>,
    designers: BTreeMap<i32, Designer>,
    offerings: BTreeMap<i32, Offering>,
    video_lessons: BTreeMap<i32, VideoLesson>,
    history: BTreeMap<i32, ImportHistory>,
    sequences: HashMap<Collection, i32>,
}

impl Tables {
    fn next_id(&mut self, collection: Collection) -> i32 {
        let id = self.sequences.entry(collection).or_insert(0);
        *id += 1;
        *id
    }

    /// Moves a sequence past ids that were seeded directly
    fn bump(&mut self, collection: Collection, id: i32) {
        let current = self.sequences.entry(collection).or_insert(0);
        *current = (*current).max(id);
    }

    fn check_courses(&self, curso_ids: &[i32]) -> StoreResult<()> {
        match curso_ids.iter().find(|id| !self.courses.contains_key(*id)) {
            Some(id) => Err(StoreError::conflict(
                Collection::CourseDisciplines,
                format!("course {id} does not exist"),
            )),
            None => Ok(()),
        }
    }

    fn check_people(&self, professor_id: Option<i32>, di_id: Option<i32>) -> StoreResult<()> {
        if let Some(id) = professor_id
            && !self.professors.contains_key(&id)
        {
            return Err(StoreError::conflict(
                Collection::Offerings,
                format!("professor {id} does not exist"),
            ));
        }
        if let Some(id) = di_id
            && !self.designers.contains_key(&id)
        {
            return Err(StoreError::conflict(
                Collection::Offerings,
                format!("designer {id} does not exist"),
            ));
        }
        Ok(())
    }

    fn check_code_free(&self, codigo: &str, except: Option<i32>) -> StoreResult<()> {
        let taken = self
            .disciplines
            .values()
            .any(|d| d.codigo == codigo && Some(d.id) != except);
        if taken {
            return Err(StoreError::conflict(
                Collection::Disciplines,
                format!("duplicate key value: codigo ({codigo}) already exists"),
            ));
        }
        Ok(())
    }

    fn link(&mut self, disciplina_id: i32, curso_ids: &[i32]) {
        for curso_id in dedup_ids(curso_ids) {
            self.links.push(CourseDiscipline {
                curso_id,
                disciplina_id,
                ano_curso: None,
                bimestre_pedagogico: None,
            });
        }
    }
}

fn sorted_by_name<T: Clone>(rows: impl Iterator<Item = T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

fn name_matches(nome: &str, needle: &str) -> bool {
    nome.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn lesson_row(id: i32, lesson: &NewVideoLesson) -> VideoLesson {
    VideoLesson {
        id,
        oferta_disciplina_id: lesson.oferta_disciplina_id,
        semana: lesson.semana,
        numero_aula: lesson.numero_aula,
        titulo: lesson.titulo.clone(),
        sinopse: lesson.sinopse.clone(),
        link_youtube_original: lesson.link_youtube_original.clone(),
        slides_disponivel: lesson.slides_disponivel,
        status: lesson.status.clone(),
        id_tv_cultura: lesson.id_tv_cultura.clone(),
        duracao_minutos: lesson.duracao_minutos,
        link_libras: lesson.link_libras.clone(),
        link_audiodescricao: lesson.link_audiodescricao.clone(),
        cc_legenda: lesson.cc_legenda,
        link_download: lesson.link_download.clone(),
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: RwLock<HashSet<Collection>>,
    fetch_limit: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            failing: RwLock::new(HashSet::new()),
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// A store holding exactly the given rows, constraints unchecked
    ///
    /// Useful for legacy data such as offerings without a year or lessons
    /// pointing at offerings that no longer exist.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut tables = Tables::default();

        for row in snapshot.courses {
            tables.bump(Collection::Courses, row.id);
            tables.courses.insert(row.id, row);
        }
        for row in snapshot.disciplines {
            tables.bump(Collection::Disciplines, row.id);
            tables.disciplines.insert(row.id, row);
        }
        tables.links = snapshot.links;
        for row in snapshot.professors {
            tables.bump(Collection::Professors, row.id);
            tables.professors.insert(row.id, row);
        }
        for row in snapshot.designers {
            tables.bump(Collection::Designers, row.id);
            tables.designers.insert(row.id, row);
        }
        for row in snapshot.offerings {
            tables.bump(Collection::Offerings, row.id);
            tables.offerings.insert(row.id, row);
        }
        for row in snapshot.video_lessons {
            tables.bump(Collection::VideoLessons, row.id);
            tables.video_lessons.insert(row.id, row);
        }

        Self {
            tables: RwLock::new(tables),
            ..Self::new()
        }
    }

    pub fn with_fetch_limit(mut self, fetch_limit: u64) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Makes every later operation touching `collection` fail
    pub async fn fail_on(&self, collection: Collection) {
        self.failing.write().await.insert(collection);
    }

    pub async fn recover(&self, collection: Collection) {
        self.failing.write().await.remove(&collection);
    }

    async fn check(&self, collections: &[Collection]) -> StoreResult<()> {
        let failing = self.failing.read().await;
        match collections.iter().find(|c| failing.contains(*c)) {
            Some(collection) => Err(StoreError::remote(
                *collection,
                "connection reset by peer",
            )),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        self.check(&[Collection::Courses]).await?;
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.courses.values().cloned(), |c| &c.nome))
    }

    async fn get_course(&self, id: i32) -> StoreResult<Course> {
        self.check(&[Collection::Courses]).await?;
        let tables = self.tables.read().await;
        tables
            .courses
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::Courses, id))
    }

    async fn insert_course(&self, form: &CourseForm) -> StoreResult<Course> {
        self.check(&[Collection::Courses]).await?;
        let mut tables = self.tables.write().await;
        let course = Course {
            id: tables.next_id(Collection::Courses),
            eixo: form.eixo.clone(),
            nome: form.nome.clone(),
        };
        tables.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: i32, form: &CourseForm) -> StoreResult<Course> {
        self.check(&[Collection::Courses]).await?;
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Courses, id))?;
        course.eixo = form.eixo.clone();
        course.nome = form.nome.clone();
        Ok(course.clone())
    }

    async fn delete_course(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::CourseDisciplines, Collection::Courses])
            .await?;
        let mut tables = self.tables.write().await;
        if !tables.courses.contains_key(&id) {
            return Err(StoreError::not_found(Collection::Courses, id));
        }
        tables.links.retain(|link| link.curso_id != id);
        tables.courses.remove(&id);
        Ok(())
    }

    async fn list_disciplines(&self) -> StoreResult<Vec<Discipline>> {
        self.check(&[Collection::Disciplines]).await?;
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.disciplines.values().cloned(), |d| {
            &d.nome
        }))
    }

    async fn get_discipline(&self, id: i32) -> StoreResult<Discipline> {
        self.check(&[Collection::Disciplines]).await?;
        let tables = self.tables.read().await;
        tables
            .disciplines
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::Disciplines, id))
    }

    async fn find_discipline_by_code(&self, codigo: &str) -> StoreResult<Option<Discipline>> {
        self.check(&[Collection::Disciplines]).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .disciplines
            .values()
            .find(|d| d.codigo == codigo)
            .cloned())
    }

    async fn insert_discipline(
        &self,
        discipline: &NewDiscipline,
        curso_ids: &[i32],
    ) -> StoreResult<Discipline> {
        self.check(&[Collection::Disciplines, Collection::CourseDisciplines])
            .await?;
        let mut tables = self.tables.write().await;
        tables.check_code_free(&discipline.codigo, None)?;
        tables.check_courses(curso_ids)?;

        let row = Discipline {
            id: tables.next_id(Collection::Disciplines),
            codigo: discipline.codigo.clone(),
            nome: discipline.nome.clone(),
            carga_horaria: discipline.carga_horaria,
        };
        tables.disciplines.insert(row.id, row.clone());
        tables.link(row.id, curso_ids);
        Ok(row)
    }

    async fn update_discipline(
        &self,
        id: i32,
        discipline: &NewDiscipline,
        curso_ids: Option<&[i32]>,
    ) -> StoreResult<Discipline> {
        self.check(&[Collection::Disciplines, Collection::CourseDisciplines])
            .await?;
        let mut tables = self.tables.write().await;
        if !tables.disciplines.contains_key(&id) {
            return Err(StoreError::not_found(Collection::Disciplines, id));
        }
        tables.check_code_free(&discipline.codigo, Some(id))?;
        if let Some(curso_ids) = curso_ids {
            tables.check_courses(curso_ids)?;
        }

        let row = Discipline {
            id,
            codigo: discipline.codigo.clone(),
            nome: discipline.nome.clone(),
            carga_horaria: discipline.carga_horaria,
        };
        tables.disciplines.insert(id, row.clone());

        if let Some(curso_ids) = curso_ids {
            tables.links.retain(|link| link.disciplina_id != id);
            tables.link(id, curso_ids);
        }
        Ok(row)
    }

    async fn delete_discipline(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::CourseDisciplines, Collection::Disciplines])
            .await?;
        let mut tables = self.tables.write().await;
        if !tables.disciplines.contains_key(&id) {
            return Err(StoreError::not_found(Collection::Disciplines, id));
        }
        if tables.offerings.values().any(|o| o.disciplina_id == id) {
            return Err(StoreError::conflict(
                Collection::Disciplines,
                format!("discipline {id} is still referenced by offerings"),
            ));
        }
        tables.links.retain(|link| link.disciplina_id != id);
        tables.disciplines.remove(&id);
        Ok(())
    }

    async fn list_course_links(&self) -> StoreResult<Vec<CourseDiscipline>> {
        self.check(&[Collection::CourseDisciplines]).await?;
        let tables = self.tables.read().await;
        let mut links = tables.links.clone();
        links.sort_by_key(|link| (link.curso_id, link.disciplina_id));
        Ok(links)
    }

    async fn course_links_for_course(&self, curso_id: i32) -> StoreResult<Vec<CourseDiscipline>> {
        self.check(&[Collection::CourseDisciplines]).await?;
        let tables = self.tables.read().await;
        let mut links: Vec<_> = tables
            .links
            .iter()
            .filter(|link| link.curso_id == curso_id)
            .cloned()
            .collect();
        links.sort_by_key(|link| link.disciplina_id);
        Ok(links)
    }

    async fn list_professors(&self) -> StoreResult<Vec<Professor>> {
        self.check(&[Collection::Professors]).await?;
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.professors.values().cloned(), |p| {
            &p.nome
        }))
    }

    async fn get_professor(&self, id: i32) -> StoreResult<Professor> {
        self.check(&[Collection::Professors]).await?;
        let tables = self.tables.read().await;
        tables
            .professors
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::Professors, id))
    }

    async fn find_professors_by_name(&self, nome: &str) -> StoreResult<Vec<Professor>> {
        self.check(&[Collection::Professors]).await?;
        let tables = self.tables.read().await;
        let matches = tables
            .professors
            .values()
            .filter(|p| name_matches(&p.nome, nome))
            .cloned();
        Ok(sorted_by_name(matches, |p| &p.nome))
    }

    async fn insert_professor(&self, form: &PersonForm) -> StoreResult<Professor> {
        self.check(&[Collection::Professors]).await?;
        let mut tables = self.tables.write().await;
        let row = Professor {
            id: tables.next_id(Collection::Professors),
            nome: form.nome.clone(),
        };
        tables.professors.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_professor(&self, id: i32, form: &PersonForm) -> StoreResult<Professor> {
        self.check(&[Collection::Professors]).await?;
        let mut tables = self.tables.write().await;
        let row = tables
            .professors
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Professors, id))?;
        row.nome = form.nome.clone();
        Ok(row.clone())
    }

    async fn delete_professor(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::Professors]).await?;
        let mut tables = self.tables.write().await;
        if tables.professors.remove(&id).is_none() {
            return Err(StoreError::not_found(Collection::Professors, id));
        }
        for offering in tables.offerings.values_mut() {
            if offering.professor_id == Some(id) {
                offering.professor_id = None;
            }
        }
        Ok(())
    }

    async fn list_designers(&self) -> StoreResult<Vec<Designer>> {
        self.check(&[Collection::Designers]).await?;
        let tables = self.tables.read().await;
        Ok(sorted_by_name(tables.designers.values().cloned(), |d| &d.nome))
    }

    async fn get_designer(&self, id: i32) -> StoreResult<Designer> {
        self.check(&[Collection::Designers]).await?;
        let tables = self.tables.read().await;
        tables
            .designers
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::Designers, id))
    }

    async fn find_designers_by_name(&self, nome: &str) -> StoreResult<Vec<Designer>> {
        self.check(&[Collection::Designers]).await?;
        let tables = self.tables.read().await;
        let matches = tables
            .designers
            .values()
            .filter(|d| name_matches(&d.nome, nome))
            .cloned();
        Ok(sorted_by_name(matches, |d| &d.nome))
    }

    async fn insert_designer(&self, form: &PersonForm) -> StoreResult<Designer> {
        self.check(&[Collection::Designers]).await?;
        let mut tables = self.tables.write().await;
        let row = Designer {
            id: tables.next_id(Collection::Designers),
            nome: form.nome.clone(),
        };
        tables.designers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_designer(&self, id: i32, form: &PersonForm) -> StoreResult<Designer> {
        self.check(&[Collection::Designers]).await?;
        let mut tables = self.tables.write().await;
        let row = tables
            .designers
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Designers, id))?;
        row.nome = form.nome.clone();
        Ok(row.clone())
    }

    async fn delete_designer(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::Designers]).await?;
        let mut tables = self.tables.write().await;
        if tables.designers.remove(&id).is_none() {
            return Err(StoreError::not_found(Collection::Designers, id));
        }
        for offering in tables.offerings.values_mut() {
            if offering.di_id == Some(id) {
                offering.di_id = None;
            }
        }
        Ok(())
    }

    async fn list_offerings(&self) -> StoreResult<Vec<Offering>> {
        self.check(&[Collection::Offerings]).await?;
        let tables = self.tables.read().await;
        Ok(tables.offerings.values().cloned().collect())
    }

    async fn get_offering(&self, id: i32) -> StoreResult<Offering> {
        self.check(&[Collection::Offerings]).await?;
        let tables = self.tables.read().await;
        tables
            .offerings
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::Offerings, id))
    }

    async fn find_offering(
        &self,
        disciplina_id: i32,
        ano: i32,
        bimestre_operacional: i32,
    ) -> StoreResult<Option<Offering>> {
        self.check(&[Collection::Offerings]).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .offerings
            .values()
            .find(|o| {
                o.disciplina_id == disciplina_id
                    && o.ano == Some(ano)
                    && o.bimestre_operacional == Some(bimestre_operacional)
            })
            .cloned())
    }

    async fn insert_offering(&self, offering: &NewOffering) -> StoreResult<Offering> {
        self.check(&[Collection::Offerings]).await?;
        let mut tables = self.tables.write().await;
        if !tables.disciplines.contains_key(&offering.disciplina_id) {
            return Err(StoreError::conflict(
                Collection::Offerings,
                format!("discipline {} does not exist", offering.disciplina_id),
            ));
        }
        tables.check_people(offering.professor_id, offering.di_id)?;

        let duplicate = tables.offerings.values().any(|o| {
            o.disciplina_id == offering.disciplina_id
                && o.ano == Some(offering.ano)
                && o.bimestre_operacional == Some(offering.bimestre_operacional)
        });
        if duplicate {
            return Err(StoreError::conflict(
                Collection::Offerings,
                "duplicate key value: offering already exists",
            ));
        }

        let row = Offering {
            id: tables.next_id(Collection::Offerings),
            disciplina_id: offering.disciplina_id,
            ano: Some(offering.ano),
            bimestre_operacional: Some(offering.bimestre_operacional),
            professor_id: offering.professor_id,
            di_id: offering.di_id,
            tipo: offering.tipo.clone(),
        };
        tables.offerings.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_offering(&self, id: i32, form: &OfferingForm) -> StoreResult<Offering> {
        self.check(&[Collection::Offerings]).await?;
        let mut tables = self.tables.write().await;
        if !tables.offerings.contains_key(&id) {
            return Err(StoreError::not_found(Collection::Offerings, id));
        }
        tables.check_people(form.professor_id, form.di_id)?;

        let row = tables
            .offerings
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Offerings, id))?;
        row.professor_id = form.professor_id;
        row.di_id = form.di_id;
        if let Some(tipo) = &form.tipo {
            row.tipo = tipo.clone();
        }
        Ok(row.clone())
    }

    async fn delete_offering(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::Offerings]).await?;
        let mut tables = self.tables.write().await;
        if !tables.offerings.contains_key(&id) {
            return Err(StoreError::not_found(Collection::Offerings, id));
        }
        if tables
            .video_lessons
            .values()
            .any(|v| v.oferta_disciplina_id == id)
        {
            return Err(StoreError::conflict(
                Collection::Offerings,
                format!("offering {id} is still referenced by video lessons"),
            ));
        }
        tables.offerings.remove(&id);
        Ok(())
    }

    async fn list_video_lessons(&self) -> StoreResult<Vec<VideoLesson>> {
        self.check(&[Collection::VideoLessons]).await?;
        let tables = self.tables.read().await;
        let limit = usize::try_from(self.fetch_limit).unwrap_or(usize::MAX);
        Ok(tables
            .video_lessons
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_video_lesson(&self, id: i32) -> StoreResult<VideoLesson> {
        self.check(&[Collection::VideoLessons]).await?;
        let tables = self.tables.read().await;
        tables
            .video_lessons
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Collection::VideoLessons, id))
    }

    async fn insert_video_lesson(&self, lesson: &NewVideoLesson) -> StoreResult<VideoLesson> {
        self.check(&[Collection::VideoLessons]).await?;
        let mut tables = self.tables.write().await;
        if !tables.offerings.contains_key(&lesson.oferta_disciplina_id) {
            return Err(StoreError::conflict(
                Collection::VideoLessons,
                format!("offering {} does not exist", lesson.oferta_disciplina_id),
            ));
        }
        let row = lesson_row(tables.next_id(Collection::VideoLessons), lesson);
        tables.video_lessons.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_video_lesson(
        &self,
        id: i32,
        lesson: &NewVideoLesson,
    ) -> StoreResult<VideoLesson> {
        self.check(&[Collection::VideoLessons]).await?;
        let mut tables = self.tables.write().await;
        if !tables.video_lessons.contains_key(&id) {
            return Err(StoreError::not_found(Collection::VideoLessons, id));
        }
        if !tables.offerings.contains_key(&lesson.oferta_disciplina_id) {
            return Err(StoreError::conflict(
                Collection::VideoLessons,
                format!("offering {} does not exist", lesson.oferta_disciplina_id),
            ));
        }
        let row = lesson_row(id, lesson);
        tables.video_lessons.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_video_lesson(&self, id: i32) -> StoreResult<()> {
        self.check(&[Collection::VideoLessons]).await?;
        let mut tables = self.tables.write().await;
        match tables.video_lessons.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(Collection::VideoLessons, id)),
        }
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        self.check(&[collection]).await?;
        let tables = self.tables.read().await;
        let count = match collection {
            Collection::Courses => tables.courses.len(),
            Collection::Disciplines => tables.disciplines.len(),
            Collection::CourseDisciplines => tables.links.len(),
            Collection::Professors => tables.professors.len(),
            Collection::Designers => tables.designers.len(),
            Collection::Offerings => tables.offerings.len(),
            Collection::VideoLessons => tables.video_lessons.len(),
            Collection::ImportHistory => tables.history.len(),
        };
        Ok(count as u64)
    }

    async fn insert_import_history(
        &self,
        history: &NewImportHistory,
    ) -> StoreResult<ImportHistory> {
        self.check(&[Collection::ImportHistory]).await?;
        let mut tables = self.tables.write().await;
        let row = ImportHistory {
            id: tables.next_id(Collection::ImportHistory),
            tipo: history.tipo.to_string(),
            nome_arquivo: history.nome_arquivo.clone(),
            total_linhas: i32::try_from(history.summary.total_linhas).unwrap_or(i32::MAX),
            sucessos: i32::try_from(history.summary.sucessos).unwrap_or(i32::MAX),
            erros: i32::try_from(history.summary.erros).unwrap_or(i32::MAX),
            criado_em: Utc::now(),
        };
        tables.history.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_import_history(&self) -> StoreResult<Vec<ImportHistory>> {
        self.check(&[Collection::ImportHistory]).await?;
        let tables = self.tables.read().await;
        Ok(tables.history.values().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(nome: &str) -> PersonForm {
        PersonForm {
            nome: nome.to_string(),
        }
    }

    fn course(nome: &str) -> CourseForm {
        CourseForm {
            eixo: "Informação e Comunicação".to_string(),
            nome: nome.to_string(),
        }
    }

    fn discipline(codigo: &str) -> NewDiscipline {
        NewDiscipline {
            codigo: codigo.to_string(),
            nome: format!("Disciplina {codigo}"),
            carga_horaria: 40,
        }
    }

    #[tokio::test]
    async fn test_courses_are_listed_by_name() {
        let store = MemoryStore::new();
        store.insert_course(&course("Redes")).await.unwrap();
        store.insert_course(&course("Administração")).await.unwrap();

        let names: Vec<_> = store
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.nome)
            .collect();
        assert_eq!(names, vec!["Administração", "Redes"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_a_conflict() {
        let store = MemoryStore::new();
        store.insert_discipline(&discipline("MAT001"), &[]).await.unwrap();

        let err = store
            .insert_discipline(&discipline("MAT001"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.count(Collection::Disciplines).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_course_link_writes_nothing() {
        let store = MemoryStore::new();
        let c = store.insert_course(&course("Redes")).await.unwrap();

        let err = store
            .insert_discipline(&discipline("FIS001"), &[c.id, 99])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.count(Collection::Disciplines).await.unwrap(), 0);
        assert_eq!(store.count(Collection::CourseDisciplines).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_a_course_removes_its_links() {
        let store = MemoryStore::new();
        let a = store.insert_course(&course("A")).await.unwrap();
        let b = store.insert_course(&course("B")).await.unwrap();
        store
            .insert_discipline(&discipline("D1"), &[a.id, b.id, a.id])
            .await
            .unwrap();
        assert_eq!(store.count(Collection::CourseDisciplines).await.unwrap(), 2);

        store.delete_course(a.id).await.unwrap();
        let links = store.list_course_links().await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].curso_id, b.id);

        let err = store.delete_course(a.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive() {
        let store = MemoryStore::new();
        store.insert_professor(&person("Ana Souza")).await.unwrap();
        store.insert_professor(&person("Bruno Lima")).await.unwrap();
        store.insert_professor(&person("Mariana Alves")).await.unwrap();

        let found = store.find_professors_by_name("ANA").await.unwrap();
        let names: Vec<_> = found.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(names, vec!["Ana Souza", "Mariana Alves"]);
    }

    #[tokio::test]
    async fn test_name_filter_treats_wildcards_literally() {
        let store = MemoryStore::new();
        store.insert_professor(&person("Ana Souza")).await.unwrap();
        store.insert_professor(&person("Equipe_EAD")).await.unwrap();

        let found = store.find_professors_by_name("_").await.unwrap();
        let names: Vec<_> = found.iter().map(|p| p.nome.as_str()).collect();
        assert_eq!(names, vec!["Equipe_EAD"]);
        assert!(store.find_professors_by_name("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_video_lessons_newest_first_and_bounded() {
        let store = MemoryStore::new().with_fetch_limit(2);
        let d = store.insert_discipline(&discipline("D1"), &[]).await.unwrap();
        let o = store
            .insert_offering(&NewOffering {
                disciplina_id: d.id,
                ano: 2024,
                bimestre_operacional: 1,
                professor_id: None,
                di_id: None,
                tipo: Offering::DEFAULT_TYPE.to_string(),
            })
            .await
            .unwrap();

        for titulo in ["um", "dois", "três"] {
            let lesson = NewVideoLesson {
                oferta_disciplina_id: o.id,
                semana: None,
                numero_aula: None,
                titulo: titulo.to_string(),
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
            };
            store.insert_video_lesson(&lesson).await.unwrap();
        }

        let titles: Vec<_> = store
            .list_video_lessons()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.titulo)
            .collect();
        assert_eq!(titles, vec!["três", "dois"]);
    }

    #[tokio::test]
    async fn test_injected_failure_names_collection() {
        let store = MemoryStore::new();
        store.fail_on(Collection::Professors).await;

        let err = store.list_professors().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Remote {
                collection: Collection::Professors,
                ..
            }
        ));
        assert!(store.list_courses().await.is_ok());

        store.recover(Collection::Professors).await;
        assert!(store.list_professors().await.is_ok());
    }

    #[tokio::test]
    async fn test_deleting_professor_clears_offering_reference() {
        let store = MemoryStore::new();
        let p = store.insert_professor(&person("Ana")).await.unwrap();
        let d = store.insert_discipline(&discipline("D1"), &[]).await.unwrap();
        let o = store
            .insert_offering(&NewOffering {
                disciplina_id: d.id,
                ano: 2024,
                bimestre_operacional: 2,
                professor_id: Some(p.id),
                di_id: None,
                tipo: Offering::DEFAULT_TYPE.to_string(),
            })
            .await
            .unwrap();

        store.delete_professor(p.id).await.unwrap();
        assert_eq!(store.get_offering(o.id).await.unwrap().professor_id, None);
    }
}
