use super::{CatalogStore, DEFAULT_FETCH_LIMIT, StoreResult, dedup_ids};
use crate::{
    entities::{
        course_disciplines, courses, designers, disciplines, import_history, offerings,
        professors, video_lessons,
    },
    error::StoreError,
};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use models::{
    catalog::{
        Collection, Course, CourseDiscipline, Designer, Discipline, Offering, Professor,
        VideoLesson,
    },
    forms::{CourseForm, NewDiscipline, NewOffering, NewVideoLesson, OfferingForm, PersonForm},
    import::{ImportHistory, NewImportHistory},
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};

/// Maps a sea-orm error onto the store error of the given collection
fn store_err(collection: Collection) -> impl Fn(DbErr) -> StoreError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message))
        | Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            StoreError::conflict(collection, message)
        }
        _ => match err {
            DbErr::RecordNotFound(message) => StoreError::not_found(collection, message),
            other => StoreError::remote(collection, other.to_string()),
        },
    }
}

/// Like [`store_err`], but an update that touched no row means the id is unknown
fn update_err(collection: Collection, id: i32) -> impl Fn(DbErr) -> StoreError {
    move |err| match err {
        DbErr::RecordNotUpdated => StoreError::not_found(collection, id),
        other => store_err(collection)(other),
    }
}

/// Lowercased `%needle%` pattern for case-insensitive name filters
///
/// `%`, `_` and `\` in the needle are escaped so they match literally.
fn name_pattern(nome: &str) -> String {
    let mut pattern = String::from("%");
    for ch in nome.trim().to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn name_like(nome: &str) -> LikeExpr {
    LikeExpr::new(name_pattern(nome)).escape('\\')
}

/// Catalog store backed by Postgres through sea-orm
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    fetch_limit: u64,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    pub fn with_fetch_limit(mut self, fetch_limit: u64) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    async fn insert_links<C: ConnectionTrait>(
        conn: &C,
        disciplina_id: i32,
        curso_ids: &[i32],
    ) -> StoreResult<()> {
        let links = dedup_ids(curso_ids)
            .into_iter()
            .map(|curso_id| course_disciplines::ActiveModel {
                curso_id: Set(curso_id),
                disciplina_id: Set(disciplina_id),
                ano_curso: Set(None),
                bimestre_pedagogico: Set(None),
            })
            .collect::<Vec<_>>();

        if links.is_empty() {
            return Ok(());
        }

        course_disciplines::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await
            .map_err(store_err(Collection::CourseDisciplines))?;
        Ok(())
    }
}

fn lesson_model(lesson: &NewVideoLesson) -> video_lessons::ActiveModel {
    video_lessons::ActiveModel {
        id: NotSet,
        oferta_disciplina_id: Set(lesson.oferta_disciplina_id),
        semana: Set(lesson.semana),
        numero_aula: Set(lesson.numero_aula),
        titulo: Set(lesson.titulo.clone()),
        sinopse: Set(lesson.sinopse.clone()),
        link_youtube_original: Set(lesson.link_youtube_original.clone()),
        slides_disponivel: Set(lesson.slides_disponivel),
        status: Set(lesson.status.clone()),
        id_tv_cultura: Set(lesson.id_tv_cultura.clone()),
        duracao_minutos: Set(lesson.duracao_minutos),
        link_libras: Set(lesson.link_libras.clone()),
        link_audiodescricao: Set(lesson.link_audiodescricao.clone()),
        cc_legenda: Set(lesson.cc_legenda),
        link_download: Set(lesson.link_download.clone()),
    }
}

fn saturating_i32(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[async_trait]
impl CatalogStore for SeaOrmStore {
    async fn list_courses(&self) -> StoreResult<Vec<Course>> {
        let rows = courses::Entity::find()
            .order_by_asc(courses::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Courses))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_course(&self, id: i32) -> StoreResult<Course> {
        courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Courses))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::Courses, id))
    }

    async fn insert_course(&self, form: &CourseForm) -> StoreResult<Course> {
        let model = courses::ActiveModel {
            id: NotSet,
            eixo: Set(form.eixo.clone()),
            nome: Set(form.nome.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Collection::Courses))?;
        Ok(model.into())
    }

    async fn update_course(&self, id: i32, form: &CourseForm) -> StoreResult<Course> {
        let model = courses::ActiveModel {
            id: Set(id),
            eixo: Set(form.eixo.clone()),
            nome: Set(form.nome.clone()),
        }
        .update(&self.db)
        .await
        .map_err(update_err(Collection::Courses, id))?;
        Ok(model.into())
    }

    async fn delete_course(&self, id: i32) -> StoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(store_err(Collection::Courses))?;

        let links = course_disciplines::Entity::delete_many()
            .filter(course_disciplines::Column::CursoId.eq(id))
            .exec(&txn)
            .await
            .map_err(store_err(Collection::CourseDisciplines))?;

        let result = courses::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(store_err(Collection::Courses))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Courses, id));
        }

        txn.commit()
            .await
            .map_err(store_err(Collection::Courses))?;
        debug!("Deleted course {id} and {} links", links.rows_affected);
        Ok(())
    }

    async fn list_disciplines(&self) -> StoreResult<Vec<Discipline>> {
        let rows = disciplines::Entity::find()
            .order_by_asc(disciplines::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Disciplines))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_discipline(&self, id: i32) -> StoreResult<Discipline> {
        disciplines::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Disciplines))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::Disciplines, id))
    }

    async fn find_discipline_by_code(&self, codigo: &str) -> StoreResult<Option<Discipline>> {
        let row = disciplines::Entity::find()
            .filter(disciplines::Column::Codigo.eq(codigo))
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Disciplines))?;
        Ok(row.map(Into::into))
    }

    async fn insert_discipline(
        &self,
        discipline: &NewDiscipline,
        curso_ids: &[i32],
    ) -> StoreResult<Discipline> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(store_err(Collection::Disciplines))?;

        let model = disciplines::ActiveModel {
            id: NotSet,
            codigo: Set(discipline.codigo.clone()),
            nome: Set(discipline.nome.clone()),
            carga_horaria: Set(discipline.carga_horaria),
        }
        .insert(&txn)
        .await
        .map_err(store_err(Collection::Disciplines))?;

        Self::insert_links(&txn, model.id, curso_ids).await?;

        txn.commit()
            .await
            .map_err(store_err(Collection::Disciplines))?;
        Ok(model.into())
    }

    async fn update_discipline(
        &self,
        id: i32,
        discipline: &NewDiscipline,
        curso_ids: Option<&[i32]>,
    ) -> StoreResult<Discipline> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(store_err(Collection::Disciplines))?;

        let model = disciplines::ActiveModel {
            id: Set(id),
            codigo: Set(discipline.codigo.clone()),
            nome: Set(discipline.nome.clone()),
            carga_horaria: Set(discipline.carga_horaria),
        }
        .update(&txn)
        .await
        .map_err(update_err(Collection::Disciplines, id))?;

        if let Some(curso_ids) = curso_ids {
            course_disciplines::Entity::delete_many()
                .filter(course_disciplines::Column::DisciplinaId.eq(id))
                .exec(&txn)
                .await
                .map_err(store_err(Collection::CourseDisciplines))?;
            Self::insert_links(&txn, id, curso_ids).await?;
        }

        txn.commit()
            .await
            .map_err(store_err(Collection::Disciplines))?;
        Ok(model.into())
    }

    async fn delete_discipline(&self, id: i32) -> StoreResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(store_err(Collection::Disciplines))?;

        course_disciplines::Entity::delete_many()
            .filter(course_disciplines::Column::DisciplinaId.eq(id))
            .exec(&txn)
            .await
            .map_err(store_err(Collection::CourseDisciplines))?;

        let result = disciplines::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(store_err(Collection::Disciplines))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Disciplines, id));
        }

        txn.commit()
            .await
            .map_err(store_err(Collection::Disciplines))
    }

    async fn list_course_links(&self) -> StoreResult<Vec<CourseDiscipline>> {
        let rows = course_disciplines::Entity::find()
            .order_by_asc(course_disciplines::Column::CursoId)
            .order_by_asc(course_disciplines::Column::DisciplinaId)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::CourseDisciplines))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn course_links_for_course(&self, curso_id: i32) -> StoreResult<Vec<CourseDiscipline>> {
        let rows = course_disciplines::Entity::find()
            .filter(course_disciplines::Column::CursoId.eq(curso_id))
            .order_by_asc(course_disciplines::Column::DisciplinaId)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::CourseDisciplines))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_professors(&self) -> StoreResult<Vec<Professor>> {
        let rows = professors::Entity::find()
            .order_by_asc(professors::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Professors))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_professor(&self, id: i32) -> StoreResult<Professor> {
        professors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Professors))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::Professors, id))
    }

    async fn find_professors_by_name(&self, nome: &str) -> StoreResult<Vec<Professor>> {
        let rows = professors::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    professors::Entity,
                    professors::Column::Nome,
                ))))
                .like(name_like(nome)),
            )
            .order_by_asc(professors::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Professors))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_professor(&self, form: &PersonForm) -> StoreResult<Professor> {
        let model = professors::ActiveModel {
            id: NotSet,
            nome: Set(form.nome.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Collection::Professors))?;
        Ok(model.into())
    }

    async fn update_professor(&self, id: i32, form: &PersonForm) -> StoreResult<Professor> {
        let model = professors::ActiveModel {
            id: Set(id),
            nome: Set(form.nome.clone()),
        }
        .update(&self.db)
        .await
        .map_err(update_err(Collection::Professors, id))?;
        Ok(model.into())
    }

    async fn delete_professor(&self, id: i32) -> StoreResult<()> {
        let result = professors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err(Collection::Professors))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Professors, id));
        }
        Ok(())
    }

    async fn list_designers(&self) -> StoreResult<Vec<Designer>> {
        let rows = designers::Entity::find()
            .order_by_asc(designers::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Designers))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_designer(&self, id: i32) -> StoreResult<Designer> {
        designers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Designers))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::Designers, id))
    }

    async fn find_designers_by_name(&self, nome: &str) -> StoreResult<Vec<Designer>> {
        let rows = designers::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((
                    designers::Entity,
                    designers::Column::Nome,
                ))))
                .like(name_like(nome)),
            )
            .order_by_asc(designers::Column::Nome)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Designers))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_designer(&self, form: &PersonForm) -> StoreResult<Designer> {
        let model = designers::ActiveModel {
            id: NotSet,
            nome: Set(form.nome.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Collection::Designers))?;
        Ok(model.into())
    }

    async fn update_designer(&self, id: i32, form: &PersonForm) -> StoreResult<Designer> {
        let model = designers::ActiveModel {
            id: Set(id),
            nome: Set(form.nome.clone()),
        }
        .update(&self.db)
        .await
        .map_err(update_err(Collection::Designers, id))?;
        Ok(model.into())
    }

    async fn delete_designer(&self, id: i32) -> StoreResult<()> {
        let result = designers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err(Collection::Designers))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Designers, id));
        }
        Ok(())
    }

    async fn list_offerings(&self) -> StoreResult<Vec<Offering>> {
        let rows = offerings::Entity::find()
            .order_by_asc(offerings::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::Offerings))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_offering(&self, id: i32) -> StoreResult<Offering> {
        offerings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Offerings))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::Offerings, id))
    }

    async fn find_offering(
        &self,
        disciplina_id: i32,
        ano: i32,
        bimestre_operacional: i32,
    ) -> StoreResult<Option<Offering>> {
        let row = offerings::Entity::find()
            .filter(offerings::Column::DisciplinaId.eq(disciplina_id))
            .filter(offerings::Column::Ano.eq(ano))
            .filter(offerings::Column::BimestreOperacional.eq(bimestre_operacional))
            .one(&self.db)
            .await
            .map_err(store_err(Collection::Offerings))?;
        Ok(row.map(Into::into))
    }

    async fn insert_offering(&self, offering: &NewOffering) -> StoreResult<Offering> {
        let model = offerings::ActiveModel {
            id: NotSet,
            disciplina_id: Set(offering.disciplina_id),
            ano: Set(Some(offering.ano)),
            bimestre_operacional: Set(Some(offering.bimestre_operacional)),
            professor_id: Set(offering.professor_id),
            di_id: Set(offering.di_id),
            tipo: Set(offering.tipo.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Collection::Offerings))?;
        Ok(model.into())
    }

    async fn update_offering(&self, id: i32, form: &OfferingForm) -> StoreResult<Offering> {
        let model = offerings::ActiveModel {
            id: Set(id),
            professor_id: Set(form.professor_id),
            di_id: Set(form.di_id),
            tipo: form.tipo.clone().map_or(NotSet, Set),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(update_err(Collection::Offerings, id))?;
        Ok(model.into())
    }

    async fn delete_offering(&self, id: i32) -> StoreResult<()> {
        let result = offerings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err(Collection::Offerings))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::Offerings, id));
        }
        Ok(())
    }

    async fn list_video_lessons(&self) -> StoreResult<Vec<VideoLesson>> {
        let rows = video_lessons::Entity::find()
            .order_by_desc(video_lessons::Column::Id)
            .limit(self.fetch_limit)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::VideoLessons))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_video_lesson(&self, id: i32) -> StoreResult<VideoLesson> {
        video_lessons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err(Collection::VideoLessons))?
            .map(Into::into)
            .ok_or_else(|| StoreError::not_found(Collection::VideoLessons, id))
    }

    async fn insert_video_lesson(&self, lesson: &NewVideoLesson) -> StoreResult<VideoLesson> {
        let model = lesson_model(lesson)
            .insert(&self.db)
            .await
            .map_err(store_err(Collection::VideoLessons))?;
        Ok(model.into())
    }

    async fn update_video_lesson(
        &self,
        id: i32,
        lesson: &NewVideoLesson,
    ) -> StoreResult<VideoLesson> {
        let mut active = lesson_model(lesson);
        active.id = Set(id);

        let model = active
            .update(&self.db)
            .await
            .map_err(update_err(Collection::VideoLessons, id))?;
        Ok(model.into())
    }

    async fn delete_video_lesson(&self, id: i32) -> StoreResult<()> {
        let result = video_lessons::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err(Collection::VideoLessons))?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(Collection::VideoLessons, id));
        }
        Ok(())
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        let db = &self.db;
        match collection {
            Collection::Courses => courses::Entity::find().count(db).await,
            Collection::Disciplines => disciplines::Entity::find().count(db).await,
            Collection::CourseDisciplines => course_disciplines::Entity::find().count(db).await,
            Collection::Professors => professors::Entity::find().count(db).await,
            Collection::Designers => designers::Entity::find().count(db).await,
            Collection::Offerings => offerings::Entity::find().count(db).await,
            Collection::VideoLessons => video_lessons::Entity::find().count(db).await,
            Collection::ImportHistory => import_history::Entity::find().count(db).await,
        }
        .map_err(store_err(collection))
    }

    async fn insert_import_history(
        &self,
        history: &NewImportHistory,
    ) -> StoreResult<ImportHistory> {
        let model = import_history::ActiveModel {
            id: NotSet,
            tipo: Set(history.tipo.to_string()),
            nome_arquivo: Set(history.nome_arquivo.clone()),
            total_linhas: Set(saturating_i32(history.summary.total_linhas)),
            sucessos: Set(saturating_i32(history.summary.sucessos)),
            erros: Set(saturating_i32(history.summary.erros)),
            criado_em: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(store_err(Collection::ImportHistory))?;
        Ok(model.into())
    }

    async fn list_import_history(&self) -> StoreResult<Vec<ImportHistory>> {
        let rows = import_history::Entity::find()
            .order_by_desc(import_history::Column::CriadoEm)
            .order_by_desc(import_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err(Collection::ImportHistory))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_store_errors() {
        let err = DbErr::Custom("boom".to_string());
        assert!(matches!(
            store_err(Collection::Courses)(err),
            StoreError::Remote { .. }
        ));

        let err = update_err(Collection::Offerings, 4)(DbErr::RecordNotUpdated);
        assert_eq!(err.to_string(), "ofertas_disciplinas: record 4 not found");
    }

    #[test]
    fn test_name_pattern_is_lowercase_substring() {
        assert_eq!(name_pattern("  Ana Maria "), "%ana maria%");
    }

    #[test]
    fn test_name_pattern_escapes_wildcards() {
        assert_eq!(name_pattern("_"), r"%\_%");
        assert_eq!(name_pattern("50%_A"), r"%50\%\_a%");
        assert_eq!(name_pattern(r"a\b"), r"%a\\b%");
    }
}
