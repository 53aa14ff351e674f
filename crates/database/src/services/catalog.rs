use super::{ServiceResult, aggregate};
use crate::{
    error::StoreError,
    store::{CatalogSnapshot, CatalogStore, dedup_ids},
};
use futures::try_join;
use log::info;
use models::{
    catalog::{Collection, Course, Designer, Discipline, Offering, Professor},
    forms::{CourseForm, DisciplineForm, OfferingForm, PersonForm, blank_to_none},
    views::DisciplineWithCourses,
};
use validator::Validate;

/// Admin CRUD over the catalog entities
///
/// Forms are validated before the store is touched.
pub struct CatalogService;

impl CatalogService {
    pub async fn list_courses(store: &dyn CatalogStore) -> ServiceResult<Vec<Course>> {
        Ok(store.list_courses().await?)
    }

    pub async fn get_course(store: &dyn CatalogStore, id: i32) -> ServiceResult<Course> {
        Ok(store.get_course(id).await?)
    }

    pub async fn create_course(
        store: &dyn CatalogStore,
        form: CourseForm,
    ) -> ServiceResult<Course> {
        form.validate()?;
        let course = store.insert_course(&form.trimmed()).await?;
        info!("Created course {} ({})", course.id, course.nome);
        Ok(course)
    }

    pub async fn update_course(
        store: &dyn CatalogStore,
        id: i32,
        form: CourseForm,
    ) -> ServiceResult<Course> {
        form.validate()?;
        Ok(store.update_course(id, &form.trimmed()).await?)
    }

    pub async fn delete_course(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        store.delete_course(id).await?;
        info!("Deleted course {id}");
        Ok(())
    }

    /// Disciplines linked to a course, in name order
    pub async fn disciplines_of_course(
        store: &dyn CatalogStore,
        curso_id: i32,
    ) -> ServiceResult<Vec<Discipline>> {
        let (_, links, disciplines) = try_join!(
            store.get_course(curso_id),
            store.course_links_for_course(curso_id),
            store.list_disciplines(),
        )?;

        Ok(disciplines
            .into_iter()
            .filter(|d| links.iter().any(|link| link.disciplina_id == d.id))
            .collect())
    }

    pub async fn list_disciplines(store: &dyn CatalogStore) -> ServiceResult<Vec<Discipline>> {
        Ok(store.list_disciplines().await?)
    }

    pub async fn get_discipline(store: &dyn CatalogStore, id: i32) -> ServiceResult<Discipline> {
        Ok(store.get_discipline(id).await?)
    }

    pub async fn get_discipline_by_code(
        store: &dyn CatalogStore,
        codigo: &str,
    ) -> ServiceResult<Discipline> {
        let codigo = codigo.trim();
        store
            .find_discipline_by_code(codigo)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Disciplines, codigo).into())
    }

    pub async fn disciplines_with_courses(
        store: &dyn CatalogStore,
    ) -> ServiceResult<Vec<DisciplineWithCourses>> {
        let (disciplines, links, courses) = try_join!(
            store.list_disciplines(),
            store.list_course_links(),
            store.list_courses(),
        )?;

        let snapshot = CatalogSnapshot {
            courses,
            disciplines,
            links,
            ..Default::default()
        };
        Ok(aggregate::disciplines_with_courses(&snapshot))
    }

    pub async fn create_discipline(
        store: &dyn CatalogStore,
        form: DisciplineForm,
    ) -> ServiceResult<Discipline> {
        form.validate()?;
        let curso_ids = dedup_ids(form.curso_ids.as_deref().unwrap_or_default());

        let discipline = store
            .insert_discipline(&form.discipline(), &curso_ids)
            .await?;
        info!(
            "Created discipline {} linked to {} courses",
            discipline.codigo,
            curso_ids.len()
        );
        Ok(discipline)
    }

    /// Updates a discipline; links are replaced only when `curso_ids` is given
    pub async fn update_discipline(
        store: &dyn CatalogStore,
        id: i32,
        form: DisciplineForm,
    ) -> ServiceResult<Discipline> {
        form.validate()?;
        let curso_ids = form.curso_ids.as_deref().map(dedup_ids);

        Ok(store
            .update_discipline(id, &form.discipline(), curso_ids.as_deref())
            .await?)
    }

    pub async fn delete_discipline(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        store.delete_discipline(id).await?;
        info!("Deleted discipline {id}");
        Ok(())
    }

    /// All professors, or those whose name contains `nome`
    pub async fn list_professors(
        store: &dyn CatalogStore,
        nome: Option<&str>,
    ) -> ServiceResult<Vec<Professor>> {
        match nome.map(str::trim).filter(|n| !n.is_empty()) {
            Some(nome) => Ok(store.find_professors_by_name(nome).await?),
            None => Ok(store.list_professors().await?),
        }
    }

    pub async fn get_professor(store: &dyn CatalogStore, id: i32) -> ServiceResult<Professor> {
        Ok(store.get_professor(id).await?)
    }

    pub async fn create_professor(
        store: &dyn CatalogStore,
        form: PersonForm,
    ) -> ServiceResult<Professor> {
        form.validate()?;
        Ok(store.insert_professor(&form.trimmed()).await?)
    }

    pub async fn update_professor(
        store: &dyn CatalogStore,
        id: i32,
        form: PersonForm,
    ) -> ServiceResult<Professor> {
        form.validate()?;
        Ok(store.update_professor(id, &form.trimmed()).await?)
    }

    pub async fn delete_professor(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        Ok(store.delete_professor(id).await?)
    }

    /// All designers, or those whose name contains `nome`
    pub async fn list_designers(
        store: &dyn CatalogStore,
        nome: Option<&str>,
    ) -> ServiceResult<Vec<Designer>> {
        match nome.map(str::trim).filter(|n| !n.is_empty()) {
            Some(nome) => Ok(store.find_designers_by_name(nome).await?),
            None => Ok(store.list_designers().await?),
        }
    }

    pub async fn get_designer(store: &dyn CatalogStore, id: i32) -> ServiceResult<Designer> {
        Ok(store.get_designer(id).await?)
    }

    pub async fn create_designer(
        store: &dyn CatalogStore,
        form: PersonForm,
    ) -> ServiceResult<Designer> {
        form.validate()?;
        Ok(store.insert_designer(&form.trimmed()).await?)
    }

    pub async fn update_designer(
        store: &dyn CatalogStore,
        id: i32,
        form: PersonForm,
    ) -> ServiceResult<Designer> {
        form.validate()?;
        Ok(store.update_designer(id, &form.trimmed()).await?)
    }

    pub async fn delete_designer(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        Ok(store.delete_designer(id).await?)
    }

    pub async fn list_offerings(store: &dyn CatalogStore) -> ServiceResult<Vec<Offering>> {
        Ok(store.list_offerings().await?)
    }

    pub async fn get_offering(store: &dyn CatalogStore, id: i32) -> ServiceResult<Offering> {
        Ok(store.get_offering(id).await?)
    }

    pub async fn update_offering(
        store: &dyn CatalogStore,
        id: i32,
        form: OfferingForm,
    ) -> ServiceResult<Offering> {
        let form = OfferingForm {
            professor_id: form.professor_id.filter(|id| *id > 0),
            di_id: form.di_id.filter(|id| *id > 0),
            tipo: blank_to_none(form.tipo),
        };
        Ok(store.update_offering(id, &form).await?)
    }

    pub async fn delete_offering(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        Ok(store.delete_offering(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ServiceError, store::MemoryStore};

    fn discipline_form(codigo: &str, curso_ids: Option<Vec<i32>>) -> DisciplineForm {
        DisciplineForm {
            codigo: codigo.to_string(),
            nome: format!("Disciplina {codigo}"),
            carga_horaria: 60,
            curso_ids,
        }
    }

    async fn course(store: &MemoryStore, nome: &str) -> Course {
        CatalogService::create_course(
            store,
            CourseForm {
                eixo: "Ambiente e Saúde".to_string(),
                nome: nome.to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected_before_the_store() {
        let store = MemoryStore::new();
        store.fail_on(Collection::Courses).await;

        let err = CatalogService::create_course(
            &store,
            CourseForm {
                eixo: "Saúde".to_string(),
                nome: "  ".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_course_trims_input() {
        let store = MemoryStore::new();
        let created = course(&store, "  Enfermagem ").await;
        assert_eq!(created.nome, "Enfermagem");
    }

    #[tokio::test]
    async fn test_discipline_links_are_deduplicated() {
        let store = MemoryStore::new();
        let a = course(&store, "A").await;

        let d = CatalogService::create_discipline(
            &store,
            discipline_form("BIO001", Some(vec![a.id, a.id])),
        )
        .await
        .unwrap();

        let linked = CatalogService::disciplines_of_course(&store, a.id).await.unwrap();
        assert_eq!(linked, vec![d]);
        assert_eq!(store.count(Collection::CourseDisciplines).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_discipline_replaces_links_only_when_given() {
        let store = MemoryStore::new();
        let a = course(&store, "A").await;
        let b = course(&store, "B").await;
        let d = CatalogService::create_discipline(&store, discipline_form("Q1", Some(vec![a.id])))
            .await
            .unwrap();

        CatalogService::update_discipline(&store, d.id, discipline_form("Q1", None))
            .await
            .unwrap();
        assert_eq!(
            CatalogService::disciplines_of_course(&store, a.id)
                .await
                .unwrap()
                .len(),
            1
        );

        CatalogService::update_discipline(&store, d.id, discipline_form("Q1", Some(vec![b.id])))
            .await
            .unwrap();
        assert!(
            CatalogService::disciplines_of_course(&store, a.id)
                .await
                .unwrap()
                .is_empty()
        );

        let views = CatalogService::disciplines_with_courses(&store).await.unwrap();
        assert_eq!(views[0].cursos, vec![b]);
    }

    #[tokio::test]
    async fn test_disciplines_of_unknown_course_is_not_found() {
        let store = MemoryStore::new();
        let err = CatalogService::disciplines_of_course(&store, 42)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_professor_name_filter() {
        let store = MemoryStore::new();
        for nome in ["Carla Dias", "Paulo Reis"] {
            CatalogService::create_professor(
                &store,
                PersonForm {
                    nome: nome.to_string(),
                },
            )
            .await
            .unwrap();
        }

        let all = CatalogService::list_professors(&store, Some("  ")).await.unwrap();
        assert_eq!(all.len(), 2);

        let found = CatalogService::list_professors(&store, Some("reis")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nome, "Paulo Reis");
    }
}
