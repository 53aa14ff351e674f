use super::{ServiceResult, aggregate};
use crate::{
    error::StoreError,
    store::{CatalogSnapshot, CatalogStore, StoreResult},
};
use futures::try_join;
use log::info;
use models::{
    catalog::{Offering, VideoLesson},
    forms::{NewOffering, VideoLessonForm},
    views::{VideoLessonDetails, VideoLessonFilter},
};
use std::future::Future;
use validator::Validate;

/// Turns a missing record into `None`, keeping every other failure
async fn optional<T>(fut: impl Future<Output = StoreResult<T>>) -> StoreResult<Option<T>> {
    match fut.await {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

pub struct VideoLessonService;

impl VideoLessonService {
    /// Joined lessons passing `filter`, most recent first
    pub async fn list(
        store: &dyn CatalogStore,
        filter: &VideoLessonFilter,
    ) -> ServiceResult<Vec<VideoLessonDetails>> {
        let snapshot = CatalogSnapshot::fetch(store).await?;
        Ok(aggregate::filter_lessons(&snapshot, filter))
    }

    /// A single lesson with whatever its offering still resolves to
    pub async fn get(store: &dyn CatalogStore, id: i32) -> ServiceResult<VideoLessonDetails> {
        let videoaula = store.get_video_lesson(id).await?;
        let Some(oferta) = optional(store.get_offering(videoaula.oferta_disciplina_id)).await?
        else {
            return Ok(VideoLessonDetails {
                videoaula,
                oferta: None,
                disciplina: None,
                professor: None,
                di: None,
            });
        };

        let (disciplina, professor, di) = try_join!(
            optional(store.get_discipline(oferta.disciplina_id)),
            async {
                match oferta.professor_id {
                    Some(id) => optional(store.get_professor(id)).await,
                    None => Ok(None),
                }
            },
            async {
                match oferta.di_id {
                    Some(id) => optional(store.get_designer(id)).await,
                    None => Ok(None),
                }
            },
        )?;

        Ok(VideoLessonDetails {
            videoaula,
            oferta: Some(oferta),
            disciplina,
            professor,
            di,
        })
    }

    /// Returns the offering with the same key, creating it when missing
    ///
    /// An existing offering is returned untouched, whatever people the
    /// request names.
    pub async fn get_or_create_offering(
        store: &dyn CatalogStore,
        offering: &NewOffering,
    ) -> ServiceResult<Offering> {
        let key = (
            offering.disciplina_id,
            offering.ano,
            offering.bimestre_operacional,
        );
        if let Some(existing) = store.find_offering(key.0, key.1, key.2).await? {
            return Ok(existing);
        }

        store.get_discipline(offering.disciplina_id).await?;
        let offering = NewOffering {
            professor_id: offering.professor_id.filter(|id| *id > 0),
            di_id: offering.di_id.filter(|id| *id > 0),
            ..offering.clone()
        };

        match store.insert_offering(&offering).await {
            Ok(created) => {
                info!(
                    "Created offering {} for discipline {} ({}/{})",
                    created.id, key.0, key.1, key.2
                );
                Ok(created)
            }
            // A concurrent insert of the same key wins; anything else is a real conflict
            Err(err @ StoreError::Conflict { .. }) => {
                match store.find_offering(key.0, key.1, key.2).await? {
                    Some(existing) => Ok(existing),
                    None => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn create(
        store: &dyn CatalogStore,
        form: VideoLessonForm,
    ) -> ServiceResult<VideoLesson> {
        form.validate()?;
        let offering = Self::get_or_create_offering(store, &form.offering()).await?;
        let lesson = store.insert_video_lesson(&form.into_lesson(offering.id)).await?;
        info!("Created video lesson {} in offering {}", lesson.id, offering.id);
        Ok(lesson)
    }

    pub async fn update(
        store: &dyn CatalogStore,
        id: i32,
        form: VideoLessonForm,
    ) -> ServiceResult<VideoLesson> {
        form.validate()?;
        store.get_video_lesson(id).await?;
        let offering = Self::get_or_create_offering(store, &form.offering()).await?;
        Ok(store
            .update_video_lesson(id, &form.into_lesson(offering.id))
            .await?)
    }

    pub async fn delete(store: &dyn CatalogStore, id: i32) -> ServiceResult<()> {
        store.delete_video_lesson(id).await?;
        info!("Deleted video lesson {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ServiceError,
        services::aggregate::tests::{lesson, scenario},
        store::MemoryStore,
    };
    use models::catalog::{Collection, Professor};

    fn form(disciplina_id: i32, ano: i32, bimestre: i32, titulo: &str) -> VideoLessonForm {
        serde_json::from_value(serde_json::json!({
            "disciplinaId": disciplina_id,
            "ano": ano,
            "bimestreOperacional": bimestre,
            "professorId": 7,
            "titulo": titulo,
            "ccLegenda": true,
        }))
        .unwrap()
    }

    fn store_with_professor() -> MemoryStore {
        let mut snapshot = scenario();
        snapshot.professors.push(Professor {
            id: 7,
            nome: "Ana".to_string(),
        });
        MemoryStore::from_snapshot(snapshot)
    }

    #[tokio::test]
    async fn test_create_reuses_existing_offering() {
        let store = store_with_professor();

        let created = VideoLessonService::create(&store, form(10, 2024, 1, "Nova aula"))
            .await
            .unwrap();
        assert_eq!(created.oferta_disciplina_id, 100);
        assert_eq!(store.count(Collection::Offerings).await.unwrap(), 2);

        // The existing offering keeps its (empty) professor
        let offering = store.get_offering(100).await.unwrap();
        assert_eq!(offering.professor_id, None);
    }

    #[tokio::test]
    async fn test_create_makes_missing_offering() {
        let store = store_with_professor();

        let created = VideoLessonService::create(&store, form(20, 2025, 3, "Aula 2025"))
            .await
            .unwrap();
        let offering = store.get_offering(created.oferta_disciplina_id).await.unwrap();
        assert_eq!(offering.disciplina_id, 20);
        assert_eq!(offering.ano, Some(2025));
        assert_eq!(offering.bimestre_operacional, Some(3));
        assert_eq!(offering.professor_id, Some(7));
        assert_eq!(offering.tipo, "regular");

        let details = VideoLessonService::get(&store, created.id).await.unwrap();
        assert_eq!(details.professor.map(|p| p.nome), Some("Ana".to_string()));
        assert_eq!(details.disciplina.map(|d| d.id), Some(20));
    }

    #[tokio::test]
    async fn test_unknown_discipline_is_not_found() {
        let store = store_with_professor();

        let err = VideoLessonService::create(&store, form(99, 2024, 1, "Aula"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::NotFound {
                collection: Collection::Disciplines,
                ..
            })
        ));
        assert_eq!(store.count(Collection::Offerings).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let store = store_with_professor();
        let err = VideoLessonService::create(&store, form(10, 2024, 1, "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_lesson_with_dangling_offering() {
        let mut snapshot = scenario();
        snapshot.video_lessons.push(lesson(9, 999));
        let store = MemoryStore::from_snapshot(snapshot);

        let details = VideoLessonService::get(&store, 9).await.unwrap();
        assert!(details.oferta.is_none());
        assert!(details.disciplina.is_none());
    }

    #[tokio::test]
    async fn test_update_moves_lesson_between_offerings() {
        let store = store_with_professor();

        let updated = VideoLessonService::update(&store, 1, form(20, 2024, 2, "Aula revista"))
            .await
            .unwrap();
        assert_eq!(updated.oferta_disciplina_id, 200);
        assert_eq!(updated.titulo, "Aula revista");

        let err = VideoLessonService::update(&store, 77, form(20, 2024, 2, "x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_applies_filter() {
        let store = store_with_professor();
        let filter = VideoLessonFilter {
            disciplina_id: Some(20),
            ..Default::default()
        };

        let listed = VideoLessonService::list(&store, &filter).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|d| d.videoaula.id).collect();
        assert_eq!(ids, vec![5, 4]);
    }
}
