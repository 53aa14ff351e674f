use super::{ServiceResult, aggregate};
use crate::store::{CatalogSnapshot, CatalogStore};
use futures::try_join;
use log::debug;
use models::{
    catalog::Collection,
    stats::{
        AccessibilityCoverage, BimesterTotal, CourseLessonStats, Overview, YearBimesterRow,
        YearEvolution, YearTotal,
    },
};

/// Dashboard statistics
///
/// Each call reads fresh rows from the store, then folds them in memory.
pub struct StatsService;

impl StatsService {
    pub async fn overview(store: &dyn CatalogStore) -> ServiceResult<Overview> {
        let (total_videoaulas, total_disciplinas, total_cursos, total_professores) = try_join!(
            store.count(Collection::VideoLessons),
            store.count(Collection::Disciplines),
            store.count(Collection::Courses),
            store.count(Collection::Professors),
        )?;

        Ok(Overview {
            total_videoaulas,
            total_disciplinas,
            total_cursos,
            total_professores,
        })
    }

    pub async fn accessibility(store: &dyn CatalogStore) -> ServiceResult<AccessibilityCoverage> {
        let lessons = store.list_video_lessons().await?;
        Ok(aggregate::accessibility(&lessons))
    }

    pub async fn per_course(store: &dyn CatalogStore) -> ServiceResult<Vec<CourseLessonStats>> {
        let snapshot = Self::snapshot(store).await?;
        Ok(aggregate::per_course(&snapshot))
    }

    pub async fn per_year(store: &dyn CatalogStore) -> ServiceResult<Vec<YearTotal>> {
        let snapshot = Self::offerings_snapshot(store).await?;
        Ok(aggregate::per_year(&snapshot))
    }

    pub async fn per_bimester(store: &dyn CatalogStore) -> ServiceResult<Vec<BimesterTotal>> {
        let snapshot = Self::offerings_snapshot(store).await?;
        Ok(aggregate::per_bimester(&snapshot))
    }

    pub async fn per_year_bimester(
        store: &dyn CatalogStore,
    ) -> ServiceResult<Vec<YearBimesterRow>> {
        let snapshot = Self::offerings_snapshot(store).await?;
        Ok(aggregate::per_year_bimester(&snapshot))
    }

    pub async fn evolution(store: &dyn CatalogStore) -> ServiceResult<Vec<YearEvolution>> {
        let years = Self::per_year(store).await?;
        Ok(aggregate::evolution(&years))
    }

    async fn snapshot(store: &dyn CatalogStore) -> ServiceResult<CatalogSnapshot> {
        let snapshot = CatalogSnapshot::fetch(store).await?;
        debug!(
            "Fetched {} lessons, {} offerings, {} links",
            snapshot.video_lessons.len(),
            snapshot.offerings.len(),
            snapshot.links.len()
        );
        Ok(snapshot)
    }

    /// Only lessons and offerings, which is all the time buckets need
    async fn offerings_snapshot(store: &dyn CatalogStore) -> ServiceResult<CatalogSnapshot> {
        let (offerings, video_lessons) =
            try_join!(store.list_offerings(), store.list_video_lessons())?;

        Ok(CatalogSnapshot {
            offerings,
            video_lessons,
            ..Default::default()
        })
    }
}
