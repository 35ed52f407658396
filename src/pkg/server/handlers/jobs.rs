use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                jobs::{
                    mutators::{CreateJobData, JobMutator},
                    selectors::JobSelector,
                    spec::JobEntry,
                },
                jobs_meta::{
                    mutators::JobMetaMutator, selectors::JobMetaSelector, spec::JobMetaEntry,
                },
            },
            snapshot,
            status::{self, DEFAULT_STATUS, JobStatus},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{Error, Result},
};

const SEARCH_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct CreateJobInput {
    pub company: String,
    pub job_position: String,
    pub link: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: i64,
}

#[derive(Deserialize)]
pub struct AddMetaInput {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Deserialize)]
pub struct DeleteJobsInput {
    pub ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct JobView {
    pub id: i64,
    pub create_date: DateTime<Utc>,
    pub company: String,
    pub job_position: String,
    pub link: String,
    pub status: i64,
    pub status_label: String,
}

impl From<JobEntry> for JobView {
    fn from(job: JobEntry) -> Self {
        JobView {
            id: job.id,
            create_date: job.create_date,
            company: job.company,
            job_position: job.job_position,
            link: job.link,
            status: job.status,
            status_label: status::label_for(job.status).to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct JobsPage {
    pub jobs: Vec<JobView>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Serialize)]
pub struct JobDetails {
    pub job: JobView,
    pub meta: Vec<JobMetaEntry>,
}

#[derive(Serialize)]
pub struct DeleteReport {
    pub deleted: u64,
}

/// Capture flow: append one job against the page currently open.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<Json<JobEntry>> {
    let company = input.company.trim();
    let job_position = input.job_position.trim();
    let link = input.link.trim();
    if company.is_empty() || job_position.is_empty() || link.is_empty() {
        return Err(Error::Validation(
            "company, job position and link are all required".into(),
        ));
    }

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .create(CreateJobData {
            create_date: Utc::now(),
            company: company.to_string(),
            job_position: job_position.to_string(),
            link: link.to_string(),
            status: DEFAULT_STATUS.id(),
        })
        .await?;
    tx.commit().await?;
    tracing::info!("added job {} at {}", job.id, &job.company);
    Ok(Json(job))
}

fn parse_filter_date(value: Option<String>, which: &str) -> Result<Option<NaiveDate>> {
    match value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::Validation(format!("invalid {which} date, expected YYYY-MM-DD"))),
    }
}

/// Review flow: rebuild the snapshot (optionally date-bounded) and hand back
/// one fixed-size page of it.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<JobsPage>> {
    let from = parse_filter_date(query.date_from, "from")?;
    let to = parse_filter_date(query.date_to, "to")?;
    let (lower, upper) = snapshot::day_bounds(from, to);

    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_filtered(lower, upper).await?;

    let window = snapshot::paginate(jobs.len(), query.page.unwrap_or(1));
    let total = jobs.len();
    let page_jobs = jobs[window.start..window.end]
        .iter()
        .cloned()
        .map(JobView::from)
        .collect();

    Ok(Json(JobsPage {
        jobs: page_jobs,
        page: window.page,
        total_pages: window.total_pages,
        total,
        has_prev: window.has_prev,
        has_next: window.has_next,
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<JobView>>> {
    let term = query.q.unwrap_or_default().trim().to_lowercase();
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).search(&term, SEARCH_LIMIT).await?;
    Ok(Json(jobs.into_iter().map(JobView::from).collect()))
}

pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<JobDetails>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("job"))?;
    let meta = JobMetaSelector::new(&mut tx).get_for_job(id).await?;
    Ok(Json(JobDetails { job: job.into(), meta }))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<JobEntry>> {
    let status = JobStatus::from_id(input.status)
        .ok_or_else(|| Error::Validation(format!("unknown status id {}", input.status)))?;

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .update_status(id, status.id())
        .await?
        .ok_or(Error::NotFound("job"))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn add_meta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<AddMetaInput>,
) -> Result<Json<JobMetaEntry>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::Validation("meta entry name is required".into()));
    }

    let mut tx = state.db_pool.begin_txn().await?;
    JobSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("job"))?;
    let entry = JobMetaMutator::new(&mut tx)
        .create(id, name, &input.value)
        .await?;
    tx.commit().await?;
    Ok(Json(entry))
}

/// Bulk delete: each selected job plus its metadata entries, one transaction
/// across both collections. An empty selection never reaches the store.
pub async fn delete_selected(
    State(state): State<AppState>,
    Json(input): Json<DeleteJobsInput>,
) -> Result<Json<DeleteReport>> {
    if input.ids.is_empty() {
        return Err(Error::Validation("no jobs selected".into()));
    }

    let mut tx = state.db_pool.begin_txn().await?;
    let mut deleted = 0;
    for id in &input.ids {
        JobMetaMutator::new(&mut tx).delete_for_job(*id).await?;
        if JobMutator::new(&mut tx).delete(*id).await? {
            deleted += 1;
        }
    }
    tx.commit().await?;
    tracing::info!("deleted {} jobs", deleted);
    Ok(Json(DeleteReport { deleted }))
}

pub async fn clear_all(State(state): State<AppState>) -> Result<Json<DeleteReport>> {
    let mut tx = state.db_pool.begin_txn().await?;
    JobMetaMutator::new(&mut tx).delete_all().await?;
    let deleted = JobMutator::new(&mut tx).delete_all().await?;
    tx.commit().await?;
    tracing::info!("cleared all data, {} jobs removed", deleted);
    Ok(Json(DeleteReport { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::adaptors::statuses::selectors::StatusSelector;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;

    async fn test_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::cmd::migrate::MIGRATOR.run(&pool).await.unwrap();
        AppState { db_pool: Arc::new(pool) }
    }

    async fn seed_job(state: &AppState, company: &str, link: &str, date: DateTime<Utc>) -> JobEntry {
        let mut tx = state.db_pool.begin_txn().await.unwrap();
        let job = JobMutator::new(&mut tx)
            .create(CreateJobData {
                create_date: date,
                company: company.to_string(),
                job_position: "Engineer".to_string(),
                link: link.to_string(),
                status: DEFAULT_STATUS.id(),
            })
            .await
            .unwrap();
        tx.commit().await.unwrap();
        job
    }

    fn day(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, m, s).unwrap()
    }

    fn unfiltered(page: usize) -> Query<ListQuery> {
        Query(ListQuery { date_from: None, date_to: None, page: Some(page) })
    }

    #[tokio::test]
    async fn capture_rejects_missing_fields_and_applies_defaults() {
        let state = test_state().await;

        let err = create(
            State(state.clone()),
            Json(CreateJobInput {
                company: "Acme".into(),
                job_position: "  ".into(),
                link: "https://a".into(),
            }),
        )
        .await;
        assert!(matches!(err, Err(Error::Validation(_))));

        let Json(job) = create(
            State(state.clone()),
            Json(CreateJobInput {
                company: "  Acme  ".into(),
                job_position: "Engineer".into(),
                link: "https://acme.io/jobs/1".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(job.company, "Acme");
        assert_eq!(job.status, DEFAULT_STATUS.id());
    }

    #[tokio::test]
    async fn pages_are_fifty_wide_and_newest_first() {
        let state = test_state().await;
        for i in 0..120u32 {
            let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::minutes(i as i64);
            seed_job(&state, &format!("Company {i}"), "https://a", date).await;
        }

        let Json(first) = list(State(state.clone()), unfiltered(1)).await.unwrap();
        assert_eq!(first.jobs.len(), 50);
        assert_eq!(first.total, 120);
        assert_eq!(first.total_pages, 3);
        assert!(!first.has_prev);
        assert!(first.has_next);
        assert_eq!(first.jobs[0].company, "Company 119");

        let Json(last) = list(State(state.clone()), unfiltered(3)).await.unwrap();
        assert_eq!(last.jobs.len(), 20);
        assert!(last.has_prev);
        assert!(!last.has_next);
        assert_eq!(last.jobs[19].company, "Company 0");

        // page parameter clamps into range
        let Json(clamped) = list(State(state.clone()), unfiltered(99)).await.unwrap();
        assert_eq!(clamped.page, 3);
    }

    #[tokio::test]
    async fn empty_snapshot_disables_both_directions() {
        let state = test_state().await;
        let Json(page) = list(State(state), unfiltered(1)).await.unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn date_filter_covers_whole_days_inclusive() {
        let state = test_state().await;
        seed_job(&state, "Before", "https://a", Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()).await;
        seed_job(&state, "Lower Edge", "https://b", day(1, 0, 0, 0)).await;
        seed_job(&state, "Middle", "https://c", day(15, 12, 30, 0)).await;
        seed_job(&state, "Upper Edge", "https://d", day(31, 23, 59, 59)).await;
        seed_job(&state, "After", "https://e", Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()).await;

        let Json(page) = list(
            State(state.clone()),
            Query(ListQuery {
                date_from: Some("2024-01-01".into()),
                date_to: Some("2024-01-31".into()),
                page: None,
            }),
        )
        .await
        .unwrap();

        let companies: Vec<&str> = page.jobs.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(companies, vec!["Upper Edge", "Middle", "Lower Edge"]);

        let err = list(
            State(state),
            Query(ListQuery { date_from: Some("01/15/2024".into()), date_to: None, page: None }),
        )
        .await;
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_company_and_link() {
        let state = test_state().await;
        seed_job(&state, "Acme Inc", "https://acme.io", day(1, 0, 0, 0)).await;
        seed_job(&state, "Umbrella", "https://jobs.ACME.dev/9", day(2, 0, 0, 0)).await;
        seed_job(&state, "Other", "https://other.io", day(3, 0, 0, 0)).await;

        let Json(found) = search(
            State(state.clone()),
            Query(SearchQuery { q: Some("aCmE".into()) }),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].company, "Umbrella");

        // an empty term matches everything, still capped
        for i in 0..12u32 {
            seed_job(&state, &format!("Filler {i}"), "https://f", day(4, i, 0, 0)).await;
        }
        let Json(all) = search(State(state), Query(SearchQuery { q: None })).await.unwrap();
        assert_eq!(all.len(), SEARCH_LIMIT as usize);
    }

    #[tokio::test]
    async fn details_carry_meta_and_signal_missing_jobs() {
        let state = test_state().await;
        let job = seed_job(&state, "Acme", "https://a", day(1, 0, 0, 0)).await;

        add_meta(
            State(state.clone()),
            Path(job.id),
            Json(AddMetaInput { name: "note".into(), value: "call back friday".into() }),
        )
        .await
        .unwrap();

        let Json(details) = details(State(state.clone()), Path(job.id)).await.unwrap();
        assert_eq!(details.job.status_label, "Sent Request");
        assert_eq!(details.meta.len(), 1);
        assert_eq!(details.meta[0].value, "call back friday");

        let err = super::details(State(state), Path(9999)).await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn status_updates_check_the_closed_set() {
        let state = test_state().await;
        let job = seed_job(&state, "Acme", "https://a", day(1, 0, 0, 0)).await;

        let Json(updated) = update_status(
            State(state.clone()),
            Path(job.id),
            Json(UpdateStatusInput { status: 3 }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, 3);

        let err = update_status(
            State(state.clone()),
            Path(job.id),
            Json(UpdateStatusInput { status: 42 }),
        )
        .await;
        assert!(matches!(err, Err(Error::Validation(_))));

        let err = update_status(State(state), Path(9999), Json(UpdateStatusInput { status: 2 })).await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn bulk_delete_cascades_and_spares_the_rest() {
        let state = test_state().await;
        let doomed = seed_job(&state, "Doomed", "https://d", day(1, 0, 0, 0)).await;
        let spared = seed_job(&state, "Spared", "https://s", day(2, 0, 0, 0)).await;
        for job_id in [doomed.id, spared.id] {
            add_meta(
                State(state.clone()),
                Path(job_id),
                Json(AddMetaInput { name: "note".into(), value: String::new() }),
            )
            .await
            .unwrap();
        }

        let Json(report) = delete_selected(
            State(state.clone()),
            Json(DeleteJobsInput { ids: vec![doomed.id, 777] }),
        )
        .await
        .unwrap();
        assert_eq!(report.deleted, 1);

        let err = super::details(State(state.clone()), Path(doomed.id)).await;
        assert!(matches!(err, Err(Error::NotFound(_))));

        let Json(still_there) = super::details(State(state.clone()), Path(spared.id)).await.unwrap();
        assert_eq!(still_there.meta.len(), 1);

        let mut tx = state.db_pool.begin_txn().await.unwrap();
        assert!(JobMetaSelector::new(&mut tx).get_for_job(doomed.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_selection_is_rejected_before_the_store() {
        let state = test_state().await;
        let err = delete_selected(State(state), Json(DeleteJobsInput { ids: vec![] })).await;
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn clear_all_keeps_the_status_lookup_seeded() {
        let state = test_state().await;
        let job = seed_job(&state, "Acme", "https://a", day(1, 0, 0, 0)).await;
        add_meta(
            State(state.clone()),
            Path(job.id),
            Json(AddMetaInput { name: "note".into(), value: String::new() }),
        )
        .await
        .unwrap();

        let Json(report) = clear_all(State(state.clone())).await.unwrap();
        assert_eq!(report.deleted, 1);

        let Json(page) = list(State(state.clone()), unfiltered(1)).await.unwrap();
        assert!(page.jobs.is_empty());

        let mut tx = state.db_pool.begin_txn().await.unwrap();
        assert_eq!(StatusSelector::new(&mut tx).get_all().await.unwrap().len(), 5);
    }
}
