//! Query lifecycle: fetch → filter → group → caption → assemble.
//!
//! A [`QuerySession`] lives for one user session. It owns:
//! - the photo cache, filled at most once per cache epoch and never refreshed
//!   implicitly; a failed fetch leaves it empty so the next query retries;
//! - a query sequence. Each query takes the next number and only the most
//!   recently started query may publish its outcome. Older queries still run
//!   to completion, but their results are discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assemble::assemble;
use crate::entities::{DisplayEvent, PhotoRecord};
use crate::errors::PipelineError;
use crate::group::select_groups;
use crate::responses::QueryState;
use crate::selector::QueryDate;
use crate::source::{Captioner, PhotoSource};

/// How a call to [`QuerySession::run`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The query was the latest one and its state was published.
    Completed(QueryState),
    /// A later query started first; this result was discarded.
    Superseded { sequence: u64, latest: u64 },
}

impl QueryOutcome {
    /// Published state, if any.
    #[must_use]
    pub fn into_state(self) -> Option<QueryState> {
        match self {
            Self::Completed(state) => Some(state),
            Self::Superseded { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct CacheSlot {
    epoch: u64,
    photos: Option<Arc<Vec<PhotoRecord>>>,
}

#[derive(Debug)]
struct Published {
    sequence: u64,
    state: QueryState,
}

/// One user session over a photo source and a captioner.
pub struct QuerySession<S, C, R = StdRng> {
    source: S,
    captioner: C,
    rng: Mutex<R>,
    cache: tokio::sync::Mutex<CacheSlot>,
    sequence: AtomicU64,
    published: Mutex<Published>,
}

impl<S, C> QuerySession<S, C, StdRng>
where
    S: PhotoSource,
    C: Captioner,
{
    /// Session with an entropy-seeded random source.
    pub fn new(source: S, captioner: C) -> Self {
        Self::with_rng(source, captioner, StdRng::from_entropy())
    }
}

impl<S, C, R> QuerySession<S, C, R>
where
    S: PhotoSource,
    C: Captioner,
    R: Rng + Send,
{
    /// Session with an explicit random source for representative photos.
    pub fn with_rng(source: S, captioner: C, rng: R) -> Self {
        Self {
            source,
            captioner,
            rng: Mutex::new(rng),
            cache: tokio::sync::Mutex::new(CacheSlot::default()),
            sequence: AtomicU64::new(0),
            published: Mutex::new(Published {
                sequence: 0,
                state: QueryState::Idle,
            }),
        }
    }

    /// Run one query to completion and publish its outcome if it is still
    /// the latest query.
    pub async fn run(&self, query: QueryDate) -> QueryOutcome {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(sequence, QueryState::Loading);
        tracing::debug!(sequence, %query, "query started");

        let state = match self.evaluate(query).await {
            Ok(Some(events)) => QueryState::Results { events },
            Ok(None) => QueryState::NoResults,
            Err(error) => {
                tracing::error!(sequence, %query, error = %error, "query failed");
                QueryState::error()
            }
        };

        if self.publish(sequence, state.clone()) {
            tracing::debug!(sequence, phase = %state.phase(), "query published");
            QueryOutcome::Completed(state)
        } else {
            let latest = self.latest_sequence();
            tracing::debug!(sequence, latest, "query superseded; result discarded");
            QueryOutcome::Superseded { sequence, latest }
        }
    }

    /// Currently published state.
    pub fn state(&self) -> QueryState {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Sequence number of the most recently started query.
    pub fn latest_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Number of cached photos, or `None` before the first successful fetch.
    pub async fn cached_photo_count(&self) -> Option<usize> {
        self.cache.lock().await.photos.as_ref().map(|p| p.len())
    }

    /// Current cache epoch.
    pub async fn cache_epoch(&self) -> u64 {
        self.cache.lock().await.epoch
    }

    /// Drop the cached catalog; the next query fetches again.
    pub async fn invalidate(&self) {
        let mut slot = self.cache.lock().await;
        slot.epoch += 1;
        slot.photos = None;
        tracing::info!(epoch = slot.epoch, "photo cache invalidated");
    }

    async fn evaluate(&self, query: QueryDate) -> Result<Option<Vec<DisplayEvent>>, PipelineError> {
        let photos = self.photos().await?;

        let Some(groups) = select_groups(&photos, query) else {
            return Ok(None);
        };

        let captions = self
            .captioner
            .caption(&groups)
            .await
            .map_err(PipelineError::Processing)?;

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Some(assemble(&groups, captions, &mut *rng)))
    }

    async fn photos(&self) -> Result<Arc<Vec<PhotoRecord>>, PipelineError> {
        let mut slot = self.cache.lock().await;
        if let Some(photos) = &slot.photos {
            tracing::debug!(epoch = slot.epoch, photos = photos.len(), "photo cache hit");
            return Ok(Arc::clone(photos));
        }

        let fetch = self
            .source
            .fetch_photos()
            .await
            .map_err(PipelineError::Fetch)?;

        if !fetch.complete {
            tracing::warn!(
                pages = fetch.pages,
                photos = fetch.photos.len(),
                "catalog fetch stopped early; caching partial catalog"
            );
        }
        tracing::info!(
            epoch = slot.epoch,
            pages = fetch.pages,
            photos = fetch.photos.len(),
            "photo catalog cached"
        );

        let photos = Arc::new(fetch.photos);
        slot.photos = Some(Arc::clone(&photos));
        Ok(photos)
    }

    /// Publish `state` for `sequence` unless a later query has started or
    /// the move is not a lifecycle transition (a new sequence must start in
    /// `loading`; a sequence's outcome must follow its own `loading`).
    fn publish(&self, sequence: u64, state: QueryState) -> bool {
        let mut published = self.published.lock().unwrap_or_else(PoisonError::into_inner);
        if sequence < self.sequence.load(Ordering::SeqCst) || sequence < published.sequence {
            return false;
        }
        let from = published.state.phase();
        let to = state.phase();
        if !from.can_transition_to(to) {
            tracing::warn!(sequence, %from, %to, "rejected query state transition");
            return false;
        }
        published.sequence = sequence;
        published.state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{CaptionResult, EventGroup};
    use crate::errors::SourceError;
    use crate::responses::ERROR_MESSAGE;
    use crate::source::CatalogFetch;

    fn photo(id: u64, date: &str) -> PhotoRecord {
        PhotoRecord {
            id,
            title: format!("File:{id}.jpg"),
            image_url: format!("https://upload.example/{id}.jpg"),
            source_page_url: format!("https://commons.example/File:{id}"),
            description: "Spelers van Feyenoord op het veld".to_string(),
            date: date.parse().unwrap(),
        }
    }

    struct StaticSource {
        photos: Vec<PhotoRecord>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(photos: Vec<PhotoRecord>) -> Self {
            Self {
                photos,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PhotoSource for StaticSource {
        async fn fetch_photos(&self) -> Result<CatalogFetch, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(CatalogFetch {
                photos: self.photos.clone(),
                pages: 1,
                complete: true,
            })
        }
    }

    struct FailingSource;

    impl PhotoSource for FailingSource {
        async fn fetch_photos(&self) -> Result<CatalogFetch, SourceError> {
            Err("catalog unavailable".into())
        }
    }

    #[derive(Default)]
    struct EchoCaptioner {
        calls: AtomicUsize,
    }

    impl Captioner for EchoCaptioner {
        async fn caption(&self, groups: &[EventGroup]) -> Result<Vec<CaptionResult>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(groups
                .iter()
                .map(|g| CaptionResult {
                    date: g.date.to_string(),
                    headline: format!("Feyenoord op {}", g.date),
                    match_info: String::new(),
                })
                .collect())
        }
    }

    struct FailingCaptioner;

    impl Captioner for FailingCaptioner {
        async fn caption(&self, _groups: &[EventGroup]) -> Result<Vec<CaptionResult>, SourceError> {
            Err("schema violation".into())
        }
    }

    fn seeded<S: PhotoSource, C: Captioner>(source: S, captioner: C) -> QuerySession<S, C> {
        QuerySession::with_rng(source, captioner, StdRng::seed_from_u64(11))
    }

    #[tokio::test]
    async fn starts_idle() {
        let session = seeded(StaticSource::new(vec![]), EchoCaptioner::default());
        assert_eq!(session.state(), QueryState::Idle);
        assert_eq!(session.latest_sequence(), 0);
        assert_eq!(session.cached_photo_count().await, None);
    }

    #[tokio::test]
    async fn results_are_sorted_and_published() {
        let source = StaticSource::new(vec![
            photo(1, "2005-03-15"),
            photo(2, "1990-03-15"),
            photo(3, "1990-03-16"),
        ]);
        let session = seeded(source, EchoCaptioner::default());

        let outcome = session.run(QueryDate::new(3, 15).unwrap()).await;
        let QueryOutcome::Completed(QueryState::Results { events }) = outcome else {
            panic!("expected results, got {outcome:?}");
        };
        let dates: Vec<String> = events.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, ["1990-03-15", "2005-03-15"]);
        assert!(matches!(session.state(), QueryState::Results { .. }));
    }

    #[tokio::test]
    async fn no_match_skips_caption_service() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-16")]),
            EchoCaptioner::default(),
        );

        let outcome = session.run(QueryDate::new(3, 15).unwrap()).await;
        assert_eq!(outcome, QueryOutcome::Completed(QueryState::NoResults));
        assert_eq!(session.captioner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn catalog_is_fetched_once_per_session() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-15"), photo(2, "1970-05-06")]),
            EchoCaptioner::default(),
        );

        session.run(QueryDate::new(3, 15).unwrap()).await;
        session.run(QueryDate::new(5, 6).unwrap()).await;
        session.run(QueryDate::new(1, 1).unwrap()).await;

        assert_eq!(session.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.cached_photo_count().await, Some(2));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-15")]),
            EchoCaptioner::default(),
        );
        session.run(QueryDate::new(3, 15).unwrap()).await;
        session.invalidate().await;
        assert_eq!(session.cache_epoch().await, 1);
        assert_eq!(session.cached_photo_count().await, None);

        session.run(QueryDate::new(3, 15).unwrap()).await;
        assert_eq!(session.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_generic_error_and_not_cached() {
        let session = seeded(FailingSource, EchoCaptioner::default());
        let outcome = session.run(QueryDate::new(3, 15).unwrap()).await;
        assert_eq!(
            outcome,
            QueryOutcome::Completed(QueryState::Error {
                message: ERROR_MESSAGE.to_string()
            })
        );
        assert_eq!(session.cached_photo_count().await, None);
    }

    #[tokio::test]
    async fn caption_failure_discards_all_results() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-15")]),
            FailingCaptioner,
        );
        let state = session
            .run(QueryDate::new(3, 15).unwrap())
            .await
            .into_state()
            .unwrap();
        assert_eq!(state, QueryState::error());
        assert_eq!(session.cached_photo_count().await, Some(1));
    }

    #[tokio::test]
    async fn older_query_cannot_overwrite_newer_state() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-15")]),
            EchoCaptioner::default(),
        );

        // Sequence 1 starts, then sequence 2 starts and finishes first.
        let first = session.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        session.publish(first, QueryState::Loading);
        let outcome = session.run(QueryDate::new(3, 16).unwrap()).await;
        assert_eq!(outcome, QueryOutcome::Completed(QueryState::NoResults));

        assert!(!session.publish(first, QueryState::error()));
        assert_eq!(session.state(), QueryState::NoResults);
    }

    #[tokio::test]
    async fn outcome_without_loading_is_rejected() {
        let session = seeded(StaticSource::new(vec![]), EchoCaptioner::default());

        assert!(!session.publish(1, QueryState::NoResults));
        assert_eq!(session.state(), QueryState::Idle);

        assert!(session.publish(1, QueryState::Loading));
        assert!(session.publish(1, QueryState::NoResults));
        assert!(!session.publish(1, QueryState::error()));
        assert_eq!(session.state(), QueryState::NoResults);
    }

    #[tokio::test]
    async fn concurrent_queries_publish_latest_only() {
        let session = seeded(
            StaticSource::new(vec![photo(1, "1990-03-15")]),
            EchoCaptioner::default(),
        );

        let (a, b) = tokio::join!(
            session.run(QueryDate::new(3, 15).unwrap()),
            session.run(QueryDate::new(3, 16).unwrap()),
        );

        // Both futures start before either finishes, so sequence 2 wins.
        assert!(matches!(a, QueryOutcome::Superseded { sequence: 1, latest: 2 }));
        assert_eq!(b, QueryOutcome::Completed(QueryState::NoResults));
        assert_eq!(session.state(), QueryState::NoResults);
        assert_eq!(session.source.calls.load(Ordering::SeqCst), 1);
    }
}
