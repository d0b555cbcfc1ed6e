use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::modules::catalog::adapters::outbound::screening_notifier::ScreeningNotifier;
use crate::modules::catalog::core::events::ScreeningCreatedEvent;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, StorageError,
};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::use_cases::create_screening::command::ScreeningDraft;
use crate::modules::catalog::use_cases::create_screening::outcome::{
    CreatedScreening, NotificationOutcome,
};
use crate::modules::catalog::use_cases::create_screening::validate::{
    ValidScreening, validate_draft,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateScreeningError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("movie {0} does not exist")]
    UnknownMovie(Uuid),

    #[error("screen {0} does not exist")]
    UnknownScreen(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persists a screening, then broadcasts `ScreeningCreatedEvent`.
///
/// The persist is the durability boundary. Once `save` returns, the result
/// is a success for the caller no matter what the broadcast does. The
/// broadcast always runs on a task owned by the handler, so dropping the
/// caller's future after the persist cannot cancel it.
pub struct CreateScreeningHandler {
    movies: Arc<dyn MovieRepository>,
    screens: Arc<dyn ScreenRepository>,
    screenings: Arc<dyn ScreeningRepository>,
    notifier: Arc<ScreeningNotifier>,
    in_flight: Mutex<JoinSet<()>>,
}

impl CreateScreeningHandler {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        screens: Arc<dyn ScreenRepository>,
        screenings: Arc<dyn ScreeningRepository>,
        notifier: Arc<ScreeningNotifier>,
    ) -> Self {
        Self {
            movies,
            screens,
            screenings,
            notifier,
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    /// Persists and then waits for the notification outcome.
    #[tracing::instrument(skip(self, draft))]
    pub async fn handle(&self, draft: ScreeningDraft) -> Result<CreatedScreening, CreateScreeningError> {
        let screening = self.persist(draft).await?;
        let outcome = self.dispatch(&screening);
        let notification = outcome.await.unwrap_or_else(|_| NotificationOutcome::Failed {
            attempts: 0,
            reason: "notification task ended without an outcome".into(),
        });
        Ok(CreatedScreening {
            screening,
            notification,
        })
    }

    /// Persists and returns without waiting for the broker.
    #[tracing::instrument(skip(self, draft))]
    pub async fn handle_detached(
        &self,
        draft: ScreeningDraft,
    ) -> Result<CreatedScreening, CreateScreeningError> {
        let screening = self.persist(draft).await?;
        drop(self.dispatch(&screening));
        Ok(CreatedScreening {
            screening,
            notification: NotificationOutcome::Dispatched,
        })
    }

    /// Waits up to `limit` for broadcasts still in flight and returns how many
    /// were abandoned. Called once on shutdown.
    pub async fn drain_notifications(&self, limit: Duration) -> usize {
        let mut pending = std::mem::take(&mut *self.lock_in_flight());
        if pending.is_empty() {
            return 0;
        }
        tracing::info!(pending = pending.len(), "waiting for in-flight notifications");
        let drained = tokio::time::timeout(limit, async {
            while pending.join_next().await.is_some() {}
        })
        .await;
        match drained {
            Ok(()) => 0,
            Err(_) => {
                let abandoned = pending.len();
                tracing::warn!(abandoned, "shutdown abandoned notifications still retrying");
                abandoned
            }
        }
    }

    // Must not await: nothing may sit between a completed save and the spawn.
    fn dispatch(&self, screening: &Screening) -> oneshot::Receiver<NotificationOutcome> {
        let event = ScreeningCreatedEvent::from_persisted(screening);
        let notifier = self.notifier.clone();
        let (sender, receiver) = oneshot::channel();

        let mut in_flight = self.lock_in_flight();
        while in_flight.try_join_next().is_some() {}
        in_flight.spawn(async move {
            let outcome = notifier.notify(&event).await;
            let _ = sender.send(outcome);
        });
        receiver
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn persist(&self, draft: ScreeningDraft) -> Result<Screening, CreateScreeningError> {
        if let Some(ignored) = draft.id {
            tracing::debug!(%ignored, "discarding caller supplied screening id");
        }
        let valid = validate_draft(draft)?;
        self.ensure_references_exist(&valid).await?;

        let screening = valid.with_identity(Uuid::now_v7());
        let saved = self.screenings.save(screening).await.map_err(|err| {
            tracing::error!(error = %err, "screening not persisted");
            CreateScreeningError::Storage(err)
        })?;
        tracing::info!(
            screening_id = %saved.id,
            movie_id = %saved.movie_id,
            screen_id = %saved.screen_id,
            "screening persisted"
        );
        Ok(saved)
    }

    async fn ensure_references_exist(&self, valid: &ValidScreening) -> Result<(), CreateScreeningError> {
        if self.movies.find_by_id(valid.movie_id).await?.is_none() {
            return Err(CreateScreeningError::UnknownMovie(valid.movie_id));
        }
        if self.screens.find_by_id(valid.screen_id).await?.is_none() {
            return Err(CreateScreeningError::UnknownScreen(valid.screen_id));
        }
        Ok(())
    }
}
