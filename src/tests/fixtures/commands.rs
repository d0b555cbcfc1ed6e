// Builder for create-screening drafts. Defaults describe a complete, valid draft
// pointing at random (unknown) references; tests override what they need.

use crate::modules::catalog::use_cases::create_screening::command::ScreeningDraft;
use crate::tests::fixtures::catalog::show_time;
use chrono::NaiveDateTime;
use uuid::Uuid;

pub struct ScreeningDraftBuilder {
    inner: ScreeningDraft,
}

impl Default for ScreeningDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ScreeningDraftBuilder {
    pub fn new() -> Self {
        Self {
            inner: ScreeningDraft {
                id: None,
                movie_id: Some(Uuid::now_v7()),
                screen_id: Some(Uuid::now_v7()),
                show_time: Some(show_time()),
                price_cents: Some(999),
            },
        }
    }

    pub fn id(mut self, v: Option<Uuid>) -> Self {
        self.inner.id = v;
        self
    }

    pub fn movie_id(mut self, v: Option<Uuid>) -> Self {
        self.inner.movie_id = v;
        self
    }

    pub fn screen_id(mut self, v: Option<Uuid>) -> Self {
        self.inner.screen_id = v;
        self
    }

    pub fn show_time(mut self, v: Option<NaiveDateTime>) -> Self {
        self.inner.show_time = v;
        self
    }

    pub fn price_cents(mut self, v: Option<i64>) -> Self {
        self.inner.price_cents = v;
        self
    }

    pub fn build(self) -> ScreeningDraft {
        self.inner
    }
}

#[cfg(test)]
mod screening_draft_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_is_complete() {
        let built = ScreeningDraftBuilder::default().build();
        assert!(built.id.is_none());
        assert!(built.movie_id.is_some());
        assert!(built.screen_id.is_some());
        assert_eq!(built.show_time, Some(show_time()));
        assert_eq!(built.price_cents, Some(999));
    }

    #[rstest]
    fn setters_override_fields() {
        let id = Uuid::now_v7();
        let built = ScreeningDraftBuilder::new()
            .id(Some(id))
            .movie_id(None)
            .price_cents(None)
            .build();
        assert_eq!(built.id, Some(id));
        assert_eq!(built.movie_id, None);
        assert_eq!(built.price_cents, None);
    }
}
