use serde::Serialize;

use crate::modules::catalog::core::screening::Screening;

/// What happened to the broadcast that follows a successful persist.
/// Never turned into an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Delivered { attempts: u32 },
    Failed { attempts: u32, reason: String },
    /// Handed to a background task; the caller does not wait for the broker.
    Dispatched,
}

impl NotificationOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => "delivered",
            Self::Failed { .. } => "failed",
            Self::Dispatched => "dispatched",
        }
    }
}

/// A persisted screening plus the fate of its notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedScreening {
    pub screening: Screening,
    pub notification: NotificationOutcome,
}
