//! Failure classification: turns a rejected acquisition into the
//! user-facing `cancelled` / `denied` / `unknown` split.

use screencheck_common::SessionError;
use serde::{Deserialize, Serialize};

use crate::provider::CaptureFailure;

/// Where to draw the line between "the user backed out" and "the user
/// said no" when the platform reports both as a permission refusal.
///
/// Some platforms report a dismissed picker as a permission refusal whose
/// message mentions cancelling. With the default keyword list those are
/// treated as cancellations; an empty list treats every permission
/// refusal as a denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    pub permission_cancel_keywords: Vec<String>,
}

impl ClassificationPolicy {
    /// Every permission refusal is a denial, whatever its wording.
    pub fn strict() -> Self {
        Self {
            permission_cancel_keywords: Vec::new(),
        }
    }

    fn mentions_cancellation(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.permission_cancel_keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|k| message.contains(&k.to_lowercase()))
    }
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            permission_cancel_keywords: vec!["cancel".into()],
        }
    }
}

pub fn classify_failure(failure: &CaptureFailure, policy: &ClassificationPolicy) -> SessionError {
    let category = &failure.category;

    if category.is_abort()
        || (category.is_permission_denied() && policy.mentions_cancellation(&failure.message))
    {
        return SessionError::cancelled();
    }

    if category.is_permission_denied() {
        return SessionError::denied();
    }

    SessionError::unknown(failure.message.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FailureCategory;
    use screencheck_common::types::UNKNOWN_MESSAGE;
    use screencheck_common::SessionErrorKind;

    fn classify(failure: CaptureFailure) -> SessionError {
        classify_failure(&failure, &ClassificationPolicy::default())
    }

    #[test]
    fn abort_is_cancelled() {
        let err = classify(CaptureFailure::abort("The user aborted a request."));
        assert_eq!(err.kind, SessionErrorKind::Cancelled);
        assert_eq!(err, SessionError::cancelled());
    }

    #[test]
    fn abort_is_cancelled_even_without_message() {
        let err = classify(CaptureFailure::abort(""));
        assert_eq!(err.kind, SessionErrorKind::Cancelled);
    }

    #[test]
    fn permission_refusal_mentioning_cancel_is_cancelled() {
        let err = classify(CaptureFailure::named(
            "NotAllowedError",
            "Permission denied by user: picker Cancelled",
        ));
        assert_eq!(err.kind, SessionErrorKind::Cancelled);
    }

    #[test]
    fn plain_permission_refusal_is_denied() {
        let err = classify(CaptureFailure::named(
            "NotAllowedError",
            "Permission denied",
        ));
        assert_eq!(err.kind, SessionErrorKind::Denied);
        assert_eq!(err, SessionError::denied());

        let err = classify(CaptureFailure::named(
            "PermissionDeniedError",
            "Permission denied by system",
        ));
        assert_eq!(err.kind, SessionErrorKind::Denied);
    }

    #[test]
    fn other_failures_keep_their_message() {
        let err = classify(CaptureFailure::named(
            "NotReadableError",
            "Could not start video source",
        ));
        assert_eq!(err.kind, SessionErrorKind::Unknown);
        assert_eq!(err.message, "Could not start video source");
    }

    #[test]
    fn cancel_wording_outside_permission_category_is_unknown() {
        // Only permission refusals consult the keyword list.
        let err = classify(CaptureFailure::new(
            FailureCategory::InvalidState,
            "request cancelled by another request",
        ));
        assert_eq!(err.kind, SessionErrorKind::Unknown);
    }

    #[test]
    fn other_failure_without_message_uses_fallback() {
        let err = classify(CaptureFailure::new(
            FailureCategory::Other("TypeError".into()),
            "",
        ));
        assert_eq!(err.kind, SessionErrorKind::Unknown);
        assert_eq!(err.message, UNKNOWN_MESSAGE);
    }

    // The cancel-versus-deny line for permission refusals depends on how the
    // platform words its errors. These two cases pin down both policies.

    #[test]
    fn strict_policy_treats_cancel_wording_as_denied() {
        let failure = CaptureFailure::permission_denied("user cancelled the prompt");
        let err = classify_failure(&failure, &ClassificationPolicy::strict());
        assert_eq!(err.kind, SessionErrorKind::Denied);
        // Abort still wins regardless of policy.
        let err = classify_failure(&CaptureFailure::abort(""), &ClassificationPolicy::strict());
        assert_eq!(err.kind, SessionErrorKind::Cancelled);
    }

    #[test]
    fn custom_keywords_are_case_insensitive() {
        let policy = ClassificationPolicy {
            permission_cancel_keywords: vec!["Dismissed".into(), "  ".into()],
        };
        let failure = CaptureFailure::permission_denied("picker DISMISSED");
        assert_eq!(
            classify_failure(&failure, &policy).kind,
            SessionErrorKind::Cancelled
        );
        // Blank keywords never match everything.
        let failure = CaptureFailure::permission_denied("Permission denied");
        assert_eq!(
            classify_failure(&failure, &policy).kind,
            SessionErrorKind::Denied
        );
    }
}
