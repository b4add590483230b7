use crate::error::BookingError;
use crate::models::booking_model::BookingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Confirm,
    Cancel,
}

impl BookingAction {
    /// Maps a requested target status to the action that produces it.
    /// PENDING is the initial state only; nothing moves a booking back to it.
    pub fn for_target(target: BookingStatus) -> Option<BookingAction> {
        match target {
            BookingStatus::Confirmed => Some(BookingAction::Confirm),
            BookingStatus::Cancelled => Some(BookingAction::Cancel),
            BookingStatus::Pending => None,
        }
    }

    pub fn target(&self) -> BookingStatus {
        match self {
            BookingAction::Confirm => BookingStatus::Confirmed,
            BookingAction::Cancel => BookingStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: BookingStatus,
    pub to: BookingStatus,
    /// Value to write, `None` leaves the stored flag untouched.
    pub is_paid: Option<bool>,
}

/// Allowed transitions:
/// PENDING --confirm--> CONFIRMED (sets is_paid),
/// PENDING --cancel--> CANCELLED,
/// CONFIRMED --cancel--> CANCELLED.
/// CANCELLED is terminal; anything else is an invalid transition.
pub fn plan_transition(
    current: BookingStatus,
    action: BookingAction,
) -> Result<TransitionPlan, BookingError> {
    match (current, action) {
        (BookingStatus::Pending, BookingAction::Confirm) => Ok(TransitionPlan {
            from: current,
            to: BookingStatus::Confirmed,
            is_paid: Some(true),
        }),
        (BookingStatus::Pending, BookingAction::Cancel)
        | (BookingStatus::Confirmed, BookingAction::Cancel) => Ok(TransitionPlan {
            from: current,
            to: BookingStatus::Cancelled,
            is_paid: None,
        }),
        _ => Err(BookingError::InvalidTransition {
            from: current,
            to: action.target(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_from_pending_sets_is_paid() {
        let plan = plan_transition(BookingStatus::Pending, BookingAction::Confirm).unwrap();
        assert_eq!(plan.to, BookingStatus::Confirmed);
        assert_eq!(plan.is_paid, Some(true));
    }

    #[test]
    fn cancel_from_pending_leaves_is_paid_alone() {
        let plan = plan_transition(BookingStatus::Pending, BookingAction::Cancel).unwrap();
        assert_eq!(plan.to, BookingStatus::Cancelled);
        assert_eq!(plan.is_paid, None);
    }

    #[test]
    fn cancel_from_confirmed_is_allowed() {
        let plan = plan_transition(BookingStatus::Confirmed, BookingAction::Cancel).unwrap();
        assert_eq!(plan.to, BookingStatus::Cancelled);
        assert_eq!(plan.is_paid, None);
    }

    #[test]
    fn confirm_from_confirmed_is_rejected() {
        let err = plan_transition(BookingStatus::Confirmed, BookingAction::Confirm).unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition {
                from: BookingStatus::Confirmed,
                to: BookingStatus::Confirmed
            }
        ));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(plan_transition(BookingStatus::Cancelled, BookingAction::Confirm).is_err());
        assert!(plan_transition(BookingStatus::Cancelled, BookingAction::Cancel).is_err());
    }

    #[test]
    fn no_action_targets_pending() {
        assert_eq!(BookingAction::for_target(BookingStatus::Pending), None);
        assert_eq!(
            BookingAction::for_target(BookingStatus::Confirmed),
            Some(BookingAction::Confirm)
        );
        assert_eq!(
            BookingAction::for_target(BookingStatus::Cancelled),
            Some(BookingAction::Cancel)
        );
    }
}
