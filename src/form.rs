//! Review form logic: the star rating selector, input validation and the
//! submission flow. The form itself is reached through [`FormSurface`] and
//! the visitor is told about outcomes through [`Notifier`].

use crate::api::{HttpClient, ReviewRepository};
use crate::error::ValidationError;
use crate::models::review::ReviewSubmission;
use leptos::logging::error;

pub const REVIEW_FORM_ID: &str = "review-form";
pub const MIN_REVIEW_CHARS: usize = 10;
pub const MAX_REVIEW_CHARS: usize = 2000;
pub const MAX_RATING: u8 = 5;

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your review has been submitted and is pending approval.";
pub const FAILURE_MESSAGE: &str = "Failed to submit review. Please try again.";

/// Hover and committed state of the five rating controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSelection {
    hovered: Option<u8>,
    selected: Option<u8>,
}

impl RatingSelection {
    pub fn hover(&mut self, value: u8) {
        self.hovered = Some(value);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn select(&mut self, value: u8) {
        self.selected = Some(value);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// Control `value` lights up while any control at or above it is hovered.
    pub fn is_hovered(&self, value: u8) -> bool {
        self.hovered.is_some_and(|hovered| value <= hovered)
    }

    pub fn is_selected(&self, value: u8) -> bool {
        self.selected.is_some_and(|selected| value <= selected)
    }

    /// Value for the bound rating field; empty when nothing is selected.
    pub fn field_value(&self) -> String {
        self.selected.map(|value| value.to_string()).unwrap_or_default()
    }
}

/// Raw values read from the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub rating: Option<i64>,
    pub review_text: String,
    pub reviewer_name: String,
}

/// Checks the input in display order and stops at the first problem.
pub fn validate(input: &FormInput) -> Result<ReviewSubmission, ValidationError> {
    let rating = input
        .rating
        .filter(|rating| (1..=i64::from(MAX_RATING)).contains(rating))
        .ok_or(ValidationError::MissingRating)?;

    let review_text = input.review_text.trim();
    let length = review_text.chars().count();
    if length < MIN_REVIEW_CHARS {
        return Err(ValidationError::TooShort);
    }
    if length > MAX_REVIEW_CHARS {
        return Err(ValidationError::TooLong);
    }

    let reviewer_name = input.reviewer_name.trim();
    Ok(ReviewSubmission {
        // in 1..=5 after the filter above
        rating: rating as u8,
        review_text: review_text.to_string(),
        reviewer_name: (!reviewer_name.is_empty()).then(|| reviewer_name.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

pub trait Notifier {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Interactive state of the review form.
pub trait FormSurface {
    fn is_busy(&self) -> bool;

    /// Disables the submit control and shows the busy label, or restores it.
    fn set_busy(&self, busy: bool);

    /// Clears every field and the rating selector.
    fn reset(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    Invalid(ValidationError),
    Submitted,
    Failed,
}

/// Synchronous half of a submit event. Validates, and on success marks the
/// form busy before returning, so a second submit event arriving while the
/// request is in flight is ignored.
pub fn begin_submission<F, N>(
    form: &F,
    notifier: &N,
    input: &FormInput,
) -> Result<ReviewSubmission, SubmitOutcome>
where
    F: FormSurface,
    N: Notifier,
{
    if form.is_busy() {
        return Err(SubmitOutcome::Ignored);
    }
    match validate(input) {
        Ok(submission) => {
            form.set_busy(true);
            Ok(submission)
        }
        Err(err) => {
            notifier.notify(&err.to_string(), NoticeKind::Error);
            Err(SubmitOutcome::Invalid(err))
        }
    }
}

/// Sends a validated submission and reports the result. The form is always
/// released afterwards.
pub async fn finish_submission<C, F, N>(
    repository: &ReviewRepository<C>,
    form: &F,
    notifier: &N,
    submission: ReviewSubmission,
) -> SubmitOutcome
where
    C: HttpClient,
    F: FormSurface,
    N: Notifier,
{
    let outcome = match repository.submit_review(submission).await {
        Ok(()) => {
            notifier.notify(SUCCESS_MESSAGE, NoticeKind::Success);
            form.reset();
            SubmitOutcome::Submitted
        }
        Err(err) => {
            error!("[FORM] Submit error: {err}");
            notifier.notify(FAILURE_MESSAGE, NoticeKind::Error);
            SubmitOutcome::Failed
        }
    };
    form.set_busy(false);
    outcome
}

/// Full handling of one submit event.
pub async fn submit_review_form<C, F, N>(
    repository: &ReviewRepository<C>,
    form: &F,
    notifier: &N,
    input: &FormInput,
) -> SubmitOutcome
where
    C: HttpClient,
    F: FormSurface,
    N: Notifier,
{
    match begin_submission(form, notifier, input) {
        Ok(submission) => finish_submission(repository, form, notifier, submission).await,
        Err(outcome) => outcome,
    }
}
