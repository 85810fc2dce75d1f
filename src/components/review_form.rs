use leptos::*;
use leptos::ev::SubmitEvent;
use leptos::logging::log;
use crate::api::{BrowserHttp, ReviewRepository};
use crate::components::star_selector::StarSelector;
use crate::dom::ToastNotifier;
use crate::form::{
    begin_submission, finish_submission, FormInput, FormSurface, RatingSelection, REVIEW_FORM_ID,
};

// Form state lives in signals; the submission flow reaches it through FormSurface.
#[derive(Clone, Copy)]
struct SignalForm {
    selection: RwSignal<RatingSelection>,
    review_text: RwSignal<String>,
    reviewer_name: RwSignal<String>,
    busy: RwSignal<bool>,
}

impl SignalForm {
    fn new() -> Self {
        Self {
            selection: create_rw_signal(RatingSelection::default()),
            review_text: create_rw_signal(String::new()),
            reviewer_name: create_rw_signal(String::new()),
            busy: create_rw_signal(false),
        }
    }

    fn input(&self) -> FormInput {
        FormInput {
            rating: self.selection.get_untracked().selected().map(i64::from),
            review_text: self.review_text.get_untracked(),
            reviewer_name: self.reviewer_name.get_untracked(),
        }
    }
}

impl FormSurface for SignalForm {
    fn is_busy(&self) -> bool {
        self.busy.get_untracked()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn reset(&self) {
        self.review_text.set(String::new());
        self.reviewer_name.set(String::new());
        self.selection.update(|s| s.reset());
    }
}

#[component]
pub fn ReviewForm(repository: ReviewRepository<BrowserHttp>) -> impl IntoView {
    let form = SignalForm::new();
    let repository = store_value(repository);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        // Marks the form busy before anything is awaited.
        let Ok(submission) = begin_submission(&form, &ToastNotifier, &form.input()) else {
            return;
        };

        let repository = repository.get_value();
        spawn_local(async move {
            let outcome = finish_submission(&repository, &form, &ToastNotifier, submission).await;
            log!("[FORM] Submission finished: {:?}", outcome);
        });
    };

    view! {
        <form id=REVIEW_FORM_ID class="review-form" on:submit=handle_submit>
            <div class="form-group">
                <label>{ "Your Rating" }</label>
                <StarSelector selection=form.selection />
            </div>
            <div class="form-group">
                <label for="review-text">{ "Your Review" }</label>
                <textarea
                    id="review-text"
                    name="review_text"
                    rows="5"
                    placeholder="Tell others about your experience"
                    prop:value=move || form.review_text.get()
                    on:input=move |e| form.review_text.set(event_target_value(&e))
                ></textarea>
            </div>
            <div class="form-group">
                <label for="review-name">{ "Your Name (optional)" }</label>
                <input
                    type="text"
                    id="review-name"
                    name="reviewer_name"
                    placeholder="Anonymous"
                    prop:value=move || form.reviewer_name.get()
                    on:input=move |e| form.reviewer_name.set(event_target_value(&e))
                />
            </div>
            <button
                type="submit"
                class="btn btn-primary review-submit-btn"
                prop:disabled=move || form.busy.get()
            >
                {move || {
                    if form.busy.get() {
                        view! { <span class="spinner"></span>" Submitting..." }.into_view()
                    } else {
                        "Submit Review".into_view()
                    }
                }}
            </button>
        </form>
    }
}
