use leptos::*;
use crate::controllers::{ALL_REVIEWS_GRID_ID, REVIEW_STATS_ID};

/// Stats banner and the full review grid. Both start empty; the page
/// controller fills them once the page is ready.
#[component]
pub fn ReviewsList() -> impl IntoView {
    view! {
        <section class="section all-reviews">
            <div class="container">
                <h2 class="section-title">{ "Reviews" }</h2>
                <div id=REVIEW_STATS_ID></div>
                <div id=ALL_REVIEWS_GRID_ID class="reviews-grid"></div>
            </div>
        </section>
    }
}
