use leptos::*;
use crate::controllers::FEATURED_GRID_ID;

#[component]
pub fn FeaturedReviews() -> impl IntoView {
    view! {
        <section class="section featured-reviews">
            <div class="container">
                <h2 class="section-title">{ "What Our Users Say" }</h2>
                <div id=FEATURED_GRID_ID class="reviews-grid"></div>
            </div>
        </section>
    }
}
