/// Application entry point for the reviews page.
/// Lays out the featured, all-reviews and review-form sections and starts the
/// section controllers once the page is mounted.
use leptos::*;
use leptos::logging::error;
use leptos_meta::*;
use leptos_router::*;
use crate::api::{BrowserHttp, RestClient, ReviewRepository};
use crate::components::{
    featured_reviews::FeaturedReviews, review_form::ReviewForm, reviews_list::ReviewsList,
};
use crate::config::BackendConfig;
use crate::controllers::load_page;
use crate::dom::DomPage;
use crate::render;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/reviews-widget.css"/>
        <Title text="Customer Reviews"/>
        <Router>
            <main>
                <Routes>
                    <Route path="" view=ReviewsPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn ReviewsPage() -> impl IntoView {
    match BackendConfig::from_build_env() {
        Ok(config) => {
            let repository = ReviewRepository::new(RestClient::new(config, BrowserHttp));
            view! { <ReviewSections repository=repository/> }.into_view()
        }
        Err(err) => {
            error!("[CONFIG] Reviews backend not configured: {}", err);
            view! {
                <section class="section">
                    <div class="container" inner_html=render::load_error()></div>
                </section>
            }
            .into_view()
        }
    }
}

#[component]
fn ReviewSections(repository: ReviewRepository<BrowserHttp>) -> impl IntoView {
    // Effects only run in the browser, after the sections are in the document.
    let page_repository = repository.clone();
    create_effect(move |_| {
        let repository = page_repository.clone();
        spawn_local(async move {
            load_page(&repository, &DomPage::new()).await;
        });
    });

    view! {
        <FeaturedReviews/>
        <ReviewsList/>
        <section class="section write-review">
            <div class="container">
                <h2 class="section-title">{ "Write a Review" }</h2>
                <ReviewForm repository=repository/>
            </div>
        </section>
    }
}
