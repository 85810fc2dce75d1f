//! Page section controllers.
//!
//! Each controller owns one section of the reviews page: it shows skeletons,
//! fetches, renders, and degrades the section on failure. Failures never
//! propagate past a controller.

use crate::api::{HttpClient, ReviewRepository};
use crate::models::review::{Review, ReviewFilter};
use crate::render::{self, ReviewStats};
use leptos::logging::{error, log};

pub const FEATURED_GRID_ID: &str = "featured-reviews-grid";
pub const ALL_REVIEWS_GRID_ID: &str = "all-reviews-grid";
pub const REVIEW_STATS_ID: &str = "review-stats";

const FEATURED_LIMIT: u32 = 6;
const ALL_REVIEWS_LIMIT: u32 = 100;
const FEATURED_SKELETONS: usize = 3;
const ALL_REVIEWS_SKELETONS: usize = 6;

/// The parts of the page a controller may touch, addressed by element id.
pub trait PageSurface {
    fn has_element(&self, id: &str) -> bool;

    /// Replaces the element's content with `html`.
    fn set_html(&self, id: &str, html: &str);

    fn hide(&self, id: &str);

    /// Hides the closest `.section` ancestor of the element, if any.
    fn hide_section(&self, id: &str);

    /// Starts reveal-on-scroll for freshly rendered content of the element.
    fn reveal(&self, id: &str);
}

/// How a section ended up after its controller ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    /// The container is not on this page.
    Absent,
    Rendered(usize),
    /// Nothing to show; the empty state is on screen.
    Empty,
    /// Nothing to show; the section was hidden.
    Hidden,
    Failed,
}

/// Featured reviews. An empty result hides the whole section, and so does a
/// failed fetch.
pub async fn load_featured_reviews<C, P>(repository: &ReviewRepository<C>, page: &P) -> SectionOutcome
where
    C: HttpClient,
    P: PageSurface,
{
    if !page.has_element(FEATURED_GRID_ID) {
        return SectionOutcome::Absent;
    }

    page.set_html(FEATURED_GRID_ID, &render::skeletons(FEATURED_SKELETONS));
    match repository.fetch_reviews(ReviewFilter::featured(FEATURED_LIMIT)).await {
        Ok(reviews) if reviews.is_empty() => {
            page.hide_section(FEATURED_GRID_ID);
            SectionOutcome::Hidden
        }
        Ok(reviews) => {
            render_review_cards(page, FEATURED_GRID_ID, &reviews);
            SectionOutcome::Rendered(reviews.len())
        }
        Err(err) => {
            error!("[REVIEWS] Failed to load featured reviews: {err}");
            page.hide_section(FEATURED_GRID_ID);
            SectionOutcome::Failed
        }
    }
}

/// Every approved review plus the stats banner. A failed fetch swaps the
/// grid for a static error message and leaves the stats alone.
pub async fn load_all_reviews<C, P>(repository: &ReviewRepository<C>, page: &P) -> SectionOutcome
where
    C: HttpClient,
    P: PageSurface,
{
    if !page.has_element(ALL_REVIEWS_GRID_ID) {
        return SectionOutcome::Absent;
    }

    page.set_html(ALL_REVIEWS_GRID_ID, &render::skeletons(ALL_REVIEWS_SKELETONS));
    match repository.fetch_reviews(ReviewFilter::all(ALL_REVIEWS_LIMIT)).await {
        Ok(reviews) => {
            render_review_cards(page, ALL_REVIEWS_GRID_ID, &reviews);
            render_review_stats(page, &reviews);
            if reviews.is_empty() {
                SectionOutcome::Empty
            } else {
                SectionOutcome::Rendered(reviews.len())
            }
        }
        Err(err) => {
            error!("[REVIEWS] Failed to load reviews: {err}");
            page.set_html(ALL_REVIEWS_GRID_ID, &render::load_error());
            SectionOutcome::Failed
        }
    }
}

fn render_review_cards<P: PageSurface>(page: &P, id: &str, reviews: &[Review]) {
    page.set_html(id, &render::review_cards(reviews));
    if !reviews.is_empty() {
        page.reveal(id);
    }
}

/// Fills the stats banner, or hides it when there is nothing to summarize.
pub fn render_review_stats<P: PageSurface>(page: &P, reviews: &[Review]) {
    if !page.has_element(REVIEW_STATS_ID) {
        return;
    }
    match ReviewStats::from_reviews(reviews) {
        Some(stats) => {
            page.set_html(REVIEW_STATS_ID, &render::review_stats(&stats));
            page.reveal(REVIEW_STATS_ID);
        }
        None => page.hide(REVIEW_STATS_ID),
    }
}

/// Runs every section controller concurrently. Called once when the page is
/// ready.
pub async fn load_page<C, P>(repository: &ReviewRepository<C>, page: &P)
where
    C: HttpClient,
    P: PageSurface,
{
    let (featured, all) = futures::join!(
        load_featured_reviews(repository, page),
        load_all_reviews(repository, page)
    );
    log!("[REVIEWS] Page loaded: featured={featured:?}, all={all:?}");
}


#[cfg(test)]
mod tests {
    use super::testing::{PageCall, RecordingPage};
    use super::*;
    use crate::api::testing::{reply, repository, review_row, StubHttp};
    use serde_json::Value;

    fn rows(ratings: &[i64]) -> String {
        Value::Array(
            ratings
                .iter()
                .enumerate()
                .map(|(i, rating)| review_row(i as i64 + 1, *rating, Some("Sam")))
                .collect(),
        )
        .to_string()
    }

    fn serving(body: String) -> StubHttp {
        StubHttp::new(move |_| reply(200, &body))
    }

    #[tokio::test]
    async fn featured_is_noop_without_container() {
        let repository = repository(serving(rows(&[5])));
        let page = RecordingPage::with(&[ALL_REVIEWS_GRID_ID]);

        let outcome = load_featured_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Absent);
        assert!(page.calls().is_empty());
        assert!(repository.client().http().requests().is_empty());
    }

    #[tokio::test]
    async fn featured_shows_skeletons_then_cards() {
        let repository = repository(serving(rows(&[5, 4])));
        let page = RecordingPage::with(&[FEATURED_GRID_ID]);

        let outcome = load_featured_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Rendered(2));
        let calls = page.calls();
        assert_eq!(
            calls[0],
            PageCall::SetHtml(FEATURED_GRID_ID.into(), render::skeletons(3))
        );
        let cards = page.html(FEATURED_GRID_ID).unwrap();
        assert_eq!(cards.matches("review-card reveal").count(), 2);
        assert_eq!(calls.last(), Some(&PageCall::Reveal(FEATURED_GRID_ID.into())));

        let requests = repository.client().http().requests();
        assert!(requests[0].uri.ends_with("featured=eq.true&limit=6"));
    }

    #[tokio::test]
    async fn featured_hides_section_when_nothing_is_featured() {
        let repository = repository(serving("[]".into()));
        let page = RecordingPage::with(&[FEATURED_GRID_ID]);

        let outcome = load_featured_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Hidden);
        assert!(page.saw(&PageCall::HideSection(FEATURED_GRID_ID.into())));
    }

    #[tokio::test]
    async fn featured_hides_section_on_failure() {
        let repository = repository(StubHttp::responding(500, "oops"));
        let page = RecordingPage::with(&[FEATURED_GRID_ID]);

        let outcome = load_featured_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Failed);
        assert!(page.saw(&PageCall::HideSection(FEATURED_GRID_ID.into())));
        assert_eq!(page.html(FEATURED_GRID_ID), Some(render::skeletons(3)));
    }

    #[tokio::test]
    async fn all_reviews_replace_grid_with_error_on_failure() {
        let repository = repository(StubHttp::responding(500, "oops"));
        let page = RecordingPage::with(&[ALL_REVIEWS_GRID_ID, REVIEW_STATS_ID]);

        let outcome = load_all_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Failed);
        assert_eq!(page.html(ALL_REVIEWS_GRID_ID), Some(render::load_error()));
        assert!(!page.saw(&PageCall::HideSection(ALL_REVIEWS_GRID_ID.into())));
        assert_eq!(page.html(REVIEW_STATS_ID), None);
        assert!(!page.saw(&PageCall::Hide(REVIEW_STATS_ID.into())));
    }

    #[tokio::test]
    async fn all_reviews_render_cards_and_stats() {
        let repository = repository(serving(rows(&[5, 4, 5])));
        let page = RecordingPage::with(&[ALL_REVIEWS_GRID_ID, REVIEW_STATS_ID]);

        let outcome = load_all_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Rendered(3));
        assert_eq!(page.calls()[0], PageCall::SetHtml(ALL_REVIEWS_GRID_ID.into(), render::skeletons(6)));
        let stats = page.html(REVIEW_STATS_ID).unwrap();
        assert!(stats.contains(">4.7<"));
        assert!(page.saw(&PageCall::Reveal(ALL_REVIEWS_GRID_ID.into())));
        assert!(page.saw(&PageCall::Reveal(REVIEW_STATS_ID.into())));

        let requests = repository.client().http().requests();
        assert!(requests[0].uri.ends_with("reviews?approved=eq.true&order=created_at.desc&limit=100"));
    }

    #[tokio::test]
    async fn all_reviews_empty_shows_empty_state_and_hides_stats() {
        let repository = repository(serving("[]".into()));
        let page = RecordingPage::with(&[ALL_REVIEWS_GRID_ID, REVIEW_STATS_ID]);

        let outcome = load_all_reviews(&repository, &page).await;

        assert_eq!(outcome, SectionOutcome::Empty);
        assert_eq!(page.html(ALL_REVIEWS_GRID_ID), Some(render::empty_state()));
        assert!(page.saw(&PageCall::Hide(REVIEW_STATS_ID.into())));
        assert!(!page.saw(&PageCall::Reveal(ALL_REVIEWS_GRID_ID.into())));
    }

    #[tokio::test]
    async fn stats_are_skipped_without_container() {
        let repository = repository(serving(rows(&[3])));
        let page = RecordingPage::with(&[ALL_REVIEWS_GRID_ID]);

        load_all_reviews(&repository, &page).await;

        assert!(page.calls().iter().all(|call| !matches!(
            call,
            PageCall::SetHtml(id, _) | PageCall::Hide(id) | PageCall::Reveal(id) if id == REVIEW_STATS_ID
        )));
    }

    #[tokio::test]
    async fn page_load_runs_both_sections_independently() {
        let featured_only = "featured=eq.true";
        let all_rows = rows(&[4, 2]);
        let repository = repository(StubHttp::new(move |request| {
            if request.uri().to_string().contains(featured_only) {
                reply(502, "")
            } else {
                reply(200, &all_rows)
            }
        }));
        let page = RecordingPage::with(&[FEATURED_GRID_ID, ALL_REVIEWS_GRID_ID, REVIEW_STATS_ID]);

        load_page(&repository, &page).await;

        assert_eq!(repository.client().http().requests().len(), 2);
        assert!(page.saw(&PageCall::HideSection(FEATURED_GRID_ID.into())));
        let grid = page.html(ALL_REVIEWS_GRID_ID).unwrap();
        assert_eq!(grid.matches("review-card reveal").count(), 2);
    }
}
