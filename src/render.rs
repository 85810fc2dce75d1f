//! HTML fragments for the review sections.
//!
//! Everything here is a pure function from review data to markup. Inserting
//! the markup into the page is the job of [`crate::dom`].

use crate::models::review::Review;
use chrono::{DateTime, Utc};

const STAR_POINTS: &str = "12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2";
const ANONYMOUS: &str = "Anonymous";

/// Escapes text for use inside element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Five star glyphs, the first `rating` filled. The value is not clamped, so
/// anything above 5 renders all filled and anything below 1 all outlined.
pub fn render_stars(rating: i64) -> String {
    (1..=5)
        .map(|i| {
            if i <= rating {
                format!(
                    r#"<svg class="review-star star-filled" viewBox="0 0 24 24" fill="currentColor"><polygon points="{STAR_POINTS}"/></svg>"#
                )
            } else {
                format!(
                    r#"<svg class="review-star star-empty" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><polygon points="{STAR_POINTS}"/></svg>"#
                )
            }
        })
        .collect()
}

/// Plain star used by the rating selector; fill and hover colors come from CSS.
pub fn star_icon() -> String {
    format!(r#"<svg class="star-icon" viewBox="0 0 24 24"><polygon points="{STAR_POINTS}"/></svg>"#)
}

/// `Mar 9, 2024`
pub fn format_review_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%b %-d, %Y").to_string()
}

/// Name shown on a card, unescaped.
pub fn display_name(review: &Review) -> &str {
    match review.reviewer_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => ANONYMOUS,
    }
}

pub fn avatar_initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// Staggered reveal delay in seconds, capped at 0.6.
pub fn reveal_delay(index: usize) -> f64 {
    (index as f64 * 0.1).min(0.6)
}

pub fn review_card(review: &Review, index: usize) -> String {
    let name = display_name(review);
    let initial = escape_html(&avatar_initial(name));
    let name = escape_html(name);
    let text = escape_html(&review.review_text);
    let date = format_review_date(&review.created_at);
    let delay = reveal_delay(index);
    let stars = render_stars(review.rating);

    format!(
        r#"
    <div class="review-card reveal" style="transition-delay: {delay:.1}s;">
      <div class="review-stars">{stars}</div>
      <p class="review-text">{text}</p>
      <div class="review-author">
        <div class="review-avatar">{initial}</div>
        <div>
          <span class="review-name">{name}</span>
          <span class="review-date">{date}</span>
        </div>
      </div>
    </div>"#
    )
}

/// Cards for every review, or the empty-state card when there are none.
pub fn review_cards(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return empty_state();
    }
    reviews
        .iter()
        .enumerate()
        .map(|(index, review)| review_card(review, index))
        .collect()
}

pub fn empty_state() -> String {
    r#"
    <div class="reviews-empty-state">
      <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" width="48" height="48">
        <path d="M21 15a2 2 0 01-2 2H7l-4 4V5a2 2 0 012-2h14a2 2 0 012 2z"/>
      </svg>
      <h3>No Reviews Yet</h3>
      <p>Be the first to share your experience!</p>
    </div>"#
        .to_string()
}

pub fn load_error() -> String {
    r#"
    <div class="reviews-empty-state">
      <h3>Unable to Load Reviews</h3>
      <p>Please try again later.</p>
    </div>"#
        .to_string()
}

/// Shimmering placeholder cards shown while a fetch is in flight.
pub fn skeletons(count: usize) -> String {
    const SKELETON: &str = r#"
    <div class="review-card review-card-skeleton">
      <div class="shimmer" style="height: 20px; width: 120px; border-radius: 4px; margin-bottom: 12px;"></div>
      <div class="shimmer" style="height: 14px; width: 100%; border-radius: 4px; margin-bottom: 8px;"></div>
      <div class="shimmer" style="height: 14px; width: 80%; border-radius: 4px; margin-bottom: 16px;"></div>
      <div style="display: flex; align-items: center; gap: 10px;">
        <div class="shimmer" style="width: 36px; height: 36px; border-radius: 50%;"></div>
        <div class="shimmer" style="height: 14px; width: 100px; border-radius: 4px;"></div>
      </div>
    </div>"#;
    SKELETON.repeat(count)
}

/// Aggregate figures for the stats banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStats {
    /// Exact mean rating; only the label is rounded.
    pub mean: f64,
    pub total: usize,
}

// One decimal place, with exact ties rounded up. A binary mean can only sit
// exactly on an `x.x5` boundary when it is a whole number of quarters.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        return format!("{:.1}", (value * 10.0).ceil() / 10.0);
    }
    format!("{:.1}", value)
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[Review]) -> Option<Self> {
        if reviews.is_empty() {
            return None;
        }
        let total = reviews.len();
        let sum: i64 = reviews.iter().map(|review| review.rating).sum();
        Some(Self {
            mean: sum as f64 / total as f64,
            total,
        })
    }

    pub fn average_label(&self) -> String {
        one_decimal(self.mean)
    }

    /// Star count for the average: the mean rounded to the nearest integer.
    pub fn rounded_stars(&self) -> i64 {
        self.mean.round() as i64
    }

    pub fn noun(&self) -> &'static str {
        if self.total == 1 {
            "Review"
        } else {
            "Reviews"
        }
    }

    pub fn count_label(&self) -> String {
        format!("{} {}", self.total, self.noun())
    }
}

pub fn review_stats(stats: &ReviewStats) -> String {
    format!(
        r#"
    <div class="review-stats reveal">
      <div class="review-stat-item">
        <span class="review-stat-value">{average}</span>
        <div class="review-stars">{stars}</div>
        <span class="review-stat-label">Average Rating</span>
      </div>
      <div class="review-stat-item">
        <span class="review-stat-value">{total}</span>
        <span class="review-stat-label">Total {noun}</span>
      </div>
    </div>"#,
        average = stats.average_label(),
        stars = render_stars(stats.rounded_stars()),
        total = stats.total,
        noun = stats.noun(),
    )
}
