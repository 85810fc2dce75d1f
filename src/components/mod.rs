pub mod featured_reviews;
pub mod review_form;
pub mod reviews_list;
pub mod star_selector;
