use leptos::*;
use crate::form::{RatingSelection, MAX_RATING};
use crate::render::star_icon;

/// Five clickable stars plus the hidden `review-rating` field they write to.
/// Hover lights up every star up to the pointer; a click commits the rating
/// and keeps it lit after the pointer leaves.
#[component]
pub fn StarSelector(selection: RwSignal<RatingSelection>) -> impl IntoView {
    let stars = (1..=MAX_RATING)
        .map(|value| {
            view! {
                <button
                    type="button"
                    class="star-select-btn"
                    data-value=value
                    aria-label=format!("{} star{}", value, if value == 1 { "" } else { "s" })
                    class:hovered=move || selection.with(|s| s.is_hovered(value))
                    class:selected=move || selection.with(|s| s.is_selected(value))
                    on:mouseenter=move |_| selection.update(|s| s.hover(value))
                    on:mouseleave=move |_| selection.update(|s| s.leave())
                    on:click=move |_| selection.update(|s| s.select(value))
                    inner_html=star_icon()
                ></button>
            }
        })
        .collect_view();

    view! {
        <div class="star-selector">{stars}</div>
        <input
            type="hidden"
            id="review-rating"
            name="rating"
            prop:value=move || selection.with(|s| s.field_value())
        />
    }
}
