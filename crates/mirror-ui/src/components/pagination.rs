use crate::core::logic::{PageItem, page_window};
use yew::prelude::*;

/// Pages shown on each side of the current one.
const PAGE_SPAN: u32 = 2;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub current: u32,
    pub pages: u32,
    pub on_change: Callback<u32>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let current = props.current;
    let disabled = props.disabled;
    let button = |page: u32, label: String, active: bool, enabled: bool| {
        let on_change = props.on_change.clone();
        let onclick = Callback::from(move |_| on_change.emit(page));
        html! {
            <button
                class={classes!("page", active.then_some("active"))}
                disabled={disabled || !enabled}
                aria-current={active.then_some("page")}
                {onclick}
            >
                {label}
            </button>
        }
    };

    html! {
        <nav class={classes!("pagination", disabled.then_some("disabled"))} aria-label="Pagination">
            {button(current.saturating_sub(1), "‹".to_string(), false, current > 1)}
            {for page_window(current, props.pages, PAGE_SPAN).into_iter().map(|item| match item {
                PageItem::Page(page) => button(page, page.to_string(), page == current, page != current),
                PageItem::Gap => html! { <span class="gap">{"…"}</span> },
            })}
            {button(current.saturating_add(1), "›".to_string(), false, current < props.pages)}
        </nav>
    }
}
