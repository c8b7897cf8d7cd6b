use crate::core::logic::status_tone;
use mirror_api_models::CrawlStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StatusTagProps {
    pub status: CrawlStatus,
}

#[function_component(StatusTag)]
pub(crate) fn status_tag(props: &StatusTagProps) -> Html {
    let tone = status_tone(&props.status);
    html! {
        <span class={classes!("tag", tone.class())}>{props.status.as_str().to_uppercase()}</span>
    }
}
