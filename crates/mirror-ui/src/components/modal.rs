//! Dialog frame shared by the admin forms.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub title: AttrValue,
    pub children: Children,
    pub on_cancel: Callback<()>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or(AttrValue::Static("Submit"))]
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_submit = {
        let cb = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            cb.emit(());
        })
    };

    html! {
        <div class="modal-backdrop">
            <form class="modal" role="dialog" aria-modal="true" onsubmit={on_submit}>
                <header class="modal-head">
                    <h3>{props.title.clone()}</h3>
                    <button type="button" class="ghost" aria-label="Close" onclick={on_cancel.clone()}>{"✕"}</button>
                </header>
                <div class="modal-body">
                    {for props.children.iter()}
                    {if let Some(error) = &props.error {
                        html! { <p class="error-text">{error}</p> }
                    } else { html! {} }}
                </div>
                <footer class="modal-actions">
                    <button type="button" class="ghost" onclick={on_cancel}>{"Cancel"}</button>
                    <button type="submit" class="solid" disabled={props.busy}>
                        {if props.busy { AttrValue::Static("Saving…") } else { props.submit_label.clone() }}
                    </button>
                </footer>
            </form>
        </div>
    }
}
