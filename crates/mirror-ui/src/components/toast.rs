use crate::core::store::{AppStore, update_store};
use crate::core::toast::{Toast, ToastKind, ToastTimers};
use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::use_selector;

const TOAST_LIFETIME_MS: u32 = 4000;

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let on_dismiss = Callback::from(|id: u64| {
        update_store(|store| store.toasts.dismiss(id));
    });
    let timers = use_mut_ref(ToastTimers::<Timeout>::default);
    {
        let timers = timers.clone();
        let on_dismiss = on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Rc<Vec<Toast>>| {
                timers.borrow_mut().sync(list, |id| {
                    let on_dismiss = on_dismiss.clone();
                    Timeout::new(TOAST_LIFETIME_MS, move || on_dismiss.emit(id))
                });
                || ()
            },
            toasts.clone(),
        );
    }
    use_effect_with_deps(move |_| move || timers.borrow_mut().clear(), ());

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| render_toast(toast, on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>) -> Html {
    let class = match toast.kind {
        ToastKind::Info => "info",
        ToastKind::Success => "success",
        ToastKind::Error => "error",
    };
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div class={classes!("toast", class)} role="status">
            <span>{toast.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
