//! Gallery page view.
//!
//! # Design
//! - Every state change goes through [`GalleryState`]; the view only runs
//!   the fetch a transition hands back.
//! - Copy and download never touch server state.
//! - Cross-origin assets are saved through an object URL because browsers
//!   ignore `download` on foreign links.

use crate::app::api::{ApiCtx, MirrorClient};
use crate::app::preferences::{local_offset, page_origin};
use crate::components::pagination::Pagination;
use crate::core::logic::{format_date, is_same_origin};
use crate::core::store::{AppStore, update_store};
use crate::features::gallery::actions::{failure_message, run_fetch};
use crate::features::gallery::state::{GalleryFetch, GalleryState};
use gloo::file::{Blob, ObjectUrl};
use gloo_net::http::Request;
use mirror_api_models::Image;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAnchorElement, HtmlInputElement};
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(GalleryPage)]
pub(crate) fn gallery_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let state = use_selector(|store: &AppStore| store.gallery.clone());

    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(ctx) = api_ctx {
                    transition(&ctx.client, |gallery| Some(gallery.mount()));
                }
                || ()
            },
            (),
        );
    }

    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="error-text">{"Missing API context."}</p>
            </div>
        };
    };
    let client = api_ctx.client;

    let on_query = Callback::from(|event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            update_store(|store| store.gallery.set_query(input.value()));
        }
    });
    let on_search = {
        let client = client.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            transition(&client, GalleryState::submit_search);
        })
    };
    let on_clear = {
        let client = client.clone();
        Callback::from(move |_| transition(&client, GalleryState::clear_search))
    };
    let on_page = {
        let client = client.clone();
        Callback::from(move |page: u32| transition(&client, |gallery| gallery.change_page(page)))
    };

    let searching = state.active_search.clone();
    let body = if state.loading && state.images.is_empty() {
        html! { <div class="loading" aria-busy="true">{"Loading…"}</div> }
    } else if state.images.is_empty() {
        html! { <p class="muted empty">{"No images found."}</p> }
    } else {
        html! {
            <div class={classes!("grid", state.loading.then_some("stale"))}>
                {for state.images.iter().map(|image| image_card(&client, image))}
            </div>
        }
    };

    html! {
        <section class="gallery">
            <h2 class="page-title">{"Image Mirror Gallery"}</h2>
            <form class="search" role="search" onsubmit={on_search}>
                <input
                    type="search"
                    placeholder="Search by title"
                    aria-label="Search by title"
                    value={state.search_query.clone()}
                    oninput={on_query}
                />
                <button type="submit" class="solid">{"Search"}</button>
                {if searching.is_some() || !state.search_query.is_empty() {
                    html! { <button type="button" class="ghost" onclick={on_clear}>{"Clear"}</button> }
                } else { html! {} }}
            </form>
            {if let Some(query) = &searching {
                html! { <p class="muted">{format!("{} result(s) for \"{query}\"", state.total)}</p> }
            } else { html! {} }}
            {body}
            <Pagination
                current={state.page}
                pages={state.page_count()}
                on_change={on_page}
                disabled={!state.pagination_enabled()}
            />
        </section>
    }
}

fn image_card(client: &Rc<MirrorClient>, image: &Image) -> Html {
    let url = client.image_url(&image.local_path);
    let on_copy = {
        let url = url.clone();
        Callback::from(move |_| {
            let url = url.clone();
            yew::platform::spawn_local(async move {
                match copy_to_clipboard(&url).await {
                    Ok(()) => update_store(|store| store.success("Link copied to clipboard")),
                    Err(err) => {
                        tracing::warn!(error = ?err, "clipboard write failed");
                        update_store(|store| store.error("Could not copy link"))
                    }
                };
            });
        })
    };
    let on_download = {
        let url = url.clone();
        let file_name = image.download_name().to_string();
        Callback::from(move |event: MouseEvent| {
            if is_same_origin(page_origin().as_deref(), &url) {
                return;
            }
            event.prevent_default();
            let url = url.clone();
            let file_name = file_name.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = save_as(&url, &file_name).await {
                    tracing::warn!(error = %err, %url, "download failed");
                    update_store(|store| store.error(format!("Download failed: {err}")));
                }
            });
        })
    };
    let date = format_date(image.mtime_date(local_offset(Some(image.mtime))));

    html! {
        <article class="card">
            <div class="card-cover">
                <img src={url.clone()} alt={image.title.clone()} loading="lazy" />
            </div>
            <div class="card-meta">
                <strong class="card-title" title={image.title.clone()}>{&image.title}</strong>
                <small>{format!("Views: {}", image.view_count)}</small>
                <small>{date}</small>
            </div>
            <div class="card-actions">
                <button class="ghost" onclick={on_copy}>{"Copy link"}</button>
                <a
                    class="button ghost"
                    href={url}
                    download={image.download_name().to_string()}
                    onclick={on_download}
                >
                    {"Download"}
                </a>
            </div>
        </article>
    }
}

/// Apply a gallery transition and run the fetch it requests, if any.
fn transition(
    client: &Rc<MirrorClient>,
    step: impl FnOnce(&mut GalleryState) -> Option<GalleryFetch>,
) {
    let Some(Some(fetch)) = update_store(|store| step(&mut store.gallery)) else {
        return;
    };
    let client = Rc::clone(client);
    yew::platform::spawn_local(async move {
        let result = run_fetch(&client, fetch.clone()).await;
        update_store(|store| match result {
            Ok(loaded) => store.gallery.apply(loaded),
            Err(err) => {
                store.gallery.fail();
                store.error(failure_message(&fetch, &err));
            }
        });
    });
}

async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let navigator = gloo::utils::window().navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    let write_text: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

#[derive(Debug, Error)]
enum DownloadError {
    #[error("{0}")]
    Request(#[from] gloo_net::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("browser refused the download: {0:?}")]
    Dom(JsValue),
}

/// Fetch `url` and save it as `file_name` through a same-origin object URL.
async fn save_as(url: &str, file_name: &str) -> Result<(), DownloadError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(DownloadError::Status(response.status()));
    }
    let content_type = response.headers().get("content-type");
    let bytes = response.binary().await?;
    let object_url = ObjectUrl::from(Blob::new_with_options(
        bytes.as_slice(),
        content_type.as_deref(),
    ));
    let anchor: HtmlAnchorElement = gloo::utils::document()
        .create_element("a")
        .map_err(DownloadError::Dom)?
        .dyn_into()
        .map_err(|element: web_sys::Element| DownloadError::Dom(element.into()))?;
    anchor.set_href(&object_url);
    anchor.set_download(file_name);
    anchor.click();
    // Revoking right after the click can cancel the save in some browsers.
    gloo_timers::future::sleep(Duration::from_secs(1)).await;
    drop(object_url);
    Ok(())
}
