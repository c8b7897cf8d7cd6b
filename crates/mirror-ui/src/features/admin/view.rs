//! Admin dashboard view.
//!
//! # Design
//! - Keep API calls in the page controller; rows and dialogs only emit
//!   callbacks.
//! - Drive rendering from the shared `AppStore` admin slice.

use crate::app::Route;
use crate::app::api::{ApiCtx, MirrorClient};
use crate::app::preferences::local_offset;
use crate::components::modal::Modal;
use crate::components::status::StatusTag;
use crate::core::logic::format_timestamp;
use crate::core::store::{AppStore, update_store};
use crate::features::admin::actions::{
    AdminError, AdminLoaded, CrawlStep, crawl_and_refresh, load, load_failure_message,
    submit_rename, submit_upload,
};
use crate::features::admin::forms::SelectedFile;
use crate::features::admin::state::{AdminEntry, AdminFetch, AdminTab};
use mirror_api_models::{CrawlLog, Image};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};
use yew::prelude::*;
use yew_router::prelude::use_navigator;
use yewdux::prelude::use_selector;

#[function_component(AdminPage)]
pub(crate) fn admin_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let admin = use_selector(|store: &AppStore| store.admin.clone());

    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |_| {
                let token = api_ctx
                    .as_ref()
                    .and_then(|ctx| ctx.client.tokens().token());
                match update_store(|store| store.admin.enter(token.as_deref())) {
                    Some(AdminEntry::Load(fetches)) => {
                        if let Some(ctx) = &api_ctx {
                            for fetch in fetches {
                                spawn_load(&ctx.client, fetch);
                            }
                        }
                    }
                    Some(AdminEntry::RedirectToLogin) => {
                        tracing::debug!("admin requires a token; redirecting to login");
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    None => {}
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

    let on_crawl = {
        let client = client.clone();
        Callback::from(move |_| start_crawl(&client))
    };
    let on_refresh_logs = {
        let client = client.clone();
        Callback::from(move |_| {
            if let Some(fetch) = update_store(|store| store.admin.refresh_logs()) {
                spawn_load(&client, fetch);
            }
        })
    };
    let on_delete = {
        let client = client.clone();
        Callback::from(move |image: Image| delete_image(&client, &image))
    };
    let on_rename = Callback::from(|image: Image| {
        update_store(|store| store.admin.open_rename(&image));
    });
    let on_open_upload = Callback::from(|_| {
        update_store(|store| store.admin.open_upload());
    });
    let select_tab = |tab: AdminTab| {
        Callback::from(move |_: MouseEvent| {
            update_store(|store| store.admin.tab = tab);
        })
    };

    let panel = match admin.tab {
        AdminTab::Logs => html! {
            <div class="panel">
                <div class="panel-head">
                    <h3>{"Crawl logs"}</h3>
                    <button class="ghost" onclick={on_refresh_logs} disabled={admin.logs_loading}>{"Refresh"}</button>
                </div>
                {logs_table(&admin.logs, admin.logs_loading)}
            </div>
        },
        AdminTab::Images => html! {
            <div class="panel">
                <div class="panel-head">
                    <h3>{"Images"}</h3>
                    <button class="solid" onclick={on_open_upload}>{"Upload image"}</button>
                </div>
                {images_table(&client, &admin.images, admin.images_loading, &on_rename, &on_delete)}
            </div>
        },
    };

    html! {
        <section class="admin">
            <div class="admin-head">
                <h2 class="page-title">{"Admin Dashboard"}</h2>
                <button class="solid" onclick={on_crawl} disabled={admin.crawl_busy}>
                    {if admin.crawl_busy { "Starting crawl…" } else { "Trigger crawl" }}
                </button>
            </div>
            <div class="tabs" role="tablist">
                <button
                    role="tab"
                    class={classes!("tab", (admin.tab == AdminTab::Logs).then_some("active"))}
                    onclick={select_tab(AdminTab::Logs)}
                >
                    {"Crawl logs"}
                </button>
                <button
                    role="tab"
                    class={classes!("tab", (admin.tab == AdminTab::Images).then_some("active"))}
                    onclick={select_tab(AdminTab::Images)}
                >
                    {"Images"}
                </button>
            </div>
            {panel}
            {if admin.upload.is_some() {
                html! { <UploadDialog client={client.clone()} /> }
            } else { html! {} }}
            {if admin.rename.is_some() {
                html! { <RenameDialog client={client.clone()} /> }
            } else { html! {} }}
        </section>
    }
}

fn logs_table(logs: &[CrawlLog], loading: bool) -> Html {
    let offset = local_offset(None);
    if logs.is_empty() {
        return html! {
            <p class="muted empty">{if loading { "Loading…" } else { "No crawl jobs yet." }}</p>
        };
    }
    html! {
        <table class="table">
            <thead>
                <tr>
                    <th>{"ID"}</th>
                    <th>{"Status"}</th>
                    <th>{"Found"}</th>
                    <th>{"Downloaded"}</th>
                    <th>{"Error"}</th>
                    <th>{"Time"}</th>
                </tr>
            </thead>
            <tbody>
                {for logs.iter().map(|log| html! {
                    <tr key={log.id}>
                        <td>{log.id}</td>
                        <td><StatusTag status={log.status.clone()} /></td>
                        <td>{log.images_found}</td>
                        <td>{log.images_downloaded}</td>
                        <td class="error-cell">{log.error_message.clone().unwrap_or_default()}</td>
                        <td>{format_timestamp(&log.created_at, offset)}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn images_table(
    client: &MirrorClient,
    images: &[Image],
    loading: bool,
    on_rename: &Callback<Image>,
    on_delete: &Callback<Image>,
) -> Html {
    if images.is_empty() {
        return html! {
            <p class="muted empty">{if loading { "Loading…" } else { "No images mirrored yet." }}</p>
        };
    }
    html! {
        <table class="table">
            <thead>
                <tr>
                    <th>{"Preview"}</th>
                    <th>{"ID"}</th>
                    <th>{"Title"}</th>
                    <th>{"Views"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>
                {for images.iter().map(|image| {
                    let rename = {
                        let on_rename = on_rename.clone();
                        let image = image.clone();
                        Callback::from(move |_| on_rename.emit(image.clone()))
                    };
                    let delete = {
                        let on_delete = on_delete.clone();
                        let image = image.clone();
                        Callback::from(move |_| on_delete.emit(image.clone()))
                    };
                    html! {
                        <tr key={image.id}>
                            <td><img class="thumb" src={client.image_url(&image.local_path)} alt={image.title.clone()} /></td>
                            <td>{image.id}</td>
                            <td>{&image.title}</td>
                            <td>{image.view_count}</td>
                            <td class="row-actions">
                                <button class="ghost" onclick={rename}>{"Rename"}</button>
                                <button class="ghost danger" onclick={delete}>{"Delete"}</button>
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties)]
struct DialogProps {
    client: Rc<MirrorClient>,
}

impl PartialEq for DialogProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

#[function_component(UploadDialog)]
fn upload_dialog(props: &DialogProps) -> Html {
    let form = use_selector(|store: &AppStore| store.admin.upload.clone().unwrap_or_default());
    let submitting = use_selector(|store: &AppStore| store.admin.submitting);
    let error = use_selector(|store: &AppStore| store.admin.dialog_error.clone());

    let on_title = Callback::from(|event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            update_store(|store| {
                if let Some(form) = store.admin.upload.as_mut() {
                    form.title = input.value();
                }
            });
        }
    });
    let on_file = Callback::from(|event: Event| {
        let Some(file) = event
            .target_dyn_into::<HtmlInputElement>()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        yew::platform::spawn_local(async move {
            match read_file(&file).await {
                Ok(selected) => {
                    update_store(|store| {
                        if let Some(form) = store.admin.upload.as_mut() {
                            form.file = Some(selected);
                        }
                    });
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "failed to read selected file");
                    update_store(|store| store.error("Could not read the selected file"));
                }
            }
        });
    });
    let on_cancel = Callback::from(|()| {
        update_store(|store| store.admin.close_dialogs());
    });
    let on_submit = {
        let client = props.client.clone();
        Callback::from(move |()| {
            let Some(Some(form)) = update_store(|store| {
                let form = store.admin.upload.clone()?;
                store.admin.begin_submission().then_some(form)
            }) else {
                return;
            };
            let client = client.clone();
            yew::platform::spawn_local(async move {
                let result = submit_upload(&client, &form).await;
                let next = update_store(|store| match result {
                    Ok(()) => {
                        store.success("Image uploaded");
                        Some(store.admin.submission_succeeded())
                    }
                    Err(AdminError::Form(err)) => {
                        store.admin.submission_failed(Some(err.to_string()));
                        None
                    }
                    Err(AdminError::Api(err)) => {
                        store.admin.submission_failed(None);
                        store.error(format!("Upload failed: {err}"));
                        None
                    }
                });
                if let Some(Some(fetch)) = next {
                    spawn_load(&client, fetch);
                }
            });
        })
    };

    html! {
        <Modal
            title="Upload image"
            submit_label="Upload"
            busy={*submitting}
            error={(*error).clone()}
            {on_cancel}
            {on_submit}
        >
            <label class="field">
                <span>{"Title"}</span>
                <input value={form.title.clone()} oninput={on_title} required=true />
            </label>
            <label class="field">
                <span>{"File"}</span>
                <input type="file" accept="image/*" onchange={on_file} />
            </label>
            {if let Some(file) = &form.file {
                html! { <p class="muted">{format!("Ready: {} ({} bytes)", file.name, file.bytes.len())}</p> }
            } else { html! {} }}
        </Modal>
    }
}

#[function_component(RenameDialog)]
fn rename_dialog(props: &DialogProps) -> Html {
    let form = use_selector(|store: &AppStore| store.admin.rename.clone());
    let submitting = use_selector(|store: &AppStore| store.admin.submitting);
    let error = use_selector(|store: &AppStore| store.admin.dialog_error.clone());

    let on_title = Callback::from(|event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            update_store(|store| {
                if let Some(form) = store.admin.rename.as_mut() {
                    form.title = input.value();
                }
            });
        }
    });
    let on_cancel = Callback::from(|()| {
        update_store(|store| store.admin.close_dialogs());
    });
    let on_submit = {
        let client = props.client.clone();
        Callback::from(move |()| {
            let Some(Some(form)) = update_store(|store| {
                let form = store.admin.rename.clone()?;
                store.admin.begin_submission().then_some(form)
            }) else {
                return;
            };
            let client = client.clone();
            yew::platform::spawn_local(async move {
                let result = submit_rename(&client, &form).await;
                let next = update_store(|store| match result {
                    Ok(()) => {
                        store.success("Image renamed");
                        Some(store.admin.submission_succeeded())
                    }
                    Err(AdminError::Form(err)) => {
                        store.admin.submission_failed(Some(err.to_string()));
                        None
                    }
                    Err(AdminError::Api(err)) => {
                        store.admin.submission_failed(None);
                        store.error(format!("Rename failed: {err}"));
                        None
                    }
                });
                if let Some(Some(fetch)) = next {
                    spawn_load(&client, fetch);
                }
            });
        })
    };

    let Some(form) = (*form).clone() else {
        return html! {};
    };
    html! {
        <Modal
            title="Rename image"
            submit_label="Save"
            busy={*submitting}
            error={(*error).clone()}
            {on_cancel}
            {on_submit}
        >
            <p class="muted">{format!("Current title: {}", form.current_title)}</p>
            <label class="field">
                <span>{"New title"}</span>
                <input value={form.title} oninput={on_title} required=true />
            </label>
        </Modal>
    }
}

fn spawn_load(client: &Rc<MirrorClient>, fetch: AdminFetch) {
    let client = Rc::clone(client);
    yew::platform::spawn_local(async move {
        let result = load(&client, fetch).await;
        update_store(|store| match result {
            Ok(AdminLoaded::Logs(logs)) => store.admin.logs_loaded(logs),
            Ok(AdminLoaded::Images(images)) => store.admin.images_loaded(images),
            Err(err) => {
                store.admin.fetch_failed(fetch);
                store.error(load_failure_message(fetch, &err));
            }
        });
    });
}

fn start_crawl(client: &Rc<MirrorClient>) {
    if update_store(|store| store.admin.begin_crawl()) != Some(true) {
        return;
    }
    let client = Rc::clone(client);
    yew::platform::spawn_local(async move {
        crawl_and_refresh(&client, gloo_timers::future::sleep, |step| {
            update_store(|store| match step {
                CrawlStep::Accepted => {
                    store.success("Crawl started in background");
                    Some(store.admin.crawl_accepted())
                }
                CrawlStep::Rejected(err) => {
                    store.admin.crawl_failed();
                    store.error(format!("Failed to start crawl: {err}"));
                    None
                }
                CrawlStep::Refreshing => {
                    store.admin.refresh_logs();
                    None
                }
                CrawlStep::Refreshed(Ok(logs)) => {
                    store.admin.logs_loaded(logs);
                    None
                }
                CrawlStep::Refreshed(Err(err)) => {
                    store.admin.fetch_failed(AdminFetch::Logs);
                    store.error(load_failure_message(AdminFetch::Logs, &err));
                    None
                }
            })
            .flatten()
        })
        .await;
    });
}

fn delete_image(client: &Rc<MirrorClient>, image: &Image) {
    let prompt = format!("Delete \"{}\"? This cannot be undone.", image.title);
    if !gloo::dialogs::confirm(&prompt) {
        return;
    }
    let client = Rc::clone(client);
    let id = image.id;
    yew::platform::spawn_local(async move {
        let result = client.delete_image(id).await;
        let next = update_store(|store| match result {
            Ok(()) => {
                store.success("Image deleted");
                Some(store.admin.delete_confirmed())
            }
            Err(err) => {
                store.error(format!("Failed to delete image: {err}"));
                None
            }
        });
        if let Some(Some(fetch)) = next {
            spawn_load(&client, fetch);
        }
    });
}

async fn read_file(file: &File) -> Result<SelectedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let content_type = file.type_();
    Ok(SelectedFile {
        name: file.name(),
        content_type: (!content_type.is_empty()).then_some(content_type),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}
