use crate::app::api::ApiCtx;
use crate::components::shell::AppShell;
use crate::components::toast::ToastHost;
use crate::core::auth::TokenStore;
use crate::core::config::UiConfig;
use crate::core::store::{AppStore, SessionSlice, update_store};
use crate::features::admin::view::AdminPage;
use crate::features::gallery::state::GalleryState;
use crate::features::gallery::view::GalleryPage;
use crate::features::login::view::LoginPage;
use preferences::{LocalTokenStore, page_origin};
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
pub(crate) mod preferences;
mod routes;
mod telemetry;

#[derive(Properties, PartialEq)]
pub struct MirrorAppProps {
    pub config: UiConfig,
}

#[function_component(MirrorApp)]
pub fn mirror_app(props: &MirrorAppProps) -> Html {
    let api_ctx = {
        let base_url = props.config.api_base_url.clone();
        use_memo(move |_| ApiCtx::new(&base_url), ())
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <AuthRedirect />
                <AppShell>
                    <Switch<Route> render={switch} />
                </AppShell>
                <ToastHost />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Gallery => html! { <GalleryPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Admin => html! { <AdminPage /> },
        Route::NotFound => html! {
            <div class="placeholder">
                <h2>{"Not found"}</h2>
                <p class="muted">{"Use navigation to return to a supported view."}</p>
                <Link<Route> to={Route::Gallery} classes="button ghost">{"Back to gallery"}</Link<Route>>
            </div>
        },
    }
}

/// Navigates to the login view when the session has been expired by a 401.
#[function_component(AuthRedirect)]
fn auth_redirect() -> Html {
    let pending = use_selector(|store: &AppStore| store.session.login_redirect);
    let navigator = use_navigator();
    use_effect_with_deps(
        move |pending| {
            if **pending && update_store(|store| store.session.take_login_redirect()) == Some(true)
            {
                tracing::info!("session expired; redirecting to login");
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Login);
                }
            }
            || ()
        },
        pending,
    );
    html! {}
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = UiConfig::from_build_env(page_origin().as_deref());
    telemetry::init_logging(&config.log_level);
    tracing::info!(api_base_url = %config.api_base_url, "starting mirror ui");

    let stored = LocalTokenStore.token();
    update_store(|store| {
        store.session = SessionSlice::from_stored(stored.as_deref());
        store.gallery = GalleryState::with_page_size(config.gallery_page_size);
        store.admin.page_size = config.admin_page_size;
        store.admin.crawl_refresh_delay = config.crawl_refresh_delay;
    });

    let props = MirrorAppProps { config };
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<MirrorApp>::with_root_and_props(root, props).render();
    } else {
        yew::Renderer::<MirrorApp>::with_props(props).render();
    }
}
