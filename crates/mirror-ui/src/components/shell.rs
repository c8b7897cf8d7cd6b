use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::store::{AppStore, update_store};
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator, use_route};
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let active = use_route::<Route>().unwrap_or(Route::NotFound);
    let signed_in = use_selector(|store: &AppStore| store.session.signed_in());
    let navigator = use_navigator();
    let api_ctx = use_context::<ApiCtx>();

    let on_logout = Callback::from(move |_| {
        if let Some(ctx) = &api_ctx {
            ctx.client.tokens().clear();
        }
        update_store(|store| store.session.sign_out());
        tracing::info!("signed out");
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Gallery);
        }
    });

    html! {
        <div class="app-shell">
            <header class="topbar">
                <div class="brand">
                    <strong>{"Image Mirror"}</strong>
                </div>
                <nav>
                    {nav_item(Route::Gallery, "Gallery", &active)}
                    {nav_item(Route::Admin, "Admin", &active)}
                </nav>
                <div class="top-actions">
                    {if *signed_in {
                        html! { <button class="ghost" onclick={on_logout}>{"Log out"}</button> }
                    } else {
                        html! { <Link<Route> to={Route::Login} classes="ghost">{"Log in"}</Link<Route>> }
                    }}
                </div>
            </header>
            <main>
                {for props.children.iter()}
            </main>
            <footer class="footer">{"Image Mirror ©2024"}</footer>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!(
        "nav-item",
        if *active == route {
            Some("active")
        } else {
            None
        }
    );
    html! {
        <Link<Route> to={route} classes={classes}>{label}</Link<Route>>
    }
}
