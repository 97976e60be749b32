//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::auth::oracle::SessionOracle;
use crate::config::AuthConfig;
use crate::net::gotrue::GoTrueOracle;
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, login::LoginPage, logout::LogoutPage, register::RegisterPage,
    verify_email::VerifyEmailPage,
};
use crate::state::auth::AuthState;
use crate::util::auth::{AuthGuard, AuthServices};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the auth services from build-time configuration, provides them and
/// the auth state as context, and mounts the app-wide [`AuthGuard`]. Runs on
/// every SSR request, so configuration problems are reported from the
/// hydrate entry and the server's startup check instead.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AuthConfig::from_build_env();
    let oracle: Arc<dyn SessionOracle> = Arc::new(GoTrueOracle::new(config.clone()));
    provide_context(AuthServices::new(config, oracle));
    provide_context(RwSignal::new(AuthState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/dogwalk.css"/>
        <Title text="Dog Walk Companion"/>

        <Router>
            <AuthGuard/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("verify-email") view=VerifyEmailPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("logout") view=LogoutPage/>
            </Routes>
        </Router>
    }
}
