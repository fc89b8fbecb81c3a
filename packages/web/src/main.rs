use dioxus::prelude::*;

use api::ApiBackend;
use store::{landing_activation, Activations, Screen};
use ui::{LanguageProvider, ToastProvider};
use views::{AdminDashboard, Auth, CitizenDashboard};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/auth")]
    Auth {},
    #[route("/citizen-dashboard")]
    CitizenDashboard {},
    #[route("/admin-dashboard")]
    AdminDashboard {},
}

impl From<Screen> for Route {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Auth => Route::Auth {},
            Screen::CitizenDashboard => Route::CitizenDashboard {},
            Screen::AdminDashboard => Route::AdminDashboard {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start tokio runtime: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(launch_server()) {
            tracing::error!("Server stopped: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = api::settings::init()?;

    let pool = api::db::get_pool().await?;
    sqlx::migrate!("../api/migrations").run(pool).await?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(tower_sessions::cookie::time::Duration::days(
            settings.session.expiry_days,
        )));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        LanguageProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Send `/` to the dashboard of the signed-in role, or to `/auth`.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    let activations = use_hook(Activations::new);

    let _landing = use_resource({
        let activations = activations.clone();
        move || {
            let ticket = activations.begin();
            async move {
                if let Some(screen) = landing_activation(&ApiBackend, &ticket).await {
                    nav.replace(Route::from(screen));
                }
            }
        }
    });
    use_drop(move || activations.cancel());

    rsx! {}
}
