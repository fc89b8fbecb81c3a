//! Route components: each wires a shared view to the router.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use store::Screen;
use ui::views::{AdminDashboardView, AuthView, CitizenDashboardView};
use ui::RoleGuard;

use crate::Route;

fn go_to(nav: Navigator) -> impl FnMut(Screen) {
    move |screen| {
        nav.replace(Route::from(screen));
    }
}

#[component]
pub fn Auth() -> Element {
    let nav = use_navigator();
    rsx! {
        AuthView { on_signed_in: go_to(nav) }
    }
}

#[component]
pub fn CitizenDashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        RoleGuard {
            screen: Screen::CitizenDashboard,
            on_redirect: go_to(nav),
            CitizenDashboardView { on_logged_out: go_to(nav) }
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        RoleGuard {
            screen: Screen::AdminDashboard,
            on_redirect: go_to(nav),
            AdminDashboardView { on_logged_out: go_to(nav) }
        }
    }
}
