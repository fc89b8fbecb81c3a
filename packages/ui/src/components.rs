//! Building blocks shared by the dashboards.

use dioxus::prelude::*;
use store::Screen;

use crate::guard::LogoutButton;
use crate::i18n::LanguageToggle;

/// Top bar with the screen title, the language toggle and the logout button.
#[component]
pub fn DashboardHeader(
    title: String,
    subtitle: String,
    icon: Element,
    on_logged_out: EventHandler<Screen>,
) -> Element {
    rsx! {
        header {
            class: "dashboard-header",
            div {
                class: "flex items-center gap-3",
                div { class: "dashboard-header-icon", {icon} }
                div {
                    h1 { class: "text-xl font-bold", "{title}" }
                    p { class: "text-sm text-muted", "{subtitle}" }
                }
            }
            div {
                class: "flex items-center gap-2",
                LanguageToggle {}
                LogoutButton { on_logged_out }
            }
        }
    }
}

/// One figure on a dashboard.
#[component]
pub fn StatCard(label: String, value: String, description: String, icon: Element) -> Element {
    rsx! {
        div {
            class: "card stat-card",
            div {
                class: "flex items-center justify-between",
                span { class: "text-sm font-medium", "{label}" }
                span { class: "stat-card-icon", {icon} }
            }
            div { class: "text-2xl font-bold", "{value}" }
            p { class: "text-xs text-muted", "{description}" }
        }
    }
}

/// A card leading to a feature screen.
///
/// The feature screens are not built yet, so the button only logs the click.
#[component]
pub fn ActionCard(
    title: String,
    description: String,
    action_label: String,
    icon: Element,
    #[props(default)] primary: bool,
) -> Element {
    let button_class = if primary { "btn btn-primary w-full" } else { "btn btn-outline w-full" };
    let log_title = title.clone();

    rsx! {
        div {
            class: "card action-card",
            div {
                class: "flex items-center gap-2",
                span { class: "action-card-icon", {icon} }
                h2 { class: "text-lg font-semibold", "{title}" }
            }
            p { class: "text-sm text-muted", "{description}" }
            button {
                class: "{button_class}",
                r#type: "button",
                onclick: move |_| tracing::info!("'{}' is not available yet", log_title),
                "{action_label}"
            }
        }
    }
}
