use dioxus::prelude::*;
use store::Screen;

use crate::components::{ActionCard, DashboardHeader, StatCard};
use crate::i18n::use_i18n;
use crate::icons::{FaBell, FaCircleCheck, FaShield, FaTriangleExclamation, FaUsers};
use crate::Icon;

/// Home screen for admins. Expects a [`RoleGuard`](crate::RoleGuard) above it.
///
/// Report and alert figures stay at zero until those features exist; the user
/// count comes from the provider.
#[component]
pub fn AdminDashboardView(on_logged_out: EventHandler<Screen>) -> Element {
    let i18n = use_i18n();

    let citizens = use_resource(|| async move {
        match api::citizen_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Failed to load citizen count: {}", e);
                None
            }
        }
    });
    let total_users = match &*citizens.read() {
        Some(Some(count)) => count.to_string(),
        Some(None) => "-".to_string(),
        None => "…".to_string(),
    };

    rsx! {
        div {
            class: "dashboard",
            DashboardHeader {
                title: format!("{}, {}", i18n.t("dashboard.welcome"), i18n.t("auth.admin")),
                subtitle: i18n.t("admin.tagline"),
                icon: rsx! { Icon { icon: FaShield, width: 20, height: 20 } },
                on_logged_out,
            }

            main {
                class: "dashboard-main",
                div {
                    class: "grid grid-cols-4 gap-4",
                    StatCard {
                        label: i18n.t("admin.pendingReports"),
                        value: "0".to_string(),
                        description: i18n.t("admin.pendingReportsDesc"),
                        icon: rsx! { Icon { icon: FaTriangleExclamation, width: 16, height: 16 } },
                    }
                    StatCard {
                        label: i18n.t("admin.verifiedReports"),
                        value: "0".to_string(),
                        description: i18n.t("admin.verifiedReportsDesc"),
                        icon: rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
                    }
                    StatCard {
                        label: i18n.t("admin.totalUsers"),
                        value: total_users,
                        description: i18n.t("admin.totalUsersDesc"),
                        icon: rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
                    }
                    StatCard {
                        label: i18n.t("admin.activeAlerts"),
                        value: "0".to_string(),
                        description: i18n.t("admin.activeAlertsDesc"),
                        icon: rsx! { Icon { icon: FaBell, width: 16, height: 16 } },
                    }
                }

                div {
                    class: "grid grid-cols-2 gap-4",
                    ActionCard {
                        title: i18n.t("admin.verifyReports"),
                        description: i18n.t("admin.verifyReportsDesc"),
                        action_label: i18n.t("admin.verifyReports"),
                        icon: rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
                        primary: true,
                    }
                    ActionCard {
                        title: i18n.t("admin.sendAlert"),
                        description: i18n.t("admin.sendAlertDesc"),
                        action_label: i18n.t("admin.sendAlert"),
                        icon: rsx! { Icon { icon: FaBell, width: 16, height: 16 } },
                    }
                }
            }
        }
    }
}
