use dioxus::prelude::*;
use store::Screen;

use crate::components::{ActionCard, DashboardHeader, StatCard};
use crate::guard::use_session;
use crate::i18n::use_i18n;
use crate::icons::{FaAward, FaBell, FaFileLines, FaPlus, FaUser};
use crate::Icon;

/// Home screen for citizens. Expects a [`RoleGuard`](crate::RoleGuard) above it.
#[component]
pub fn CitizenDashboardView(on_logged_out: EventHandler<Screen>) -> Element {
    let i18n = use_i18n();
    let session = use_session();

    let citizen_label = i18n.t("auth.citizen");
    let (name, reports, points) = match session().and_then(|s| s.profile) {
        Some(profile) => (
            profile.display_name(&citizen_label).to_string(),
            profile.total_reports,
            profile.points,
        ),
        None => (citizen_label.clone(), 0, 0),
    };

    rsx! {
        div {
            class: "dashboard",
            DashboardHeader {
                title: format!("{}, {}", i18n.t("dashboard.welcome"), name),
                subtitle: i18n.t("citizen.tagline"),
                icon: rsx! { Icon { icon: FaUser, width: 20, height: 20 } },
                on_logged_out,
            }

            main {
                class: "dashboard-main",
                div {
                    class: "grid grid-cols-3 gap-4",
                    StatCard {
                        label: i18n.t("citizen.totalReports"),
                        value: reports.to_string(),
                        description: i18n.t("citizen.totalReportsDesc"),
                        icon: rsx! { Icon { icon: FaFileLines, width: 16, height: 16 } },
                    }
                    StatCard {
                        label: i18n.t("citizen.ecoPoints"),
                        value: points.to_string(),
                        description: i18n.t("citizen.ecoPointsDesc"),
                        icon: rsx! { Icon { icon: FaAward, width: 16, height: 16 } },
                    }
                    StatCard {
                        label: i18n.t("citizen.activeAlerts"),
                        value: "0".to_string(),
                        description: i18n.t("citizen.activeAlertsDesc"),
                        icon: rsx! { Icon { icon: FaBell, width: 16, height: 16 } },
                    }
                }

                div {
                    class: "grid grid-cols-2 gap-4",
                    ActionCard {
                        title: i18n.t("citizen.submitReport"),
                        description: i18n.t("citizen.submitReportDesc"),
                        action_label: i18n.t("citizen.submitNewReport"),
                        icon: rsx! { Icon { icon: FaPlus, width: 16, height: 16 } },
                        primary: true,
                    }
                    ActionCard {
                        title: i18n.t("citizen.myReports"),
                        description: i18n.t("citizen.myReportsDesc"),
                        action_label: i18n.t("citizen.viewAllReports"),
                        icon: rsx! { Icon { icon: FaFileLines, width: 16, height: 16 } },
                    }
                }
            }
        }
    }
}
