//! Route protection and sign-out for the dashboards.

use api::ApiBackend;
use dioxus::prelude::*;
use store::{check_activation, Access, Activations, Screen, Session};

use crate::i18n::use_i18n;
use crate::icons::FaRightFromBracket;
use crate::Icon;

/// Session resolved by the surrounding [`RoleGuard`]. `None` until access is granted.
pub fn use_session() -> Signal<Option<Session>> {
    use_context::<Signal<Option<Session>>>()
}

/// Renders `children` only once the signed-in user holds the role `screen`
/// requires. Otherwise reports where to go through `on_redirect`.
///
/// Each mount starts a fresh check; a check still in flight when the guard
/// unmounts is discarded.
#[component]
pub fn RoleGuard(screen: Screen, on_redirect: EventHandler<Screen>, children: Element) -> Element {
    let i18n = use_i18n();
    let activations = use_hook(Activations::new);
    let session = use_context_provider(|| Signal::new(Option::<Session>::None));

    let access = use_resource({
        let activations = activations.clone();
        move || {
            let ticket = activations.begin();
            let mut session = session;
            async move {
                let Some(access) = check_activation(&ApiBackend, screen, &ticket).await else {
                    return Access::Checking;
                };
                match (&access, access.redirect()) {
                    (_, Some(target)) => on_redirect.call(target),
                    (Access::Authorized(granted), None) => session.set(Some(granted.clone())),
                    _ => {}
                }
                access
            }
        }
    });

    use_drop(move || activations.cancel());

    let authorized = matches!(&*access.read(), Some(Access::Authorized(_)));
    if authorized {
        return rsx! {
            {children}
        };
    }

    rsx! {
        div {
            class: "flex min-h-screen items-center justify-center",
            p { class: "text-muted", {i18n.t("common.loading")} }
        }
    }
}

/// Signs out and hands the login screen to `on_logged_out`, whether or not
/// the provider acknowledged the sign-out.
#[component]
pub fn LogoutButton(
    on_logged_out: EventHandler<Screen>,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let i18n = use_i18n();
    let mut pending = use_signal(|| false);

    rsx! {
        button {
            class: "btn btn-outline {class}",
            r#type: "button",
            disabled: pending(),
            onclick: move |_| {
                pending.set(true);
                spawn(async move {
                    let target = store::session::sign_out(&ApiBackend).await;
                    pending.set(false);
                    on_logged_out.call(target);
                });
            },
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { {i18n.t("dashboard.logout")} }
        }
    }
}
