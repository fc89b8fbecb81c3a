//! Login and sign-up screen.

use api::ApiBackend;
use dioxus::prelude::*;
use store::{landing_activation, session, Activations, AppConfig, Role, Screen, SignUpFields};

use crate::i18n::{use_i18n, LanguageToggle};
use crate::icons::{FaDroplet, FaShield, FaUser};
use crate::toast::{use_toast, ToastVariant};
use crate::Icon;

/// Combined login/sign-up form. `on_signed_in` receives the dashboard to open.
#[component]
pub fn AuthView(on_signed_in: EventHandler<Screen>) -> Element {
    let i18n = use_i18n();
    let toasts = use_toast();

    let mut is_login = use_signal(|| true);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(Role::default);
    let mut loading = use_signal(|| false);

    let config = use_resource(|| async move {
        match api::app_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load app config, using defaults: {}", e);
                AppConfig::default()
            }
        }
    });

    // Someone already signed in goes straight to their dashboard.
    let activations = use_hook(Activations::new);
    let _existing = use_resource({
        let activations = activations.clone();
        move || {
            let ticket = activations.begin();
            async move {
                match landing_activation(&ApiBackend, &ticket).await {
                    Some(Screen::Auth) | None => {}
                    Some(screen) => on_signed_in.call(screen),
                }
            }
        }
    });
    use_drop(move || activations.cancel());

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        spawn(async move {
            loading.set(true);
            if is_login() {
                match session::sign_in(&ApiBackend, &email(), &password()).await {
                    Ok(screen) => {
                        loading.set(false);
                        on_signed_in.call(screen);
                        return;
                    }
                    Err(e) => toasts.show(
                        i18n.t("auth.error"),
                        e.user_message(|k| i18n.t(k)),
                        ToastVariant::Destructive,
                    ),
                }
            } else {
                let config = config.read().clone().unwrap_or_default();
                let fields = SignUpFields {
                    name: name(),
                    role: role(),
                };
                match session::sign_up(&ApiBackend, &config, &email(), &password(), &fields).await {
                    Ok(_) => {
                        toasts.show(
                            i18n.t("auth.success"),
                            i18n.t("auth.accountCreated"),
                            ToastVariant::Default,
                        );
                        password.set(String::new());
                        is_login.set(true);
                    }
                    Err(e) => toasts.show(
                        i18n.t("auth.error"),
                        e.user_message(|k| i18n.t(k)),
                        ToastVariant::Destructive,
                    ),
                }
            }
            loading.set(false);
        });
    };

    let submit_label = if is_login() { i18n.t("auth.login") } else { i18n.t("auth.signup") };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-toolbar",
                LanguageToggle {}
            }

            div {
                class: "card auth-card",
                div {
                    class: "flex flex-col items-center gap-2 text-center",
                    div { class: "auth-logo", Icon { icon: FaDroplet, width: 28, height: 28 } }
                    h1 { class: "text-2xl font-bold", {i18n.t("auth.title")} }
                    p { class: "text-sm text-muted", {i18n.t("auth.subtitle")} }
                }

                form {
                    class: "flex flex-col gap-4",
                    onsubmit: handle_submit,

                    if !is_login() {
                        div {
                            class: "flex flex-col gap-1",
                            label { r#for: "name", {i18n.t("auth.name")} }
                            input {
                                id: "name",
                                class: "input",
                                r#type: "text",
                                value: "{name}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                        }

                        div {
                            class: "flex flex-col gap-2",
                            span { class: "text-sm font-medium", {i18n.t("auth.selectRole")} }
                            div {
                                class: "grid grid-cols-2 gap-3",
                                RoleCard {
                                    selected: role() == Role::Citizen,
                                    title: i18n.t("auth.citizen"),
                                    description: i18n.t("auth.citizenDesc"),
                                    onselect: move |_| role.set(Role::Citizen),
                                    Icon { icon: FaUser, width: 20, height: 20 }
                                }
                                RoleCard {
                                    selected: role() == Role::Admin,
                                    title: i18n.t("auth.admin"),
                                    description: i18n.t("auth.adminDesc"),
                                    onselect: move |_| role.set(Role::Admin),
                                    Icon { icon: FaShield, width: 20, height: 20 }
                                }
                            }
                        }
                    }

                    div {
                        class: "flex flex-col gap-1",
                        label { r#for: "email", {i18n.t("auth.email")} }
                        input {
                            id: "email",
                            class: "input",
                            r#type: "email",
                            autocomplete: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }

                    div {
                        class: "flex flex-col gap-1",
                        label { r#for: "password", {i18n.t("auth.password")} }
                        input {
                            id: "password",
                            class: "input",
                            r#type: "password",
                            autocomplete: if is_login() { "current-password" } else { "new-password" },
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    button {
                        class: "btn btn-primary w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { {i18n.t("common.loading")} } else { "{submit_label}" }
                    }
                }

                p {
                    class: "text-sm text-center text-muted",
                    if is_login() { {i18n.t("auth.dontHaveAccount")} } else { {i18n.t("auth.alreadyHaveAccount")} }
                    " "
                    button {
                        class: "link",
                        r#type: "button",
                        onclick: move |_| is_login.set(!is_login()),
                        if is_login() { {i18n.t("auth.signupHere")} } else { {i18n.t("auth.loginHere")} }
                    }
                }
            }
        }
    }
}

#[component]
fn RoleCard(
    selected: bool,
    title: String,
    description: String,
    onselect: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: if selected { "role-card role-card--selected" } else { "role-card" },
            r#type: "button",
            aria_pressed: "{selected}",
            onclick: move |evt| onselect.call(evt),
            {children}
            span { class: "font-semibold", "{title}" }
            span { class: "text-xs text-muted", "{description}" }
        }
    }
}
