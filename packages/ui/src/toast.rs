//! Dismissable notifications.

use dioxus::prelude::*;

use crate::i18n::use_i18n;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Handle to the notification list of the surrounding [`ToastProvider`].
#[derive(Clone, Copy)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn show(&self, title: String, description: String, variant: ToastVariant) {
        let mut next_id = self.next_id;
        let mut items = self.items;
        let id = *next_id.peek();
        next_id.set(id + 1);
        items.write().push(Toast {
            id,
            title,
            description,
            variant,
        });

        #[cfg(target_arch = "wasm32")]
        {
            let toasts = *self;
            spawn(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(5)).await;
                toasts.dismiss(id);
            });
        }
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provider component rendering the active notifications above its children.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });
    let i18n = use_i18n();

    rsx! {
        {children}
        div {
            class: "toast-viewport",
            for toast in (toasts.items)() {
                div {
                    key: "{toast.id}",
                    class: if toast.variant == ToastVariant::Destructive { "toast toast--destructive" } else { "toast" },
                    role: "status",
                    div {
                        class: "toast-body",
                        p { class: "toast-title", "{toast.title}" }
                        p { class: "toast-description", "{toast.description}" }
                    }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        title: i18n.t("common.dismiss"),
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
