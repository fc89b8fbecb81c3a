//! Language context for the UI.
//!
//! [`LanguageProvider`] owns a [`LanguageStore`] and mirrors it into a signal
//! through a store subscription, so every component that translates through
//! [`use_i18n`] re-renders when the language is toggled.

use dioxus::prelude::*;
use store::{translate, Language, LanguageStore};

use crate::icons::FaGlobe;
use crate::Icon;

/// Handle to the language of the surrounding [`LanguageProvider`].
#[derive(Clone, Copy)]
pub struct I18n {
    store: Signal<LanguageStore>,
    current: Signal<Language>,
    /// Set once the user picked a language, so the configured default no
    /// longer overrides it.
    chosen: Signal<bool>,
}

impl I18n {
    pub fn language(&self) -> Language {
        (self.current)()
    }

    /// Translate `key` in the current language.
    pub fn t(&self, key: &str) -> String {
        translate(self.language(), key).to_string()
    }

    pub fn toggle(&self) {
        let mut chosen = self.chosen;
        chosen.set(true);
        self.store.peek().toggle();
    }

    /// Apply the configured default unless the user already chose.
    fn apply_default(&self, lang: Language) {
        if !*self.chosen.peek() {
            self.store.peek().set(lang);
        }
    }
}

/// Get the language handle provided by [`LanguageProvider`].
pub fn use_i18n() -> I18n {
    use_context::<I18n>()
}

/// Set `<html lang dir>` so right-to-left text lays out correctly.
#[cfg(target_arch = "wasm32")]
fn apply_document_language(lang: Language) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let dir = if lang.is_rtl() { "rtl" } else { "ltr" };
    if root.set_attribute("lang", lang.tag()).is_err() || root.set_attribute("dir", dir).is_err() {
        tracing::warn!("Failed to set document language to {}", lang);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_document_language(_lang: Language) {}

/// Provider component for the current language.
/// Starts in `initial`, then switches to the server's configured default
/// unless the user toggled first.
#[component]
pub fn LanguageProvider(#[props(default)] initial: Language, children: Element) -> Element {
    let store = use_hook(|| LanguageStore::new(initial));
    let current = use_signal(|| initial);
    let chosen = use_signal(|| false);

    let subscription = use_hook({
        let store = store.clone();
        move || {
            apply_document_language(store.current());
            store.subscribe(move |lang| {
                let mut current = current;
                current.set(lang);
                apply_document_language(lang);
            })
        }
    });
    use_drop({
        let store = store.clone();
        move || store.unsubscribe(subscription)
    });

    let i18n = use_context_provider(|| I18n {
        store: Signal::new(store.clone()),
        current,
        chosen,
    });

    let _defaults = use_resource(move || async move {
        match api::app_config().await {
            Ok(config) => i18n.apply_default(config.i18n.default_language),
            Err(e) => tracing::warn!("Failed to load app config: {}", e),
        }
    });

    rsx! {
        {children}
    }
}

/// Button switching between English and Urdu, labelled with the target language.
#[component]
pub fn LanguageToggle(#[props(default = "".to_string())] class: String) -> Element {
    let i18n = use_i18n();

    rsx! {
        button {
            class: "language-toggle {class}",
            r#type: "button",
            onclick: move |_| i18n.toggle(),
            Icon { icon: FaGlobe, width: 16, height: 16 }
            span { "{i18n.language().switch_label()}" }
        }
    }
}
