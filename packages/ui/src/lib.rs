//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod i18n;
pub use i18n::{use_i18n, I18n, LanguageProvider, LanguageToggle};

mod toast;
pub use toast::{use_toast, Toast, ToastProvider, ToastVariant, Toasts};

mod guard;
pub use guard::{use_session, LogoutButton, RoleGuard};
