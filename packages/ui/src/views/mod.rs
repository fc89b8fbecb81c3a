mod admin_dashboard;
mod auth;
mod citizen_dashboard;

pub use admin_dashboard::AdminDashboardView;
pub use auth::AuthView;
pub use citizen_dashboard::CitizenDashboardView;
