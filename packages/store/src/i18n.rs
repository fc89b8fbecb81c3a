//! # Localization — English/Urdu dictionaries and the language store
//!
//! Translation is a flat key → string lookup partitioned by [`Language`]. There is
//! no interpolation, pluralization or nesting. A key missing from the active
//! dictionary is not an error: [`translate`] hands the key back unchanged.
//!
//! The active language lives in a [`LanguageStore`], a handle that is created by
//! whoever owns a UI tree and passed down explicitly. Views subscribe to it and
//! are told about every change; two stores never see each other's toggles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ur => "ur",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Language::En),
            "ur" => Some(Language::Ur),
            _ => None,
        }
    }

    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ur,
            Language::Ur => Language::En,
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ur)
    }

    /// Label of the toggle button: the name of the language it switches to,
    /// written in that language.
    pub fn switch_label(&self) -> &'static str {
        match self {
            Language::En => "اردو",
            Language::Ur => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

const EN: &[(&str, &str)] = &[
    // Auth
    ("auth.title", "Fix Karachi"),
    ("auth.subtitle", "Report floods. Save lives. Earn rewards."),
    ("auth.login", "Login"),
    ("auth.signup", "Sign Up"),
    ("auth.email", "Email"),
    ("auth.password", "Password"),
    ("auth.name", "Full Name"),
    ("auth.selectRole", "Select Your Role"),
    ("auth.citizen", "Citizen"),
    ("auth.citizenDesc", "Report floods and earn points"),
    ("auth.admin", "Admin"),
    ("auth.adminDesc", "Manage reports and send alerts"),
    ("auth.alreadyHaveAccount", "Already have an account?"),
    ("auth.dontHaveAccount", "Don't have an account?"),
    ("auth.loginHere", "Login here"),
    ("auth.signupHere", "Sign up here"),
    ("auth.success", "Success!"),
    ("auth.accountCreated", "Account created successfully. Please login."),
    ("auth.error", "Error"),
    ("auth.nameRequired", "Name is required"),
    ("auth.invalidEmail", "Please enter a valid email"),
    ("auth.passwordTooShort", "Password is too short"),
    // Common
    ("common.loading", "Loading..."),
    ("common.dismiss", "Dismiss"),
    // Dashboard
    ("dashboard.welcome", "Welcome"),
    ("dashboard.reports", "Reports"),
    ("dashboard.alerts", "Alerts"),
    ("dashboard.points", "Points"),
    ("dashboard.logout", "Logout"),
    // Citizen
    ("citizen.submitReport", "Submit Report"),
    ("citizen.myReports", "My Reports"),
    ("citizen.ecoPoints", "Eco Points"),
    ("citizen.activeAlerts", "Active Alerts"),
    ("citizen.tagline", "Track your impact on Karachi's flood management"),
    ("citizen.totalReports", "Total Reports"),
    ("citizen.totalReportsDesc", "Flood reports submitted"),
    ("citizen.ecoPointsDesc", "Earned through verified reports"),
    ("citizen.activeAlertsDesc", "In your area"),
    ("citizen.submitReportDesc", "Report flooding or road conditions in your area"),
    ("citizen.submitNewReport", "Submit New Report"),
    ("citizen.myReportsDesc", "View your submitted reports and their status"),
    ("citizen.viewAllReports", "View All Reports"),
    // Admin
    ("admin.verifyReports", "Verify Reports"),
    ("admin.sendAlert", "Send Alert"),
    ("admin.manageUsers", "Manage Users"),
    ("admin.statistics", "Statistics"),
    ("admin.tagline", "Manage flood reports and protect Karachi"),
    ("admin.pendingReports", "Pending Reports"),
    ("admin.pendingReportsDesc", "Awaiting verification"),
    ("admin.verifiedReports", "Verified Reports"),
    ("admin.verifiedReportsDesc", "Successfully verified"),
    ("admin.totalUsers", "Total Users"),
    ("admin.totalUsersDesc", "Registered citizens"),
    ("admin.activeAlerts", "Active Alerts"),
    ("admin.activeAlertsDesc", "Currently active"),
    ("admin.verifyReportsDesc", "Review and verify citizen flood reports"),
    ("admin.sendAlertDesc", "Create and send flood alerts to citizens"),
];

const UR: &[(&str, &str)] = &[
    // Auth
    ("auth.title", "فکس کراچی"),
    ("auth.subtitle", "سیلاب کی رپورٹ کریں۔ زندگیاں بچائیں۔ انعامات حاصل کریں۔"),
    ("auth.login", "لاگ ان"),
    ("auth.signup", "سائن اپ"),
    ("auth.email", "ای میل"),
    ("auth.password", "پاس ورڈ"),
    ("auth.name", "پورا نام"),
    ("auth.selectRole", "اپنا کردار منتخب کریں"),
    ("auth.citizen", "شہری"),
    ("auth.citizenDesc", "سیلاب کی رپورٹ کریں اور پوائنٹس حاصل کریں"),
    ("auth.admin", "منتظم"),
    ("auth.adminDesc", "رپورٹس کا انتظام کریں اور الرٹ بھیجیں"),
    ("auth.alreadyHaveAccount", "پہلے سے اکاؤنٹ ہے؟"),
    ("auth.dontHaveAccount", "اکاؤنٹ نہیں ہے؟"),
    ("auth.loginHere", "یہاں لاگ ان کریں"),
    ("auth.signupHere", "یہاں سائن اپ کریں"),
    ("auth.success", "کامیابی!"),
    ("auth.accountCreated", "اکاؤنٹ کامیابی سے بن گیا۔ براہ کرم لاگ ان کریں۔"),
    ("auth.error", "خرابی"),
    ("auth.nameRequired", "نام درکار ہے"),
    ("auth.invalidEmail", "براہ کرم درست ای میل درج کریں"),
    ("auth.passwordTooShort", "پاس ورڈ بہت چھوٹا ہے"),
    // Common
    ("common.loading", "لوڈ ہو رہا ہے..."),
    ("common.dismiss", "بند کریں"),
    // Dashboard
    ("dashboard.welcome", "خوش آمدید"),
    ("dashboard.reports", "رپورٹس"),
    ("dashboard.alerts", "الرٹس"),
    ("dashboard.points", "پوائنٹس"),
    ("dashboard.logout", "لاگ آؤٹ"),
    // Citizen
    ("citizen.submitReport", "رپورٹ جمع کروائیں"),
    ("citizen.myReports", "میری رپورٹس"),
    ("citizen.ecoPoints", "ایکو پوائنٹس"),
    ("citizen.activeAlerts", "فعال الرٹس"),
    ("citizen.tagline", "کراچی کے سیلابی انتظام پر اپنا اثر دیکھیں"),
    ("citizen.totalReports", "کل رپورٹس"),
    ("citizen.totalReportsDesc", "جمع کروائی گئی سیلابی رپورٹس"),
    ("citizen.ecoPointsDesc", "تصدیق شدہ رپورٹس سے حاصل کردہ"),
    ("citizen.activeAlertsDesc", "آپ کے علاقے میں"),
    ("citizen.submitReportDesc", "اپنے علاقے میں سیلاب یا سڑک کی صورتحال کی رپورٹ کریں"),
    ("citizen.submitNewReport", "نئی رپورٹ جمع کروائیں"),
    ("citizen.myReportsDesc", "اپنی جمع کروائی گئی رپورٹس اور ان کی حیثیت دیکھیں"),
    ("citizen.viewAllReports", "تمام رپورٹس دیکھیں"),
    // Admin
    ("admin.verifyReports", "رپورٹس کی تصدیق کریں"),
    ("admin.sendAlert", "الرٹ بھیجیں"),
    ("admin.manageUsers", "صارفین کا انتظام"),
    ("admin.statistics", "اعداد و شمار"),
    ("admin.tagline", "سیلابی رپورٹس کا انتظام کریں اور کراچی کی حفاظت کریں"),
    ("admin.pendingReports", "زیر التواء رپورٹس"),
    ("admin.pendingReportsDesc", "تصدیق کی منتظر"),
    ("admin.verifiedReports", "تصدیق شدہ رپورٹس"),
    ("admin.verifiedReportsDesc", "کامیابی سے تصدیق شدہ"),
    ("admin.totalUsers", "کل صارفین"),
    ("admin.totalUsersDesc", "رجسٹرڈ شہری"),
    ("admin.activeAlerts", "فعال الرٹس"),
    ("admin.activeAlertsDesc", "اس وقت فعال"),
    ("admin.verifyReportsDesc", "شہریوں کی سیلابی رپورٹس کا جائزہ لیں اور تصدیق کریں"),
    ("admin.sendAlertDesc", "شہریوں کو سیلاب کے الرٹ بنائیں اور بھیجیں"),
];

static DICTIONARIES: LazyLock<HashMap<Language, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        HashMap::from([
            (Language::En, EN.iter().copied().collect()),
            (Language::Ur, UR.iter().copied().collect()),
        ])
    });

/// Look up `key` in the dictionary for `lang`, falling back to `key` itself.
pub fn translate<'a>(lang: Language, key: &'a str) -> &'a str {
    DICTIONARIES
        .get(&lang)
        .and_then(|dict| dict.get(key).copied())
        .unwrap_or(key)
}

/// Every key of the English dictionary.
pub fn keys() -> impl Iterator<Item = &'static str> {
    EN.iter().map(|(key, _)| *key)
}

/// Handle returned by [`LanguageStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn(Language)>;

struct Inner {
    current: Language,
    next_id: u64,
    listeners: Vec<(Subscription, Listener)>,
}

/// Current-language holder with change notifications.
///
/// Cloning yields another handle to the same state. The store is meant for a
/// single UI thread and is deliberately `!Send`.
#[derive(Clone)]
pub struct LanguageStore {
    inner: Rc<RefCell<Inner>>,
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl fmt::Debug for LanguageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("LanguageStore")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl PartialEq for LanguageStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl LanguageStore {
    pub fn new(initial: Language) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn current(&self) -> Language {
        self.inner.borrow().current
    }

    /// Flip between English and Urdu and return the new language.
    pub fn toggle(&self) -> Language {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Switch to `lang`. Listeners are only called when the language changes.
    pub fn set(&self, lang: Language) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == lang {
                return;
            }
            inner.current = lang;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        // Borrow released so listeners may read the store.
        for listener in listeners {
            listener(lang);
        }
    }

    /// Translate `key` in the current language.
    pub fn t(&self, key: &str) -> String {
        translate(self.current(), key).to_string()
    }

    pub fn subscribe(&self, listener: impl Fn(Language) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = Subscription(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != subscription);
    }
}
