use indexmap::IndexMap;
use tracing::debug;

use super::{DeviceNoticeConfig, PageModel};

/// Value stored in the flag cookie once the notice was confirmed.
pub const CONFIRMED_COOKIE_VALUE: &str = "true";

/// Client-side persisted key/value flags.
pub trait CookieJar {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
    fn remove(&mut self, name: &str);
}

/// Cookie jar kept in memory, loadable from and serializable to a `Cookie`
/// header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCookieJar {
    cookies: IndexMap<String, String>,
}

impl MemoryCookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `name=value; name2=value2`. Pairs without `=` or with an empty
    /// name are ignored.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_owned(), value.trim().to_owned()))
            })
            .collect();
        Self { cookies }
    }

    #[must_use]
    pub fn to_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_owned(), value.to_owned());
    }

    fn remove(&mut self, name: &str) {
        self.cookies.shift_remove(name);
    }
}

/// Device compatibility notice backed by one boolean cookie.
///
/// The confirmed body class mirrors the cookie: present iff the cookie holds
/// [`CONFIRMED_COOKIE_VALUE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNotice {
    config: DeviceNoticeConfig,
}

impl DeviceNotice {
    #[must_use]
    pub fn new(config: DeviceNoticeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DeviceNoticeConfig {
        &self.config
    }

    #[must_use]
    pub fn is_confirmed(&self, cookies: &dyn CookieJar) -> bool {
        cookies
            .get(&self.config.cookie_name)
            .is_some_and(|value| value == CONFIRMED_COOKIE_VALUE)
    }

    /// Adds the confirmed class when the cookie is already set.
    pub fn apply(&self, cookies: &dyn CookieJar, page: &mut PageModel) -> bool {
        let confirmed = self.is_confirmed(cookies);
        if confirmed {
            page.add_body_class(&self.config.confirmed_class);
        }
        confirmed
    }

    pub fn confirm(&self, cookies: &mut dyn CookieJar, page: &mut PageModel) {
        cookies.set(&self.config.cookie_name, CONFIRMED_COOKIE_VALUE);
        page.add_body_class(&self.config.confirmed_class);
        debug!(cookie = %self.config.cookie_name, "device notice confirmed");
    }

    /// Flips the flag. Returns whether the notice is confirmed afterwards.
    pub fn toggle(&self, cookies: &mut dyn CookieJar, page: &mut PageModel) -> bool {
        if self.is_confirmed(cookies) {
            cookies.remove(&self.config.cookie_name);
            page.remove_body_class(&self.config.confirmed_class);
            debug!(cookie = %self.config.cookie_name, "device notice reset");
            false
        } else {
            self.confirm(cookies, page);
            true
        }
    }
}
