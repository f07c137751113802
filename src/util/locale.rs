//! UI language preference.
//!
//! The selected locale is stored next to the session keys but is not part of
//! the session: logout leaves it untouched.

#[cfg(test)]
#[path = "locale_test.rs"]
mod locale_test;

use super::storage::Storage;

/// Storage key for the selected locale tag.
pub const LOCALE_KEY: &str = "unlimi-language";

/// Languages the client ships message tables for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    ZhCn,
    EnUs,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::ZhCn, Self::EnUs];

    /// BCP-47 tag as written to storage and `<html lang>`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Parse a stored tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag.trim())
    }
}

/// Read the persisted locale, falling back to the default.
pub fn load(storage: &impl Storage) -> Locale {
    storage
        .get(LOCALE_KEY)
        .and_then(|raw| Locale::from_tag(&raw))
        .unwrap_or_default()
}

/// Persist `locale` and apply it to the document.
pub fn store(storage: &impl Storage, locale: Locale) {
    storage.set(LOCALE_KEY, locale.tag());
    apply(locale);
}

/// Set `<html lang>` to the locale tag.
pub fn apply(locale: Locale) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("lang", locale.tag());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = locale;
    }
}
