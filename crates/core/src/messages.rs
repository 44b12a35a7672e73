//! Localized validation messages.

/// Message key for a required field left blank.
pub const BLANK_KEY: &str = "errors.messages.blank";
/// Message key for a value that fails its type rule.
pub const INVALID_KEY: &str = "errors.messages.invalid";

/// Resolves a message key to user-facing text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Supported message locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a locale tag such as `"es"` or `"es-CL"`. Unknown tags fall back
    /// to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Built-in message table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        let text = match (self.locale, key) {
            (Locale::En, BLANK_KEY) => "can't be blank",
            (Locale::En, INVALID_KEY) => "is invalid",
            (Locale::Es, BLANK_KEY) => "no puede estar en blanco",
            (Locale::Es, INVALID_KEY) => "no es válido",
            _ => return None,
        };
        Some(text)
    }
}

impl Translator for MessageCatalog {
    /// Unknown keys translate to themselves.
    fn translate(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_messages() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.translate(BLANK_KEY), "can't be blank");
        assert_eq!(catalog.translate(INVALID_KEY), "is invalid");
    }

    #[test]
    fn spanish_messages() {
        let catalog = MessageCatalog::new(Locale::Es);
        assert_eq!(catalog.translate(BLANK_KEY), "no puede estar en blanco");
        assert_eq!(catalog.translate(INVALID_KEY), "no es válido");
    }

    #[test]
    fn unknown_key_translates_to_itself() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.translate("errors.messages.taken"), "errors.messages.taken");
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::from_tag("es"), Locale::Es);
        assert_eq!(Locale::from_tag("es-CL"), Locale::Es);
        assert_eq!(Locale::from_tag("ES_mx"), Locale::Es);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("pt-BR"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
        assert_eq!(Locale::Es.as_str(), "es");
    }
}
