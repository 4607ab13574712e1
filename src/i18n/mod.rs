/// Translation dictionaries and language preference
///
/// Strings are looked up by dotted path (`"projects.title"`) in a nested
/// JSON dictionary per language. A missing key never fails: the key itself
/// is returned so the gap is visible in the UI.

pub mod names;

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::APP_DIR;
use crate::error::PreferenceError;
use names::NameTranslator;

const TR_DICTIONARY: &str = include_str!("../../locales/tr.json");
const EN_DICTIONARY: &str = include_str!("../../locales/en.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Pick a language from a locale string such as `tr_TR.UTF-8` or `en-US`.
    /// Anything that is not Turkish is shown in English.
    pub fn from_locale(locale: Option<&str>) -> Self {
        match locale {
            Some(locale) if locale.to_lowercase().starts_with("tr") => Language::Tr,
            Some(locale) if !locale.is_empty() => Language::En,
            _ => Language::Tr,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    tr: Value,
    en: Value,
    names: NameTranslator,
    preference_path: Option<PathBuf>,
}

impl Translator {
    /// Create a translator with a fixed language and no persistence
    pub fn new(language: Language) -> Self {
        Self {
            language,
            tr: parse_dictionary("tr", TR_DICTIONARY),
            en: parse_dictionary("en", EN_DICTIONARY),
            names: NameTranslator::new(),
            preference_path: None,
        }
    }

    /// Create a translator from the stored preference, or the system locale
    /// when nothing is stored yet.
    pub fn load() -> Self {
        let preference_path = preference_path();

        let stored = match preference_path.as_deref().map(read_preference) {
            Some(Ok(language)) => language,
            Some(Err(e)) => {
                tracing::warn!("⚠️  Could not read language preference: {}", e);
                None
            }
            None => None,
        };

        let language = stored.unwrap_or_else(|| {
            let locale = std::env::var("LC_ALL")
                .or_else(|_| std::env::var("LANG"))
                .ok();
            Language::from_locale(locale.as_deref())
        });

        tracing::info!("🌐 Language: {}", language.code());

        let mut translator = Self::new(language);
        translator.preference_path = preference_path;
        translator
    }

    /// Store preferences in `path` instead of the default location
    pub fn with_preference_path(mut self, path: PathBuf) -> Self {
        self.preference_path = Some(path);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and remember the choice
    pub fn set_language(&mut self, language: Language) {
        self.language = language;

        if let Some(path) = &self.preference_path {
            if let Err(e) = write_preference(path, language) {
                tracing::warn!("⚠️  Could not save language preference: {}", e);
            }
        }
    }

    pub fn toggle(&mut self) {
        self.set_language(self.language.toggled());
    }

    /// Look up a dotted key. Returns the key itself when it is missing or
    /// does not point at a string.
    pub fn t(&self, key: &str) -> String {
        let dictionary = match self.language {
            Language::Tr => &self.tr,
            Language::En => &self.en,
        };

        let found = key
            .split('.')
            .try_fold(dictionary, |node, part| node.get(part))
            .and_then(Value::as_str);

        match found {
            Some(text) => text.to_string(),
            None => {
                tracing::warn!("Translation key not found: {}", key);
                key.to_string()
            }
        }
    }

    /// Display name of a project in the active language
    pub fn project_name(&self, name: &str) -> String {
        match self.language {
            Language::Tr => name.to_string(),
            Language::En => self.names.translate(name),
        }
    }
}

fn parse_dictionary(code: &str, json: &str) -> Value {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("Dictionary {} is malformed, keys will show verbatim: {}", code, e);
        Value::Null
    })
}

fn preference_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(APP_DIR);
    path.push("language");
    Some(path)
}

/// Read a stored language. A missing or unrecognised file means no preference.
pub fn read_preference(path: &Path) -> Result<Option<Language>, PreferenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    Ok(Language::from_code(&contents))
}

pub fn write_preference(path: &Path, language: Language) -> Result<(), PreferenceError> {
    let parent = path.parent().ok_or(PreferenceError::NoConfigDir)?;
    fs::create_dir_all(parent)?;
    fs::write(path, language.code())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_lookup() {
        let tr = Translator::new(Language::Tr);
        assert_eq!(tr.t("projects.title"), "Referanslarımız");
        assert_eq!(tr.t("contact.subjects.urbanRenewal"), "Kentsel Dönüşüm");

        let en = Translator::new(Language::En);
        assert_eq!(en.t("projects.title"), "Our References");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let translator = Translator::new(Language::En);
        assert_eq!(translator.t("projects.nope"), "projects.nope");
        assert_eq!(translator.t("nope.deeper.still"), "nope.deeper.still");
        // Points at an object, not a string
        assert_eq!(translator.t("projects.categories"), "projects.categories");
    }

    #[test]
    fn test_dictionaries_have_same_keys() {
        fn keys(prefix: &str, value: &Value, out: &mut Vec<String>) {
            if let Value::Object(map) = value {
                for (k, v) in map {
                    let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
                    keys(&path, v, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }

        let translator = Translator::new(Language::Tr);
        let (mut tr, mut en) = (Vec::new(), Vec::new());
        keys("", &translator.tr, &mut tr);
        keys("", &translator.en, &mut en);
        tr.sort();
        en.sort();
        assert_eq!(tr, en);
    }

    #[test]
    fn test_locale_detection() {
        assert_eq!(Language::from_locale(Some("tr_TR.UTF-8")), Language::Tr);
        assert_eq!(Language::from_locale(Some("TR")), Language::Tr);
        assert_eq!(Language::from_locale(Some("en_GB.UTF-8")), Language::En);
        assert_eq!(Language::from_locale(Some("de-DE")), Language::En);
        assert_eq!(Language::from_locale(None), Language::Tr);
    }

    #[test]
    fn test_project_names_translate_in_english_only() {
        let mut translator = Translator::new(Language::Tr);
        assert_eq!(translator.project_name("Konut 2022"), "Konut 2022");
        translator.toggle();
        assert_eq!(translator.project_name("Konut 2022"), "Residence 2022");
    }

    #[test]
    fn test_preference_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("language");

        assert_eq!(read_preference(&path).unwrap(), None);

        let mut translator = Translator::new(Language::Tr).with_preference_path(path.clone());
        translator.toggle();
        assert_eq!(translator.language(), Language::En);
        assert_eq!(read_preference(&path).unwrap(), Some(Language::En));
    }

    #[test]
    fn test_unrecognised_preference_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("language");
        fs::write(&path, "klingon").unwrap();
        assert_eq!(read_preference(&path).unwrap(), None);
    }
}
