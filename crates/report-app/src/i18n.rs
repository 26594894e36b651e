//! Translation catalog for dialog text
//!
//! Labels are looked up by dotted key (`courseReportDialog.heading`). The
//! built-in English catalog is always present; a locale file from
//! `<config_dir>/locales/<lang>.toml` is layered on top of it.

use std::collections::HashMap;
use std::path::Path;

use report_core::prelude::*;

const LOCALES_DIR: &str = "locales";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Translation lookup. Always returns something displayable.
pub trait Translate {
    fn t(&self, key: &str) -> String;
}

/// Translation keys used by the views
pub mod keys {
    pub const REPORT_HEADING: &str = "courseReportDialog.heading";
    pub const REPORT_REASON_LABEL: &str = "courseReportDialog.reasonLabel";
    pub const REPORT_DETAILS_LABEL: &str = "courseReportDialog.detailsLabel";
    pub const REPORT_DETAILS_PLACEHOLDER: &str = "courseReportDialog.detailsPlaceholder";
    pub const DIALOG_TERMS: &str = "courseDialog.terms";
    pub const DIALOG_POST: &str = "courseDialog.post";
    pub const DIALOG_CANCEL: &str = "courseDialog.cancel";

    pub const LOGIN_HEADING: &str = "loginDialog.heading";
    pub const LOGIN_MESSAGE: &str = "loginDialog.message";
    pub const LOGIN_IDENTIFIER: &str = "loginDialog.identifier";
    pub const LOGIN_PASSWORD: &str = "loginDialog.password";
    pub const LOGIN_SUBMIT: &str = "loginDialog.submit";
    pub const LOGIN_CANCEL: &str = "loginDialog.cancel";

    pub const CARD_COURSE: &str = "courseCard.course";
    pub const CARD_SIGNED_IN: &str = "courseCard.signedIn";
    pub const CARD_SIGNED_OUT: &str = "courseCard.signedOut";
    pub const CARD_LAST_REPORT: &str = "courseCard.lastReport";
    pub const CARD_CLOSED: &str = "courseCard.closed";
    pub const CARD_HINT: &str = "courseCard.hint";
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::REPORT_HEADING, "Report this course"),
    ("courseReportDialog.misguiding", "Misleading content"),
    ("courseReportDialog.spam", "Spam"),
    ("courseReportDialog.misplacement", "Wrong category"),
    ("courseReportDialog.harmful", "Harmful content"),
    ("courseReportDialog.other", "Other"),
    (keys::REPORT_REASON_LABEL, "Reason"),
    (keys::REPORT_DETAILS_LABEL, "Details"),
    (
        keys::REPORT_DETAILS_PLACEHOLDER,
        "Tell us more about the problem",
    ),
    (
        keys::DIALOG_TERMS,
        "I confirm this report is accurate and accept the terms",
    ),
    (keys::DIALOG_POST, "Post"),
    (keys::DIALOG_CANCEL, "Cancel"),
    (keys::LOGIN_HEADING, "Sign in"),
    (keys::LOGIN_MESSAGE, "You need to be signed in to report a course"),
    (keys::LOGIN_IDENTIFIER, "Username or email"),
    (keys::LOGIN_PASSWORD, "Password"),
    (keys::LOGIN_SUBMIT, "Sign in"),
    (keys::LOGIN_CANCEL, "Cancel"),
    (keys::CARD_COURSE, "Course"),
    (keys::CARD_SIGNED_IN, "Signed in"),
    (keys::CARD_SIGNED_OUT, "Not signed in"),
    (keys::CARD_LAST_REPORT, "Last report"),
    (keys::CARD_CLOSED, "Report dialog closed"),
    (keys::CARD_HINT, "r: report  q: quit"),
];

/// Key/value catalog for one language
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    entries: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    /// Built-in English catalog
    pub fn english() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            entries: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// English catalog with a TOML locale layered on top
    pub fn from_toml_str(language: &str, content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| Error::config(format!("Invalid locale file: {}", e)))?;

        let mut overrides = HashMap::new();
        flatten_into(None, &table, &mut overrides);

        let mut catalog = Self::english();
        catalog.language = language.to_string();
        catalog.merge(overrides);
        Ok(catalog)
    }

    pub fn merge(&mut self, overrides: HashMap<String, String>) {
        self.entries.extend(overrides);
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Load the catalog for `language`, falling back to English on any problem
pub fn load_catalog(config_dir: &Path, language: &str) -> Catalog {
    if !is_valid_language(language) {
        warn!("Ignoring invalid language code {:?}", language);
        return Catalog::english();
    }

    let path = config_dir
        .join(LOCALES_DIR)
        .join(format!("{}.toml", language));

    if !path.exists() {
        if language != DEFAULT_LANGUAGE {
            warn!("No locale file at {:?}, using English", path);
        }
        return Catalog::english();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match Catalog::from_toml_str(language, &content) {
            Ok(catalog) => {
                debug!("Loaded locale {} from {:?}", language, path);
                catalog
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Catalog::english()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Catalog::english()
        }
    }
}

fn is_valid_language(language: &str) -> bool {
    !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `[courseDialog] post = "..."` becomes `courseDialog.post`
fn flatten_into(prefix: Option<&str>, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            toml::Value::String(text) => {
                out.insert(full_key, text.clone());
            }
            toml::Value::Table(nested) => flatten_into(Some(&full_key), nested, out),
            other => trace!("Skipping non-string locale entry {}: {:?}", full_key, other),
        }
    }
}
