//! Document QA form state
//!
//! Holds the three inputs of the QA screen and decides whether the submit
//! action is available.

use crate::credential::{API_KEY_PREFIX, Credential};
use crate::text::UploadedFile;

/// Transient form values for one QA request
#[derive(Debug, Default)]
pub struct QaForm {
    pub document: Option<UploadedFile>,
    pub query: String,
    pub api_key: Option<Credential>,
}

impl QaForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: UploadedFile) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Credential) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Whether the credential field should accept input yet
    pub fn is_key_field_enabled(&self) -> bool {
        self.document.is_some() && !self.query.is_empty()
    }

    /// Submit needs a document, a query and a key that looks like a secret key
    pub fn is_submit_enabled(&self) -> bool {
        self.disabled_reason().is_none()
    }

    /// Explanation for a disabled submit action
    pub fn disabled_reason(&self) -> Option<String> {
        if self.document.is_none() {
            return Some("upload a document first".to_string());
        }
        if self.query.is_empty() {
            return Some("enter a query".to_string());
        }
        match &self.api_key {
            Some(key) if key.has_valid_prefix() => None,
            _ => Some(format!("the API key must start with '{}'", API_KEY_PREFIX)),
        }
    }

    /// Take the inputs out of the form if submission is allowed
    ///
    /// The form is left cleared either way, like a form that resets on submit.
    pub fn submit(&mut self) -> Option<(UploadedFile, String, Credential)> {
        let enabled = self.is_submit_enabled();
        let document = self.document.take();
        let query = std::mem::take(&mut self.query);
        let api_key = self.api_key.take();

        if !enabled {
            return None;
        }
        Some((document?, query, api_key?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> UploadedFile {
        UploadedFile::new("cv.txt", b"ten years of rust".to_vec())
    }

    #[test]
    fn test_requires_all_three_inputs() {
        let cases = [
            (false, false, false),
            (true, false, false),
            (false, true, false),
            (false, false, true),
            (true, true, false),
            (true, false, true),
            (false, true, true),
        ];
        for (has_doc, has_query, has_key) in cases {
            let mut form = QaForm::new();
            if has_doc {
                form = form.with_document(doc());
            }
            if has_query {
                form = form.with_query("what now?");
            }
            if has_key {
                form = form.with_api_key(Credential::new("sk-live"));
            }
            assert!(!form.is_submit_enabled(), "{:?}", (has_doc, has_query, has_key));
            assert!(form.disabled_reason().is_some());
        }

        let form = QaForm::new()
            .with_document(doc())
            .with_query("what now?")
            .with_api_key(Credential::new("sk-live"));
        assert!(form.is_submit_enabled());
    }

    #[test]
    fn test_key_prefix_required() {
        let form = QaForm::new()
            .with_document(doc())
            .with_query("q")
            .with_api_key(Credential::new("not-a-key"));
        assert!(!form.is_submit_enabled());
        assert!(form.disabled_reason().unwrap().contains("sk-"));
    }

    #[test]
    fn test_key_field_enablement() {
        assert!(!QaForm::new().with_query("q").is_key_field_enabled());
        assert!(QaForm::new().with_document(doc()).with_query("q").is_key_field_enabled());
    }

    #[test]
    fn test_submit_clears_form() {
        let mut form = QaForm::new()
            .with_document(doc())
            .with_query("q")
            .with_api_key(Credential::new("sk-live"));
        let (document, query, key) = form.submit().unwrap();
        assert_eq!(document.name, "cv.txt");
        assert_eq!(query, "q");
        assert!(key.has_valid_prefix());
        assert!(form.document.is_none() && form.query.is_empty() && form.api_key.is_none());

        let mut rejected = QaForm::new().with_query("q");
        assert!(rejected.submit().is_none());
        assert!(rejected.query.is_empty());
    }
}
