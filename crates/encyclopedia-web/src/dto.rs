use serde::Deserialize;

use encyclopedia_core::EntryDraft;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// Trimmed query; blank counts as absent
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewPageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl From<NewPageForm> for EntryDraft {
    fn from(form: NewPageForm) -> Self {
        EntryDraft::new(form.title, form.content)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditPageForm {
    #[serde(default)]
    pub content: String,
}
