use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::error::{ScrollreelError, ScrollreelResult},
    host::document::{Document, ElementSpec},
    overlay::manager::OverlaySpec,
    policy::MotionPolicy,
    section::model::SectionSpec,
};

/// Complete page description: element tree, sections, navigation and overlays.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    /// Root of the element tree.
    pub document: ElementSpec,
    /// Authored document height; defaults to the lowest element bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    /// Section ids reachable through "advance"; defaults to every section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav: Option<Vec<String>>,
    /// Viewport and capability policy.
    #[serde(default)]
    pub policy: MotionPolicy,
    /// Modal elements.
    #[serde(default)]
    pub overlay: OverlaySpec,
    /// Number of FAQ entries.
    #[serde(default)]
    pub faq_items: usize,
}

impl PageSpec {
    /// Parse from a JSON reader and validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollreelResult<Self> {
        let page: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollreelError::serde(format!("parse page JSON: {e}")))?;
        page.validate()?;
        Ok(page)
    }

    /// Parse from a JSON file on disk and validate.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollreelError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse from a JSON string and validate.
    pub fn from_json_str(s: &str) -> ScrollreelResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> ScrollreelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollreelError::serde(format!("serialize page JSON: {e}")))
    }

    /// Build the document described by this page.
    pub fn build_document(&self) -> ScrollreelResult<Document> {
        Document::from_spec(&self.document, self.height)
    }

    /// Navigation order as section ids.
    pub fn nav_order(&self) -> Vec<&str> {
        match &self.nav {
            Some(ids) => ids.iter().map(String::as_str).collect(),
            None => self.sections.iter().map(|s| s.id.as_str()).collect(),
        }
    }

    /// Check structural invariants across sections and the element tree.
    pub fn validate(&self) -> ScrollreelResult<()> {
        if !self.policy.mobile_max_width.is_finite() || self.policy.mobile_max_width < 0.0 {
            return Err(ScrollreelError::validation(
                "policy.mobile_max_width must be finite and >= 0",
            ));
        }
        let doc = self.build_document()?;
        let mut ids = BTreeSet::new();
        for s in &self.sections {
            s.validate()?;
            if !ids.insert(s.id.as_str()) {
                return Err(ScrollreelError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
            if doc.resolve_root(&s.root).is_none() {
                tracing::warn!(section = %s.id, root = %s.root, "section root not in document");
            }
        }
        if let Some(nav) = &self.nav {
            for id in nav {
                if !ids.contains(id.as_str()) {
                    return Err(ScrollreelError::validation(format!(
                        "nav references unknown section '{id}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
