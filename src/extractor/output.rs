use std::fmt;

use serde::{Deserialize, Serialize};

use super::ExtractionFlags;
use crate::util::Util;

/// Everything pulled out of one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: Option<String>,
    pub content: String,
    pub images: Vec<String>,
    pub links: Vec<String>,
}

/// Discrete form of an [`ExtractionResult`]. Asset lists are left out
/// entirely when they were not requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Record(Record),
}

impl ExtractionResult {
    pub fn render(&self, flags: &ExtractionFlags) -> Output {
        if flags.structured {
            Output::Record(self.to_record(flags))
        } else {
            Output::Text(self.to_text(flags))
        }
    }

    pub fn to_record(&self, flags: &ExtractionFlags) -> Record {
        Record {
            title: self.title.clone(),
            content: self.content.clone(),
            images: flags.include_images.then(|| self.images.clone()),
            links: flags.include_links.then(|| self.links.clone()),
        }
    }

    /// Flat markdown like document: title, content, then the asset sections
    /// that were asked for and are not empty.
    pub fn to_text(&self, flags: &ExtractionFlags) -> String {
        let mut sections = Vec::new();

        if !flags.content_only {
            if let Some(title) = &self.title {
                sections.push(format!("# {title}\n"));
            }
        }

        sections.push(self.content.clone());

        if flags.include_images && !self.images.is_empty() {
            sections.push(format!("\n\n## Images\n\n{}", self.images.join("\n")));
        }

        if flags.include_links && !self.links.is_empty() {
            sections.push(format!("\n\n## Links\n\n{}", self.links.join("\n")));
        }

        Util::normalize_whitespace(&sections.join("\n"))
    }
}

impl Output {
    pub fn content(&self) -> &str {
        match self {
            Output::Text(text) => text,
            Output::Record(record) => &record.content,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Record(record) => {
                let json = serde_json::to_string_pretty(record).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
