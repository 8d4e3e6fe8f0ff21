pub mod error;
mod loader;


pub use loader::HintLoader;

use crate::util::Util;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements to strip from a document before extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveHints {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Selectors likely to hold the main content, highest priority first.
///
/// Hint documents may give `main` either as `{"selectors": [...]}` or in the
/// legacy form of a bare list. Both deserialize into this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MainHintsRepr")]
pub struct MainContentHints {
    pub selectors: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MainHintsRepr {
    Legacy(Vec<String>),
    Object {
        #[serde(default)]
        selectors: Vec<String>,
    },
}

impl From<MainHintsRepr> for MainContentHints {
    fn from(repr: MainHintsRepr) -> Self {
        match repr {
            MainHintsRepr::Legacy(selectors) | MainHintsRepr::Object { selectors } => {
                Self { selectors }
            }
        }
    }
}

/// A set of hints. `None` in a category means no source supplied it, which
/// is distinct from a present but empty category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<RemoveHints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<MainContentHints>,
}

impl HintsConfig {
    pub fn new(remove: Option<RemoveHints>, main: Option<MainContentHints>) -> Self {
        Self { remove, main }
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_none() && self.main.is_none()
    }

    /// Combine `direct` hints with `loaded` ones.
    ///
    /// Lists are concatenated in source order (direct first) and then
    /// deduplicated, keeping the first occurrence of every entry.
    pub fn merge<I>(direct: Option<HintsConfig>, loaded: I) -> HintsConfig
    where
        I: IntoIterator<Item = HintsConfig>,
    {
        let mut combined = direct.unwrap_or_default();

        for hints in loaded {
            if let Some(remove) = hints.remove {
                let target = combined.remove.get_or_insert_with(RemoveHints::default);
                target.tags.extend(remove.tags);
                target.classes.extend(remove.classes);
                target.ids.extend(remove.ids);
            }

            if let Some(main) = hints.main {
                let target = combined
                    .main
                    .get_or_insert_with(MainContentHints::default);
                target.selectors.extend(main.selectors);
            }
        }

        if let Some(remove) = combined.remove.as_mut() {
            Util::dedup(&mut remove.tags);
            Util::dedup(&mut remove.classes);
            Util::dedup(&mut remove.ids);
        }

        if let Some(main) = combined.main.as_mut() {
            Util::dedup(&mut main.selectors);
        }

        combined
    }
}

impl fmt::Display for HintsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main_count = self.main.as_ref().map(|m| m.selectors.len()).unwrap_or(0);
        match &self.remove {
            Some(remove) => write!(
                f,
                "HintsConfig(remove=tags:{:?} classes:{:?} ids:{:?}, main={} selectors)",
                remove.tags, remove.classes, remove.ids, main_count
            ),
            None => write!(f, "HintsConfig(remove=None, main={} selectors)", main_count),
        }
    }
}
