//! YAML front matter extraction.
//!
//! A document may start with a block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Setup Guide
//! description: Installing the toolchain
//! ---
//! # Body
//! ```

use serde::Deserialize;

/// Fence line opening and closing a front matter block.
const FENCE: &str = "---";

/// Fields read from a document's front matter.
///
/// Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    /// Page title override.
    #[serde(default)]
    pub title: Option<String>,
    /// Short page description.
    #[serde(default)]
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse front matter YAML.
    ///
    /// Empty content parses to the default. Blank `title`/`description`
    /// values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or not a mapping of the
    /// expected shape.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = yaml.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let mut front: Self = serde_yaml::from_str(trimmed)?;
        front.title = non_blank(front.title);
        front.description = non_blank(front.description);
        Ok(front)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Split raw document text into its front matter block and body.
///
/// Returns `(None, text)` if the document does not open with a fence or the
/// block is never closed. A leading byte order mark is skipped.
#[must_use]
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    if first.trim_end() != FENCE {
        return (None, text);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, text)
}
