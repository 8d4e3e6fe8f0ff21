use once_cell::sync::Lazy;
use regex::Regex;

pub static MULTI_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\S\n]*\n(?:[^\S\n]*\n)*[^\S\n]*"#).expect("MULTI_NEWLINE regex"));
pub static MULTI_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\S\n]{2,}"#).expect("MULTI_SPACE regex"));
pub static CHARSET_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"charset=([^"';\s]+)"#).expect("CHARSET_HEADER regex"));
pub static CHARSET_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset=["']?([^"'\s/>;]+)"#).expect("CHARSET_META regex")
});

// Block delimiters of the intermediate text representation. Private use code
// points, so they can never clash with page text. They must not survive
// `structured::finish`.
pub const BLOCK_OPEN: char = '\u{E000}';
pub const BLOCK_CLOSE: char = '\u{E001}';
// a closed block directly followed by an opened one
pub static BLOCK_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E001}[^\S\n]*\x{E000}").expect("BLOCK_BOUNDARY regex"));
// three or more nested block edges in a row
pub static BLOCK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{E000}\u{E001}]{3,}").expect("BLOCK_RUN regex"));

pub const NO_CONTENT: &str = "No content found";
pub const EXTRACTION_FAILED: &str = "Failed to extract content";

// deeper subtrees are flattened into plain text
pub const MAX_DEPTH: usize = 256;

pub const HEADING_TAGS: &[&str] = &["header", "h1", "h2", "h3", "h4", "h5", "h6"];
pub const LIST_TAGS: &[&str] = &["ul", "ol"];
pub const TABLE_CELL_TAGS: &[&str] = &["td", "th"];
pub const SKIPPED_LINK_PREFIXES: &[&str] = &["javascript:", "#", "mailto:"];
pub const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "data:"];
pub const DEFAULT_IMAGE_ALT: &str = "Image";
