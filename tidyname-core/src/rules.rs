//! The rename rule engine.
//!
//! [`compute_new_name`] is a pure function from an original filename and a
//! [`RenameConfig`] to the new filename. The steps run in a fixed order and
//! each one operates on the output of the previous:
//!
//! 1. split the name into base and extension
//! 2. replace underscores with spaces
//! 3. remove the keyword (literal match)
//! 4. apply the capitalization mode
//! 5. collapse whitespace runs and trim
//! 6. reattach the untouched extension

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capitalization applied to the base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capitalization {
    /// Leave the casing alone
    #[default]
    None,
    /// Capitalize The First Letter Of Each Word
    Title,
    /// Capitalize only the first character
    Sentence,
    /// UPPERCASE EVERYTHING
    Upper,
    /// lowercase everything
    Lower,
}

impl Capitalization {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Title => "title",
            Self::Sentence => "sentence",
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }

    fn apply(self, s: &str) -> String {
        match self {
            Self::None => s.to_string(),
            Self::Title => to_title_case(s),
            Self::Sentence => to_sentence_case(s),
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
        }
    }
}

impl fmt::Display for Capitalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capitalization {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "title" => Ok(Self::Title),
            "sentence" => Ok(Self::Sentence),
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            other => Err(anyhow!(
                "invalid capitalization mode '{}': expected none, title, sentence, upper or lower",
                other
            )),
        }
    }
}

/// The active rule configuration. Treated as a plain value; callers pass it to
/// every preview and apply call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Turn every `_` in the base name into a space
    pub replace_underscores: bool,
    /// Literal keyword to strip from the base name; blank means no removal
    pub remove_keyword: String,
    /// Match the keyword case-sensitively
    pub case_sensitive_keyword: bool,
    /// Capitalization mode applied after keyword removal
    pub capitalization: Capitalization,
}

impl RenameConfig {
    /// True when no rule would change anything beyond whitespace cleanup
    pub fn is_noop(&self) -> bool {
        !self.replace_underscores
            && self.remove_keyword.trim().is_empty()
            && self.capitalization == Capitalization::None
    }
}

/// Split a filename into `(base, extension)`.
///
/// The extension starts at the last `.` and includes it. A name whose only
/// dot is its first character (`.bashrc`) has no extension, and neither does a
/// name without any dot.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Compute the new filename for `original_name` under `config`.
pub fn compute_new_name(original_name: &str, config: &RenameConfig) -> String {
    let (base, extension) = split_extension(original_name);
    let mut base = base.to_string();

    if config.replace_underscores {
        base = base.replace('_', " ");
    }

    let keyword = config.remove_keyword.trim();
    if !keyword.is_empty() {
        base = remove_keyword(&base, keyword, config.case_sensitive_keyword);
    }

    base = config.capitalization.apply(&base);

    let mut new_name = collapse_whitespace(&base);
    new_name.push_str(extension);
    new_name
}

/// Remove every non-overlapping occurrence of `keyword` from `text`, scanning
/// left to right in a single pass. `keyword` must not be empty.
fn remove_keyword(text: &str, keyword: &str, case_sensitive: bool) -> String {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = keyword.chars().collect();
    if needle.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < haystack.len() {
        let end = i + needle.len();
        if end <= haystack.len()
            && haystack[i..end]
                .iter()
                .zip(&needle)
                .all(|(&a, &b)| chars_match(a, b, case_sensitive))
        {
            i = end;
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

fn chars_match(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Uppercase the first word character of each whitespace-delimited word and
/// lowercase the rest of that word. Punctuation before the first word character
/// is kept as-is.
fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut seen_word_char = false;

    for c in s.chars() {
        if c.is_whitespace() {
            seen_word_char = false;
            out.push(c);
        } else if seen_word_char {
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() || c == '_' {
            out.extend(c.to_uppercase());
            seen_word_char = true;
        } else {
            out.push(c);
        }
    }

    out
}

fn to_sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        },
        None => String::new(),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(
        replace_underscores: bool,
        keyword: &str,
        case_sensitive: bool,
        capitalization: Capitalization,
    ) -> RenameConfig {
        RenameConfig {
            replace_underscores,
            remove_keyword: keyword.to_string(),
            case_sensitive_keyword: case_sensitive,
            capitalization,
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
        assert_eq!(split_extension(".config.json"), (".config", ".json"));
        assert_eq!(split_extension("name."), ("name", "."));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn test_report_example() {
        let cfg = config(true, "FINAL", false, Capitalization::Title);
        assert_eq!(compute_new_name("My_Report_FINAL.pdf", &cfg), "My Report.pdf");
    }

    #[test]
    fn test_replace_underscores() {
        let cfg = config(true, "", false, Capitalization::None);
        assert_eq!(compute_new_name("a_1.txt", &cfg), "a 1.txt");
        assert_eq!(compute_new_name("__lead__trail__.md", &cfg), "lead trail.md");
        // Extension is left alone
        assert_eq!(compute_new_name("data.tar_gz", &cfg), "data.tar_gz");
    }

    #[test]
    fn test_keyword_removal_case_insensitive_by_default() {
        let cfg = config(false, "draft", false, Capitalization::None);
        assert_eq!(compute_new_name("Draft notes DRAFT.txt", &cfg), "notes.txt");
    }

    #[test]
    fn test_keyword_removal_case_sensitive() {
        let cfg = config(false, "draft", true, Capitalization::None);
        assert_eq!(
            compute_new_name("Draft notes draft.txt", &cfg),
            "Draft notes.txt"
        );
    }

    #[test]
    fn test_keyword_is_trimmed_and_blank_is_noop() {
        let cfg = config(false, "  copy ", false, Capitalization::None);
        assert_eq!(compute_new_name("photo copy.jpg", &cfg), "photo.jpg");

        let cfg = config(false, "   ", false, Capitalization::None);
        assert_eq!(compute_new_name("photo copy.jpg", &cfg), "photo copy.jpg");
    }

    #[test]
    fn test_keyword_is_literal_not_a_pattern() {
        let cfg = config(false, "(1)", false, Capitalization::None);
        assert_eq!(compute_new_name("invoice (1).pdf", &cfg), "invoice.pdf");
        assert_eq!(compute_new_name("invoice 1.pdf", &cfg), "invoice 1.pdf");

        let cfg = config(false, ".*", false, Capitalization::None);
        assert_eq!(compute_new_name("a.*b.txt", &cfg), "ab.txt");
        assert_eq!(compute_new_name("abc.txt", &cfg), "abc.txt");
    }

    #[test]
    fn test_keyword_removal_is_single_pass() {
        let cfg = config(false, "ab", true, Capitalization::None);
        assert_eq!(compute_new_name("aabb.txt", &cfg), "ab.txt");
    }

    #[test]
    fn test_keyword_never_touches_extension() {
        let cfg = config(false, "pdf", false, Capitalization::None);
        assert_eq!(compute_new_name("pdf export.pdf", &cfg), "export.pdf");
    }

    #[test]
    fn test_keyword_removal_can_empty_the_base() {
        let cfg = config(false, "scan", false, Capitalization::None);
        assert_eq!(compute_new_name("SCAN.png", &cfg), ".png");
        assert_eq!(compute_new_name("scan", &cfg), "");
    }

    #[test]
    fn test_title_case() {
        let cfg = config(false, "", false, Capitalization::Title);
        assert_eq!(compute_new_name("hello WORLD.txt", &cfg), "Hello World.txt");
        assert_eq!(compute_new_name("(draft) notes.md", &cfg), "(Draft) Notes.md");
        assert_eq!(compute_new_name("élan vital.txt", &cfg), "Élan Vital.txt");
        assert_eq!(compute_new_name("mcDONALD-smith.txt", &cfg), "Mcdonald-smith.txt");
    }

    #[test]
    fn test_sentence_case() {
        let cfg = config(false, "", false, Capitalization::Sentence);
        assert_eq!(
            compute_new_name("the QUICK Brown fox.TXT", &cfg),
            "The quick brown fox.TXT"
        );
    }

    #[test]
    fn test_sentence_case_applies_before_trim() {
        // The first character of the base is the space left by the underscore
        let cfg = config(true, "", false, Capitalization::Sentence);
        assert_eq!(compute_new_name("_hello_World.txt", &cfg), "hello world.txt");
    }

    #[test]
    fn test_upper_and_lower() {
        let upper = config(false, "", false, Capitalization::Upper);
        assert_eq!(compute_new_name("Mixed Case.jpg", &upper), "MIXED CASE.jpg");

        let lower = config(false, "", false, Capitalization::Lower);
        assert_eq!(compute_new_name("Mixed Case.JPG", &lower), "mixed case.JPG");
    }

    #[test]
    fn test_whitespace_is_collapsed_and_trimmed() {
        let cfg = RenameConfig::default();
        assert_eq!(compute_new_name("  too   many\tspaces .txt", &cfg), "too many spaces.txt");
    }

    #[test]
    fn test_dotfile_is_all_base() {
        let cfg = config(false, "", false, Capitalization::Upper);
        assert_eq!(compute_new_name(".bashrc", &cfg), ".BASHRC");
    }

    #[test]
    fn test_capitalization_from_str() {
        assert_eq!("Title".parse::<Capitalization>().unwrap(), Capitalization::Title);
        assert_eq!("LOWER".parse::<Capitalization>().unwrap(), Capitalization::Lower);
        assert!("camel".parse::<Capitalization>().is_err());
    }

    #[test]
    fn test_is_noop() {
        assert!(RenameConfig::default().is_noop());
        assert!(config(false, "  ", true, Capitalization::None).is_noop());
        assert!(!config(true, "", false, Capitalization::None).is_noop());
    }

    fn capitalization_strategy() -> impl Strategy<Value = Capitalization> {
        prop_oneof![
            Just(Capitalization::None),
            Just(Capitalization::Title),
            Just(Capitalization::Sentence),
            Just(Capitalization::Upper),
            Just(Capitalization::Lower),
        ]
    }

    proptest! {
        #[test]
        fn prop_noop_config_is_identity(
            words in prop::collection::vec("[A-Za-z0-9()'-]{1,8}", 1..4),
            ext in "(\\.[a-zA-Z0-9]{1,4})?",
        ) {
            let name = format!("{}{}", words.join(" "), ext);
            prop_assert_eq!(compute_new_name(&name, &RenameConfig::default()), name);
        }

        #[test]
        fn prop_extension_is_preserved(
            base in "[A-Za-z0-9 _.-]{0,16}",
            ext in "\\.[A-Za-z0-9_ ]{0,5}",
            replace_underscores in any::<bool>(),
            keyword in "[a-z_ ]{0,3}",
            case_sensitive in any::<bool>(),
            capitalization in capitalization_strategy(),
        ) {
            let name = format!("x{}{}", base, ext);
            let (_, original_ext) = split_extension(&name);
            let cfg = config(replace_underscores, &keyword, case_sensitive, capitalization);
            let new_name = compute_new_name(&name, &cfg);
            prop_assert!(new_name.ends_with(original_ext));
        }

        #[test]
        fn prop_upper_and_lower_are_idempotent(
            base in "[A-Za-z0-9 _ßéÉ-]{0,16}[A-Za-z0-9]",
            ext in "(\\.[A-Za-z0-9]{1,4})?",
            upper in any::<bool>(),
        ) {
            let name = format!("{}{}", base, ext);
            let capitalization = if upper { Capitalization::Upper } else { Capitalization::Lower };
            let cfg = config(false, "", false, capitalization);
            let once = compute_new_name(&name, &cfg);
            let twice = compute_new_name(&once, &cfg);
            prop_assert_eq!(once, twice);
        }
    }
}
