use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["&", "<", ">", "\"", "'"]).expect("Failed to build XML escaper")
});

static TEXT_ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(["&", "<", ">"]).expect("Failed to build XML text escaper"));

/// Escape XML special characters for use inside attribute values.
///
/// # Examples
///
/// ```
/// use doc2odt::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Escape character data. Quotes are left alone since they are legal in text
/// nodes.
///
/// # Examples
///
/// ```
/// use doc2odt::common::xml::escape_text;
/// assert_eq!(escape_text("\"R&D\" <draft>"), "\"R&amp;D\" &lt;draft&gt;");
/// ```
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}
