use serde::Deserialize;

/// A top-level legal code. Immutable once fetched; the law list lives for
/// the whole session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Law {
    pub id: u32,
    pub name: String,
    /// Optional blurb served by the backend alongside the name.
    #[serde(default)]
    pub description: Option<String>,
}

/// Lightweight norm listing entry — no body content. Belongs to exactly one
/// law and is fetched fresh each time that law is selected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormSummary {
    pub id: u32,
    pub number: String,
    pub title: String,
}

/// Full norm record. `content` is pre-rendered, trusted HTML markup from the
/// provider and is stored verbatim; flattening it for the terminal is the
/// TUI's business (see `tui::html`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormContent {
    pub number: String,
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_law_deserializes_with_description() {
        let json = r#"{"id":1,"name":"BGB","description":"Bürgerliches Gesetzbuch"}"#;
        let law: Law = serde_json::from_str(json).unwrap();
        assert_eq!(law.id, 1);
        assert_eq!(law.name, "BGB");
        assert_eq!(law.description.as_deref(), Some("Bürgerliches Gesetzbuch"));
    }

    #[test]
    fn test_law_deserializes_without_description() {
        // The field is optional on the wire: both `null` and absent are fine.
        let law: Law = serde_json::from_str(r#"{"id":2,"name":"StGB"}"#).unwrap();
        assert_eq!(law.description, None);

        let law: Law =
            serde_json::from_str(r#"{"id":2,"name":"StGB","description":null}"#).unwrap();
        assert_eq!(law.description, None);
    }

    #[test]
    fn test_norm_summary_deserializes() {
        let json = r#"{"id":10,"number":"§1","title":"Geschäftsfähigkeit"}"#;
        let norm: NormSummary = serde_json::from_str(json).unwrap();
        assert_eq!(norm.id, 10);
        assert_eq!(norm.number, "§1");
        assert_eq!(norm.title, "Geschäftsfähigkeit");
    }

    #[test]
    fn test_norm_content_keeps_markup_verbatim() {
        let json = r#"{"number":"§1","title":"Titel","content":"<p>Absatz &amp; mehr</p>"}"#;
        let content: NormContent = serde_json::from_str(json).unwrap();
        // No decoding, no sanitization — the markup passes through untouched.
        assert_eq!(content.content, "<p>Absatz &amp; mehr</p>");
    }

    #[test]
    fn test_malformed_law_is_an_error() {
        assert!(serde_json::from_str::<Law>(r#"{"name":"no id"}"#).is_err());
    }
}
