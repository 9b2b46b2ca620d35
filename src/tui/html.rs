//! Renders the backend's pre-rendered norm markup into ratatui `Text`.
//!
//! The content string is trusted, pre-sanitized HTML from the provider and
//! is stored verbatim in core state; this module only flattens it for
//! terminal display. Handled markup:
//!
//! - `<p>` / `</p>`: paragraph break (blank line between paragraphs)
//! - `<br>`: line break
//! - `<b>` / `<strong>`: bold, `<i>` / `<em>`: italic, `<u>`: underlined
//! - `<li>`: bulleted line
//! - common entities (`&amp; &lt; &gt; &quot; &#39; &nbsp;`, numeric)
//!
//! Unknown tags are dropped; their text content is kept. Whitespace runs
//! collapse to a single space, as a browser would render them.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Flattens trusted markup into styled terminal text.
pub fn render(markup: &str) -> Text<'static> {
    let mut r = Renderer::default();
    let mut chars = markup.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                let mut tag = String::new();
                for t in chars.by_ref() {
                    if t == '>' {
                        break;
                    }
                    tag.push(t);
                }
                r.apply_tag(&tag);
            }
            '&' => {
                let mut entity = String::new();
                let mut terminated = false;
                while let Some(&e) = chars.peek() {
                    if e == ';' {
                        chars.next();
                        terminated = true;
                        break;
                    }
                    // Overlong or malformed: treat the ampersand literally.
                    if entity.len() >= 8 || e == '&' || e == '<' {
                        break;
                    }
                    entity.push(e);
                    chars.next();
                }
                match decode_entity(&entity, terminated) {
                    Some(decoded) => r.push_char(decoded),
                    None => {
                        r.push_char('&');
                        for e in entity.chars() {
                            r.push_char(e);
                        }
                        if terminated {
                            r.push_char(';');
                        }
                    }
                }
            }
            c if c.is_whitespace() => r.pending_space = true,
            c => r.push_char(c),
        }
    }

    r.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    current: String,
    bold: u32,
    italic: u32,
    underline: u32,
    pending_space: bool,
}

impl Renderer {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underline > 0 {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn push_char(&mut self, c: char) {
        if self.pending_space {
            self.pending_space = false;
            // No leading spaces at line starts.
            if !self.current.is_empty() || !self.spans.is_empty() {
                self.current.push(' ');
            }
        }
        self.current.push(c);
    }

    fn flush_span(&mut self) {
        if !self.current.is_empty() {
            let content = std::mem::take(&mut self.current);
            self.spans.push(Span::styled(content, self.style()));
        }
    }

    fn line_break(&mut self) {
        self.flush_span();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        self.pending_space = false;
    }

    /// Ends the current line and separates it from what follows with one
    /// blank line, without stacking blanks.
    fn paragraph_break(&mut self) {
        if !self.current.is_empty() || !self.spans.is_empty() {
            self.line_break();
        }
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
        self.pending_space = false;
    }

    fn apply_tag(&mut self, raw: &str) {
        // Attributes are ignored: `p class="x"` is just `p`.
        let tag = raw
            .trim()
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match tag.as_str() {
            "p" | "/p" | "div" | "/div" | "h1" | "/h1" | "h2" | "/h2" | "h3" | "/h3" | "ul"
            | "/ul" | "ol" | "/ol" => self.paragraph_break(),
            "br" => self.line_break(),
            "li" => {
                if !self.current.is_empty() || !self.spans.is_empty() {
                    self.line_break();
                }
                self.current.push_str("• ");
                self.pending_space = false;
            }
            "/li" => {}
            "b" | "strong" => {
                self.flush_span();
                self.bold += 1;
            }
            "/b" | "/strong" => {
                self.flush_span();
                self.bold = self.bold.saturating_sub(1);
            }
            "i" | "em" => {
                self.flush_span();
                self.italic += 1;
            }
            "/i" | "/em" => {
                self.flush_span();
                self.italic = self.italic.saturating_sub(1);
            }
            "u" => {
                self.flush_span();
                self.underline += 1;
            }
            "/u" => {
                self.flush_span();
                self.underline = self.underline.saturating_sub(1);
            }
            _ => {} // unknown tag: dropped, content kept
        }
    }

    fn finish(mut self) -> Text<'static> {
        if !self.current.is_empty() || !self.spans.is_empty() {
            self.line_break();
        }
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

fn decode_entity(entity: &str, terminated: bool) -> Option<char> {
    if !terminated {
        return None;
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = if let Some(hex) = code.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                code.parse().ok()?
            };
            char::from_u32(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(markup: &str) -> Vec<String> {
        render(markup)
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(
            plain("<p>Erster Absatz</p><p>Zweiter Absatz</p>"),
            vec!["Erster Absatz", "", "Zweiter Absatz"]
        );
    }

    #[test]
    fn test_br_breaks_line_without_blank() {
        assert_eq!(plain("Zeile eins<br>Zeile zwei"), vec!["Zeile eins", "Zeile zwei"]);
        assert_eq!(plain("Zeile eins<br/>Zeile zwei"), vec!["Zeile eins", "Zeile zwei"]);
    }

    #[test]
    fn test_bold_gets_modifier() {
        let text = render("<p>Ein <b>wichtiges</b> Wort</p>");
        let spans = &text.lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[1].content.as_ref(), "wichtiges");
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(plain("a &amp; b &lt;c&gt; &#167; 1"), vec!["a & b <c> § 1"]);
        assert_eq!(plain("&#x00a7; 2"), vec!["§ 2"]);
    }

    #[test]
    fn test_bare_ampersand_kept_literally() {
        assert_eq!(plain("Meier & Sohn"), vec!["Meier & Sohn"]);
        assert_eq!(plain("&unknown; Rest"), vec!["&unknown; Rest"]);
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(plain("<p>viel\n   Raum\t hier</p>"), vec!["viel Raum hier"]);
    }

    #[test]
    fn test_unknown_tags_dropped_content_kept() {
        assert_eq!(
            plain(r#"<span class="norm">Text</span> bleibt"#),
            vec!["Text bleibt"]
        );
    }

    #[test]
    fn test_list_items_bulleted() {
        assert_eq!(
            plain("<ul><li>eins</li><li>zwei</li></ul>"),
            vec!["• eins", "• zwei"]
        );
    }

    #[test]
    fn test_empty_markup() {
        assert!(render("").lines.is_empty());
        assert!(render("<p></p>").lines.is_empty());
    }

    #[test]
    fn test_unclosed_tag_does_not_panic() {
        assert_eq!(plain("Text <b>fett"), vec!["Text fett"]);
        assert_eq!(plain("Offen <"), vec!["Offen"]);
    }
}
