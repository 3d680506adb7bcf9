use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const AGENT_SEARCH_PLACEHOLDER: &str = "Search by agent name...";

/// Agent-name search input
///
/// Holds only focus and placeholder; the query itself lives in the store
/// so it survives month changes.
pub struct SearchBar {
    /// Whether the search bar is focused
    pub active: bool,
    pub placeholder: String,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            active: false,
            placeholder: AGENT_SEARCH_PLACEHOLDER.to_string(),
        }
    }

    /// Render with the current `query`
    pub fn render(&self, frame: &mut Frame, area: Rect, query: &str) {
        let (text, style) = if query.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (query, Style::default().fg(Color::White))
        };

        let border_color = if self.active {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let search_line = Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Cyan)),
            Span::styled(text, style),
            if self.active {
                Span::styled(
                    "_",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::SLOW_BLINK),
                )
            } else {
                Span::raw("")
            },
        ]);

        let paragraph = Paragraph::new(search_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    " Search ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(paragraph, area);
    }
}

/// Highlight case-insensitive matches of `query` in `text`
///
/// Matching runs on the lowercased text; each lowercased byte remembers
/// the original character it came from, so highlights always cover whole
/// characters of `text`.
pub fn highlight_matches(text: &str, query: &str) -> Vec<Span<'static>> {
    if query.is_empty() {
        return vec![Span::raw(text.to_string())];
    }

    let query_lower = query.to_lowercase();
    let mut text_lower = String::with_capacity(text.len());
    // (start, end) in `text` of the char each lowercased byte came from
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let end = start + c.len_utf8();
        for lower in c.to_lowercase() {
            origin.extend(std::iter::repeat((start, end)).take(lower.len_utf8()));
            text_lower.push(lower);
        }
    }

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (idx, matched) in text_lower.match_indices(&query_lower) {
        let start = origin[idx].0;
        let match_end = origin[idx + matched.len() - 1].1;
        if start < last_end {
            continue;
        }
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }

        spans.push(Span::styled(
            text[start..match_end].to_string(),
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));

        last_end = match_end;
    }

    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    if spans.is_empty() {
        vec![Span::raw(text.to_string())]
    } else {
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placeholder() {
        assert_eq!(SearchBar::new().placeholder, "Search by agent name...");
    }

    #[test]
    fn test_highlight_empty_query() {
        let spans = highlight_matches("Alice Moreau", "");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn test_highlight_single_match() {
        let spans = highlight_matches("Alice Moreau", "moreau");
        assert_eq!(spans.len(), 2); // "Alice " + highlighted "Moreau"
        assert_eq!(spans[1].content, "Moreau");
    }

    #[test]
    fn test_highlight_multiple_matches() {
        let spans = highlight_matches("Ana Banana", "ana");
        // "Ana" + " B" + "ana" + "na"
        assert_eq!(spans.len(), 4);
    }

    #[test]
    fn test_highlight_non_ascii_name() {
        let spans = highlight_matches("Élodie Durand", "é");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "É");
        assert_eq!(spans[1].content, "lodie Durand");
    }

    #[test]
    fn test_highlight_when_lowercase_changes_byte_lengths() {
        // Kelvin sign shrinks to 'k', dotted I grows to "i\u{307}"
        let text = "\u{212A}\u{130}\u{130}";
        let spans = highlight_matches(text, "i");
        let contents: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["\u{212A}", "\u{130}", "\u{130}"]);

        let spans = highlight_matches("\u{130}pek Weiß", "weiß");
        let contents: Vec<_> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(contents, vec!["\u{130}pek ", "Weiß"]);
    }

    #[test]
    fn test_highlight_no_match() {
        let spans = highlight_matches("Bob Stone", "xyz");
        assert_eq!(spans.len(), 1);
    }
}
