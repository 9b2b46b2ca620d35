use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::api::{Law, NormContent, NormSummary};
use crate::core::state::{App, View};
use crate::tui::{TuiState, html};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Renders the whole UI as a pure function of core + presentation state.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, status_area] = layout.areas(frame.area());

    frame.render_widget(Span::raw(breadcrumb(app)), title_area);

    match &app.view {
        View::LawList => draw_law_list(frame, main_area, &app.laws, tui),
        View::NormList { law, norms } => draw_norm_list(frame, main_area, law, norms, tui),
        View::NormContent { norm, .. } => draw_norm_content(frame, main_area, norm, tui),
    }

    draw_status_line(frame, status_area, app, spinner_frame);
}

/// Title bar breadcrumb: one segment per navigation level.
fn breadcrumb(app: &App) -> String {
    match &app.view {
        View::LawList => "Kodex – Gesetze".to_string(),
        View::NormList { law, .. } => format!("Kodex – Gesetze › {}", law.name),
        View::NormContent { law, norm, .. } => {
            format!("Kodex – Gesetze › {} › {}", law.name, norm.number)
        }
    }
}

fn draw_law_list(frame: &mut Frame, area: Rect, laws: &[Law], tui: &mut TuiState) {
    let items: Vec<ListItem> = laws
        .iter()
        .map(|law| {
            let mut spans = vec![Span::raw(law.name.clone())];
            if let Some(description) = &law.description {
                spans.push(Span::styled(
                    format!("  {}", description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title("Gesetze"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    frame.render_stateful_widget(list, area, &mut tui.law_list);
}

fn draw_norm_list(
    frame: &mut Frame,
    area: Rect,
    law: &Law,
    norms: &[NormSummary],
    tui: &mut TuiState,
) {
    let items: Vec<ListItem> = norms
        .iter()
        .map(|norm| {
            ListItem::new(Line::from(vec![
                Span::styled(norm.number.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" – {}", norm.title)),
            ]))
        })
        .collect();

    let mut block = Block::bordered().title(law.name.clone());
    if let Some(description) = &law.description {
        block = block.title_bottom(
            Line::from(Span::styled(
                description.clone(),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        );
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    frame.render_stateful_widget(list, area, &mut tui.norm_list);
}

fn draw_norm_content(frame: &mut Frame, area: Rect, norm: &NormContent, tui: &mut TuiState) {
    // Heading matches the web front end: "{number} – {title}".
    let heading = Line::from(Span::styled(
        format!("{} – {}", norm.number, norm.title),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ));

    let mut lines = vec![heading, Line::default()];
    lines.extend(html::render(&norm.content).lines);

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

    // Leave a column for the scrollbar.
    let content_width = area.width.saturating_sub(1);
    let content_height = paragraph.line_count(content_width) as u16;

    let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

    frame.render_stateful_widget(scroll_view, area, &mut tui.content_scroll);
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
    let line = if app.is_loading {
        Line::from(vec![
            Span::styled(
                SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()],
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" Lade… "),
            Span::styled(
                app.status_message.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else if let Some(error) = &app.error {
        Line::from(Span::styled(
            format!("Fehler: {}", error),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::state::View;
    use crate::test_support::{law, norm_content, norm_summary, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_law_list_renders_names_and_description() {
        let mut app = test_app();
        app.laws = vec![
            law(1, "Arbeitsrecht"),
            Law {
                id: 2,
                name: "BGB".to_string(),
                description: Some("Bürgerliches Gesetzbuch".to_string()),
            },
        ];

        let text = render_to_text(&app);
        assert!(text.contains("Gesetze"));
        assert!(text.contains("Arbeitsrecht"));
        assert!(text.contains("BGB"));
        assert!(text.contains("Bürgerliches Gesetzbuch"));
    }

    #[test]
    fn test_norm_list_renders_number_and_title() {
        let mut app = test_app();
        app.view = View::NormList {
            law: law(1, "BGB"),
            norms: vec![norm_summary(10, "§1", "Geschäftsfähigkeit")],
        };

        let text = render_to_text(&app);
        assert!(text.contains("§1"));
        assert!(text.contains("Geschäftsfähigkeit"));
        assert!(text.contains("Kodex – Gesetze › BGB"));
    }

    #[test]
    fn test_norm_content_renders_heading_and_body() {
        let mut app = test_app();
        app.view = View::NormContent {
            law: law(1, "BGB"),
            norms: vec![norm_summary(10, "§1", "Geschäftsfähigkeit")],
            norm: norm_content(
                "§1",
                "Geschäftsfähigkeit",
                "<p>Die Geschäftsfähigkeit beginnt mit der Geburt.</p>",
            ),
        };

        let text = render_to_text(&app);
        assert!(text.contains("§1 – Geschäftsfähigkeit"));
        assert!(text.contains("Die Geschäftsfähigkeit beginnt mit der Geburt."));
    }

    #[test]
    fn test_loading_indicator_shown_while_fetching() {
        let mut app = test_app();
        update(&mut app, Action::LoadLaws);

        let text = render_to_text(&app);
        assert!(text.contains("Lade…"));
    }

    #[test]
    fn test_error_rendered_over_last_good_view() {
        let mut app = test_app();
        app.laws = vec![law(1, "BGB")];
        app.error = Some("Fehler beim Laden der Normen (network error: down)".to_string());

        let text = render_to_text(&app);
        // Last good state stays visible, the error is reported alongside.
        assert!(text.contains("BGB"));
        assert!(text.contains("Fehler beim Laden der Normen"));
    }

    #[test]
    fn test_draw_ui_empty_state() {
        let app = test_app();
        let text = render_to_text(&app);
        assert!(text.contains("Kodex – Gesetze"));
    }
}
