use crate::app::App;
use crate::picker::DisplayState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const ROW_HEIGHT: u16 = 2;
const ICON_GLYPH: &str = "◆";
const PLACEHOLDER_GLYPH: &str = "◇";

pub fn render(app: &mut App, frame: &mut Frame) {
    let search_height = if app.picker.search_visible() { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(search_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    // Keystrokes only reach the keyword while the search input is shown.
    let keys = if app.picker.search_visible() {
        "type to filter, 'Up/Down': move, 'Enter': select, 'Esc': cancel"
    } else {
        "'Esc': cancel"
    };
    let status_text = format!(
        "Choose a site | Showing: {}/{} | {keys}",
        app.picker.row_count(),
        app.picker.sites().len(),
    );
    frame.render_widget(
        Paragraph::new(status_text).block(Block::default().borders(Borders::ALL).title("Sites")),
        layout[0],
    );

    if app.picker.search_visible() {
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(
            Paragraph::new(app.picker.keyword().to_string()).block(input_block),
            layout[1],
        );
    }

    let main_block = Block::default().borders(Borders::ALL);
    match app.picker.message() {
        None => render_list(app, frame, layout[2], main_block),
        Some(message) => {
            let color = if app.picker.display_state() == DisplayState::Loading {
                Color::Yellow
            } else {
                Color::DarkGray
            };
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(color))
                    .block(main_block),
                layout[2],
            );
        }
    }
}

fn render_list(app: &mut App, frame: &mut Frame, area: Rect, block: Block) {
    let rows: Vec<Row> = app
        .picker
        .filtered()
        .into_iter()
        .map(|site| {
            // Icons are not downloaded; the glyph only tells whether one exists.
            let glyph = if site.icon_url().is_some() {
                ICON_GLYPH
            } else {
                PLACEHOLDER_GLYPH
            };
            let text = Text::from(vec![
                Line::from(Span::styled(
                    site.name.clone().unwrap_or_default(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    site.host().unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]);
            Row::new(vec![Cell::from(glyph), Cell::from(text)]).height(ROW_HEIGHT)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(2), Constraint::Min(0)])
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Site;
    use crate::api::types::SiteIcon;
    use crate::picker::{LOADING_MESSAGE, NO_SITES_MESSAGE, SitePicker};
    use ratatui::{Terminal, backend::TestBackend};

    const FILTER_HINT: &str = "type to filter";

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(SitePicker::new(Box::new(|_, _| {})))
    }

    #[test]
    fn loading_message_hides_search() {
        let mut app = app();
        app.picker.begin_loading();
        let screen = draw(&mut app);
        assert!(screen.contains(LOADING_MESSAGE));
        assert!(!screen.contains("Search"));
        assert!(!screen.contains(FILTER_HINT));
    }

    #[test]
    fn empty_collection_shows_no_sites() {
        let mut app = app();
        app.picker.apply_fetch(Err("unauthorized".into()));
        let screen = draw(&mut app);
        assert!(screen.contains(NO_SITES_MESSAGE));
        assert!(!screen.contains("unauthorized"));
        assert!(!screen.contains("Search"));
        assert!(!screen.contains(FILTER_HINT));
        assert!(screen.contains("'Esc': cancel"));
    }

    #[test]
    fn rows_show_name_host_and_icon_marker() {
        let mut app = app();
        app.picker.apply_fetch(Ok(vec![
            Site {
                id: 1,
                name: Some("Alpha".into()),
                url: "https://alpha.com".into(),
                icon: Some(SiteIcon {
                    img: Some("https://alpha.com/icon.png".into()),
                }),
            },
            Site {
                id: 2,
                name: None,
                url: "beta.net".into(),
                icon: None,
            },
        ]));
        app.picker.set_keyword("a");
        let screen = draw(&mut app);
        assert!(screen.contains("Search"));
        assert!(screen.contains(FILTER_HINT));
        assert!(screen.contains("Alpha"));
        assert!(screen.contains("alpha.com"));
        assert!(screen.contains("beta.net"));
        assert!(screen.contains(ICON_GLYPH));
        assert!(screen.contains(PLACEHOLDER_GLYPH));
        assert!(!screen.contains(NO_SITES_MESSAGE));
    }
}
