// File: src/tui/view.rs
use crate::tui::state::{AppState, TreeRow};

use crate::model::Category;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
};
use strum::IntoEnumIterator;

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab/1/2:Switch Tab  r:Refresh  ?:Toggle Help  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k or Up/Down:Move  g/G:Top/Bottom"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), footer_height])
        .split(f.area());

    // --- Tabs ---
    let titles: Vec<Line> = Category::iter()
        .map(|c| {
            let count: usize = state
                .dashboard
                .as_ref()
                .map(|d| d.groups(c).iter().map(|g| g.rows.len()).sum())
                .unwrap_or(0);
            Line::from(format!(" {} ({}) ", c, count))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Canvas Updates "))
        .select(state.tab_index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, v_chunks[0]);

    // --- Course tree ---
    let course_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let rows: Vec<Row> = state
        .visible_rows()
        .into_iter()
        .map(|row| match row {
            TreeRow::Course(name) => Row::new(vec![
                Cell::from(Span::styled(format!("▼ {}", name), course_style)),
                Cell::from(""),
                Cell::from(""),
            ]),
            TreeRow::Item { title, date_label } => Row::new(vec![
                Cell::from(""),
                Cell::from(title.to_string()),
                Cell::from(Span::styled(
                    date_label.to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]),
        })
        .collect();

    let empty = rows.is_empty();
    let header = Row::new(vec!["Course", state.active_tab.title_header(), "Posted At"]).style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::UNDERLINED),
    );
    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(35),
        Constraint::Percentage(25),
    ];
    let body_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.active_tab));

    if empty && !state.loading {
        let hint = Paragraph::new(format!(
            "No {} for your favorited courses.",
            state.active_tab.to_string().to_lowercase()
        ))
        .block(body_block);
        f.render_widget(hint, v_chunks[1]);
    } else {
        let table = Table::new(rows, widths)
            .header(header)
            .block(body_block)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        f.render_stateful_widget(table, v_chunks[1], &mut state.table_state);
    }

    // --- Footer ---
    let status_style = if state.message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if state.loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let footer = if state.show_full_help {
        Paragraph::new(full_help_text)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(state.message.clone(), status_style),
            Span::raw("  |  "),
            Span::styled(
                state.updated_label(),
                Style::default().add_modifier(Modifier::DIM),
            ),
            Span::raw("  |  ?:Help  r:Refresh  q:Quit"),
        ]))
    };
    f.render_widget(
        footer.block(Block::default().borders(Borders::ALL)),
        v_chunks[2],
    );
}
