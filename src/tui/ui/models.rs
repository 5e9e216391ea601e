//! Model picker: first screen, one card per model variant.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::ModelVariant;
use crate::tui::styles::{MedicalTheme, LOGO_SMALL};

/// Model picker state.
#[derive(Debug, Clone, Default)]
pub struct ModelPickerState {
    /// Card under the cursor
    pub cursor: usize,
    /// Model confirmed with Enter
    pub selected: Option<ModelVariant>,
}

impl ModelPickerState {
    /// Start with `selected` pre-chosen and the cursor on it.
    #[must_use]
    pub fn with_selected(selected: Option<ModelVariant>) -> Self {
        let cursor = selected
            .and_then(|m| ModelVariant::ALL.iter().position(|v| *v == m))
            .unwrap_or(0);
        Self { cursor, selected }
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % ModelVariant::ALL.len();
    }

    pub fn prev(&mut self) {
        self.cursor = (self.cursor + ModelVariant::ALL.len() - 1) % ModelVariant::ALL.len();
    }

    /// Confirm the model under the cursor.
    pub fn select_current(&mut self) -> ModelVariant {
        let model = ModelVariant::ALL[self.cursor];
        self.selected = Some(model);
        model
    }
}

/// Render the model picker.
pub fn render_models(f: &mut Frame, area: Rect, state: &ModelPickerState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Cards
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_cards(f, chunks[1], state);
    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {LOGO_SMALL} "), MedicalTheme::header()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Choose a prediction model", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_cards(f: &mut Frame, area: Rect, state: &ModelPickerState) {
    let card_height = 4;
    let constraints: Vec<Constraint> = ModelVariant::ALL
        .iter()
        .map(|_| Constraint::Length(card_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    for (i, model) in ModelVariant::ALL.iter().enumerate() {
        let is_cursor = i == state.cursor;
        let is_selected = state.selected == Some(*model);

        let title_style = if is_selected {
            MedicalTheme::selected()
        } else if is_cursor {
            MedicalTheme::focused()
        } else {
            MedicalTheme::subtitle()
        };
        let border_style = if is_cursor {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let mut title = vec![Span::styled(format!(" {model} "), title_style)];
        if is_selected {
            title.push(Span::styled(" ✓ ", MedicalTheme::success()));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(border_style);

        let body = Paragraph::new(vec![
            Line::from(Span::styled(model.description(), MedicalTheme::text())),
            Line::from(Span::styled(
                format!("Accuracy: {:.1}%", model.accuracy()),
                MedicalTheme::text_secondary(),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(block);

        f.render_widget(body, chunks[i]);
    }
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Browse ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Select ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
