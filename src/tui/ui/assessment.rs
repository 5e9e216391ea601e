//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::{Assessment, RiskLabel};
use crate::tui::styles::MedicalTheme;

/// Assessment state
#[derive(Debug, Clone, Default)]
pub enum AssessmentState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Waiting for the worker
    Computing { progress: f64 },
    /// Completed with result
    Complete { assessment: Assessment },
    /// Submission failed
    Error { message: String },
}

/// Render the assessment view
pub fn render_assessment(f: &mut Frame, area: Rect, state: &AssessmentState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0]);
    match state {
        AssessmentState::Idle => render_idle(f, chunks[1]),
        AssessmentState::Computing { progress } => render_progress(f, chunks[1], *progress),
        AssessmentState::Complete { assessment } => render_result(f, chunks[1], assessment),
        AssessmentState::Error { message } => render_error(f, chunks[1], message),
    }
    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Prediction Result", MedicalTheme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient data to begin",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .margin(2)
        .split(area);

    let label = Paragraph::new(Line::from(Span::styled(
        "Calculating stroke risk...",
        MedicalTheme::focused(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress.clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[1]);
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", assessment.variant),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Risk label
            Constraint::Length(3), // Probability gauge
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let label = assessment.result.risk_label;
    let risk_style = MedicalTheme::risk_label(label);
    let icon = match label {
        RiskLabel::Low => "OK",
        RiskLabel::High => "!",
    };

    let risk_display = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Risk Level: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{icon} {label}"),
                risk_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(label.description(), MedicalTheme::text_muted())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(risk_display, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().title(Span::styled(
            " Probability ",
            MedicalTheme::text_secondary(),
        )))
        .gauge_style(risk_style)
        .ratio(assessment.result.probability.clamp(0.0, 1.0))
        .label(assessment.result.percentage());
    f.render_widget(gauge, chunks[1]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Cannot predict", MedicalTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &AssessmentState) {
    let content = match state {
        AssessmentState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Edit Patient ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Patient ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Models", MedicalTheme::key_desc()),
        ]),
        AssessmentState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Models", MedicalTheme::key_desc()),
        ]),
        _ => Line::from(Span::styled("Processing...", MedicalTheme::text_muted())),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
