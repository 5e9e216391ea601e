//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{ModelVariant, PatientForm};
use crate::tui::styles::MedicalTheme;

const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other"];
const FLAG_OPTIONS: &[&str] = &["0", "1"];
const MARRIED_OPTIONS: &[&str] = &["Yes", "No"];
const WORK_TYPE_OPTIONS: &[&str] = &[
    "Private",
    "Self-employed",
    "Govt_job",
    "children",
    "Never_worked",
];
const SMOKING_OPTIONS: &[&str] = &["never smoked", "formerly smoked", "smokes"];
const RESIDENCE_OPTIONS: &[&str] = &["Urban", "Rural"];

/// Which `PatientForm` field a form row writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    Gender,
    Hypertension,
    HeartDisease,
    AvgGlucoseLevel,
    Bmi,
    WorkType,
    SmokingStatus,
    EverMarried,
    ResidenceType,
}

/// How a field accepts input.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Free numeric text
    Number,
    /// One of a fixed set of options, cycled with Left/Right
    Choice(&'static [&'static str]),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn number(id: FieldId, label: &'static str, hint: &'static str) -> Self {
        Self {
            id,
            label,
            hint,
            kind: FieldKind::Number,
            value: String::new(),
        }
    }

    fn choice(id: FieldId, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            id,
            label,
            hint: "←/→ to change",
            kind: FieldKind::Choice(options),
            value: String::new(),
        }
    }

    fn cycle(&mut self, forward: bool) {
        let FieldKind::Choice(options) = self.kind else {
            return;
        };
        let current = options.iter().position(|o| *o == self.value).unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.value = options[next].to_string();
    }
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        let mut state = Self {
            fields: vec![
                FormField::number(FieldId::Age, "Age", "years"),
                FormField::choice(FieldId::Gender, "Gender", GENDER_OPTIONS),
                FormField::choice(FieldId::Hypertension, "Hypertension", FLAG_OPTIONS),
                FormField::choice(FieldId::HeartDisease, "Heart Disease", FLAG_OPTIONS),
                FormField::number(FieldId::AvgGlucoseLevel, "Average Glucose Level", "mg/dL"),
                FormField::number(FieldId::Bmi, "BMI", "kg/m²"),
                FormField::choice(FieldId::WorkType, "Work Type", WORK_TYPE_OPTIONS),
                FormField::choice(FieldId::SmokingStatus, "Smoking Status", SMOKING_OPTIONS),
                FormField::choice(FieldId::EverMarried, "Married", MARRIED_OPTIONS),
                FormField::choice(FieldId::ResidenceType, "Residence Type", RESIDENCE_OPTIONS),
            ],
            selected_field: 0,
            error_message: None,
        };
        state.load_form(&PatientForm::default());
        state
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if matches!(field.kind, FieldKind::Number) && (c.is_ascii_digit() || c == '.' || c == '-') {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Cycle the current choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        self.fields[self.selected_field].cycle(forward);
        self.error_message = None;
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if matches!(field.kind, FieldKind::Number) {
            field.value.pop();
        }
    }

    /// Clear the current numeric field
    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if matches!(field.kind, FieldKind::Number) {
            field.value.clear();
        }
    }

    /// Wipe all field buffers and restore defaults.
    ///
    /// Called right after submission so typed values do not linger in UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.load_form(&PatientForm::default());
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Copy the current values into a raw form.
    #[must_use]
    pub fn to_patient_form(&self) -> PatientForm {
        let mut form = PatientForm::default();
        for field in &self.fields {
            *form_slot(&mut form, field.id) = field.value.clone();
        }
        form
    }

    /// Overwrite every field from a raw form.
    pub fn load_form(&mut self, form: &PatientForm) {
        let mut form = form.clone();
        for field in self.fields.iter_mut() {
            field.value = std::mem::take(form_slot(&mut form, field.id));
        }
    }

    /// Load a sample high-risk patient
    pub fn load_sample_data(&mut self) {
        self.load_form(&PatientForm {
            age: "67".into(),
            gender: "Male".into(),
            hypertension: "1".into(),
            heart_disease: "1".into(),
            avg_glucose_level: "228.69".into(),
            bmi: "36.6".into(),
            ever_married: "Yes".into(),
            work_type: "Private".into(),
            residence_type: "Urban".into(),
            smoking_status: "formerly smoked".into(),
        });
        self.error_message = None;
    }
}

fn form_slot(form: &mut PatientForm, id: FieldId) -> &mut String {
    match id {
        FieldId::Age => &mut form.age,
        FieldId::Gender => &mut form.gender,
        FieldId::Hypertension => &mut form.hypertension,
        FieldId::HeartDisease => &mut form.heart_disease,
        FieldId::AvgGlucoseLevel => &mut form.avg_glucose_level,
        FieldId::Bmi => &mut form.bmi,
        FieldId::WorkType => &mut form.work_type,
        FieldId::SmokingStatus => &mut form.smoking_status,
        FieldId::EverMarried => &mut form.ever_married,
        FieldId::ResidenceType => &mut form.residence_type,
    }
}

/// Render the patient data input form
pub fn render_patient_form(
    f: &mut Frame,
    area: Rect,
    state: &PatientFormState,
    model: Option<ModelVariant>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], model);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, model: Option<ModelVariant>) {
    let model_span = match model {
        Some(m) => Span::styled(format!(" │ Model: {m}"), MedicalTheme::text_secondary()),
        None => Span::styled(" │ No model selected", MedicalTheme::danger()),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Stroke Risk Prediction", MedicalTheme::title()),
        model_span,
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![Span::raw(" ")];
        match field.kind {
            FieldKind::Number if field.value.is_empty() => {
                spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
            }
            FieldKind::Number => spans.push(Span::styled(&field.value, MedicalTheme::text())),
            FieldKind::Choice(_) => {
                spans.push(Span::styled("‹ ", MedicalTheme::text_muted()));
                spans.push(Span::styled(&field.value, MedicalTheme::text()));
                spans.push(Span::styled(" ›", MedicalTheme::text_muted()));
            }
        }
        if is_selected {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Change ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Predict Risk ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Models", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, ResidenceType, SmokingStatus, WorkType};

    #[test]
    fn test_default_state_matches_default_form() {
        let state = PatientFormState::default();
        assert_eq!(state.to_patient_form(), PatientForm::default());
    }

    #[test]
    fn test_every_choice_option_parses() {
        for o in GENDER_OPTIONS {
            assert!(o.parse::<Gender>().is_ok(), "{o}");
        }
        for o in WORK_TYPE_OPTIONS {
            assert!(o.parse::<WorkType>().is_ok(), "{o}");
        }
        for o in SMOKING_OPTIONS {
            assert!(o.parse::<SmokingStatus>().is_ok(), "{o}");
        }
        for o in RESIDENCE_OPTIONS {
            assert!(o.parse::<ResidenceType>().is_ok(), "{o}");
        }
    }

    #[test]
    fn test_sample_data_parses() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let features = state.to_patient_form().parse().expect("Should parse");
        assert!(features.hypertension);
        assert_eq!(features.smoking_status, SmokingStatus::FormerlySmoked);
    }

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut state = PatientFormState::default();
        for c in "6x7.5".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[0].value, "67.5");
        state.delete_char();
        assert_eq!(state.fields[0].value, "67.");
    }

    #[test]
    fn test_choice_fields_ignore_typing_and_cycle() {
        let mut state = PatientFormState::default();
        state.next_field(); // Gender
        state.input_char('1');
        assert_eq!(state.fields[1].value, "Male");

        state.cycle_choice(true);
        assert_eq!(state.fields[1].value, "Female");
        state.cycle_choice(false);
        state.cycle_choice(false);
        assert_eq!(state.fields[1].value, "Other");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = PatientFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, state.fields.len() - 1);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_clear_sensitive_restores_defaults() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.selected_field = 4;
        state.clear_sensitive();
        assert_eq!(state.to_patient_form(), PatientForm::default());
        assert_eq!(state.selected_field, 0);
    }
}
