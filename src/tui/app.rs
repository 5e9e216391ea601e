//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Background assessment via worker thread

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::heuristic::HeuristicScorer;
use crate::application::AssessmentService;
use crate::config::Settings;
use crate::StrokeSenseError;

use super::ui::{
    assessment::{render_assessment, AssessmentState},
    models::{render_models, ModelPickerState},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};

/// Progress shown while the worker holds the result back.
const PROGRESS_CEILING: f64 = 0.95;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Models,
    PatientForm,
    Assessment,
}

/// Main application state
pub struct App {
    screen: Screen,

    should_quit: bool,

    service: AssessmentService<HeuristicScorer>,

    /// How long the worker holds a result back
    compute_delay: Duration,

    model_state: ModelPickerState,

    patient_form_state: PatientFormState,

    assessment_state: AssessmentState,

    /// Pending assessment worker (if running)
    pending_worker: Option<AssessmentWorkerHandle>,

    /// When the pending submission was sent (for the progress bar)
    submitted_at: Option<Instant>,
}

impl App {
    /// Create a new application instance with the built-in scorer.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let service = AssessmentService::new(Arc::new(HeuristicScorer::new()));
        Self::with_dependencies(service, settings)
    }

    /// Create application with an injected service.
    #[must_use]
    pub fn with_dependencies(
        service: AssessmentService<HeuristicScorer>,
        settings: &Settings,
    ) -> Self {
        Self {
            screen: Screen::Models,
            should_quit: false,
            service,
            compute_delay: settings.compute_delay,
            model_state: ModelPickerState::with_selected(settings.default_model),
            patient_form_state: PatientFormState::default(),
            assessment_state: AssessmentState::default(),
            pending_worker: None,
            submitted_at: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick_progress();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Models => render_models(f, content_area, &self.model_state),
                    Screen::PatientForm => render_patient_form(
                        f,
                        content_area,
                        &self.patient_form_state,
                        self.model_state.selected,
                    ),
                    Screen::Assessment => {
                        render_assessment(f, content_area, &self.assessment_state)
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Short poll to stay responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain progress updates from the background worker.
    fn poll_worker(&mut self) {
        loop {
            let Some(worker) = self.pending_worker.as_ref() else {
                return;
            };

            match worker.poll() {
                Ok(None) => return,
                Ok(Some(AssessmentProgress::Computing)) => {
                    if !matches!(self.assessment_state, AssessmentState::Computing { .. }) {
                        self.assessment_state = AssessmentState::Computing { progress: 0.0 };
                    }
                }
                Ok(Some(AssessmentProgress::Complete(assessment))) => {
                    self.assessment_state = AssessmentState::Complete { assessment };
                    self.finish_worker();
                }
                Ok(Some(AssessmentProgress::Error(message))) => {
                    self.assessment_state = AssessmentState::Error { message };
                    self.finish_worker();
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    self.assessment_state = AssessmentState::Error {
                        message: e.to_string(),
                    };
                    self.finish_worker();
                }
            }
        }
    }

    fn finish_worker(&mut self) {
        self.pending_worker = None;
        self.submitted_at = None;
    }

    /// Advance the progress bar linearly over the configured delay.
    fn tick_progress(&mut self) {
        let Some(started_at) = self.submitted_at else {
            return;
        };
        let AssessmentState::Computing { progress } = &mut self.assessment_state else {
            return;
        };

        let delay = self.compute_delay.as_secs_f64();
        let target = if delay <= 0.0 {
            PROGRESS_CEILING
        } else {
            (started_at.elapsed().as_secs_f64() / delay).min(PROGRESS_CEILING)
        };
        *progress = progress.max(target);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Models => self.handle_models_key(key),
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Assessment => self.handle_assessment_key(key),
        }
    }

    fn handle_models_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.model_state.prev(),
            KeyCode::Down => self.model_state.next(),
            KeyCode::Enter => {
                let model = self.model_state.select_current();
                tracing::info!("Model selected: {}", model);
                self.screen = Screen::PatientForm;
            }
            KeyCode::Tab => {
                self.screen = Screen::PatientForm;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Models;
            }
            KeyCode::Up => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => {
                self.patient_form_state.cycle_choice(false);
            }
            KeyCode::Right => {
                self.patient_form_state.cycle_choice(true);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.patient_form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_assessment_key(&mut self, key: KeyCode) {
        match &self.assessment_state {
            AssessmentState::Complete { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.patient_form_state = PatientFormState::default();
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Models;
                }
                _ => {}
            },
            AssessmentState::Error { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::PatientForm;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Models;
                }
                _ => {}
            },
            AssessmentState::Idle => {
                if key == KeyCode::Esc {
                    self.screen = Screen::PatientForm;
                }
            }
            AssessmentState::Computing { .. } => {}
        }
    }

    fn submit_patient_form(&mut self) {
        if self.pending_worker.is_some() {
            return;
        }

        let Some(variant) = self.model_state.selected else {
            self.patient_form_state.error_message =
                Some(StrokeSenseError::ModelNotSelected.to_string());
            return;
        };

        let form = self.patient_form_state.to_patient_form();

        // Reject bad fields inline instead of on the result screen.
        if let Err(e) = form.parse() {
            self.patient_form_state.error_message = Some(e.to_string());
            return;
        }

        self.screen = Screen::Assessment;
        self.assessment_state = AssessmentState::Computing { progress: 0.0 };
        self.submitted_at = Some(Instant::now());

        let worker = AssessmentWorker::spawn(
            self.service.clone(),
            form,
            Some(variant),
            self.compute_delay,
        );
        self.pending_worker = Some(worker);

        self.patient_form_state.clear_sensitive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelVariant, RiskLabel};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn test_app(default_model: Option<ModelVariant>) -> App {
        let settings = Settings {
            compute_delay: Duration::ZERO,
            default_model,
            ..Settings::default()
        };
        App::new(&settings)
    }

    fn wait_for_worker(app: &mut App) {
        let started = Instant::now();
        while app.pending_worker.is_some() {
            assert!(started.elapsed() < TIMEOUT, "worker timed out");
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_starts_on_model_picker() {
        let app = test_app(None);
        assert_eq!(app.screen, Screen::Models);
        assert_eq!(app.model_state.selected, None);
    }

    #[test]
    fn test_submit_without_model_shows_inline_error() {
        let mut app = test_app(None);
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::PatientForm);

        app.patient_form_state.load_sample_data();
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::PatientForm);
        assert_eq!(
            app.patient_form_state.error_message.as_deref(),
            Some("Please select a model first")
        );
        assert!(app.pending_worker.is_none());
    }

    #[test]
    fn test_submit_with_empty_age_stays_on_form() {
        let mut app = test_app(Some(ModelVariant::KNearestNeighbors));
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.screen, Screen::PatientForm);
        let message = app.patient_form_state.error_message.clone().unwrap_or_default();
        assert!(message.contains("age"), "{message}");
    }

    #[test]
    fn test_sample_patient_flows_to_high_risk_result() {
        let mut app = test_app(None);
        // Move to the SVM card and select it
        for _ in 0..4 {
            app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            app.model_state.selected,
            Some(ModelVariant::SupportVectorMachine)
        );

        app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Assessment);
        assert_eq!(
            app.patient_form_state.to_patient_form(),
            crate::domain::PatientForm::default()
        );

        wait_for_worker(&mut app);
        match &app.assessment_state {
            AssessmentState::Complete { assessment } => {
                assert_eq!(assessment.variant, ModelVariant::SupportVectorMachine);
                assert_eq!(assessment.result.risk_label, RiskLabel::High);
                assert_eq!(assessment.result.percentage(), "93.52%");
            }
            other => panic!("Unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let mut app = test_app(Some(ModelVariant::NaiveBayes));
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_progress_is_capped_while_computing() {
        let mut app = test_app(Some(ModelVariant::NaiveBayes));
        app.assessment_state = AssessmentState::Computing { progress: 0.0 };
        app.submitted_at = Some(Instant::now());
        app.tick_progress();
        match app.assessment_state {
            AssessmentState::Computing { progress } => {
                assert!((progress - PROGRESS_CEILING).abs() < f64::EPSILON);
            }
            ref other => panic!("Unexpected state: {other:?}"),
        }
    }
}
