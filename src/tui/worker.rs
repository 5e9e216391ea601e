//! Background worker for form submissions.
//!
//! Scoring itself is instant. The worker holds the result back for the
//! configured delay so the UI can show a "computing" indication without
//! blocking the main loop.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::application::AssessmentService;
use crate::domain::{Assessment, ModelVariant, PatientForm};
use zeroize::Zeroize;

use crate::ports::RiskScorer;
use crate::StrokeSenseError;

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Submission accepted, result pending
    Computing,
    /// Assessment finished
    Complete(Assessment),
    /// Submission rejected or scoring failed
    Error(String),
}

/// Handle to a running assessment worker.
pub struct AssessmentWorkerHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<AssessmentProgress>,
    _handle: JoinHandle<()>,
}

impl AssessmentWorkerHandle {
    /// Receive the next progress update without blocking.
    ///
    /// # Errors
    /// Returns `StrokeSenseError::Worker` if the channel is disconnected.
    pub fn poll(&self) -> Result<Option<AssessmentProgress>, StrokeSenseError> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Ok(Some(progress)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(StrokeSenseError::Worker(
                "worker exited without reporting a result".to_string(),
            )),
        }
    }
}

/// Runs one assessment off the UI thread.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background assessment.
    ///
    /// The result is held back for `delay` before it is reported.
    pub fn spawn<S>(
        service: AssessmentService<S>,
        form: PatientForm,
        variant: Option<ModelVariant>,
        delay: Duration,
    ) -> AssessmentWorkerHandle
    where
        S: RiskScorer + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut form = form;
            Self::run_with_progress(&service, &mut form, variant, delay, &tx);
        });

        AssessmentWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<S>(
        service: &AssessmentService<S>,
        form: &mut PatientForm,
        variant: Option<ModelVariant>,
        delay: Duration,
        tx: &Sender<AssessmentProgress>,
    ) where
        S: RiskScorer,
    {
        let _ = tx.send(AssessmentProgress::Computing);

        let result = service.assess(form, variant);
        form.zeroize();

        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let _ = match result {
            Ok(assessment) => tx.send(AssessmentProgress::Complete(assessment)),
            Err(e) => tx.send(AssessmentProgress::Error(e.to_string())),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::heuristic::HeuristicScorer;
    use crate::domain::RiskLabel;
    use std::sync::Arc;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn service() -> AssessmentService<HeuristicScorer> {
        AssessmentService::new(Arc::new(HeuristicScorer::new()))
    }

    fn young_patient() -> PatientForm {
        PatientForm {
            age: "25".into(),
            gender: "Female".into(),
            avg_glucose_level: "90".into(),
            bmi: "22".into(),
            work_type: "children".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_worker_reports_computing_then_result() {
        let handle = AssessmentWorker::spawn(
            service(),
            young_patient(),
            Some(ModelVariant::NaiveBayes),
            Duration::ZERO,
        );

        let first = handle.progress_rx.recv_timeout(TIMEOUT).expect("Computing");
        assert!(matches!(first, AssessmentProgress::Computing));

        match handle.progress_rx.recv_timeout(TIMEOUT).expect("Result") {
            AssessmentProgress::Complete(assessment) => {
                assert_eq!(assessment.result.risk_label, RiskLabel::Low);
            }
            other => panic!("Unexpected progress: {other:?}"),
        }
    }

    #[test]
    fn test_worker_reports_missing_model() {
        let handle = AssessmentWorker::spawn(service(), young_patient(), None, Duration::ZERO);

        let _ = handle.progress_rx.recv_timeout(TIMEOUT).expect("Computing");
        match handle.progress_rx.recv_timeout(TIMEOUT).expect("Result") {
            AssessmentProgress::Error(message) => {
                assert_eq!(message, "Please select a model first");
            }
            other => panic!("Unexpected progress: {other:?}"),
        }
    }

    #[test]
    fn test_worker_holds_result_for_delay() {
        let delay = Duration::from_millis(100);
        let started = std::time::Instant::now();
        let handle = AssessmentWorker::spawn(
            service(),
            young_patient(),
            Some(ModelVariant::KNearestNeighbors),
            delay,
        );

        let _ = handle.progress_rx.recv_timeout(TIMEOUT).expect("Computing");
        let _ = handle.progress_rx.recv_timeout(TIMEOUT).expect("Result");
        assert!(started.elapsed() >= delay);
    }

    #[test]
    fn test_worker_wipes_its_form_copy() {
        let (tx, rx) = mpsc::channel();
        let mut form = young_patient();

        AssessmentWorker::run_with_progress(
            &service(),
            &mut form,
            Some(ModelVariant::NaiveBayes),
            Duration::ZERO,
            &tx,
        );

        assert!(matches!(rx.recv_timeout(TIMEOUT), Ok(AssessmentProgress::Computing)));
        assert!(matches!(rx.recv_timeout(TIMEOUT), Ok(AssessmentProgress::Complete(_))));
        assert!(form.age.is_empty());
        assert!(form.bmi.is_empty());
        assert!(form.work_type.is_empty());
    }

    #[test]
    fn test_poll_reports_disconnected_worker() {
        let (tx, rx) = mpsc::channel::<AssessmentProgress>();
        let handle = AssessmentWorkerHandle {
            progress_rx: rx,
            _handle: thread::spawn(move || drop(tx)),
        };
        let started = std::time::Instant::now();
        loop {
            match handle.poll() {
                Err(StrokeSenseError::Worker(_)) => break,
                Ok(None) if started.elapsed() < TIMEOUT => thread::yield_now(),
                other => panic!("Unexpected poll result: {other:?}"),
            }
        }
    }
}
