//! Step-gated submission flow.
//!
//! A [`StepFlow`] walks a [`Wizard`]'s steps one at a time. Each step is
//! validated locally, saved with exactly one request, and only then is the next
//! step revealed. A failed or invalid submission leaves the flow where it was.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use client::ClientError;
use common::validation::{FieldErrors, Validate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Local validation failed; nothing was sent.
    #[error("Please correct the highlighted fields.")]
    Invalid(FieldErrors),

    #[error("{submitted} is not the current step ({current})")]
    WrongStep { current: String, submitted: String },

    #[error("{0} is not unlocked yet")]
    Locked(String),

    #[error("All steps are already complete")]
    Completed,

    /// A later step was submitted before the record it belongs to was created.
    #[error("Save the first step before continuing")]
    NotStarted,

    #[error(transparent)]
    Request(#[from] ClientError),
}

impl FlowError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Request(err) => err.field_errors(),
            _ => None,
        }
    }

    /// Toast text, `None` for cancelled requests.
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Request(err) => err.notification(),
            other => Some(other.to_string()),
        }
    }
}

/// One multi-step form: its steps, the form data they share, and how each
/// step is saved.
#[async_trait]
pub trait Wizard: Send + Sync {
    type Step: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync;
    /// Shared form data. Prefills later steps and decides create vs update.
    type Data: Clone + Default + Send + Sync;
    /// What a single step submits.
    type Input: Validate + Send + Sync;

    /// Number shown for the first step (some flows count from 0).
    const FIRST_STEP_NUMBER: u32;

    /// Steps in order. May depend on earlier answers.
    fn steps(&self, data: &Self::Data) -> Vec<Self::Step>;

    fn step_of(input: &Self::Input) -> Self::Step;

    /// Save one step and return the form data with the result merged in.
    async fn submit(&self, input: &Self::Input, data: &Self::Data) -> Result<Self::Data, FlowError>;
}

/// Clears the saving flag however the submission ends.
struct SavingGuard(Arc<AtomicBool>);

impl SavingGuard {
    fn hold(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag.clone())
    }
}

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct StepFlow<W: Wizard> {
    wizard: W,
    data: W::Data,
    /// Index of the visible step; equal to the step count once complete.
    index: usize,
    /// Steps saved so far. A step is reachable once every step before it
    /// in the current order is in here.
    saved: Vec<W::Step>,
    saving: Arc<AtomicBool>,
}

impl<W: Wizard> StepFlow<W> {
    pub fn new(wizard: W) -> Self {
        Self::with_data(wizard, W::Data::default())
    }

    pub fn with_data(wizard: W, data: W::Data) -> Self {
        Self {
            wizard,
            data,
            index: 0,
            saved: Vec::new(),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start at the server's `currentStage` (numbered like the wizard's steps).
    pub fn resume(wizard: W, data: W::Data, stage: Option<u32>) -> Self {
        let mut flow = Self::with_data(wizard, data);
        let count = flow.steps().len();
        let index = stage
            .map(|s| s.saturating_sub(W::FIRST_STEP_NUMBER) as usize)
            .unwrap_or(0)
            .min(count);
        flow.index = index;
        flow.saved = flow.steps().into_iter().take(index).collect();
        tracing::debug!(stage = ?stage, index, "resuming flow");
        flow
    }

    pub fn steps(&self) -> Vec<W::Step> {
        self.wizard.steps(&self.data)
    }

    /// The visible step, `None` once every step is saved.
    pub fn current_step(&self) -> Option<W::Step> {
        self.steps().get(self.index).copied()
    }

    /// The visible step's number in the wizard's own numbering.
    pub fn current_number(&self) -> u32 {
        W::FIRST_STEP_NUMBER + self.index as u32
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.steps().len()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    pub fn data(&self) -> &W::Data {
        &self.data
    }

    pub fn wizard(&self) -> &W {
        &self.wizard
    }

    pub fn is_unlocked(&self, step: W::Step) -> bool {
        self.unlocked_index(step).is_some()
    }

    fn unlocked_index(&self, step: W::Step) -> Option<usize> {
        let steps = self.steps();
        let index = steps.iter().position(|s| *s == step)?;
        steps[..index]
            .iter()
            .all(|s| self.saved.contains(s))
            .then_some(index)
    }

    /// Validate, save, merge and advance one step.
    pub async fn submit(&mut self, input: W::Input) -> Result<W::Step, FlowError> {
        let submitted = W::step_of(&input);
        let current = self.current_step().ok_or(FlowError::Completed)?;
        if submitted != current {
            return Err(FlowError::WrongStep {
                current: current.to_string(),
                submitted: submitted.to_string(),
            });
        }
        input.validate().map_err(FlowError::Invalid)?;

        let data = {
            let _saving = SavingGuard::hold(&self.saving);
            self.wizard.submit(&input, &self.data).await
        };
        let data = match data {
            Ok(data) => data,
            Err(err) => {
                if !matches!(&err, FlowError::Request(e) if e.is_canceled()) {
                    tracing::warn!(step = %current, "step not saved: {}", err);
                }
                return Err(err);
            }
        };

        self.data = data;
        if !self.saved.contains(&current) {
            self.saved.push(current);
        }
        self.index = (self.index + 1).min(self.steps().len());
        tracing::info!(step = %current, next = self.current_number(), "step saved");
        Ok(current)
    }

    /// Show the previous step. Never submits.
    pub fn back(&mut self) -> Option<W::Step> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.current_step()
    }

    /// Jump to a step already reached. Never submits.
    pub fn go_to(&mut self, step: W::Step) -> Result<(), FlowError> {
        let index = self
            .unlocked_index(step)
            .ok_or_else(|| FlowError::Locked(step.to_string()))?;
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;

    use common::validation::Validator;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Step {
        Name,
        Extra,
        Done,
    }

    impl fmt::Display for Step {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    #[derive(Clone, Default, Debug)]
    struct Data {
        name: String,
        with_extra: bool,
        saved: Vec<Step>,
    }

    struct Input {
        step: Step,
        name: String,
        with_extra: bool,
    }

    impl Validate for Input {
        fn validate(&self) -> Result<(), FieldErrors> {
            Validator::new()
                .required("name", "Name", &self.name)
                .finish()
        }
    }

    #[derive(Default)]
    struct TestWizard {
        calls: AtomicU32,
        fail: AtomicBool,
    }

    #[async_trait]
    impl Wizard for TestWizard {
        type Step = Step;
        type Data = Data;
        type Input = Input;
        const FIRST_STEP_NUMBER: u32 = 1;

        fn steps(&self, data: &Data) -> Vec<Step> {
            if data.with_extra {
                vec![Step::Name, Step::Extra, Step::Done]
            } else {
                vec![Step::Name, Step::Done]
            }
        }

        fn step_of(input: &Input) -> Step {
            input.step
        }

        async fn submit(&self, input: &Input, data: &Data) -> Result<Data, FlowError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(FlowError::Request(ClientError::Api {
                    status: 500,
                    code: None,
                    message: "boom".into(),
                }));
            }
            let mut data = data.clone();
            data.name = input.name.clone();
            if input.step == Step::Name {
                data.with_extra = input.with_extra;
            }
            data.saved.push(input.step);
            Ok(data)
        }
    }

    fn input(step: Step, name: &str) -> Input {
        Input {
            step,
            name: name.into(),
            with_extra: false,
        }
    }

    #[tokio::test]
    async fn test_invalid_input_neither_sends_nor_advances() {
        let mut flow = StepFlow::new(TestWizard::default());
        let err = flow.submit(input(Step::Name, " ")).await.unwrap_err();

        assert_eq!(err.field_errors().unwrap().get("name"), Some("Name is required"));
        assert_eq!(flow.wizard().calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.current_number(), 1);
    }

    #[tokio::test]
    async fn test_success_merges_and_advances_one_step() {
        let mut flow = StepFlow::new(TestWizard::default());
        flow.submit(input(Step::Name, "Ada")).await.unwrap();

        assert_eq!(flow.current_step(), Some(Step::Done));
        assert_eq!(flow.current_number(), 2);
        assert_eq!(flow.data().name, "Ada");
        assert!(!flow.is_saving());
    }

    #[tokio::test]
    async fn test_failure_keeps_step_and_releases_saving() {
        let mut flow = StepFlow::new(TestWizard::default());
        flow.wizard().fail.store(true, Ordering::SeqCst);

        let err = flow.submit(input(Step::Name, "Ada")).await.unwrap_err();

        assert_eq!(err.notification().as_deref(), Some("boom"));
        assert_eq!(flow.current_step(), Some(Step::Name));
        assert!(!flow.is_saving());
        assert!(flow.data().saved.is_empty());
    }

    #[tokio::test]
    async fn test_back_and_go_to_never_submit() {
        let mut flow = StepFlow::new(TestWizard::default());
        flow.submit(input(Step::Name, "Ada")).await.unwrap();

        assert_eq!(flow.back(), Some(Step::Name));
        assert!(flow.back().is_none());
        flow.go_to(Step::Done).unwrap();

        assert_eq!(flow.wizard().calls.load(Ordering::SeqCst), 1);
        assert_eq!(flow.current_step(), Some(Step::Done));
    }

    #[tokio::test]
    async fn test_go_to_refuses_locked_steps() {
        let mut flow = StepFlow::new(TestWizard::default());
        assert!(matches!(flow.go_to(Step::Done), Err(FlowError::Locked(_))));
    }

    #[tokio::test]
    async fn test_branch_inserts_step() {
        let mut flow = StepFlow::new(TestWizard::default());
        flow.submit(Input {
            step: Step::Name,
            name: "Ada".into(),
            with_extra: true,
        })
        .await
        .unwrap();

        assert_eq!(flow.steps(), vec![Step::Name, Step::Extra, Step::Done]);
        assert_eq!(flow.current_step(), Some(Step::Extra));
    }

    #[tokio::test]
    async fn test_go_to_cannot_skip_step_added_by_branch() {
        let mut flow = StepFlow::new(TestWizard::default());
        flow.submit(input(Step::Name, "Ada")).await.unwrap();
        flow.submit(input(Step::Done, "Ada")).await.unwrap();
        assert!(flow.is_complete());

        flow.go_to(Step::Name).unwrap();
        flow.submit(Input {
            step: Step::Name,
            name: "Ada".into(),
            with_extra: true,
        })
        .await
        .unwrap();

        assert_eq!(flow.current_step(), Some(Step::Extra));
        assert!(flow.is_unlocked(Step::Extra));
        assert!(!flow.is_unlocked(Step::Done));
        assert!(matches!(flow.go_to(Step::Done), Err(FlowError::Locked(_))));
        assert_eq!(flow.current_step(), Some(Step::Extra));

        flow.submit(input(Step::Extra, "Ada")).await.unwrap();
        flow.go_to(Step::Done).unwrap();
        assert_eq!(flow.wizard().calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_wrong_step_is_rejected() {
        let mut flow = StepFlow::new(TestWizard::default());
        let err = flow.submit(input(Step::Done, "Ada")).await.unwrap_err();
        assert!(matches!(err, FlowError::WrongStep { .. }));
    }

    #[tokio::test]
    async fn test_resume_past_last_step_is_complete() {
        let flow = StepFlow::resume(TestWizard::default(), Data::default(), Some(3));
        assert!(flow.is_complete());
        assert!(flow.current_step().is_none());

        let flow = StepFlow::resume(TestWizard::default(), Data::default(), Some(2));
        assert_eq!(flow.current_step(), Some(Step::Done));
        assert!(flow.is_unlocked(Step::Name));
    }
}
