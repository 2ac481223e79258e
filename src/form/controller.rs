use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::validation::ValidationError;

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMeta<E> {
    pub dirty: bool,
    pub errors: Vec<E>,
}

impl<E> Default for FieldMeta<E> {
    fn default() -> Self {
        Self {
            dirty: false,
            errors: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub is_dirty: bool,
    pub is_valid: bool,
    pub field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    AlreadySubmitting,
    DraftLoadFailed(String),
    DraftSaveFailed(String),
    DraftClearFailed(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid submit state transition: {from:?} -> {to:?}")
            }
            FormError::AlreadySubmitting => f.write_str("form submit is already in progress"),
            FormError::DraftLoadFailed(error) => write!(f, "failed to load draft: {error}"),
            FormError::DraftSaveFailed(error) => write!(f, "failed to save draft: {error}"),
            FormError::DraftClearFailed(error) => write!(f, "failed to clear draft: {error}"),
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) type FieldValidatorFn<T, E> = Arc<dyn Fn(&T) -> Result<(), E> + Send + Sync>;
pub(super) type FormValidatorFn<T, E> = Arc<dyn Fn(&T) -> Vec<(FieldKey, E)> + Send + Sync>;

pub(super) struct FormState<T, E> {
    pub(super) id: FormId,
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) dirty_fields: BTreeSet<FieldKey>,
    pub(super) field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
    // Written only by validate_form; construction and reset force it false so a
    // form is never treated as valid before a validation pass has run.
    pub(super) is_valid: bool,
}

impl<T, E> FormState<T, E> {
    pub(super) fn ensure_meta(&mut self, key: FieldKey) -> &mut FieldMeta<E> {
        self.field_meta.entry(key).or_default()
    }
}

#[derive(Clone)]
pub struct FormController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: ValidationError,
{
    pub(super) state: Arc<RwLock<FormState<T, E>>>,
    pub(super) field_validators: Arc<RwLock<BTreeMap<FieldKey, Vec<FieldValidatorFn<T, E>>>>>,
    pub(super) form_validators: Arc<RwLock<Vec<FormValidatorFn<T, E>>>>,
}

impl<T, E> FormController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: ValidationError,
{
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(FormState {
                id: FormId::next(),
                initial_model: initial.clone(),
                model: initial,
                submit_state: SubmitState::Idle,
                submit_count: 0,
                dirty_fields: BTreeSet::new(),
                field_meta: BTreeMap::new(),
                is_valid: false,
            })),
            field_validators: Arc::new(RwLock::new(BTreeMap::new())),
            form_validators: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn submit(&self, f: impl FnOnce(&T) -> FormResult<()> + 'static) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if state.submit_state == SubmitState::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
        }

        let is_valid = self.validate_form()?;
        if !is_valid {
            let mut state = write_lock(&self.state, "handling submit validation failure")?;
            transition_submit_state(&mut state, SubmitState::Failed)?;
            return Ok(());
        }

        let model = {
            let mut state = write_lock(&self.state, "moving submit state to submitting")?;
            transition_submit_state(&mut state, SubmitState::Submitting)?;
            state.model.clone()
        };
        let submit_result = f(&model);

        let mut state = write_lock(&self.state, "completing submit")?;
        if submit_result.is_ok() {
            transition_submit_state(&mut state, SubmitState::Succeeded)?;
        } else {
            transition_submit_state(&mut state, SubmitState::Failed)?;
        }
        submit_result
    }

    pub async fn submit_async<F, Fut>(&self, f: F) -> FormResult<()>
    where
        F: FnOnce(&T) -> Fut + 'static,
        Fut: Future<Output = FormResult<()>> + Send + 'static,
    {
        {
            let mut state = write_lock(&self.state, "preparing async submit")?;
            if state.submit_state == SubmitState::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
        }

        let is_valid = self.validate_form()?;
        if !is_valid {
            let mut state = write_lock(&self.state, "handling async submit validation failure")?;
            transition_submit_state(&mut state, SubmitState::Failed)?;
            return Ok(());
        }

        let model = {
            let mut state = write_lock(&self.state, "moving async submit state to submitting")?;
            transition_submit_state(&mut state, SubmitState::Submitting)?;
            state.model.clone()
        };
        let submit_result = f(&model).await;

        let mut state = write_lock(&self.state, "completing async submit")?;
        if submit_result.is_ok() {
            transition_submit_state(&mut state, SubmitState::Succeeded)?;
        } else {
            transition_submit_state(&mut state, SubmitState::Failed)?;
        }
        submit_result
    }

    pub fn reset_to_initial(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.model = state.initial_model.clone();
        state.submit_state = SubmitState::Idle;
        state.dirty_fields.clear();
        state.is_valid = false;
        for meta in state.field_meta.values_mut() {
            meta.dirty = false;
            meta.errors.clear();
        }
        Ok(())
    }

    pub fn reset_field<L>(&self, lens: L) -> FormResult<()>
    where
        L: super::validation::FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "resetting field")?;
            let initial_value = lens.get(&state.initial_model).clone();
            lens.set(&mut state.model, initial_value);
            state.dirty_fields.remove(&key);
            state.ensure_meta(key).dirty = false;
        }
        let _ = self.validate_form()?;
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<T, E>> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        Ok(FormSnapshot {
            model: state.model.clone(),
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            is_dirty: !state.dirty_fields.is_empty(),
            is_valid: state.is_valid,
            field_meta: state.field_meta.clone(),
        })
    }

    pub fn is_valid(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading validity")?.is_valid)
    }

    pub fn field_meta<L>(&self, lens: L) -> FormResult<Option<FieldMeta<E>>>
    where
        L: super::validation::FieldLens<T>,
    {
        Ok(read_lock(&self.state, "reading field meta")?
            .field_meta
            .get(&lens.key())
            .cloned())
    }

    pub fn field_error<L>(&self, lens: L) -> FormResult<Option<String>>
    where
        L: super::validation::FieldLens<T>,
    {
        Ok(read_lock(&self.state, "reading field error")?
            .field_meta
            .get(&lens.key())
            .and_then(|meta| meta.errors.first())
            .map(ValidationError::message))
    }
}

pub(super) fn transition_submit_state<T, E>(
    state: &mut FormState<T, E>,
    next: SubmitState,
) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Validating)
            | (SubmitState::Validating, SubmitState::Submitting)
            | (SubmitState::Validating, SubmitState::Failed)
            | (SubmitState::Submitting, SubmitState::Succeeded)
            | (SubmitState::Submitting, SubmitState::Failed)
            | (SubmitState::Succeeded, SubmitState::Validating)
            | (SubmitState::Failed, SubmitState::Validating)
            | (_, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
