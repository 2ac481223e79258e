use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::controller::{
    FieldKey, FieldValidatorFn, FormController, FormResult, FormValidatorFn, read_lock, write_lock,
};

pub trait ValidationError: Clone + Send + Sync + 'static {
    fn message(&self) -> String;
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: Clone + PartialEq + Send + Sync + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;
}

pub trait FieldValidator<T, L, E>: Send + Sync
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E>;
}

impl<T, L, E, F> FieldValidator<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a T, &'a L::Value) -> Result<(), E> + Send + Sync,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E> {
        (self)(model, value)
    }
}

pub trait FormValidator<T, E>: Send + Sync
where
    E: ValidationError,
{
    fn validate(&self, model: &T) -> Vec<(FieldKey, E)>;
}

impl<T, E, F> FormValidator<T, E> for F
where
    E: ValidationError,
    F: Fn(&T) -> Vec<(FieldKey, E)> + Send + Sync,
{
    fn validate(&self, model: &T) -> Vec<(FieldKey, E)> {
        (self)(model)
    }
}

impl<T, E> FormController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: ValidationError,
{
    pub fn register_field_validator<L, V>(&self, lens: L, validator: V) -> FormResult<()>
    where
        L: FieldLens<T>,
        V: FieldValidator<T, L, E> + 'static,
    {
        let key = lens.key();
        let validator = Arc::new(validator);
        let wrapped: FieldValidatorFn<T, E> =
            Arc::new(move |model: &T| validator.validate(model, lens.get(model)));
        let mut validators = write_lock(&self.field_validators, "registering field validator")?;
        validators.entry(key).or_default().push(wrapped);
        Ok(())
    }

    pub fn register_form_validator<V>(&self, validator: V) -> FormResult<()>
    where
        V: FormValidator<T, E> + 'static,
    {
        let validator = Arc::new(validator);
        let wrapped: FormValidatorFn<T, E> = Arc::new(move |model: &T| validator.validate(model));
        let mut validators = write_lock(&self.form_validators, "registering form validator")?;
        validators.push(wrapped);
        Ok(())
    }

    /// Writes one field, then re-runs the full validation pass. Re-validating
    /// everything (not just the changed field) keeps cross-field rules such as
    /// "confirm matches password" in step with the latest sibling value.
    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "writing form model")?;
            lens.set(&mut state.model, value);
            let is_dirty = lens.get(&state.model) != lens.get(&state.initial_model);
            if is_dirty {
                state.dirty_fields.insert(key);
            } else {
                state.dirty_fields.remove(&key);
            }
            state.ensure_meta(key).dirty = is_dirty;
        }

        let _ = self.validate_form()?;
        Ok(())
    }

    /// Overwrites one field's error entry without touching values, for surfacing
    /// a server-side rejection the client rules cannot detect. The validity flag
    /// is left alone; the next `set` or `validate_form` recomputes the entry.
    pub fn set_field_error<L>(&self, lens: L, error: E) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let mut state = write_lock(&self.state, "injecting field error")?;
        state.ensure_meta(lens.key()).errors = vec![error];
        Ok(())
    }

    /// Evaluates every registered rule against the current model, rebuilds the
    /// error mapping from scratch, and stores the resulting validity. The sole
    /// writer of the validity flag.
    pub fn validate_form(&self) -> FormResult<bool> {
        let model = {
            read_lock(&self.state, "reading model for form validation")?
                .model
                .clone()
        };
        let field_validators = read_lock(
            &self.field_validators,
            "reading field validators for form validation",
        )?
        .clone();
        let form_validators = read_lock(
            &self.form_validators,
            "reading form validators for form validation",
        )?
        .clone();

        let mut field_errors = BTreeMap::<FieldKey, Vec<E>>::new();
        for (key, validators) in field_validators {
            let mut errors = Vec::new();
            for validator in validators {
                if let Err(error) = validator(&model) {
                    errors.push(error);
                }
            }
            field_errors.insert(key, errors);
        }

        for validator in form_validators {
            for (key, error) in validator(&model) {
                field_errors.entry(key).or_default().push(error);
            }
        }

        let mut state = write_lock(&self.state, "applying form validation result")?;
        let mut keys = state
            .field_meta
            .keys()
            .copied()
            .collect::<BTreeSet<FieldKey>>();
        keys.extend(field_errors.keys().copied());
        for key in keys {
            let meta = state.ensure_meta(key);
            meta.errors = field_errors.remove(&key).unwrap_or_default();
        }
        state.is_valid = state.field_meta.values().all(|meta| meta.errors.is_empty());
        Ok(state.is_valid)
    }

    pub(super) fn known_field_keys(&self) -> FormResult<BTreeSet<FieldKey>> {
        let mut keys = BTreeSet::new();
        keys.extend(
            read_lock(&self.field_validators, "reading field validator keys")?
                .keys()
                .copied(),
        );
        keys.extend(
            read_lock(&self.state, "reading known keys from field metadata")?
                .field_meta
                .keys()
                .copied(),
        );
        Ok(keys)
    }
}
