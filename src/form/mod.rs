mod controller;
mod draft;
mod validation;

#[cfg(test)]
mod tests;

pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormId, FormResult, FormSnapshot, SubmitState,
};
pub use coursedesk_form_derive::FormModel;
pub use draft::{FormDraftStore, InMemoryDraftStore};
pub use validation::{FieldLens, FieldValidator, FormModel, FormValidator, ValidationError};
