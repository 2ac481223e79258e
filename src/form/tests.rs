use super::*;
use futures::executor::block_on;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, Eq, PartialEq)]
struct TestError(&'static str);

impl ValidationError for TestError {
    fn message(&self) -> String {
        self.0.to_owned()
    }
}

#[allow(dead_code)]
#[derive(Clone, coursedesk_form_derive::FormModel)]
struct ProfileForm {
    email: String,
    password: String,
    confirm_password: String,
    subscribed: bool,
}

fn base_form() -> ProfileForm {
    ProfileForm {
        email: "user@example.com".to_owned(),
        password: "pass".to_owned(),
        confirm_password: "pass".to_owned(),
        subscribed: false,
    }
}

fn require_email(controller: &FormController<ProfileForm, TestError>) {
    controller
        .register_field_validator(
            ProfileForm::fields().email(),
            |_model: &ProfileForm, value: &String| {
                if value.is_empty() {
                    Err(TestError("required"))
                } else {
                    Ok(())
                }
            },
        )
        .expect("register validator");
}

#[test]
fn field_lens_updates_model_and_dirty_state() {
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    let fields = ProfileForm::fields();

    controller
        .set(fields.email(), "changed@example.com".to_owned())
        .expect("set must succeed");
    let snapshot = controller.snapshot().expect("snapshot must succeed");
    assert!(snapshot.is_dirty);
    assert_eq!(snapshot.model.email, "changed@example.com");

    let email_meta = snapshot
        .field_meta
        .get(&fields.email().key())
        .expect("email meta should exist");
    assert!(email_meta.dirty);
}

#[test]
fn every_set_runs_the_full_validation_pass() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    let invoke_count = Arc::new(AtomicUsize::new(0));
    {
        let counter = invoke_count.clone();
        controller
            .register_field_validator(
                fields.password(),
                move |_model: &ProfileForm, _value: &String| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
            )
            .expect("register validator");
    }

    controller
        .set(fields.email(), "elsewhere@example.com".to_owned())
        .expect("set unrelated field");
    assert_eq!(invoke_count.load(Ordering::SeqCst), 1);
}

#[test]
fn cross_field_rule_reads_the_latest_sibling_value() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    controller
        .register_field_validator(
            fields.confirm_password(),
            |model: &ProfileForm, value: &String| {
                if value != &model.password {
                    Err(TestError("password mismatch"))
                } else {
                    Ok(())
                }
            },
        )
        .expect("register validator");

    // Only the sibling changes; the confirm error must still appear.
    controller
        .set(fields.password(), "new-pass".to_owned())
        .expect("set source field");
    let confirm_errors = controller
        .field_meta(fields.confirm_password())
        .expect("field meta")
        .expect("confirm field meta")
        .errors;
    assert_eq!(confirm_errors, vec![TestError("password mismatch")]);

    controller
        .set(fields.confirm_password(), "new-pass".to_owned())
        .expect("set confirm field");
    assert!(controller.is_valid().expect("validity"));
}

#[test]
fn validity_is_false_until_a_validation_pass_runs() {
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    assert!(!controller.is_valid().expect("validity"));
    assert!(controller.validate_form().expect("validate"));
    assert!(controller.is_valid().expect("validity"));
}

#[test]
fn validate_form_is_idempotent() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);
    controller
        .set(fields.email(), String::new())
        .expect("set invalid value");

    let first = controller.validate_form().expect("first pass");
    let first_meta = controller.snapshot().expect("snapshot").field_meta;
    let second = controller.validate_form().expect("second pass");
    let second_meta = controller.snapshot().expect("snapshot").field_meta;

    assert_eq!(first, second);
    assert_eq!(first_meta, second_meta);
}

#[test]
fn reset_restores_initial_values_and_clears_validity() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);

    controller
        .set(fields.email(), "dirty@example.com".to_owned())
        .expect("set valid value");
    assert!(controller.is_valid().expect("validity"));

    controller.reset_to_initial().expect("reset form");
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "user@example.com");
    assert!(!snapshot.is_dirty);
    assert!(!snapshot.is_valid);
    assert!(
        snapshot
            .field_meta
            .values()
            .all(|meta| meta.errors.is_empty())
    );
}

#[test]
fn injected_server_error_is_overwritten_by_the_next_set() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);
    controller.validate_form().expect("validate");

    controller
        .set_field_error(fields.email(), TestError("email already registered"))
        .expect("inject server error");
    assert_eq!(
        controller.field_error(fields.email()).expect("field error"),
        Some("email already registered".to_owned())
    );
    // Injection alone leaves the stored validity from the last pass alone.
    assert!(controller.is_valid().expect("validity"));

    controller
        .set(fields.email(), "fresh@example.com".to_owned())
        .expect("set value");
    assert_eq!(
        controller.field_error(fields.email()).expect("field error"),
        None
    );
}

#[test]
fn form_validator_errors_attach_to_their_field() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    controller
        .register_form_validator(|model: &ProfileForm| {
            if model.password == model.email {
                vec![(
                    ProfileForm::fields().password().key(),
                    TestError("password must not equal email"),
                )]
            } else {
                Vec::new()
            }
        })
        .expect("register form validator");

    controller
        .set(fields.password(), "user@example.com".to_owned())
        .expect("set password");
    assert!(!controller.is_valid().expect("validity"));
    assert_eq!(
        controller.field_error(fields.password()).expect("error"),
        Some("password must not equal email".to_owned())
    );
}

#[test]
fn fields_without_rules_never_block_validity() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());

    controller
        .set(fields.subscribed(), true)
        .expect("set unruled field");
    assert!(controller.is_valid().expect("validity"));
}

#[test]
fn submit_state_transitions_are_enforced() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);

    let submit_count = Arc::new(AtomicUsize::new(0));

    controller
        .set(fields.email(), String::new())
        .expect("set invalid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should return Ok when validation fails");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 0);
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Failed
    );

    controller
        .set(fields.email(), "valid@example.com".to_owned())
        .expect("set valid email");
    {
        let submit_count = submit_count.clone();
        controller
            .submit(move |_model| {
                submit_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .expect("submit should succeed");
    }
    assert_eq!(submit_count.load(Ordering::SeqCst), 1);
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Succeeded
    );
}

#[test]
fn async_submit_records_handler_failures() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);
    controller
        .set(fields.email(), "valid@example.com".to_owned())
        .expect("set valid email");

    let result = block_on(
        controller.submit_async(|_model| async { Err(FormError::DraftSaveFailed("io".into())) }),
    );
    assert!(result.is_err());
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Failed
    );

    block_on(controller.submit_async(|_model| async { Ok(()) })).expect("second submit succeeds");
    assert_eq!(
        controller.snapshot().expect("snapshot").submit_state,
        SubmitState::Succeeded
    );
}

#[test]
fn reset_field_restores_one_value_and_revalidates() {
    let fields = ProfileForm::fields();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());
    require_email(&controller);

    controller
        .set(fields.email(), String::new())
        .expect("set invalid value");
    assert!(!controller.is_valid().expect("validity"));

    controller.reset_field(fields.email()).expect("reset field");
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "user@example.com");
    assert!(snapshot.is_valid);
    assert!(
        snapshot
            .field_meta
            .get(&fields.email().key())
            .is_some_and(|meta| !meta.dirty && meta.errors.is_empty())
    );
}

#[test]
fn draft_store_roundtrip_loads_and_clears() {
    let fields = ProfileForm::fields();
    let store = InMemoryDraftStore::new();
    let controller = FormController::<ProfileForm, TestError>::new(base_form());

    controller
        .set(fields.email(), "draft@coursedesk.app".to_owned())
        .expect("set email");
    controller.save_draft(&store).expect("save draft");

    controller.reset_to_initial().expect("reset form");
    assert_eq!(
        controller.snapshot().expect("snapshot").model.email,
        "user@example.com"
    );

    let loaded = controller.load_draft(&store).expect("load draft");
    assert!(loaded);
    let snapshot = controller.snapshot().expect("snapshot");
    assert_eq!(snapshot.model.email, "draft@coursedesk.app");
    assert!(snapshot.is_dirty);
    assert!(!snapshot.is_valid);

    controller.clear_draft(&store).expect("clear draft");
    let loaded_again = controller.load_draft(&store).expect("load after clear");
    assert!(!loaded_again);
}

#[test]
fn derive_macro_generates_field_lenses() {
    let fields = ProfileForm::fields();
    assert_eq!(fields.email().key().as_str(), "email");
    assert_eq!(fields.confirm_password().key().as_str(), "confirm_password");
}
