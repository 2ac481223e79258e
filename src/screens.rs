//! Form wiring for the auth and profile screens: one model per screen, rules
//! registered the way the screens declare them.

use crate::form::{FormController, FormModel, FormResult};
use crate::model::User;
use crate::validate::{FieldMessage, email_format, password_requirements};

type Controller<T> = FormController<T, FieldMessage>;

fn required(value: &str, message: &'static str) -> Result<(), FieldMessage> {
    if value.is_empty() {
        Err(message.into())
    } else {
        Ok(())
    }
}

fn email_rule(value: &str) -> Result<(), FieldMessage> {
    required(value, "Email is required")?;
    if !email_format(value) {
        return Err("Please enter a valid email".into());
    }
    Ok(())
}

fn name_rule(value: &str, required_message: &'static str, short_message: &'static str) -> Result<(), FieldMessage> {
    required(value, required_message)?;
    if value.chars().count() < 2 {
        return Err(short_message.into());
    }
    Ok(())
}

fn password_policy_rule(value: &str) -> Result<(), FieldMessage> {
    match password_requirements(value).into_iter().next() {
        Some(message) => Err(message.into()),
        None => Ok(()),
    }
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

pub fn login_form() -> FormResult<Controller<LoginForm>> {
    let controller = FormController::new(LoginForm::default());
    let fields = LoginForm::fields();

    controller.register_field_validator(fields.email(), |_model: &LoginForm, value: &String| {
        email_rule(value)
    })?;
    controller.register_field_validator(fields.password(), |_model: &LoginForm, value: &String| {
        required(value, "Password is required")?;
        if value.chars().count() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        Ok(())
    })?;

    Ok(controller)
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

pub fn register_form() -> FormResult<Controller<RegisterForm>> {
    let controller = FormController::new(RegisterForm::default());
    let fields = RegisterForm::fields();

    controller.register_field_validator(
        fields.first_name(),
        |_model: &RegisterForm, value: &String| {
            name_rule(
                value,
                "First name is required",
                "First name must be at least 2 characters",
            )
        },
    )?;
    controller.register_field_validator(
        fields.last_name(),
        |_model: &RegisterForm, value: &String| {
            name_rule(
                value,
                "Last name is required",
                "Last name must be at least 2 characters",
            )
        },
    )?;
    controller.register_field_validator(fields.email(), |_model: &RegisterForm, value: &String| {
        email_rule(value)
    })?;
    controller.register_field_validator(
        fields.password(),
        |_model: &RegisterForm, value: &String| password_policy_rule(value),
    )?;
    controller.register_field_validator(
        fields.confirm_password(),
        |model: &RegisterForm, value: &String| {
            required(value, "Please confirm your password")?;
            if value != &model.password {
                return Err("Passwords do not match".into());
            }
            Ok(())
        },
    )?;
    controller.register_field_validator(
        fields.agree_to_terms(),
        |_model: &RegisterForm, value: &bool| {
            if !value {
                return Err("You must agree to the terms and conditions".into());
            }
            Ok(())
        },
    )?;

    Ok(controller)
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub fn change_password_form() -> FormResult<Controller<ChangePasswordForm>> {
    let controller = FormController::new(ChangePasswordForm::default());
    let fields = ChangePasswordForm::fields();

    controller.register_field_validator(
        fields.current_password(),
        |_model: &ChangePasswordForm, value: &String| {
            required(value, "Current password is required")
        },
    )?;
    controller.register_field_validator(
        fields.new_password(),
        |model: &ChangePasswordForm, value: &String| {
            password_policy_rule(value)?;
            if value == &model.current_password {
                return Err("New password must be different from current password".into());
            }
            Ok(())
        },
    )?;
    controller.register_field_validator(
        fields.confirm_password(),
        |model: &ChangePasswordForm, value: &String| {
            required(value, "Please confirm your new password")?;
            if value != &model.new_password {
                return Err("Passwords do not match".into());
            }
            Ok(())
        },
    )?;

    Ok(controller)
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct ForgotPasswordForm {
    pub email: String,
}

pub fn forgot_password_form() -> FormResult<Controller<ForgotPasswordForm>> {
    let controller = FormController::new(ForgotPasswordForm::default());
    let fields = ForgotPasswordForm::fields();

    controller.register_field_validator(
        fields.email(),
        |_model: &ForgotPasswordForm, value: &String| email_rule(value),
    )?;

    Ok(controller)
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct VerificationCodeForm {
    pub code: String,
}

pub fn verification_code_form() -> FormResult<Controller<VerificationCodeForm>> {
    let controller = FormController::new(VerificationCodeForm::default());
    let fields = VerificationCodeForm::fields();

    controller.register_field_validator(
        fields.code(),
        |_model: &VerificationCodeForm, value: &String| {
            required(value, "Please enter the verification code")?;
            if value.chars().count() != 6 {
                return Err("Verification code must be 6 digits".into());
            }
            Ok(())
        },
    )?;

    Ok(controller)
}

#[derive(Clone, Debug, Default, FormModel)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            bio: String::new(),
        }
    }
}

/// Seeded from the signed-in user so the form starts clean and dirty tracking
/// reflects actual edits.
pub fn profile_form(initial: ProfileForm) -> FormResult<Controller<ProfileForm>> {
    let controller = FormController::new(initial);
    let fields = ProfileForm::fields();

    controller.register_field_validator(
        fields.first_name(),
        |_model: &ProfileForm, value: &String| {
            name_rule(
                value,
                "First name is required",
                "First name must be at least 2 characters",
            )
        },
    )?;
    controller.register_field_validator(
        fields.last_name(),
        |_model: &ProfileForm, value: &String| {
            name_rule(
                value,
                "Last name is required",
                "Last name must be at least 2 characters",
            )
        },
    )?;
    controller.register_field_validator(fields.email(), |_model: &ProfileForm, value: &String| {
        email_rule(value)
    })?;

    Ok(controller)
}
