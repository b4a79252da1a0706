//! Client-side form validation. Failures never reach the network.

use std::collections::BTreeMap;
use std::fmt;

use purplepaw_api::models::{LoginRequest, RegisterRequest};
use purplepaw_auth::Role;
use purplepaw_core::ApiError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;
pub const PHONE_DIGITS: usize = 10;

/// First failure per field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &str) {
        self.fields.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(errors.to_string())
    }
}

/// `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && tld.len() >= 2
}

fn is_name(value: &str) -> bool {
    value.chars().all(|c| c.is_alphabetic() || c == ' ')
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Enter a valid email address");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters");
    }
}

fn check_name(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, &format!("{label} is required"));
    } else if value.chars().count() < MIN_NAME_LEN {
        errors.add(field, &format!("{label} must be at least 2 characters"));
    } else if !is_name(value) {
        errors.add(field, "Only letters are allowed");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Self-registration always requests the client role.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        check_name(&mut errors, "firstName", "First name", &self.first_name);
        check_name(&mut errors, "lastName", "Last name", &self.last_name);

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.add("phone", "Phone is required");
        } else if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
            errors.add("phone", "Phone must have exactly 10 digits");
        }

        check_password(&mut errors, &self.password);
        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.add("confirmPassword", "Passwords must match");
        }

        errors.into_result(RegisterRequest {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: phone.to_string(),
            password: self.password.clone(),
            roles: vec![Role::CLIENT],
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use purplepaw_core::ErrorCode;

    fn register() -> RegisterForm {
        RegisterForm {
            email: "ana@purplepaw.test".to_string(),
            first_name: "Ana María".to_string(),
            last_name: "Núñez".to_string(),
            phone: "5512345678".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("vet@purplepaw.test"));
        assert!(!is_valid_email("vet@purplepaw"));
        assert!(!is_valid_email("vet purplepaw@x.io"));
        assert!(!is_valid_email("@x.io"));
        assert!(!is_valid_email("a@b@c.io"));
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = LoginForm {
            email: "vet@purplepaw.test".to_string(),
            password: "12345".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn valid_registration_requests_client_role() {
        let request = register().validate().unwrap();
        assert_eq!(request.roles, vec![Role::CLIENT]);
        assert_eq!(request.first_name, "Ana María");
    }

    #[test]
    fn registration_field_rules() {
        let mut form = register();
        form.first_name = "A".to_string();
        form.last_name = "Ruiz3".to_string();
        form.confirm_password = "other".to_string();

        let errors = form.validate().unwrap_err();
        assert!(errors.get("firstName").is_some());
        assert_eq!(errors.get("lastName"), Some("Only letters are allowed"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn validation_errors_become_validation_code() {
        let err: ApiError = LoginForm::default().validate().unwrap_err().into();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    proptest! {
        #[test]
        fn phone_accepts_exactly_ten_digits(digits in "[0-9]{1,14}") {
            let mut form = register();
            form.phone = digits.clone();
            let ok = form.validate().is_ok();
            prop_assert_eq!(ok, digits.len() == PHONE_DIGITS);
        }
    }
}
