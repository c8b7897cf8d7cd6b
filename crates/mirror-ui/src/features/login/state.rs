//! Login form state.

use crate::features::admin::forms::FormError;

/// Validated credentials ready for the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Account name, trimmed.
    pub username: String,
    /// Password, sent as typed.
    pub password: String,
}

/// Login form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username input.
    pub username: String,
    /// Password input.
    pub password: String,
    /// Submission in flight.
    pub submitting: bool,
}

impl LoginForm {
    /// Check both fields are present.
    ///
    /// # Errors
    /// Returns [`FormError::Missing`] for the first blank field.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(FormError::Missing("username"));
        }
        if self.password.is_empty() {
            return Err(FormError::Missing("password"));
        }
        Ok(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_required() {
        let mut form = LoginForm::default();
        assert_eq!(form.validate(), Err(FormError::Missing("username")));
        form.username = " admin ".into();
        assert_eq!(form.validate(), Err(FormError::Missing("password")));
        form.password = " pw".into();
        assert_eq!(
            form.validate(),
            Ok(Credentials {
                username: "admin".into(),
                password: " pw".into(),
            })
        );
    }
}
