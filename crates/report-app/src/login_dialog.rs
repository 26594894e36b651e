//! Login prompt state, shown when a report is submitted without a session

use report_client::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Identifier,
    Password,
    Submit,
    Cancel,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Identifier => LoginField::Password,
            LoginField::Password => LoginField::Submit,
            LoginField::Submit => LoginField::Cancel,
            LoginField::Cancel => LoginField::Identifier,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            LoginField::Identifier => LoginField::Cancel,
            LoginField::Password => LoginField::Identifier,
            LoginField::Submit => LoginField::Password,
            LoginField::Cancel => LoginField::Submit,
        }
    }
}

#[derive(Clone, Default)]
pub struct LoginDialogState {
    pub identifier: String,
    pub password: String,
    pub focus: LoginField,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl std::fmt::Debug for LoginDialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginDialogState")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .field("focus", &self.focus)
            .field("in_flight", &self.in_flight)
            .field("error", &self.error)
            .finish()
    }
}

impl LoginDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.identifier.trim().is_empty() && !self.password.is_empty()
    }

    pub fn begin(&mut self) -> Credentials {
        self.in_flight = true;
        self.error = None;
        Credentials::new(self.identifier.trim(), self.password.as_str())
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.in_flight = false;
        self.error = Some(message.into());
    }

    pub fn succeed(&mut self) {
        self.in_flight = false;
        self.dismiss();
    }

    /// Forget everything except the identifier. A sign-in already on the
    /// wire stays in flight until its result arrives.
    pub fn dismiss(&mut self) {
        self.password.clear();
        self.focus = LoginField::default();
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit_requires_both_fields() {
        let mut login = LoginDialogState::new();
        assert!(!login.can_submit());

        login.identifier = "ada".to_string();
        assert!(!login.can_submit());

        login.password = "secret".to_string();
        assert!(login.can_submit());

        login.begin();
        assert!(!login.can_submit());
    }

    #[test]
    fn test_begin_trims_identifier() {
        let mut login = LoginDialogState {
            identifier: " ada ".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        let credentials = login.begin();
        assert_eq!(credentials.identifier, "ada");
        assert!(login.in_flight);
    }

    #[test]
    fn test_dismiss_keeps_pending_sign_in() {
        let mut login = LoginDialogState {
            identifier: "ada".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        login.begin();
        login.dismiss();
        assert!(login.in_flight);
        assert!(!login.can_submit());

        login.succeed();
        assert!(!login.in_flight);
    }

    #[test]
    fn test_dismiss_clears_password_and_error() {
        let mut login = LoginDialogState {
            identifier: "ada".to_string(),
            password: "pw".to_string(),
            focus: LoginField::Submit,
            ..Default::default()
        };
        login.fail("Invalid identifier or password");
        login.dismiss();

        assert_eq!(login.identifier, "ada");
        assert!(login.password.is_empty());
        assert_eq!(login.error, None);
        assert_eq!(login.focus, LoginField::Identifier);
    }

    #[test]
    fn test_debug_redacts_password() {
        let login = LoginDialogState {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", login).contains("hunter2"));
    }
}
