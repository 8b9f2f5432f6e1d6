use crate::error::FoxdeliError;

/// Username/password pair exchanged for tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials, rejecting empty values.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, FoxdeliError> {
        let username = validate_username(username.into())?;
        let password = validate_password(password.into())?;
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"..")
            .finish()
    }
}

pub(crate) fn validate_username(username: String) -> Result<String, FoxdeliError> {
    if username.trim().is_empty() {
        return Err(FoxdeliError::InvalidCredentials(
            "Username can not be empty".to_string(),
        ));
    }
    Ok(username)
}

pub(crate) fn validate_password(password: String) -> Result<String, FoxdeliError> {
    if password.is_empty() {
        return Err(FoxdeliError::InvalidCredentials(
            "Password can not be empty".to_string(),
        ));
    }
    Ok(password)
}
