//! `Display Name <email>` author strings

use crate::error::{KickstartError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<name>[- .,\p{L}\p{N}\p{Mn}'’"()]+) <(?P<email>.+?)>$"#)
        .expect("author pattern is valid")
});

#[cfg(feature = "email-validation")]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+",
        r"[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("email pattern is valid")
});

/// Answers that mean "no author"
const SKIP_ANSWERS: &[&str] = &["n", "no"];

/// A single manifest author entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub name: String,
    pub email: String,
}

impl AuthorRecord {
    /// Parse `Jane Doe <jane.doe@example.com>`
    ///
    /// Returns `Ok(None)` when the input is `n` or `no`.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        if SKIP_ANSWERS.contains(&input) {
            return Ok(None);
        }

        let malformed = || KickstartError::MalformedAuthorString {
            input: input.to_string(),
        };
        let captures = AUTHOR.captures(input).ok_or_else(malformed)?;
        let email = &captures["email"];
        if !is_valid_email(email) {
            return Err(malformed());
        }

        Ok(Some(Self {
            name: captures["name"].trim().to_string(),
            email: email.to_string(),
        }))
    }
}

impl fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(feature = "email-validation")]
fn is_valid_email(email: &str) -> bool {
    let local_len = email.split('@').next().map_or(0, str::len);
    email.len() <= 254 && local_len <= 64 && EMAIL.is_match(email)
}

// Builds without a validator accept any address
#[cfg(not(feature = "email-validation"))]
fn is_valid_email(_email: &str) -> bool {
    true
}
