use serde::{Deserialize, Serialize};

/// Connected user, as stored in session storage under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type", default)]
    pub user_type: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn employee(email: impl Into<String>) -> Self {
        User {
            user_type: "Employee".to_string(),
            email: email.into(),
        }
    }
}
