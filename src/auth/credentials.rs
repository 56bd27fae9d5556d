use std::collections::HashMap;

/// One entry of the fixed demo credential set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: &'static str,
    pub password: &'static str, // plaintext on purpose: demo set, not a security boundary
    pub display_name: &'static str,
}

const DEMO_CREDENTIALS: &[Credential] = &[
    Credential {
        username: "admin",
        password: "123456",
        display_name: "admin",
    },
    Credential {
        username: "user",
        password: "password",
        display_name: "user",
    },
];

/// Immutable username → credential map, built once at startup.
#[derive(Debug)]
pub struct CredentialTable {
    by_username: HashMap<&'static str, Credential>,
}

impl CredentialTable {
    pub fn demo() -> Self {
        Self::from_entries(DEMO_CREDENTIALS)
    }

    pub fn from_entries(entries: &[Credential]) -> Self {
        let by_username = entries
            .iter()
            .map(|c| (c.username, c.clone()))
            .collect();
        Self { by_username }
    }

    pub fn lookup(&self, username: &str) -> Option<&Credential> {
        self.by_username.get(username)
    }

    /// Entries in a stable order, for the demo hint on the login page.
    pub fn entries(&self) -> Vec<&Credential> {
        let mut all: Vec<_> = self.by_username.values().collect();
        all.sort_by_key(|c| c.username);
        all
    }
}
