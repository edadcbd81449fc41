use std::env;

/// Where the picker looks up the bearer token for the listing service.
pub trait TokenStore {
    fn retrieve_access_token(&self) -> Option<String>;
}

/// Reads the token from an environment variable. Blank values count as absent.
#[derive(Clone, Debug)]
pub struct EnvTokenStore {
    var: String,
}

impl EnvTokenStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenStore for EnvTokenStore {
    fn retrieve_access_token(&self) -> Option<String> {
        normalize(env::var(&self.var).ok())
    }
}

#[derive(Clone, Debug, Default)]
pub struct StaticTokenStore(pub Option<String>);

impl TokenStore for StaticTokenStore {
    fn retrieve_access_token(&self) -> Option<String> {
        normalize(self.0.clone())
    }
}

fn normalize(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_absent() {
        assert_eq!(StaticTokenStore(Some("   ".into())).retrieve_access_token(), None);
        assert_eq!(StaticTokenStore(None).retrieve_access_token(), None);
    }

    #[test]
    fn token_is_trimmed() {
        assert_eq!(
            StaticTokenStore(Some(" abc123\n".into())).retrieve_access_token(),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn unset_env_var_is_absent() {
        let store = EnvTokenStore::new("SITE_PICKER_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(store.retrieve_access_token(), None);
    }
}
