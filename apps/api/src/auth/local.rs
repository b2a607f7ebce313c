use async_trait::async_trait;

use super::{AuthError, AuthProvider, AuthUser};

/// Demo-mode provider. Performs no verification: any token names a local
/// user, and requests without a token share the `demo` user.
#[derive(Debug, Clone, Default)]
pub struct LocalAuth;

pub const DEMO_USER: &str = "demo";

#[async_trait]
impl AuthProvider for LocalAuth {
    async fn authenticate(&self, token: Option<&str>) -> Result<AuthUser, AuthError> {
        let uid = match token {
            Some(token) => format!("local-{token}"),
            None => DEMO_USER.to_string(),
        };
        Ok(AuthUser {
            uid,
            email: None,
            provider: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_token_is_demo_user() {
        let user = LocalAuth.authenticate(None).await.unwrap();
        assert_eq!(user.uid, DEMO_USER);
        assert_eq!(user.provider, "local");
    }

    #[tokio::test]
    async fn test_token_names_user() {
        let user = LocalAuth.authenticate(Some("alice")).await.unwrap();
        assert_eq!(user.uid, "local-alice");
    }
}
