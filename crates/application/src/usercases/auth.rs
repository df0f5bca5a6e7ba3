use std::sync::Arc;

use domain::{
    entities::users::User,
    repositories::{errors::UniqueViolation, sessions::SessionStore, users::UserRepository},
    value_objects::{
        emails::Email,
        errors::ValidationError,
        passwords::Password,
        sessions::{Session, SessionUser},
        users::UserDto,
    },
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::interfaces::password_hasher::PasswordHasher;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session not found or expired")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type UseCaseResult<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct AuthUseCase<U, S, H>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    session_store: Arc<S>,
    hasher: Arc<H>,
}

impl<U, S, H> AuthUseCase<U, S, H>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    H: PasswordHasher + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, session_store: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            user_repo,
            session_store,
            hasher,
        }
    }

    pub async fn register(&self, input: RegisterInput) -> UseCaseResult<UserDto> {
        let password = Password::new(&input.password).map_err(ValidationError::from)?;
        if !password.matches(&input.password_confirmation) {
            return Err(ValidationError::PasswordMismatch.into());
        }
        let email = Email::new(&input.email).map_err(ValidationError::from)?;

        let existing = self.user_repo.find_by_email(&email).await.map_err(|err| {
            error!(db_error = ?err, "auth: failed to look up email");
            AuthError::Internal(err)
        })?;
        if existing.is_some() {
            warn!("auth: email already registered");
            return Err(AuthError::EmailTaken);
        }

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|hashed| hashed)
            .map_err(|err| {
                error!(error = ?err, "auth: failed to hash password");
                AuthError::Internal(err)
            })?;
        let user = User::new(&input.username, email.value(), password_hash)?;

        self.user_repo.create(&user).await.map_err(|err| {
            if err.downcast_ref::<UniqueViolation>().is_some() {
                warn!("auth: email already registered");
                return AuthError::EmailTaken;
            }
            error!(db_error = ?err, "auth: failed to create user");
            AuthError::Internal(err)
        })?;

        info!(user_id = %user.id(), "auth: user registered");
        Ok(UserDto::from(&user))
    }

    pub async fn login(&self, input: LoginInput) -> UseCaseResult<Session> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up email");
                AuthError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!("auth: login for unknown email");
                AuthError::InvalidCredentials
            })?;

        let hasher = Arc::clone(&self.hasher);
        let candidate = input.password;
        let password_hash = user.password_hash().to_string();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &password_hash))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|verified| verified)
            .map_err(|err| {
                error!(user_id = %user.id(), error = ?err, "auth: unreadable password hash");
                AuthError::Internal(err)
            })?;
        if !valid {
            warn!(user_id = %user.id(), "auth: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self
            .session_store
            .create(SessionUser {
                user_id: user.id(),
                email: user.email().to_string(),
                username: user.username().to_string(),
            })
            .await
            .map_err(|err| {
                error!(user_id = %user.id(), error = ?err, "auth: failed to create session");
                AuthError::Internal(err)
            })?;

        info!(user_id = %user.id(), "auth: user logged in");
        Ok(session)
    }

    pub async fn logout(&self, session_id: &str) -> UseCaseResult<()> {
        self.session_store.delete(session_id).await.map_err(|err| {
            error!(error = ?err, "auth: failed to delete session");
            AuthError::Internal(err)
        })
    }

    pub async fn authenticate(&self, session_id: &str) -> UseCaseResult<Session> {
        self.session_store
            .get(session_id)
            .await
            .map_err(|err| {
                error!(error = ?err, "auth: failed to read session");
                AuthError::Internal(err)
            })?
            .ok_or(AuthError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::{
        repositories::{sessions::MockSessionStore, users::MockUserRepository},
        value_objects::passwords::PasswordError,
    };
    use uuid::Uuid;

    use crate::interfaces::password_hasher::MockPasswordHasher;

    fn register_input() -> RegisterInput {
        RegisterInput {
            username: "john".to_string(),
            email: "john@example.com".to_string(),
            password: "Str0ng!pass".to_string(),
            password_confirmation: "Str0ng!pass".to_string(),
        }
    }

    fn stored_user() -> User {
        User::new("john", "john@example.com", "hashed".to_string()).unwrap()
    }

    fn session_for(user: SessionUser) -> Session {
        let now = Utc::now();
        Session {
            session_id: "sid".to_string(),
            csrf_token: "csrf".to_string(),
            user,
            created_at: now,
            expires_at: now + Duration::hours(8),
        }
    }

    #[tokio::test]
    async fn register_hashes_and_stores_the_user() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_create()
            .withf(|user| user.password_hash() == "hashed" && user.username() == "john")
            .times(1)
            .returning(|_| Ok(()));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password.matches("Str0ng!pass"))
            .returning(|_| Ok("hashed".to_string()));

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockSessionStore::new()),
            Arc::new(hasher),
        );
        let user = use_case.register(register_input()).await.unwrap();

        assert_eq!(user.email, "john@example.com");
    }

    #[tokio::test]
    async fn register_rejects_weak_or_mismatched_passwords() {
        let use_case = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionStore::new()),
            Arc::new(MockPasswordHasher::new()),
        );

        let weak = RegisterInput {
            password: "weakpass".to_string(),
            password_confirmation: "weakpass".to_string(),
            ..register_input()
        };
        let err = use_case.register(weak).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::Password(PasswordError::MissingUppercase))
        ));

        let mismatched = RegisterInput {
            password_confirmation: "Str0ng!pasS".to_string(),
            ..register_input()
        };
        let err = use_case.register(mismatched).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn register_rejects_a_taken_email() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user())));
        user_repo.expect_create().times(0);

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockSessionStore::new()),
            Arc::new(MockPasswordHasher::new()),
        );
        let err = use_case.register(register_input()).await.unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn concurrent_duplicate_email_is_reported_as_taken() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(anyhow::Error::new(UniqueViolation)));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".to_string()));

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockSessionStore::new()),
            Arc::new(hasher),
        );
        let err = use_case.register(register_input()).await.unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn other_insert_failures_stay_internal() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));
        user_repo
            .expect_create()
            .returning(|_| Err(anyhow::anyhow!("connection reset")));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".to_string()));

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(MockSessionStore::new()),
            Arc::new(hasher),
        );
        let err = use_case.register(register_input()).await.unwrap_err();

        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn login_opens_a_session() {
        let user = stored_user();
        let user_id = user.id();

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|candidate, hash| candidate == "Str0ng!pass" && hash == "hashed")
            .returning(|_, _| Ok(true));

        let mut session_store = MockSessionStore::new();
        session_store
            .expect_create()
            .withf(move |user| user.user_id == user_id)
            .times(1)
            .returning(|user| Ok(session_for(user)));

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(session_store),
            Arc::new(hasher),
        );
        let session = use_case
            .login(LoginInput {
                email: "john@example.com".to_string(),
                password: "Str0ng!pass".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.user.user_id, user_id);
    }

    #[tokio::test]
    async fn login_failures_look_the_same() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|email| {
                Ok((email.value() == "john@example.com").then(stored_user))
            });

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(false));

        let mut session_store = MockSessionStore::new();
        session_store.expect_create().times(0);

        let use_case = AuthUseCase::new(
            Arc::new(user_repo),
            Arc::new(session_store),
            Arc::new(hasher),
        );

        for email in ["john@example.com", "nobody@example.com", "not-an-email"] {
            let err = use_case
                .login(LoginInput {
                    email: email.to_string(),
                    password: "Wr0ng!pass".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "invalid email or password", "{email}");
        }
    }

    #[tokio::test]
    async fn authenticate_requires_a_live_session() {
        let mut session_store = MockSessionStore::new();
        session_store.expect_get().returning(|session_id| {
            Ok((session_id == "sid").then(|| {
                session_for(SessionUser {
                    user_id: Uuid::new_v4(),
                    email: "john@example.com".to_string(),
                    username: "john".to_string(),
                })
            }))
        });
        session_store
            .expect_delete()
            .withf(|session_id| session_id == "sid")
            .times(1)
            .returning(|_| Ok(()));

        let use_case = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(session_store),
            Arc::new(MockPasswordHasher::new()),
        );

        assert!(use_case.authenticate("sid").await.is_ok());
        assert!(matches!(
            use_case.authenticate("other").await,
            Err(AuthError::Unauthorized)
        ));
        use_case.logout("sid").await.unwrap();
    }
}
