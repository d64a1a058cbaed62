//! Credential verification and secret hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::types::{Identifier, Role};
use crate::domain::user::{AuthenticatedUser, NewCredential};
use crate::models::config::HashingConfig;
use crate::repository::CredentialReader;
use crate::services::{ServiceError, ServiceResult};

/// Hashes `secret` into an argon2id PHC string using the configured cost.
pub fn hash_secret(secret: &str, config: &HashingConfig) -> ServiceResult<String> {
    let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
        .map_err(|err| ServiceError::Unexpected(format!("invalid hashing parameters: {err}")))?;
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    hasher
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::Unexpected(format!("failed to hash secret: {err}")))
}

/// Credential for a new account, with `secret` already hashed.
pub(crate) fn new_credential(
    identifier: Identifier,
    secret: &str,
    role: Role,
    hashing: &HashingConfig,
) -> ServiceResult<NewCredential> {
    Ok(NewCredential {
        identifier,
        secret_hash: hash_secret(secret, hashing)?,
        role,
    })
}

/// Compares `secret` with a stored hash. Cost parameters come from the hash.
fn secret_matches(secret: &str, stored_hash: &str) -> ServiceResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| {
        log::error!("Stored secret hash cannot be parsed: {err}");
        ServiceError::Unexpected("stored credential is corrupt".to_string())
    })?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => {
            log::error!("Failed to verify secret: {err}");
            Err(ServiceError::Unexpected("failed to verify secret".to_string()))
        }
    }
}

/// Checks an identifier/secret pair against the stored credential.
///
/// Fails with `InvalidInput` when either value is empty, `NotFound` when no
/// credential carries the identifier and `WrongSecret` on a mismatch.
pub fn verify<R>(repo: &R, identifier: &str, secret: &str) -> ServiceResult<AuthenticatedUser>
where
    R: CredentialReader + ?Sized,
{
    if secret.is_empty() {
        return Err(ServiceError::InvalidInput(
            "identifier and secret are required".to_string(),
        ));
    }
    let identifier = Identifier::new(identifier).map_err(|_| {
        ServiceError::InvalidInput("identifier and secret are required".to_string())
    })?;

    let credential = repo
        .get_credential_by_identifier(&identifier)?
        .ok_or_else(|| ServiceError::NotFound(format!("user {identifier} not found")))?;

    if !secret_matches(secret, &credential.secret_hash)? {
        log::warn!("Rejected login for {identifier}: wrong secret");
        return Err(ServiceError::WrongSecret);
    }

    log::info!("User {identifier} authenticated");
    Ok(credential.into())
}

/// Resolves the identity stored in the session back to its credential.
pub fn current_user<R>(repo: &R, identifier: &str) -> ServiceResult<AuthenticatedUser>
where
    R: CredentialReader + ?Sized,
{
    let identifier = Identifier::new(identifier).map_err(|_| ServiceError::Unauthorized)?;

    repo.get_credential_by_identifier(&identifier)?
        .map(AuthenticatedUser::from)
        .ok_or(ServiceError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserId;
    use crate::domain::user::Credential;
    use crate::repository::mock::MockRepository;

    /// Cheap parameters so tests do not spend seconds hashing.
    const TEST_HASHING: HashingConfig = HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };

    fn credential(secret: &str, role: Role) -> Credential {
        Credential {
            id: UserId::new(1).unwrap(),
            identifier: Identifier::new("ana").unwrap(),
            secret_hash: hash_secret(secret, &TEST_HASHING).unwrap(),
            role,
        }
    }

    #[test]
    fn hashes_are_salted_and_one_way() {
        let first = hash_secret("s3cret-pass", &TEST_HASHING).unwrap();
        let second = hash_secret("s3cret-pass", &TEST_HASHING).unwrap();
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("s3cret-pass"));
        assert!(secret_matches("s3cret-pass", &first).unwrap());
        assert!(secret_matches("s3cret-pass", &second).unwrap());
    }

    #[test]
    fn matching_secret_returns_role() {
        let stored = credential("s3cret-pass", Role::Veterinarian);
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier()
            .withf(|identifier| identifier.as_str() == "ana")
            .returning(move |_| Ok(Some(stored.clone())));

        let user = verify(&repo, " ana ", "s3cret-pass").unwrap();
        assert_eq!(user.identifier.as_str(), "ana");
        assert_eq!(user.role, Role::Veterinarian);
    }

    #[test]
    fn mismatched_secret_is_rejected() {
        let stored = credential("s3cret-pass", Role::Client);
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier()
            .returning(move |_| Ok(Some(stored.clone())));

        for attempt in ["s3cret-pas", "S3CRET-PASS", "s3cret-pass "] {
            assert!(matches!(
                verify(&repo, "ana", attempt),
                Err(ServiceError::WrongSecret)
            ));
        }
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier()
            .returning(|_| Ok(None));

        assert!(matches!(
            verify(&repo, "nobody", "whatever"),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn empty_values_never_reach_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier().never();

        assert!(matches!(verify(&repo, "", "x"), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(verify(&repo, "   ", "x"), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(verify(&repo, "ana", ""), Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn plaintext_stored_secret_is_never_compared_directly() {
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier().returning(|_| {
            Ok(Some(Credential {
                id: UserId::new(1).unwrap(),
                identifier: Identifier::new("ana").unwrap(),
                secret_hash: "s3cret-pass".to_string(),
                role: Role::Admin,
            }))
        });

        assert!(matches!(
            verify(&repo, "ana", "s3cret-pass"),
            Err(ServiceError::Unexpected(_))
        ));
    }

    #[test]
    fn session_identity_without_credential_is_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_get_credential_by_identifier()
            .returning(|_| Ok(None));

        assert!(matches!(
            current_user(&repo, "ghost"),
            Err(ServiceError::Unauthorized)
        ));
    }
}
