use argon2::{
    Algorithm, Argon2, Params, PasswordHash as EncodedHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use passage_core::{CredentialHasher, HasherError, Password, PasswordHash};
use secrecy::{ExposeSecret, Secret};

/// Argon2id memory cost in KiB.
pub const ARGON2_MEMORY_KIB: u32 = 15000;
pub const ARGON2_ITERATIONS: u32 = 2;
pub const ARGON2_PARALLELISM: u32 = 1;

/// Argon2id hasher. Both hashing and verification run on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
        .map_err(|e| e.to_string())?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        let password = password.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| HasherError::HashingFailed(e.to_string()))?;

        result
            .map(PasswordHash::new)
            .map_err(HasherError::HashingFailed)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> bool {
        let expected = hash.as_ref().clone();
        let candidate = candidate.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected: EncodedHash<'_> =
                    EncodedHash::new(expected.expose_secret()).map_err(|e| e.to_string())?;

                argon2()?
                    .verify_password(candidate.expose_secret().as_bytes(), &expected)
                    .map_err(|e| e.to_string())
            })
        })
        .await;

        match result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "password hash did not verify");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}
