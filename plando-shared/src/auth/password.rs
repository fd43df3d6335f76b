/// Password hashing using Argon2id
///
/// # Security
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash in PHC string format
///
/// # Example
///
/// ```
/// use plando_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Password1")?;
/// assert!(verify_password("Password1", &hash)?);
/// assert!(!verify_password("Password2", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Message returned when a new password does not satisfy the policy
pub const PASSWORD_POLICY_MESSAGE: &str =
    "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다.";

/// Hashes a password with a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash in constant time
///
/// Parameters are read from the hash itself.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed. A wrong password is
/// `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Checks the policy for newly chosen passwords
///
/// At least 8 characters, at least one ASCII digit and at least one
/// uppercase letter.
///
/// # Example
///
/// ```
/// use plando_shared::auth::password::validate_password_strength;
///
/// assert!(validate_password_strength("NewPassword1").is_ok());
/// assert!(validate_password_strength("newpassword1").is_err());
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    let long_enough = password.chars().count() >= 8;
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_uppercase());

    if long_enough && has_digit && has_upper {
        Ok(())
    } else {
        Err(PASSWORD_POLICY_MESSAGE)
    }
}
