use pokedeck_backend::services::users::PasswordVerifier;

/// Matches hashes of the form `plain:{password}`.
pub struct PlainVerifier;

impl PasswordVerifier for PlainVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> bool {
        password_hash
            .strip_prefix("plain:")
            .is_some_and(|expected| expected == password)
    }
}
