//! Request identifier generation

use crate::core::Result;
use rand::{rngs::OsRng, RngCore};

/// Produces the opaque id bound to a logger when the caller does not supply one
pub trait IdentifierSource: Send + Sync {
    fn generate(&self) -> Result<String>;
}

/// Random (version 4) UUIDs in canonical 36-character form
///
/// Bytes come from the operating system RNG; if it is unavailable the error
/// is returned rather than falling back to a weaker source.
///
/// ```
/// use rust_context_logger::id::{IdentifierSource, UuidSource};
///
/// let id = UuidSource.generate().unwrap();
/// assert_eq!(id.len(), 36);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdentifierSource for UuidSource {
    fn generate(&self) -> Result<String> {
        let mut bytes = [0u8; 16];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string())
    }
}

impl<F> IdentifierSource for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn generate(&self) -> Result<String> {
        self()
    }
}
