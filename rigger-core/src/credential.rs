//! Personal access token encoding
//!
//! Team Services expects `Authorization: Basic <token>` where the token is
//! the base64 of `":" + pat` (empty username, the PAT as the password). The
//! PAT is encoded exactly once at the top of a provisioning run; everything
//! downstream receives the already-encoded value. `EncodedPat` makes that
//! contract a type so a credential can never be re-encoded by accident.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// A personal access token that has already been encoded for transport.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPat(String);

impl EncodedPat {
    /// Encode a raw personal access token.
    ///
    /// Deterministic and pure: `encode(pat)` is the base64 of `":" + pat`.
    pub fn encode(pat: &str) -> Self {
        Self(STANDARD.encode(format!(":{pat}")))
    }

    /// The encoded value, ready to be placed after `Basic ` in an
    /// authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EncodedPat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// The encoded form is still a credential; keep it out of debug output.
impl std::fmt::Debug for EncodedPat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncodedPat(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_value() {
        // base64(":token")
        assert_eq!(EncodedPat::encode("token").as_str(), "OnRva2Vu");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = EncodedPat::encode("some-secret");
        let b = EncodedPat::encode("some-secret");
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_empty_secret() {
        // Even an empty PAT still gets the username separator.
        assert_eq!(EncodedPat::encode("").as_str(), "Og==");
    }

    #[test]
    fn test_debug_redacts_value() {
        let token = EncodedPat::encode("token");
        assert_eq!(format!("{:?}", token), "EncodedPat(***)");
    }
}
