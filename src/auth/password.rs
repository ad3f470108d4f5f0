use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::Sha256;

const ALGORITHM: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 22;
const DIGEST_LEN: usize = 32;

pub const DEFAULT_ITERATIONS: u32 = 390_000;

/// PBKDF2-HMAC-SHA256 hasher producing `pbkdf2_sha256$<iterations>$<salt>$<hex>`.
///
/// `iterations` only applies to new hashes; verification uses the count stored
/// in the encoded hash, so existing passwords keep working after a change.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn hash(&self, password: &str) -> String {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        let digest = derive(password, &salt, self.iterations);
        format!(
            "{ALGORITHM}${}${salt}${}",
            self.iterations,
            hex::encode(digest)
        )
    }

    /// False for wrong passwords and for anything that isn't one of our hashes.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let mut parts = encoded.split('$');
        let (Some(ALGORITHM), Some(iterations), Some(salt), Some(expected), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        let Ok(expected) = hex::decode(expected) else {
            return false;
        };
        if iterations == 0 || expected.len() != DIGEST_LEN {
            return false;
        }
        constant_time_eq(&derive(password, salt, iterations), &expected)
    }
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut digest);
    digest
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(10);
        let encoded = hasher.hash("correct horse");

        assert!(encoded.starts_with("pbkdf2_sha256$10$"));
        assert!(hasher.verify("correct horse", &encoded));
        assert!(!hasher.verify("wrong horse", &encoded));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = PasswordHasher::new(1);
        assert_ne!(hasher.hash("same"), hasher.hash("same"));
    }

    #[test]
    fn verify_uses_stored_iteration_count() {
        let encoded = PasswordHasher::new(5).hash("pw");
        assert!(PasswordHasher::new(1000).verify("pw", &encoded));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        let hasher = PasswordHasher::new(1);
        for encoded in [
            "",
            "plain",
            "md5$1$salt$abcd",
            "pbkdf2_sha256$x$salt$abcd",
            "pbkdf2_sha256$0$salt$00",
            "pbkdf2_sha256$1$salt$nothex",
            "pbkdf2_sha256$1$salt$abcd",
            "pbkdf2_sha256$1$salt$abcd$extra",
        ] {
            assert!(!hasher.verify("pw", encoded), "{encoded}");
        }
    }

    #[test]
    fn known_digest() {
        // RFC 7914 section 11 test vector for PBKDF2-HMAC-SHA256 (c = 1, dkLen = 32).
        let digest = derive("passwd", "salt", 1);
        assert_eq!(
            hex::encode(digest),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }
}
