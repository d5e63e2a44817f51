//! # Key Management
//!
//! Loads or creates the process identity: a single RSA keypair persisted as
//! a PKCS#1 PEM file. The file is written exactly once, on first run; every
//! later start loads the same material, so the advertised public key never
//! changes.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, info};

use crate::CryptoError;

/// Modulus size for generated keys.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Key file used when no path is configured.
pub const DEFAULT_KEY_FILE: &str = "private_key.pem";

/// Fragment appended to the owner URI to form the key id.
const KEY_ID_FRAGMENT: &str = "#main-key";

/// Build the key id advertised for `owner`.
pub fn key_id_for(owner: &str) -> String {
    format!("{owner}{KEY_ID_FRAGMENT}")
}

/// The process identity used to authenticate outbound requests.
#[derive(Clone)]
pub struct Identity {
    private_key: RsaPrivateKey,
    owner: String,
    key_id: String,
}

impl Identity {
    /// Bind a private key to an owner URI.
    pub fn new(private_key: RsaPrivateKey, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let key_id = key_id_for(&owner);
        Self {
            private_key,
            owner,
            key_id,
        }
    }

    /// Owner (actor) URI.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Key id, `{owner}#main-key`.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Private half, for signing.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Public half.
    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    /// Public key material in the shape peers expect inside an actor document.
    pub fn signable_public_key(&self) -> Result<SignablePublicKey, CryptoError> {
        Ok(SignablePublicKey {
            id: self.key_id.clone(),
            owner: self.owner.clone(),
            public_key_pem: public_key_pem(self)?,
        })
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("owner", &self.owner)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Advertised public key: PEM plus the ids that bind it to an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignablePublicKey {
    /// Key id (`{owner}#main-key`)
    pub id: String,
    /// Owner actor URI
    pub owner: String,
    /// SPKI PEM of the public key
    pub public_key_pem: String,
}

/// Serialize the identity's public key as SPKI PEM (`BEGIN PUBLIC KEY`).
pub fn public_key_pem(identity: &Identity) -> Result<String, CryptoError> {
    identity
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::KeyEncoding(e.to_string()))
}

/// Loads the persisted keypair, generating it on first use.
#[derive(Debug, Clone)]
pub struct KeyManager {
    path: PathBuf,
    bits: usize,
}

impl KeyManager {
    /// Manage the key file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bits: DEFAULT_KEY_BITS,
        }
    }

    /// Override the modulus size used when a key has to be generated.
    pub fn with_key_bits(mut self, bits: usize) -> Self {
        self.bits = bits;
        self
    }

    /// Key file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the identity for `owner`, creating the key file if absent.
    ///
    /// Existing key material is never overwritten.
    pub fn ensure_identity(&self, owner: &str) -> Result<Identity, CryptoError> {
        let private_key = match fs::metadata(&self.path) {
            Ok(_) => self.load()?,
            Err(e) if e.kind() == ErrorKind::NotFound => self.generate_and_persist()?,
            Err(source) => {
                return Err(CryptoError::KeyIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(Identity::new(private_key, owner))
    }

    fn load(&self) -> Result<RsaPrivateKey, CryptoError> {
        let pem = fs::read_to_string(&self.path).map_err(|source| CryptoError::KeyIo {
            path: self.path.clone(),
            source,
        })?;

        let key = parse_private_key_pem(&pem).map_err(|reason| CryptoError::KeyParse {
            path: self.path.clone(),
            reason,
        })?;

        debug!(path = %self.path.display(), "Loaded private key");
        Ok(key)
    }

    fn generate_and_persist(&self) -> Result<RsaPrivateKey, CryptoError> {
        info!(path = %self.path.display(), bits = self.bits, "Generating RSA keypair");

        let key = RsaPrivateKey::new(&mut rand::thread_rng(), self.bits)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let pem = key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

        let io_err = |source| CryptoError::KeyIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = match options.open(&self.path) {
            Ok(file) => file,
            // Another process won the race; its key is authoritative.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return self.load(),
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(pem.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        Ok(key)
    }
}

/// Parse PKCS#1 PEM, falling back to PKCS#8.
fn parse_private_key_pem(pem: &str) -> Result<RsaPrivateKey, String> {
    let key = match RsaPrivateKey::from_pkcs1_pem(pem) {
        Ok(key) => key,
        Err(pkcs1_err) => RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|pkcs8_err| format!("not PKCS#1 ({pkcs1_err}) or PKCS#8 ({pkcs8_err})"))?,
    };
    key.validate().map_err(|e| e.to_string())?;
    Ok(key)
}

/// Convenience wrapper: [`KeyManager::ensure_identity`] with default settings.
pub fn ensure_identity(path: impl Into<PathBuf>, owner: &str) -> Result<Identity, CryptoError> {
    KeyManager::new(path).ensure_identity(owner)
}
