//! Injected UUID collaborator

use uuid::Uuid;

use crate::error::{Error, Result};

/// Version used when the caller does not pick one.
pub const DEFAULT_VERSION: u8 = 4;

/// Generates message identifiers. Injected at envelope construction so
/// tests can substitute a deterministic implementation.
pub trait UuidProvider {
    /// Produce an identifier for the given, already validated, version.
    fn generate(&self, version: u8) -> String;
}

/// Validate the requested version and delegate to the provider.
///
/// Versions 1 through 5 are supported; anything else fails with
/// `UnsupportedVersion`.
pub fn make_uuid(provider: &dyn UuidProvider, version: u8) -> Result<String> {
    if !(1..=5).contains(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(provider.generate(version))
}

/// Default provider backed by the `uuid` crate.
///
/// Name-based versions (3 and 5) hash freshly generated random bytes since
/// messages carry no natural name; version 2 is a DCE-style variant of a
/// version 1 value.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomUuid;

impl UuidProvider for RandomUuid {
    fn generate(&self, version: u8) -> String {
        let uuid = match version {
            1 => Uuid::now_v1(&random_node()),
            2 => with_version(Uuid::now_v1(&random_node()), 2),
            3 => Uuid::new_v3(&Uuid::NAMESPACE_OID, Uuid::new_v4().as_bytes()),
            5 => Uuid::new_v5(&Uuid::NAMESPACE_OID, Uuid::new_v4().as_bytes()),
            _ => Uuid::new_v4(),
        };
        uuid.to_string()
    }
}

fn random_node() -> [u8; 6] {
    let seed = Uuid::new_v4();
    let bytes = seed.as_bytes();
    let mut node = [0u8; 6];
    for (slot, byte) in node.iter_mut().zip(bytes.iter()) {
        *slot = *byte;
    }
    node
}

fn with_version(uuid: Uuid, version: u8) -> Uuid {
    let mut bytes = *uuid.as_bytes();
    if let Some(b) = bytes.get_mut(6) {
        *b = (*b & 0x0F) | (version << 4);
    }
    Uuid::from_bytes(bytes)
}
