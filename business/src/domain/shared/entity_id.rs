use std::str::FromStr;

use chrono::Utc;

const ID_BYTES: usize = 12;
const ID_HEX_LEN: usize = ID_BYTES * 2;

/// Opaque entity identifier rendered as 24 lowercase hex characters.
///
/// Layout: 4 bytes of big-endian creation seconds followed by 8 random bytes,
/// so ids sort roughly by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId([u8; ID_BYTES]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("entity_id.invalid")]
pub struct InvalidEntityId;

impl EntityId {
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let random: u64 = rand::random();

        let mut bytes = [0u8; ID_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&random.to_be_bytes());
        Self(bytes)
    }

    pub fn parse(value: &str) -> Result<Self, InvalidEntityId> {
        // from_str_radix tolerates a leading sign, so check digits up front
        if value.len() != ID_HEX_LEN || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidEntityId);
        }

        let mut bytes = [0u8; ID_BYTES];
        for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_| InvalidEntityId)?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| InvalidEntityId)?;
        }
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for EntityId {
    type Err = InvalidEntityId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
