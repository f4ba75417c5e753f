use std::fmt::{Display, Formatter, Result as FmtResult};

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// Identifier of a stored document template.
///
/// Persistence layers hand out their own numeric ids; built-in templates derive
/// theirs from a stable name with [`TemplateId::from_name`].
///
/// ```
/// use docmerge::TemplateId;
///
/// const SEED: TemplateId = TemplateId::from_name("seed.invoice");
/// assert_eq!(SEED, TemplateId::from_name("seed.invoice"));
/// assert_eq!(TemplateId::new(7).as_u64(), 7);
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(u64);

impl TemplateId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derives an id from a name using a 64-bit FNV-1a hash.
    pub const fn from_name(name: &str) -> Self {
        Self(fnv1a_hash_str_64(name))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for TemplateId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// FNV-1a hash of a template body, used to detect edits to cached templates.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct BodyHash(u64);

impl BodyHash {
    pub const fn of(body: &str) -> Self {
        Self(fnv1a_hash_str_64(body))
    }
}
