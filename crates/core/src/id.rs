//! Strongly-typed identifiers used across the domain.

/// Declares a UUID-backed identifier newtype.
///
/// The generated type is `Copy`, serializes transparently and parses from its
/// hyphenated string form (parse failures map to `DomainError::InvalidId`).
#[macro_export]
macro_rules! uuid_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $t($crate::Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self($crate::Uuid::now_v7())
            }

            pub fn from_uuid(uuid: $crate::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &$crate::Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$crate::Uuid> for $t {
            fn from(value: $crate::Uuid) -> Self {
                Self(value)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = $crate::Uuid::parse_str(s.trim())
                    .map_err(|e| $crate::DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

crate::uuid_id!(
    /// Identifier of a site (the multi-site boundary records are stamped with).
    SiteId,
    "SiteId"
);
