//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records that have not been persisted yet carry no identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the identifier, or `None` before the first save.
    fn id(&self) -> Option<Self::Id>;

    /// Returns true if the record has never been persisted.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
