//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Content-store records are addressed by their keys; this trait lets storage
/// code index them without knowing the concrete record type.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
