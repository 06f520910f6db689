/// Locates one member of an owning settings structure.
///
/// A pair of plain accessors stands in for a member pointer: the engine can
/// read and write the member without knowing the rest of the structure.
pub struct Field<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Field<S, T> {
    pub const fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'s>(&self, owner: &'s S) -> &'s T {
        (self.get)(owner)
    }

    pub fn get_mut<'s>(&self, owner: &'s mut S) -> &'s mut T {
        (self.get_mut)(owner)
    }
}

// Manual impls: a derive would demand `S: Clone` and `T: Clone`.
impl<S, T> Clone for Field<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Field<S, T> {}

impl<S, T> std::fmt::Debug for Field<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").finish_non_exhaustive()
    }
}

/// Build a [`Field`] for a named member: `field!(EchoSettings, delay)`.
#[macro_export]
macro_rules! field {
    ($owner:ty, $member:ident) => {
        $crate::Field::<$owner, _>::new(|s| &s.$member, |s| &mut s.$member)
    };
}
