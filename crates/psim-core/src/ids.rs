//! Strongly typed identifier wrappers.
//!
//! Both IDs are plain indices: `AgentId(i)` is row `i` of every population
//! array, `ActivityId(j)` is column `j` of every utility/action matrix.

use std::fmt;

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Row of an agent in the population arrays.
    pub struct AgentId(u32);
}

typed_id! {
    /// Column of an activity in the catalog.  Catalogs are small, so `u16`
    /// is plenty.
    pub struct ActivityId(u16);
}
