//! Macros for declaring state identifiers.

/// Declare an enum of state identifiers with fixed [`StateId`](crate::StateId) values.
///
/// The generated enum is `Copy + Eq + Hash + Debug`, converts into a `StateId`,
/// and can be used directly as the key of a transition block. Reserved values
/// (`-1` and `1010`) are rejected at compile time.
///
/// # Example
///
/// ```
/// use tickmind::{state_ids, StateId};
///
/// state_ids! {
///     pub enum Mode {
///         Idle = 0,
///         Patrol = 1,
///         Combat = 2,
///     }
/// }
///
/// assert_eq!(StateId::from(Mode::Patrol), StateId::new(1));
/// assert_eq!(Mode::from_id(StateId::new(2)), Some(Mode::Combat));
/// assert_eq!(Mode::Idle.to_string(), "Idle");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        const _: () = {
            $(
                assert!(
                    !$crate::StateId::new($value).is_reserved(),
                    "state_ids! values -1 and 1010 are reserved"
                );
            )+
        };

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn id(self) -> $crate::StateId {
                match self {
                    $(Self::$variant => $crate::StateId::new($value)),+
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            pub fn from_id(id: $crate::StateId) -> ::core::option::Option<Self> {
                Self::ALL.iter().copied().find(|variant| variant.id() == id)
            }
        }

        impl ::core::convert::From<$name> for $crate::StateId {
            fn from(value: $name) -> Self {
                value.id()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
