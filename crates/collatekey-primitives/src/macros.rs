/// Declare the `TypeTag` registry from one table so byte assignment, labels,
/// and category membership cannot drift apart.
macro_rules! type_tag_registry {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $byte:literal, $label:literal, category = $category:literal;
        )+
    ) => {
        ///
        /// TypeTag
        ///
        /// One-byte tag opening every encoded field.
        ///
        /// IMPORTANT:
        /// Byte values are a cross-version storage contract. Stored index keys
        /// depend on them; never renumber.
        ///
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum TypeTag {
            $(
                $(#[$meta])*
                $variant = $byte,
            )+
        }

        impl TypeTag {
            /// Every tag in ascending byte order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Resolve a normal-polarity tag byte.
            #[must_use]
            pub const fn from_normal(byte: u8) -> Option<Self> {
                match byte {
                    $($byte => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Stable human-readable label for diagnostics.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Whether this tag names a value category (as opposed to an
            /// internal structural marker).
            #[must_use]
            pub const fn is_value_category(self) -> bool {
                match self {
                    $(Self::$variant => $category,)+
                }
            }
        }
    };
}
