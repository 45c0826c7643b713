//! The shared schema for enumerations exchanged with native code by value.
//!
//! Every backend consumes the same definition, so a variant can't be "synchronized by
//! convention" with a second copy somewhere else. The wire values must be dense and start at
//! zero; this is checked at compile time.

macro_rules! shared_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )*
        }

        impl $name {
            /// Every variant, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// The value this variant is exchanged as.
            #[inline]
            pub const fn to_wire(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::error::InvalidWireValue;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)*
                    _ => Err($crate::error::InvalidWireValue::new(stringify!($name), value)),
                }
            }
        }

        const _: () = {
            let mut i = 0;
            while i < $name::ALL.len() {
                assert!($name::ALL[i] as u32 == i as u32, "wire values must be dense");
                i += 1;
            }
        };
    };
}
