/// This macro generates a new type enum that is statically convertible to and from a provided base
/// type. It also generates a TryFrom<T> implementation where T is the provided base type, this can
/// be useful for checked conversion of a tag read off the wire.
///
/// # Usage
///
/// magic_enum! {
///     base_type, enum_name, error_type, error_variant {
///         variant = literal,
///         ...
///     }
/// }
#[macro_export]
macro_rules! magic_enum {
    ($typ: ident, $name: ident, $error: ident, $error_variant: ident {
        $($variant: ident = $value: literal),* $(,)?
    }) => {
        #[repr($typ)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant = $value),*
        }

        impl std::convert::TryFrom<$typ> for $name {
            type Error = $error;

            fn try_from(value: $typ) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)*
                    _ => Err($error::$error_variant(value)),
                }
            }
        }

        impl From<$name> for $typ {
            fn from(value: $name) -> Self {
                value as $typ
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( $name::$variant => write!(f, stringify!($variant)), )*
                }
            }
        }
    }
}
