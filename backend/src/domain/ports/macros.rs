//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant gets a constructor whose fields accept `impl Into<T>`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LookupPortError {
            Missing { entity: String } => "{entity} is missing",
            Limit { max: u32 } => "more than {max} rows",
            Conflict { entity: String, id: i32 } => "{entity} {id} conflicts",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LookupPortError::missing("category");
        assert_eq!(err.to_string(), "category is missing");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = LookupPortError::limit(5_u32);
        assert_eq!(err.to_string(), "more than 5 rows");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LookupPortError::conflict("item", 7);
        assert_eq!(err.to_string(), "item 7 conflicts");
    }
}
