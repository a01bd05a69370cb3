//! Request coercion: a request object or flattened fields, never both.

use std::collections::HashMap;

use crate::error::ClientError;

const CONFLICT_MESSAGE: &str =
    "If the `request` argument is set, then none of the individual field arguments should be set.";

/// Whether a flattened argument counts as given.
///
/// Empty strings, `false`, zero, empty collections and default-valued
/// messages are treated as absent when checking for conflicts.
pub trait FieldPresence {
    fn is_present(&self) -> bool;
}

impl FieldPresence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl FieldPresence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

macro_rules! impl_presence_for_numbers {
    ($($ty:ty),*) => {
        $(
            impl FieldPresence for $ty {
                fn is_present(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_presence_for_numbers!(i32, i64, u32, u64);

impl<T> FieldPresence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> FieldPresence for HashMap<K, V, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: FieldPresence> FieldPresence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(T::is_present)
    }
}

/// Implement [`FieldPresence`] for message types as "differs from default".
#[macro_export]
macro_rules! impl_field_presence_by_default {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::coerce::FieldPresence for $ty {
                fn is_present(&self) -> bool {
                    *self != <$ty as ::core::default::Default>::default()
                }
            }
        )*
    };
}

/// Flattened arguments of one operation.
pub trait FlattenedFields {
    type Request: Default;

    /// Whether any argument is present in the [`FieldPresence`] sense.
    fn has_values(&self) -> bool;

    /// Copy every `Some` argument into `request`.
    fn apply(self, request: &mut Self::Request);
}

/// Declare the flattened-argument record of an operation.
///
/// ```rust,ignore
/// flattened_fields! {
///     /// Flattened arguments of `get_cluster`.
///     pub struct GetClusterFields for GetClusterRequest {
///         project_id: String,
///         zone: String,
///         cluster_id: String,
///         name: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! flattened_fields {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for $req:ty {
            $($field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(pub $field: ::core::option::Option<$ty>,)*
        }

        impl $name {
            $(
                #[must_use]
                pub fn $field(mut self, value: impl ::core::convert::Into<$ty>) -> Self {
                    self.$field = ::core::option::Option::Some(value.into());
                    self
                }
            )*
        }

        impl $crate::coerce::FlattenedFields for $name {
            type Request = $req;

            fn has_values(&self) -> bool {
                let present: &[bool] = &[$($crate::coerce::FieldPresence::is_present(&self.$field)),*];
                present.iter().any(|p| *p)
            }

            #[allow(unused_variables)]
            fn apply(self, request: &mut $req) {
                $(
                    if let ::core::option::Option::Some(value) = self.$field {
                        request.$field = value.into();
                    }
                )*
            }
        }
    };
}

/// Merge a request object and flattened arguments into one request.
///
/// With a request object, it is returned as-is; with flattened arguments
/// only, a default request is filled from them.
///
/// # Errors
///
/// Returns [`ClientError::Usage`] when a request object is combined with any
/// present flattened argument.
pub fn coerce_request<F: FlattenedFields>(
    request: Option<F::Request>,
    fields: F,
) -> Result<F::Request, ClientError> {
    match request {
        Some(_) if fields.has_values() => Err(ClientError::usage(CONFLICT_MESSAGE)),
        Some(request) => Ok(request),
        None => {
            let mut request = F::Request::default();
            fields.apply(&mut request);
            Ok(request)
        }
    }
}
