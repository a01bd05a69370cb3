//! Flattened arguments, one struct per operation.
//!
//! Each struct carries the request fields an operation accepts as loose
//! arguments. Unset fields stay `None` and leave the request default alone.
//! Operations without flattened arguments get an empty struct so every
//! client method has the same shape.
#![allow(clippy::empty_structs_with_brackets)]

macro_rules! declare_fields {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        $(
            ::clustermgr_core::flattened_fields! {
                pub struct $fields for $req { $($f : $fty),* }
            }
        )*
    };
}

clustermgr_transport_grpc::for_each_operation!(declare_fields);
