//! Wire types shared between the order tracking backend and its clients.

pub mod domain;
pub mod protocol;
