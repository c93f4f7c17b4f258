//! Backend interfacing.
//!
//! Almost everything declared in this module is `unsafe`: implementing a backend means talking to
//! a graphics API, and the safe layer in [`crate::shader`] relies on backends upholding the
//! contracts documented on each trait.

pub mod shader;
