//! Setting handlers for different configuration patterns.

pub mod boolean;
pub mod number;
pub mod string;

pub use boolean::*;
pub use number::*;
pub use string::*;
