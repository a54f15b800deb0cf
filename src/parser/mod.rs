//! Command-line specifier parsing
//!
//! Turns tokens such as `react@^18`, `@scope/pkg` or `dev:jest` into
//! [`PackageRequest`](crate::domain::PackageRequest) values.

mod specifier;

pub use specifier::{parse_specifier, parse_specifiers, DEV_PREFIX};
