// Core modules implementing install discovery, library binding, and error modeling.
pub mod bridge;
pub mod error;
pub mod ffi;
pub mod locator;
