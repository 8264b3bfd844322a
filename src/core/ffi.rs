//! Purpose: Declare the enumerated C surface consumed from the UVtools core library.
//! Exports: opaque `uvc_file`, function-pointer types, symbol names, status codes.
//! Role: The entire external contract; nothing outside this table is ever bound.
//! Invariants: Heap strings from open errors and layer rendering are released
//! with `uvc_string_free`; the version string is static and never freed.
#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint};

/// Opaque handle to an opened slicer file, owned by the library.
#[repr(C)]
pub struct uvc_file {
    _private: [u8; 0],
}

pub const UVC_OK: c_int = 0;

pub const SYM_VERSION: &[u8] = b"uvc_version_string\0";
pub const SYM_FILE_OPEN: &[u8] = b"uvc_file_open\0";
pub const SYM_FILE_LAYER_COUNT: &[u8] = b"uvc_file_layer_count\0";
pub const SYM_FILE_LAYER_DESCRIBE: &[u8] = b"uvc_file_layer_describe\0";
pub const SYM_FILE_CLOSE: &[u8] = b"uvc_file_close\0";
pub const SYM_STRING_FREE: &[u8] = b"uvc_string_free\0";

/// `uvc_version_string() -> "name version arch"` in static storage.
pub type VersionFn = unsafe extern "C" fn() -> *const c_char;

/// `uvc_file_open(path, out_file, out_error) -> status`.
///
/// `UVC_OK` with a null `out_file` means no supported format matched the file.
/// A non-`UVC_OK` status sets `out_error` to a heap diagnostic string.
pub type FileOpenFn =
    unsafe extern "C" fn(*const c_char, *mut *mut uvc_file, *mut *mut c_char) -> c_int;

pub type LayerCountFn = unsafe extern "C" fn(*const uvc_file) -> c_uint;

/// Renders one layer to a heap string, or null when the index is out of range.
pub type LayerDescribeFn = unsafe extern "C" fn(*const uvc_file, c_uint) -> *mut c_char;

pub type FileCloseFn = unsafe extern "C" fn(*mut uvc_file);

pub type StringFreeFn = unsafe extern "C" fn(*mut c_char);
