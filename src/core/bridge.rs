//! Purpose: Load the UVtools core library and expose its consumed operations.
//! Exports: `Bridge`, `SlicerFile`, `Layers`, `library_path`, `LIBRARY_FILE_NAME`.
//! Role: Explicit binder handle; there is no process-global bridge state.
//! Invariants: Every symbol resolves at `load`; a constructed `Bridge` never
//! fails symbol lookup later.
//! Invariants: `SlicerFile` closes its handle on drop, exactly once.
//! Invariants: "Open raised an error" and "open matched no format" stay
//! distinct (`Err` vs `Ok(None)`).

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr;

use libloading::Library;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::ffi;
use crate::core::locator::InstallDir;

#[cfg(target_os = "windows")]
pub const LIBRARY_FILE_NAME: &str = "UVtoolsCore.dll";
#[cfg(target_os = "macos")]
pub const LIBRARY_FILE_NAME: &str = "libUVtoolsCore.dylib";
#[cfg(all(unix, not(target_os = "macos")))]
pub const LIBRARY_FILE_NAME: &str = "libUVtoolsCore.so";

/// The core library file inside an install directory. Joining the file name
/// onto the validated directory is the only search-path step this tool takes.
pub fn library_path(install_dir: &Path) -> PathBuf {
    install_dir.join(LIBRARY_FILE_NAME)
}

/// The resolved entry points. Plain function pointers copied out of their
/// `libloading` symbols; `Bridge` keeps the library alive for them.
#[derive(Debug)]
struct CoreApi {
    version: ffi::VersionFn,
    file_open: ffi::FileOpenFn,
    layer_count: ffi::LayerCountFn,
    layer_describe: ffi::LayerDescribeFn,
    file_close: ffi::FileCloseFn,
    string_free: ffi::StringFreeFn,
}

/// A bound UVtools core library.
#[derive(Debug)]
pub struct Bridge {
    api: CoreApi,
    _library: Library,
}

impl Bridge {
    pub fn load(install: &InstallDir) -> Result<Self, Error> {
        let path = library_path(install.path());
        let library = unsafe { Library::new(&path) }.map_err(|err| {
            Error::new(ErrorKind::Bind)
                .with_message("failed to load the UVtools core library")
                .with_path(&path)
                .with_source(err)
        })?;
        let api = CoreApi::resolve(&library, &path)?;
        debug!(path = %path.display(), "bound UVtools core library");
        Ok(Self {
            api,
            _library: library,
        })
    }

    /// The library's software-name/version/architecture descriptor. A library
    /// that yields no descriptor is treated as incorrectly bound.
    pub fn version(&self) -> Result<String, Error> {
        self.api.version_string()
    }

    /// Open a file through the library's format detection. `Ok(None)` means
    /// the library matched no supported format; `Err` means the open itself
    /// raised a failure.
    pub fn open(&self, path: &Path) -> Result<Option<SlicerFile<'_>>, Error> {
        self.api.open(path)
    }
}

impl CoreApi {
    fn resolve(library: &Library, path: &Path) -> Result<Self, Error> {
        unsafe {
            Ok(Self {
                version: symbol(library, path, ffi::SYM_VERSION)?,
                file_open: symbol(library, path, ffi::SYM_FILE_OPEN)?,
                layer_count: symbol(library, path, ffi::SYM_FILE_LAYER_COUNT)?,
                layer_describe: symbol(library, path, ffi::SYM_FILE_LAYER_DESCRIBE)?,
                file_close: symbol(library, path, ffi::SYM_FILE_CLOSE)?,
                string_free: symbol(library, path, ffi::SYM_STRING_FREE)?,
            })
        }
    }

    fn version_string(&self) -> Result<String, Error> {
        let raw = unsafe { (self.version)() };
        if raw.is_null() {
            return Err(Error::new(ErrorKind::Bind)
                .with_message("UVtools core library returned no version descriptor"));
        }
        Ok(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }

    fn open(&self, path: &Path) -> Result<Option<SlicerFile<'_>>, Error> {
        let c_path = c_path(path)?;
        let mut raw_file: *mut ffi::uvc_file = ptr::null_mut();
        let mut raw_error: *mut c_char = ptr::null_mut();
        let status = unsafe { (self.file_open)(c_path.as_ptr(), &mut raw_file, &mut raw_error) };
        if status != ffi::UVC_OK {
            let message = take_string(self, raw_error)
                .unwrap_or_else(|| format!("open failed with status {status}"));
            return Err(Error::new(ErrorKind::Open)
                .with_message(message)
                .with_path(path));
        }
        if raw_file.is_null() {
            return Ok(None);
        }
        Ok(Some(SlicerFile {
            api: self,
            raw: raw_file,
        }))
    }
}

/// Caller asserts that `T` matches the symbol's actual signature.
unsafe fn symbol<T: Copy>(library: &Library, path: &Path, name: &[u8]) -> Result<T, Error> {
    let sym = unsafe { library.get::<T>(name) }.map_err(|err| {
        Error::new(ErrorKind::Bind)
            .with_message(format!(
                "UVtools core library is missing entry point `{}`",
                String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name))
            ))
            .with_path(path)
            .with_source(err)
    })?;
    Ok(*sym)
}

/// The path exactly as the user gave it: raw bytes on Unix, lossy UTF-8 where
/// the platform gives us no byte view.
#[cfg(unix)]
fn c_path(path: &Path) -> Result<CString, Error> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes().to_vec()).map_err(|_| interior_nul())
}

#[cfg(not(unix))]
fn c_path(path: &Path) -> Result<CString, Error> {
    CString::new(path.to_string_lossy().into_owned().into_bytes()).map_err(|_| interior_nul())
}

fn interior_nul() -> Error {
    Error::new(ErrorKind::Usage).with_message("file path contains an interior NUL byte")
}

/// Copy a heap string out of the library and release it.
fn take_string(api: &CoreApi, raw: *mut c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let owned = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
    unsafe { (api.string_free)(raw) };
    Some(owned)
}

/// An opened slicer file. The handle itself is owned by the library; this
/// wrapper only mediates layer access and guarantees the close call.
#[derive(Debug)]
pub struct SlicerFile<'bridge> {
    api: &'bridge CoreApi,
    raw: *mut ffi::uvc_file,
}

impl SlicerFile<'_> {
    pub fn layer_count(&self) -> u32 {
        unsafe { (self.api.layer_count)(self.raw) }
    }

    /// The library's own rendering of layer `index`.
    pub fn layer(&self, index: u32) -> Result<String, Error> {
        let raw = unsafe { (self.api.layer_describe)(self.raw, index) };
        take_string(self.api, raw).ok_or_else(|| {
            Error::new(ErrorKind::Internal)
                .with_message(format!("library returned no rendering for layer {index}"))
        })
    }

    /// Layers in the library's own order, front to back.
    pub fn layers(&self) -> Layers<'_> {
        Layers {
            file: self,
            next: 0,
            count: self.layer_count(),
        }
    }
}

impl Drop for SlicerFile<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.file_close)(self.raw) };
    }
}

pub struct Layers<'file> {
    file: &'file SlicerFile<'file>,
    next: u32,
    count: u32,
}

impl Iterator for Layers<'_> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let item = self.file.layer(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Layers<'_> {}
