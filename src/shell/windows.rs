//! Windows shell namespace implementation
//!
//! Wraps `IShellFolder` so the copier can walk "This PC" and the virtual
//! folders a connected iPhone exposes there. Entry references are PIDLs owned
//! by [`Pidl`] and freed on drop.

use crate::core::error::{PhotoCopyError, Result};
use crate::shell::traits::{DisplayStyle, EntryKind, ShellFolder};
use log::trace;
use std::ffi::c_void;
use std::io::{self, Read};
use windows::{
    core::PWSTR,
    Win32::{
        Foundation::HWND,
        System::Com::{
            CoInitializeEx, CoTaskMemFree, CoUninitialize, IBindCtx, IStream,
            COINIT_APARTMENTTHREADED,
        },
        UI::Shell::{
            Common::{ITEMIDLIST, STRRET},
            IEnumIDList, IShellFolder, SHGetDesktopFolder, StrRetToStrW, SHCONTF_FOLDERS,
            SHCONTF_NONFOLDERS, SHGDN_FORADDRESSBAR, SHGDN_NORMAL,
        },
    },
};

/// Owned item ID list relative to its parent folder
pub struct Pidl(*mut ITEMIDLIST);

impl Pidl {
    fn as_ptr(&self) -> *const ITEMIDLIST {
        self.0
    }
}

impl Drop for Pidl {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                CoTaskMemFree(Some(self.0 as *const c_void));
            }
        }
    }
}

/// A bound `IShellFolder`
pub struct WindowsFolder {
    folder: IShellFolder,
}

impl WindowsFolder {
    /// The desktop folder, root of the shell namespace
    pub fn desktop() -> Result<Self> {
        unsafe {
            let folder = SHGetDesktopFolder().map_err(|e| {
                PhotoCopyError::NamespaceError(format!("Failed to get desktop folder: {}", e))
            })?;
            Ok(Self { folder })
        }
    }

    fn enumerate(&self, kind: EntryKind) -> Result<Option<IEnumIDList>> {
        let flags = match kind {
            EntryKind::Folder => SHCONTF_FOLDERS.0 as u32,
            EntryKind::NonFolder => SHCONTF_NONFOLDERS.0 as u32,
            EntryKind::Any => (SHCONTF_FOLDERS.0 | SHCONTF_NONFOLDERS.0) as u32,
        };

        unsafe {
            let mut enum_ids: Option<IEnumIDList> = None;
            self.folder
                .EnumObjects(HWND::default(), flags, &mut enum_ids)
                .ok()
                .map_err(|e| {
                    PhotoCopyError::NamespaceError(format!("Failed to enumerate {}: {}", kind, e))
                })?;

            // S_FALSE with no enumerator means the folder is empty
            Ok(enum_ids)
        }
    }

    fn next_pidl(enum_ids: &IEnumIDList) -> Option<Pidl> {
        unsafe {
            let mut slot: [*mut ITEMIDLIST; 1] = [std::ptr::null_mut()];
            let mut fetched: u32 = 0;
            let result = enum_ids.Next(&mut slot, Some(&mut fetched as *mut u32));

            if result.is_err() || fetched == 0 || slot[0].is_null() {
                return None;
            }
            Some(Pidl(slot[0]))
        }
    }
}

impl ShellFolder for WindowsFolder {
    type Entry = Pidl;
    type Stream = ShellStream;

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Pidl>> {
        let Some(enum_ids) = self.enumerate(kind)? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        while let Some(pidl) = Self::next_pidl(&enum_ids) {
            entries.push(pidl);
        }

        trace!("Enumerated {} {}", entries.len(), kind);
        Ok(entries)
    }

    fn first_entry(&self, kind: EntryKind) -> Result<Option<Pidl>> {
        Ok(self
            .enumerate(kind)?
            .and_then(|enum_ids| Self::next_pidl(&enum_ids)))
    }

    fn display_name(&self, entry: &Pidl, style: DisplayStyle) -> Result<String> {
        let flags = match style {
            DisplayStyle::Normal => SHGDN_NORMAL,
            DisplayStyle::ForAddressBar => SHGDN_FORADDRESSBAR,
        };

        unsafe {
            let mut strret = STRRET::default();
            self.folder
                .GetDisplayNameOf(entry.as_ptr(), flags, &mut strret)
                .map_err(|e| {
                    PhotoCopyError::NamespaceError(format!("Failed to get display name: {}", e))
                })?;

            let mut name = PWSTR::null();
            StrRetToStrW(&mut strret, Some(entry.as_ptr()), &mut name).map_err(|e| {
                PhotoCopyError::NamespaceError(format!("Failed to convert display name: {}", e))
            })?;

            let result = name.to_string().unwrap_or_default();
            CoTaskMemFree(Some(name.0 as *const c_void));
            Ok(result)
        }
    }

    fn bind_folder(&self, entry: &Pidl) -> Result<WindowsFolder> {
        unsafe {
            let folder: IShellFolder = self
                .folder
                .BindToObject(entry.as_ptr(), None::<&IBindCtx>)
                .map_err(|e| {
                    PhotoCopyError::NamespaceError(format!("Failed to bind folder: {}", e))
                })?;
            Ok(WindowsFolder { folder })
        }
    }

    fn bind_stream(&self, entry: &Pidl) -> Result<ShellStream> {
        unsafe {
            let stream: IStream = self
                .folder
                .BindToStorage(entry.as_ptr(), None::<&IBindCtx>)
                .map_err(|e| {
                    PhotoCopyError::NamespaceError(format!("Failed to open file stream: {}", e))
                })?;
            Ok(ShellStream { stream })
        }
    }
}

/// Read-only `IStream` bound to a file on the device
pub struct ShellStream {
    stream: IStream,
}

impl Read for ShellStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut bytes_read: u32 = 0;
        let result = unsafe {
            self.stream
                .Read(buf.as_mut_ptr() as *mut c_void, len, Some(&mut bytes_read as *mut u32))
        };

        // S_FALSE signals end of stream with a short (possibly empty) read
        if result.is_err() {
            return Err(io::Error::other(windows::core::Error::from(result)));
        }
        Ok(bytes_read as usize)
    }
}

/// RAII guard for the COM apartment the shell namespace lives in
pub struct ShellSession {
    initialized: bool,
}

impl ShellSession {
    /// Initialize COM for this thread
    pub fn open() -> Result<Self> {
        unsafe {
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(|e| {
                    PhotoCopyError::SessionError(format!("Failed to initialize COM: {}", e))
                })?;
        }

        Ok(Self { initialized: true })
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}
