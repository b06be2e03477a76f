//! Device location
//!
//! Finds the computer folder on the desktop, then checks each of its children
//! for the `Internal Storage\DCIM` layout an iPhone exposes. Only the first
//! folder at each level is looked at, so this is a heuristic: any device whose
//! first folder happens to be named "Internal Storage" with a first subfolder
//! "DCIM" is treated as a phone.

use crate::core::error::{PhotoCopyError, Result};
use crate::shell::traits::{DisplayStyle, EntryKind, ShellFolder};
use log::{debug, log, Level};
use std::fmt::{self, Display};

/// Names used to recognize the computer folder and a phone's photo folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Display names of the "this computer" folder on the desktop
    pub computer_names: Vec<String>,
    /// Required name of a phone's first top-level folder
    pub storage_folder: String,
    /// Required name of the first folder inside the storage folder
    pub dcim_folder: String,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            computer_names: vec![
                "Computer".to_string(),
                "This PC".to_string(),
                "Dieser PC".to_string(),
            ],
            storage_folder: "Internal Storage".to_string(),
            dcim_folder: "DCIM".to_string(),
        }
    }
}

/// Why a computer child is not a phone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The namespace refused to bind or list it
    Inaccessible(String),
    /// It has no folders at all
    NoFolders,
    /// Its first folder is something other than the storage folder
    OtherTopFolder(String),
    /// Its first folder is a DCIM folder without the storage folder around it
    DcimOutsideStorage,
    /// The storage folder's first folder is not DCIM (`None` if it has none)
    MissingDcim {
        storage: String,
        found: Option<String>,
    },
}

impl Mismatch {
    /// Level this mismatch is logged at
    pub fn log_level(&self) -> Level {
        match self {
            Mismatch::DcimOutsideStorage | Mismatch::MissingDcim { .. } => Level::Warn,
            _ => Level::Debug,
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Inaccessible(reason) => write!(f, "not accessible ({})", reason),
            Mismatch::NoFolders => write!(f, "has no folders"),
            Mismatch::OtherTopFolder(name) => write!(f, "first folder is '{}'", name),
            Mismatch::DcimOutsideStorage => write!(f, "has a DCIM folder outside of storage"),
            Mismatch::MissingDcim { storage, found } => write!(
                f,
                "'{}' has '{}', not a DCIM dir",
                storage,
                found.as_deref().unwrap_or("no folders")
            ),
        }
    }
}

/// Result of checking one computer child
pub enum DeviceMatch<F: ShellFolder> {
    /// A phone: its DCIM entry and the bound storage folder that owns it
    Found {
        device_name: String,
        dcim: F::Entry,
        parent: F,
    },
    /// Anything else
    NotFound {
        device_name: String,
        reason: Mismatch,
    },
}

/// Find and bind the computer folder ("This PC") among the desktop's folders
pub fn find_computer_folder<F: ShellFolder>(desktop: &F, options: &LocatorOptions) -> Result<F> {
    for entry in desktop.list_entries(EntryKind::Folder)? {
        let name = desktop.display_name(&entry, DisplayStyle::Normal)?;
        if options.computer_names.iter().any(|n| *n == name) {
            debug!("Found computer folder '{}'", name);
            return desktop.bind_folder(&entry);
        }
    }

    Err(PhotoCopyError::ComputerFolderNotFound(
        options.computer_names.join(", "),
    ))
}

/// Check whether `device` (a child of `parent`) is a phone with a DCIM folder
///
/// Namespace errors are not failures here: most children of the computer
/// folder are drives that cannot be bound or listed this way.
pub fn get_dcim_folder<F: ShellFolder>(
    parent: &F,
    device: &F::Entry,
    options: &LocatorOptions,
) -> DeviceMatch<F> {
    let device_name = parent
        .display_name(device, DisplayStyle::Normal)
        .unwrap_or_else(|e| {
            debug!("Could not resolve device name: {}", e);
            "<unnamed>".to_string()
        });

    let result = match find_dcim(parent, device, options) {
        Ok(found) => found,
        Err(e) => Err(Mismatch::Inaccessible(e.to_string())),
    };

    match result {
        Ok((dcim, storage)) => DeviceMatch::Found {
            device_name,
            dcim,
            parent: storage,
        },
        Err(reason) => {
            log!(reason.log_level(), "{}: {}", device_name, reason);
            DeviceMatch::NotFound {
                device_name,
                reason,
            }
        }
    }
}

/// Outer error: namespace failure. Inner error: readable but wrong layout.
fn find_dcim<F: ShellFolder>(
    parent: &F,
    device: &F::Entry,
    options: &LocatorOptions,
) -> Result<std::result::Result<(F::Entry, F), Mismatch>> {
    let device_folder = parent.bind_folder(device)?;

    let Some(top_entry) = device_folder.first_entry(EntryKind::Folder)? else {
        return Ok(Err(Mismatch::NoFolders));
    };
    let top_name = device_folder.display_name(&top_entry, DisplayStyle::Normal)?;

    if top_name != options.storage_folder {
        return Ok(Err(if top_name == options.dcim_folder {
            Mismatch::DcimOutsideStorage
        } else {
            Mismatch::OtherTopFolder(top_name)
        }));
    }

    let storage = device_folder.bind_folder(&top_entry)?;
    let Some(dcim_entry) = storage.first_entry(EntryKind::Folder)? else {
        return Ok(Err(Mismatch::MissingDcim {
            storage: top_name,
            found: None,
        }));
    };
    let dcim_name = storage.display_name(&dcim_entry, DisplayStyle::Normal)?;

    if dcim_name != options.dcim_folder {
        return Ok(Err(Mismatch::MissingDcim {
            storage: top_name,
            found: Some(dcim_name),
        }));
    }

    Ok(Ok((dcim_entry, storage)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdb::mock_shell::{MockFolder, MockNode};
    use crate::testdb::scenarios::{desktop, desktop_with_computer, iphone, local_drive};

    fn check(device: MockNode) -> DeviceMatch<MockFolder> {
        let computer = MockFolder::root(MockNode::folder("This PC", vec![device]));
        let entry = computer.first_entry(EntryKind::Folder).unwrap().unwrap();
        get_dcim_folder(&computer, &entry, &LocatorOptions::default())
    }

    fn reason(device: MockNode) -> Mismatch {
        match check(device) {
            DeviceMatch::NotFound { reason, .. } => reason,
            DeviceMatch::Found { device_name, .. } => panic!("{} unexpectedly matched", device_name),
        }
    }

    #[test]
    fn test_finds_computer_folder() {
        let root = desktop(vec![local_drive("Local Disk (C:)")]);
        let computer = find_computer_folder(&root, &LocatorOptions::default()).unwrap();
        assert_eq!(computer.path(), "Desktop\\This PC");
    }

    #[test]
    fn test_finds_localized_computer_folder() {
        let root = desktop_with_computer("Dieser PC", vec![]);
        assert!(find_computer_folder(&root, &LocatorOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_computer_folder() {
        let root = desktop_with_computer("Mein Rechner", vec![]);
        let err = find_computer_folder(&root, &LocatorOptions::default()).unwrap_err();
        assert!(matches!(err, PhotoCopyError::ComputerFolderNotFound(_)));
    }

    #[test]
    fn test_matches_iphone_layout() {
        let result = check(iphone("Apple iPhone", vec![MockNode::folder("100APPLE", vec![])]));
        let DeviceMatch::Found {
            device_name,
            dcim,
            parent,
        } = result
        else {
            panic!("iPhone layout was not recognized")
        };
        assert_eq!(device_name, "Apple iPhone");
        assert_eq!(parent.path(), "This PC\\Apple iPhone\\Internal Storage");
        assert_eq!(
            parent.display_name(&dcim, DisplayStyle::Normal).unwrap(),
            "DCIM"
        );
    }

    #[test]
    fn test_ordinary_drive_is_not_a_match() {
        let reason = reason(local_drive("Local Disk (C:)"));
        assert_eq!(reason, Mismatch::OtherTopFolder("Program Files".to_string()));
        assert_eq!(reason.log_level(), Level::Debug);
    }

    #[test]
    fn test_dcim_without_storage_wrapper_warns() {
        let reason = reason(MockNode::folder(
            "Camera",
            vec![MockNode::folder("DCIM", vec![MockNode::folder("100APPLE", vec![])])],
        ));
        assert_eq!(reason, Mismatch::DcimOutsideStorage);
        assert_eq!(reason.log_level(), Level::Warn);
    }

    #[test]
    fn test_storage_without_dcim_warns() {
        let reason = reason(MockNode::folder(
            "Apple iPhone",
            vec![MockNode::folder(
                "Internal Storage",
                vec![MockNode::folder("Downloads", vec![])],
            )],
        ));
        assert_eq!(
            reason,
            Mismatch::MissingDcim {
                storage: "Internal Storage".to_string(),
                found: Some("Downloads".to_string()),
            }
        );
        assert_eq!(reason.log_level(), Level::Warn);
    }

    #[test]
    fn test_empty_storage_warns() {
        let reason = reason(MockNode::folder(
            "Apple iPhone",
            vec![MockNode::folder("Internal Storage", vec![])],
        ));
        assert!(matches!(reason, Mismatch::MissingDcim { found: None, .. }));
    }

    #[test]
    fn test_only_first_folder_is_considered() {
        let first = reason(MockNode::folder(
            "Apple iPhone",
            vec![
                MockNode::folder("Backups", vec![]),
                MockNode::folder(
                    "Internal Storage",
                    vec![MockNode::folder("DCIM", vec![])],
                ),
            ],
        ));
        assert_eq!(first, Mismatch::OtherTopFolder("Backups".to_string()));

        let second = reason(MockNode::folder(
            "Apple iPhone",
            vec![MockNode::folder(
                "Internal Storage",
                vec![
                    MockNode::folder("Downloads", vec![]),
                    MockNode::folder("DCIM", vec![]),
                ],
            )],
        ));
        assert!(matches!(second, Mismatch::MissingDcim { .. }));
    }

    #[test]
    fn test_names_are_matched_exactly() {
        let reason = reason(MockNode::folder(
            "Apple iPhone",
            vec![MockNode::folder(
                "internal storage",
                vec![MockNode::folder("DCIM", vec![])],
            )],
        ));
        assert!(matches!(reason, Mismatch::OtherTopFolder(_)));
    }

    #[test]
    fn test_inaccessible_device_is_not_a_match() {
        let reason = reason(iphone("Locked iPhone", vec![]).inaccessible());
        assert!(matches!(reason, Mismatch::Inaccessible(_)));
        assert_eq!(reason.log_level(), Level::Debug);
    }

    #[test]
    fn test_locked_storage_is_not_a_match() {
        let reason = reason(MockNode::folder(
            "Apple iPhone",
            vec![MockNode::folder("Internal Storage", vec![]).inaccessible()],
        ));
        assert!(matches!(reason, Mismatch::Inaccessible(_)));
    }

    #[test]
    fn test_file_candidate_is_not_a_match() {
        let computer = MockFolder::root(MockNode::folder(
            "This PC",
            vec![MockNode::file("desktop.ini", vec![])],
        ));
        let entry = computer.first_entry(EntryKind::NonFolder).unwrap().unwrap();
        match get_dcim_folder(&computer, &entry, &LocatorOptions::default()) {
            DeviceMatch::NotFound {
                device_name,
                reason,
            } => {
                assert_eq!(device_name, "desktop.ini");
                assert!(matches!(reason, Mismatch::Inaccessible(_)));
            }
            DeviceMatch::Found { .. } => panic!("a file was taken for a phone"),
        }
    }
}
