//! Canned namespace layouts
//!
//! Builders for the desktop trees the copier is tested against: a desktop
//! with a "This PC" folder holding any mix of phones and ordinary drives.

use crate::testdb::mock_shell::{MockFolder, MockNode};

/// JPEG start-of-image marker followed by filler bytes
pub fn jpeg_bytes(len: usize, seed: u8) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend((0..len.saturating_sub(4)).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)));
    data.truncate(len);
    data
}

/// Desktop root with a single computer folder named `computer_name`
pub fn desktop_with_computer(computer_name: &str, devices: Vec<MockNode>) -> MockFolder {
    MockFolder::root(MockNode::folder(
        "Desktop",
        vec![
            MockNode::folder("Libraries", vec![]),
            MockNode::folder(computer_name, devices),
            MockNode::folder("Network", vec![]),
        ],
    ))
}

/// Desktop root with "This PC" holding `devices`
pub fn desktop(devices: Vec<MockNode>) -> MockFolder {
    desktop_with_computer("This PC", devices)
}

/// Phone exposing "Internal Storage\DCIM" with the given DCIM subfolders
pub fn iphone(name: &str, dcim_folders: Vec<MockNode>) -> MockNode {
    MockNode::folder(
        name,
        vec![MockNode::folder(
            "Internal Storage",
            vec![MockNode::folder("DCIM", dcim_folders)],
        )],
    )
}

/// Ordinary local drive; its first folder is not "Internal Storage"
pub fn local_drive(name: &str) -> MockNode {
    MockNode::folder(
        name,
        vec![
            MockNode::folder("Program Files", vec![]),
            MockNode::folder("Users", vec![]),
        ],
    )
}

/// The layout from the basic copy scenario: one new photo and one edited variant
pub fn single_iphone() -> MockFolder {
    desktop(vec![
        local_drive("Local Disk (C:)"),
        iphone(
            "Apple iPhone",
            vec![MockNode::folder(
                "100APPLE",
                vec![
                    MockNode::file("IMG_0001.JPG", jpeg_bytes(20_000, 1)),
                    MockNode::file("IMG_E0002.JPG", jpeg_bytes(3_000, 2)),
                ],
            )],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_bytes() {
        let data = jpeg_bytes(100, 3);
        assert_eq!(data.len(), 100);
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
        assert_ne!(jpeg_bytes(100, 3), jpeg_bytes(100, 4));
        assert_eq!(jpeg_bytes(2, 0).len(), 2);
    }
}
