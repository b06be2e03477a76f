//! Photo copying
//!
//! Walks every subfolder of a phone's DCIM folder and copies photos that are
//! not yet in the target directory. The workflow is:
//! - find the computer folder and every phone under it (see `locator`)
//! - for each DCIM subfolder, filter files by extension and name prefix
//! - stream each new photo into the target directory
//!
//! Interrupted writes are not detected: a truncated local file counts as
//! already present on the next run.

use crate::core::error::{PhotoCopyError, Result};
use crate::core::locator::{find_computer_folder, get_dcim_folder, DeviceMatch, LocatorOptions};
use crate::shell::stream::{stream_file_content, DEFAULT_BUFFER_SIZE};
use crate::shell::traits::{DisplayStyle, EntryKind, ShellFolder};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, trace, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings for copying photos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOptions {
    /// Directory the photos are copied to
    pub target_directory: PathBuf,
    /// Replace files that already exist in the target directory
    pub overwrite: bool,
    /// Case-sensitive suffixes a file extension must end with
    pub extensions: Vec<String>,
    /// File name prefixes that are never copied
    pub skip_prefixes: Vec<String>,
    /// Read buffer size in bytes
    pub buffer_size: usize,
}

impl CopyOptions {
    /// Default options copying into `target_directory`
    pub fn new<P: Into<PathBuf>>(target_directory: P) -> Self {
        Self {
            target_directory: target_directory.into(),
            overwrite: false,
            extensions: vec!["JPG".to_string()],
            skip_prefixes: vec!["IMG_E".to_string()],
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set whether existing files are replaced
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| extension.ends_with(e.as_str()))
    }

    fn is_skipped(&self, basename: &str) -> bool {
        self.skip_prefixes.iter().any(|p| basename.starts_with(p.as_str()))
    }
}

/// A display path split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPath<'a> {
    /// Everything before the last separator
    pub directory: &'a str,
    /// Last component without its extension
    pub basename: &'a str,
    /// Extension including the dot, or empty
    pub extension: &'a str,
    /// Last component (basename + extension)
    pub file_name: &'a str,
}

/// Split an address-bar path such as `This PC\Apple iPhone\...\IMG_0001.JPG`
///
/// Both `\` and `/` separate components. The extension starts at the last dot
/// of the file name; leading dots belong to the basename.
pub fn split_display_path(path: &str) -> DisplayPath<'_> {
    let (directory, file_name) = match path.rfind(|c: char| c == '\\' || c == '/') {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    };

    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    let (basename, extension) = match file_name[leading_dots..].rfind('.') {
        Some(dot) => file_name.split_at(leading_dots + dot),
        None => (file_name, ""),
    };

    DisplayPath {
        directory,
        basename,
        extension,
        file_name,
    }
}

/// What happened to one file on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Copied to a new local file, with the number of bytes
    Copied(u64),
    /// Replaced an existing local file, with the number of bytes
    Overwritten(u64),
    /// Local file exists and overwriting is off
    AlreadyExists,
    /// Edited variant, never copied
    EditedVariant,
    /// Extension not accepted
    NotMatching,
}

/// Statistics about a copy run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyStats {
    pub devices_scanned: usize,
    pub devices_matched: usize,
    pub folders_walked: usize,
    pub files_copied: usize,
    pub files_overwritten: usize,
    pub files_existing: usize,
    pub files_edited: usize,
    pub files_ignored: usize,
    pub total_bytes: u64,
}

impl CopyStats {
    fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied(bytes) => {
                self.files_copied += 1;
                self.total_bytes += bytes;
            }
            CopyOutcome::Overwritten(bytes) => {
                self.files_overwritten += 1;
                self.total_bytes += bytes;
            }
            CopyOutcome::AlreadyExists => self.files_existing += 1,
            CopyOutcome::EditedVariant => self.files_edited += 1,
            CopyOutcome::NotMatching => self.files_ignored += 1,
        }
    }
}

impl std::fmt::Display for CopyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_mb = self.total_bytes as f64 / 1_048_576.0;
        write!(
            f,
            "Phones: {}/{}, Folders: {}, Copied: {}, Overwritten: {}, Already present: {}, Edited skipped: {}, Other files: {}, Total size: {:.2} MB",
            self.devices_matched, self.devices_scanned, self.folders_walked,
            self.files_copied, self.files_overwritten, self.files_existing,
            self.files_edited, self.files_ignored, size_mb
        )
    }
}

/// Spinner shown while copying; hidden unless enabled
struct CopyProgress {
    spinner: ProgressBar,
    start_time: Instant,
}

impl CopyProgress {
    fn new(enabled: bool) -> Self {
        let spinner = if enabled {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
            );
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            spinner.set_message("Looking for phones...");
            spinner
        } else {
            ProgressBar::hidden()
        };

        Self {
            spinner,
            start_time: Instant::now(),
        }
    }

    fn update(&self, stats: &CopyStats) {
        self.spinner.set_message(format!(
            "Copying... {} folders, {} photos copied ({:.0}s elapsed)",
            stats.folders_walked,
            stats.files_copied + stats.files_overwritten,
            self.start_time.elapsed().as_secs()
        ));
    }

    fn finish(&self, stats: &CopyStats) {
        self.spinner.finish_with_message(format!(
            "✓ Done: {} photos copied from {} folders in {:.1}s",
            stats.files_copied + stats.files_overwritten,
            stats.folders_walked,
            self.start_time.elapsed().as_secs_f64()
        ));
    }
}

/// Copies photos from phones into a local directory
pub struct Copier {
    options: CopyOptions,
    stats: CopyStats,
    progress: CopyProgress,
}

impl Copier {
    /// Create a copier without a progress spinner
    pub fn new(options: CopyOptions) -> Self {
        Self {
            options,
            stats: CopyStats::default(),
            progress: CopyProgress::new(false),
        }
    }

    /// Show a spinner while copying
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = CopyProgress::new(enabled);
        self
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &CopyStats {
        &self.stats
    }

    /// Find every phone under the computer folder and copy its new photos
    pub fn run<F: ShellFolder>(&mut self, desktop: &F, locator: &LocatorOptions) -> Result<CopyStats> {
        let start_time = Instant::now();
        info!(
            "Copying photos to {}",
            self.options.target_directory.display()
        );

        let computer = find_computer_folder(desktop, locator)?;

        for device in computer.list_entries(EntryKind::Any)? {
            self.stats.devices_scanned += 1;

            match get_dcim_folder(&computer, &device, locator) {
                DeviceMatch::Found {
                    device_name,
                    dcim,
                    parent,
                } => {
                    info!("Found DCIM folder on '{}'", device_name);
                    self.stats.devices_matched += 1;
                    self.walk_dcim_folder(&dcim, &parent)?;
                }
                DeviceMatch::NotFound { device_name, .. } => {
                    trace!("Skipping '{}'", device_name);
                }
            }
        }

        if self.stats.devices_matched == 0 {
            info!("No phone with a DCIM folder found");
        }

        self.progress.finish(&self.stats);
        info!(
            "Done. That took {:.2}s.",
            start_time.elapsed().as_secs_f64()
        );
        info!("{}", self.stats);

        Ok(self.stats.clone())
    }

    /// Copy photos from every subfolder of the DCIM folder `dcim` in `parent`
    pub fn walk_dcim_folder<F: ShellFolder>(&mut self, dcim: &F::Entry, parent: &F) -> Result<()> {
        let dcim_folder = parent.bind_folder(dcim)?;

        for entry in dcim_folder.list_entries(EntryKind::Folder)? {
            let folder = dcim_folder.bind_folder(&entry)?;
            let name = dcim_folder.display_name(&entry, DisplayStyle::ForAddressBar)?;
            info!("working on folder {}", name);

            self.stats.folders_walked += 1;
            self.progress.update(&self.stats);
            self.process_photos(&folder)?;
        }

        Ok(())
    }

    /// Copy every accepted file of `folder` that is not yet present locally
    pub fn process_photos<F: ShellFolder>(&mut self, folder: &F) -> Result<()> {
        for entry in folder.list_entries(EntryKind::NonFolder)? {
            let name = folder.display_name(&entry, DisplayStyle::ForAddressBar)?;
            let outcome = self.process_entry(folder, &entry, &name)?;
            self.stats.record(outcome);

            if matches!(outcome, CopyOutcome::Copied(_) | CopyOutcome::Overwritten(_)) {
                self.progress.update(&self.stats);
            }
        }

        Ok(())
    }

    fn process_entry<F: ShellFolder>(
        &self,
        folder: &F,
        entry: &F::Entry,
        name: &str,
    ) -> Result<CopyOutcome> {
        let path = split_display_path(name);

        if !self.options.accepts_extension(path.extension) {
            trace!("Not a photo: {}", name);
            return Ok(CopyOutcome::NotMatching);
        }

        if self.options.is_skipped(path.basename) {
            warn!("ignoring {}", path.basename);
            return Ok(CopyOutcome::EditedVariant);
        }

        let target = self.options.target_directory.join(path.file_name);
        let exists = target.is_file();

        if exists && !self.options.overwrite {
            debug!("{} is not overwritten", path.basename);
            return Ok(CopyOutcome::AlreadyExists);
        }

        if exists {
            info!("overwriting {}", path.basename);
        } else {
            info!("copying {}", path.basename);
        }

        let bytes = copy_to_file(folder, entry, &target, self.options.buffer_size)?;
        debug!("Copied: {} ({} bytes)", target.display(), bytes);

        Ok(if exists {
            CopyOutcome::Overwritten(bytes)
        } else {
            CopyOutcome::Copied(bytes)
        })
    }
}

/// Stream `entry` into `target`, creating or truncating it
fn copy_to_file<F: ShellFolder>(
    folder: &F,
    entry: &F::Entry,
    target: &Path,
    buffer_size: usize,
) -> Result<u64> {
    let chunks = stream_file_content(folder, entry, buffer_size)?;

    let file = File::create(target).map_err(|e| {
        PhotoCopyError::IoError(format!(
            "Failed to create file '{}': {}",
            target.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    let mut bytes: u64 = 0;

    for chunk in chunks {
        let chunk = chunk?;
        writer.write_all(&chunk).map_err(|e| write_error(target, e))?;
        bytes += chunk.len() as u64;
    }

    writer.flush().map_err(|e| write_error(target, e))?;
    Ok(bytes)
}

fn write_error(target: &Path, err: std::io::Error) -> PhotoCopyError {
    PhotoCopyError::WriteError {
        filename: target.display().to_string(),
        message: err.to_string(),
    }
}
