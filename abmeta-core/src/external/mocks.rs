// abmeta-core/src/external/mocks.rs
//
// Scripted transcoder and file system for tests.
// This module is only compiled for the crate's own unit tests or when the
// "test-mocks" feature is enabled.

use super::*;
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying `code` as the process exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Builds an `ExitStatus` carrying `code` as the process exit code.
#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events whose lines read_output returns.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn read_output(&mut self) -> CoreResult<Vec<String>> {
        let events = self.events_to_emit.borrow().clone();
        Ok(events.into_iter().filter_map(event_line).collect())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern is contained in
/// one of the command's arguments. A call without a matching expectation
/// panics, so tests fail loudly on unplanned transcoder runs.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(exit_code),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Number of expectations not consumed yet.
    pub fn pending_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();

        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
            panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        if expectation.create_dummy_output && expectation.result.is_ok() {
            match args.last() {
                Some(output_path) => {
                    if let Err(e) = std::fs::write(output_path, b"tagged") {
                        log::error!(
                            "MockFfmpegSpawner failed to create dummy output file {}: {}",
                            output_path,
                            e
                        );
                    }
                }
                None => log::warn!("MockFfmpegSpawner couldn't find output path in args."),
            }
        }
        expectation.result
    }
}

/// A file system operation recorded by [`MockFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    CreateDirAll(PathBuf),
    Rename(PathBuf, PathBuf),
}

/// In-memory [`FileSystem`] with a scripted listing.
///
/// Listing order is exactly the order given, which a real directory cannot
/// guarantee. Mutations are recorded, never performed.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    listing: Rc<RefCell<Option<Vec<String>>>>,
    calls: Rc<RefCell<Vec<FsCall>>>,
    failing_renames: Rc<RefCell<Vec<PathBuf>>>,
    fail_create_dir: Rc<RefCell<bool>>,
}

impl MockFileSystem {
    /// A file system whose input directory lists `entries`, in this order.
    pub fn with_listing(entries: &[&str]) -> Self {
        let fs = Self::default();
        *fs.listing.borrow_mut() = Some(entries.iter().map(|e| e.to_string()).collect());
        fs
    }

    /// A file system where listing fails as if the directory were missing.
    pub fn unreadable() -> Self {
        Self::default()
    }

    /// Makes the rename whose source is `from` fail.
    pub fn fail_rename_from(&self, from: impl Into<PathBuf>) {
        self.failing_renames.borrow_mut().push(from.into());
    }

    /// Makes every directory creation fail.
    pub fn fail_create_dir(&self) {
        *self.fail_create_dir.borrow_mut() = true;
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.borrow().clone()
    }
}

impl FileSystem for MockFileSystem {
    fn list_dir(&self, dir: &Path) -> CoreResult<Vec<String>> {
        self.listing.borrow().clone().ok_or_else(|| {
            CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", dir.display()),
            ))
        })
    }

    fn create_dir_all(&self, dir: &Path) -> CoreResult<()> {
        self.calls
            .borrow_mut()
            .push(FsCall::CreateDirAll(dir.to_path_buf()));
        if *self.fail_create_dir.borrow() {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> CoreResult<()> {
        self.calls
            .borrow_mut()
            .push(FsCall::Rename(from.to_path_buf(), to.to_path_buf()));
        if self.failing_renames.borrow().iter().any(|p| p == from) {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", from.display()),
            )));
        }
        Ok(())
    }
}
