// Plugin Compiler Host
//
// The host surface a wrapping build tool provides to the plugin.

use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};

/// A compiler host which also exposes the list of input files.
pub trait PluginCompilerHost {
    /// List of input files for the program.
    fn input_files(&self) -> Vec<AbsoluteFsPath>;

    /// The file system the compilation reads through.
    fn file_system(&self) -> &dyn ReadonlyFileSystem;

    /// Gets the current directory.
    fn get_current_directory(&self) -> AbsoluteFsPath;
}

/// Host over an injected file system and a fixed input list.
pub struct SimplePluginCompilerHost<'a> {
    fs: &'a dyn ReadonlyFileSystem,
    input_files: Vec<AbsoluteFsPath>,
    current_directory: AbsoluteFsPath,
}

impl<'a> SimplePluginCompilerHost<'a> {
    pub fn new(
        fs: &'a dyn ReadonlyFileSystem,
        input_files: Vec<AbsoluteFsPath>,
        current_directory: AbsoluteFsPath,
    ) -> Self {
        SimplePluginCompilerHost {
            fs,
            input_files,
            current_directory,
        }
    }
}

impl<'a> PluginCompilerHost for SimplePluginCompilerHost<'a> {
    fn input_files(&self) -> Vec<AbsoluteFsPath> {
        self.input_files.clone()
    }

    fn file_system(&self) -> &dyn ReadonlyFileSystem {
        self.fs
    }

    fn get_current_directory(&self) -> AbsoluteFsPath {
        self.current_directory.clone()
    }
}
