// TypeScript Create Program Driver
//
// Builds program snapshots by reading root files through the file system
// and lowering them to declaration granularity.

use std::rc::Rc;
use xxhash_rust::xxh3::xxh3_64;

use super::api::ProgramDriver;
use crate::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use crate::ngtsc::reflection::lower_source_file;
use ts::Program;

pub struct TsCreateProgramDriver {
    program: Rc<Program>,
}

impl TsCreateProgramDriver {
    /// Parse and lower `root_files` into a fresh program. Unreadable files
    /// are skipped; missing inputs surface as diagnostics elsewhere.
    pub fn create(fs: &dyn ReadonlyFileSystem, root_files: &[AbsoluteFsPath]) -> Self {
        let mut files = Vec::new();
        for path in root_files {
            let Ok(text) = fs.read_file(path) else {
                continue;
            };
            let mut sf = lower_source_file(&text, path.as_str());
            sf.version = format!("{:016x}", xxh3_64(text.as_bytes()));
            files.push(Rc::new(sf));
        }
        TsCreateProgramDriver {
            program: Rc::new(Program::from_rc_files(files)),
        }
    }

    pub fn from_program(program: Rc<Program>) -> Self {
        TsCreateProgramDriver { program }
    }
}

impl ProgramDriver for TsCreateProgramDriver {
    fn get_program(&self) -> Rc<Program> {
        Rc::clone(&self.program)
    }

    fn update_program(&mut self, program: Rc<Program>) {
        self.program = program;
    }
}
