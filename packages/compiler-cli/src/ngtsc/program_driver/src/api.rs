// Program Driver API
//
// The seam through which the compiler obtains program snapshots from
// whatever tool hosts it (batch CLI, language service, plugin).

use std::rc::Rc;
use ts::Program;

pub trait ProgramDriver {
    /// The current program snapshot.
    fn get_program(&self) -> Rc<Program>;

    /// Replace the current snapshot. The previous snapshot stays valid for
    /// holders of its `Rc`.
    fn update_program(&mut self, program: Rc<Program>);

    /// Whether the driver supports in-place updates of file contents (as
    /// opposed to full snapshot replacement).
    fn supports_inline_operations(&self) -> bool {
        false
    }
}
