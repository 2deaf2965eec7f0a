pub mod src {
    pub mod api;
    pub mod ts_create_program_driver;
}

pub use src::api::ProgramDriver;
pub use src::ts_create_program_driver::TsCreateProgramDriver;
