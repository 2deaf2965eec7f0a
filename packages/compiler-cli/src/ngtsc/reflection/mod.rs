pub mod src {
    pub mod host;
    pub mod typescript;
}

#[cfg(test)]
mod test;

pub use src::host::ReflectionHost;
pub use src::typescript::{lower_source_file, TsReflectionHost};
