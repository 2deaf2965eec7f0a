pub mod src {
    pub mod references;
}

pub use src::references::Reference;
