pub mod src {
    pub mod loader;
}


pub use src::loader::{
    AdapterResourceLoader, ResourceError, ResourceLoaderContext, ResourceType,
};
