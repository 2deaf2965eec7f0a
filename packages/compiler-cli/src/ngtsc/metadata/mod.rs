pub mod src {
    pub mod api;
    pub mod injectable_registry;
    pub mod references_registry;
    pub mod resource_registry;
}


pub use src::api::{CtorDependency, InjectableMeta};
pub use src::injectable_registry::InjectableClassRegistry;
pub use src::references_registry::{NoopReferencesRegistry, ReferencesRegistry};
pub use src::resource_registry::{ComponentResources, Resource, ResourceRegistry};
