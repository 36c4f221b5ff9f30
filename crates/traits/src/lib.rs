pub mod resource;
pub mod store;

pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
pub use store::{InMemoryTemplateStore, StoreError, TemplateStore};
