//! Resource providers for letterhead references.
//!
//! - [`FilesystemResourceProvider`] reads files under a base directory.
//! - [`DataUrlResourceProvider`] decodes `data:` URLs, the form a letterhead
//!   takes when it is kept in application settings.
//! - [`InMemoryResourceProvider`] is re-exported from `folio-traits`.

mod data_url;
mod filesystem;

pub use data_url::{DataUrl, DataUrlResourceProvider};
pub use filesystem::FilesystemResourceProvider;

pub use folio_traits::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};

/// Picks the provider able to resolve `reference`: data URLs decode inline,
/// anything else is read relative to `base_dir`.
pub fn provider_for(
    reference: &str,
    base_dir: impl AsRef<std::path::Path>,
) -> Box<dyn ResourceProvider> {
    if DataUrl::is_data_url(reference) {
        Box::new(DataUrlResourceProvider)
    } else {
        Box::new(FilesystemResourceProvider::new(base_dir))
    }
}
