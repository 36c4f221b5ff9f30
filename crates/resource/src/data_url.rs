use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use folio_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::sync::Arc;

const SCHEME: &str = "data:";

/// A parsed `data:[<mime>][;base64],<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn is_data_url(reference: &str) -> bool {
        reference
            .get(..SCHEME.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SCHEME))
    }

    pub fn parse(reference: &str) -> Result<Self, ResourceError> {
        if !Self::is_data_url(reference) {
            return Err(ResourceError::InvalidReference(
                "missing data: scheme".to_string(),
            ));
        }
        let (header, payload) = reference[SCHEME.len()..]
            .split_once(',')
            .ok_or_else(|| ResourceError::InvalidReference("missing ',' separator".to_string()))?;

        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        let data = if is_base64 {
            let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| ResourceError::InvalidReference(format!("bad base64 payload: {e}")))?
        } else {
            payload.as_bytes().to_vec()
        };

        Ok(Self {
            mime: if mime.is_empty() { "text/plain".to_string() } else { mime },
            data,
        })
    }
}

/// Resolves data URLs to their decoded payload. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlResourceProvider;

impl ResourceProvider for DataUrlResourceProvider {
    fn load(&self, reference: &str) -> Result<SharedResourceData, ResourceError> {
        let url = DataUrl::parse(reference)?;
        log::debug!("Decoded {} byte {} data URL", url.data.len(), url.mime);
        Ok(Arc::new(url.data))
    }

    fn exists(&self, reference: &str) -> bool {
        DataUrl::parse(reference).is_ok()
    }

    fn name(&self) -> &'static str {
        "DataUrlResourceProvider"
    }
}
