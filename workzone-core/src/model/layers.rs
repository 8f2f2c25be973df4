use std::fmt;

use crate::error::Error;
use crate::model::RequestContext;

/// Opaque identifier of a named layer in the spatial feature source,
/// namespaced as `"<namespace>:<layer-name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ns, _)| ns)
    }

    pub fn layer_name(&self) -> &str {
        self.0
            .split_once(':')
            .map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Resolution of an asset-type code into the layer and identifier key used
/// to query features of that type.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTypeInfo {
    pub id_key: String,
    pub source_layer_id: LayerId,
    pub namespace: String,
    pub owners: Vec<String>,
}

/// External taxonomy/reference lookup. Consumed by callers to pick the
/// layers to query; the geometry pipeline itself never reads it.
#[allow(async_fn_in_trait)]
pub trait TaxonomyLookup {
    async fn resolve(
        &self,
        ctx: &RequestContext,
        asset_type_code: &str,
    ) -> Result<AssetTypeInfo, Error>;
}
