use crate::quantity::{Quantity, QuantityError};
use crate::types::AcIdentifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named resource constraint attached to a pod or an app.
///
/// `value` is opaque here; isolators from the compose file are passed through
/// to the manifest as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isolator {
    pub name: AcIdentifier,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpu,
    Memory,
}

impl Resource {
    pub fn isolator_name(self) -> &'static str {
        match self {
            Resource::Cpu => "resource/cpu",
            Resource::Memory => "resource/memory",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Cpu => f.write_str("cpu"),
            Resource::Memory => f.write_str("memory"),
        }
    }
}

impl Isolator {
    /// Build a `resource/cpu` or `resource/memory` isolator from request and
    /// limit quantity strings.
    pub fn resource(resource: Resource, request: &str, limit: &str) -> Result<Self, QuantityError> {
        let request = Quantity::parse(request)?;
        let limit = Quantity::parse(limit)?;
        Ok(Self {
            name: AcIdentifier::from_static(resource.isolator_name()),
            value: serde_json::json!({
                "request": request.as_str(),
                "limit": limit.as_str(),
            }),
        })
    }

    /// `(request, limit)` of a resource isolator, if the value has that shape.
    pub fn request_limit(&self) -> Option<(&str, &str)> {
        let request = self.value.get("request")?.as_str()?;
        let limit = self.value.get("limit")?.as_str()?;
        Some((request, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_isolator_uses_request_and_limit() {
        let iso = Isolator::resource(Resource::Cpu, "500m", "500m").unwrap();
        assert_eq!(iso.name, "resource/cpu");
        assert_eq!(iso.request_limit(), Some(("500m", "500m")));
    }

    #[test]
    fn memory_isolator_name() {
        let iso = Isolator::resource(Resource::Memory, "64M", "64M").unwrap();
        assert_eq!(iso.name, "resource/memory");
        assert_eq!(iso.request_limit(), Some(("64M", "64M")));
    }

    #[test]
    fn malformed_quantity_is_rejected() {
        assert!(Isolator::resource(Resource::Memory, "lots", "lots").is_err());
    }

    #[test]
    fn passthrough_isolator_roundtrips_value() {
        let json = r#"{"name":"os/linux/capabilities-retain-set","value":{"set":["CAP_NET_BIND_SERVICE"]}}"#;
        let iso: Isolator = serde_json::from_str(json).unwrap();
        assert_eq!(iso.name, "os/linux/capabilities-retain-set");
        assert!(iso.request_limit().is_none());
        assert_eq!(serde_json::to_string(&iso).unwrap(), json);
    }
}
