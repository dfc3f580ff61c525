//! API-service class definitions.
//!
//! A [`ServiceSpec`] is usually deserialized from a manifest file:
//!
//! ```toml
//! class_name = "UserService"
//! base_path = "/api/users"
//!
//! [[methods]]
//! name = "getUser"
//! http_method = "GET"
//! endpoint = "/{id}"
//! response_type = "User"
//! response_type_path = "@/types/api/user"
//! mock_function = "getDummyUser"
//! mock_function_path = "@/dummy/user"
//! ```
//!
//! camelCase keys (`className`, `httpMethod`, ...) are accepted as well.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Placeholder in an endpoint that becomes an `id: number` parameter.
pub const ID_PLACEHOLDER: &str = "{id}";

// ── HttpMethod ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "patch")]
    Patch,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether a request body is sent with this method.
    pub const fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            other => Err(DomainError::InvalidServiceSpec(format!(
                "unknown HTTP method: {other}"
            ))),
        }
    }
}

// ── ServiceMethod ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMethod {
    pub name: String,
    #[serde(alias = "httpMethod")]
    pub http_method: HttpMethod,
    pub endpoint: String,
    #[serde(default, alias = "requestBodyType", skip_serializing_if = "Option::is_none")]
    pub request_body_type: Option<String>,
    #[serde(alias = "responseType")]
    pub response_type: String,
    #[serde(default, alias = "responseTypePath", skip_serializing_if = "Option::is_none")]
    pub response_type_path: Option<String>,
    #[serde(
        default,
        alias = "mockFunction",
        alias = "dummyFunction",
        skip_serializing_if = "Option::is_none"
    )]
    pub mock_function: Option<String>,
    #[serde(
        default,
        alias = "mockFunctionPath",
        alias = "dummyFunctionPath",
        skip_serializing_if = "Option::is_none"
    )]
    pub mock_function_path: Option<String>,
}

impl ServiceMethod {
    pub fn takes_id(&self) -> bool {
        self.endpoint.contains(ID_PLACEHOLDER)
    }

    /// Request body type, when the method actually sends one.
    pub fn body_type(&self) -> Option<&str> {
        self.request_body_type
            .as_deref()
            .filter(|_| self.http_method.carries_body())
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !is_identifier(&self.name) {
            return Err(DomainError::InvalidServiceSpec(format!(
                "method name '{}' is not a valid identifier",
                self.name
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(DomainError::InvalidServiceSpec(format!(
                "method '{}' has an empty endpoint",
                self.name
            )));
        }
        if self.response_type.trim().is_empty() {
            return Err(DomainError::InvalidServiceSpec(format!(
                "method '{}' has no response type",
                self.name
            )));
        }
        match &self.mock_function {
            Some(function) if !is_identifier(function) => {
                Err(DomainError::InvalidServiceSpec(format!(
                    "mock function '{function}' of method '{}' is not a valid identifier",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}

// ── ServiceSpec ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(alias = "className")]
    pub class_name: String,
    #[serde(alias = "basePath")]
    pub base_path: String,
    #[serde(default)]
    pub methods: Vec<ServiceMethod>,
}

impl ServiceSpec {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_identifier(&self.class_name) {
            return Err(DomainError::InvalidServiceSpec(format!(
                "class name '{}' is not a valid identifier",
                self.class_name
            )));
        }
        if self.methods.is_empty() {
            return Err(DomainError::InvalidServiceSpec(
                "at least one method is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            method.validate()?;
            if !seen.insert(method.name.as_str()) {
                return Err(DomainError::DuplicateMethod {
                    name: method.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Name of the exported singleton: `UserService` → `UserApi`.
    pub fn instance_name(&self) -> String {
        let name = self.class_name.as_str();
        let name = name.strip_suffix("Service").unwrap_or(name);
        let name = name.strip_suffix("Api").unwrap_or(name);
        format!("{name}Api")
    }

    pub fn has_mocks(&self) -> bool {
        self.methods.iter().any(|m| m.mock_function.is_some())
    }
}

/// Identifier: a letter, `_` or `$`, then letters, digits, `_` or `$`.
/// Letters include non-ASCII ones such as `Ñ`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> ServiceMethod {
        ServiceMethod {
            name: name.into(),
            http_method: HttpMethod::Get,
            endpoint: "/{id}".into(),
            request_body_type: None,
            response_type: "User".into(),
            response_type_path: None,
            mock_function: None,
            mock_function_path: None,
        }
    }

    fn spec(class_name: &str, methods: Vec<ServiceMethod>) -> ServiceSpec {
        ServiceSpec {
            class_name: class_name.into(),
            base_path: "/api/users".into(),
            methods,
        }
    }

    #[test]
    fn instance_name_strips_suffixes() {
        assert_eq!(spec("UserService", vec![]).instance_name(), "UserApi");
        assert_eq!(spec("UserApiService", vec![]).instance_name(), "UserApi");
        assert_eq!(spec("UserApi", vec![]).instance_name(), "UserApi");
        assert_eq!(spec("Users", vec![]).instance_name(), "UsersApi");
    }

    #[test]
    fn valid_spec_passes() {
        let s = spec("UserService", vec![method("getUser"), method("listUsers")]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn duplicate_methods_are_rejected() {
        let s = spec("UserService", vec![method("getUser"), method("getUser")]);
        assert_eq!(
            s.validate(),
            Err(DomainError::DuplicateMethod {
                name: "getUser".into()
            })
        );
    }

    #[test]
    fn empty_method_list_is_rejected() {
        assert!(matches!(
            spec("UserService", vec![]).validate(),
            Err(DomainError::InvalidServiceSpec(_))
        ));
    }

    #[test]
    fn bad_identifiers_are_rejected() {
        assert!(spec("User Service", vec![method("get")]).validate().is_err());
        assert!(spec("UserService", vec![method("2get")]).validate().is_err());
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let mut m = method("get");
        m.endpoint = "  ".into();
        assert!(spec("UserService", vec![m]).validate().is_err());
    }

    #[test]
    fn body_only_for_body_methods() {
        let mut m = method("remove");
        m.request_body_type = Some("Payload".into());
        m.http_method = HttpMethod::Delete;
        assert_eq!(m.body_type(), None);
        m.http_method = HttpMethod::Patch;
        assert_eq!(m.body_type(), Some("Payload"));
    }

    #[test]
    fn http_method_parses_case_insensitively() {
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn deserializes_camel_case_manifest() {
        let json = r#"{
            "className": "UserService",
            "basePath": "/api/users",
            "methods": [{
                "name": "createUser",
                "httpMethod": "POST",
                "endpoint": "",
                "requestBodyType": "NewUser",
                "responseType": "User",
                "dummyFunction": "getDummyUser"
            }]
        }"#;
        let s: ServiceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(s.methods[0].http_method, HttpMethod::Post);
        assert_eq!(s.methods[0].mock_function.as_deref(), Some("getDummyUser"));
        assert!(s.has_mocks());
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("getUser"));
        assert!(is_identifier("_x$1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(is_identifier("RootÑame"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier("1st"));
    }
}
