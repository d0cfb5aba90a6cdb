//! Template catalog types and registry

use serde::{Deserialize, Serialize};

/// Marker substring in a parameter description for catalogs that predate the
/// explicit `kind` field. Parameters described as accepting a JSON array are
/// treated as multi-value.
const MULTI_VALUE_MARKER: &str = "JSON array";

/// How a template parameter collects its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Scalar,
    MultiValue,
}

/// One named input slot of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParam {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Explicit kind from the catalog; older servers omit it
    #[serde(default)]
    pub kind: Option<ParamKind>,
}

impl TemplateParam {
    /// Effective kind of this parameter
    ///
    /// The explicit `kind` field wins. Catalogs without it fall back to the
    /// description marker; that heuristic is compatibility-only.
    pub fn kind(&self) -> ParamKind {
        match self.kind {
            Some(kind) => kind,
            None if self.description.contains(MULTI_VALUE_MARKER) => ParamKind::MultiValue,
            None => ParamKind::Scalar,
        }
    }
}

/// A server-defined query template and its parameter schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub label: String,
    pub name: String,
    #[serde(default, alias = "paramsList")]
    pub params: Vec<TemplateParam>,
}

impl Template {
    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&TemplateParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Selector option derived from the template list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOption {
    pub label: String,
    /// Positional index into the registry's template list
    pub value: usize,
}

/// Owned catalog of templates plus the derived selector options
///
/// The registry belongs to one form session; there is no shared cache.
/// Options are always derived from the same list that lookups index into,
/// so an out-of-range index is a programming error, not a user error.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    options: Vec<TemplateOption>,
}

impl TemplateRegistry {
    /// Replace the catalog with a freshly fetched template list
    ///
    /// Swaps the list and the derived options together; callers only ever
    /// observe a consistent pair.
    pub fn replace(&mut self, templates: Vec<Template>) {
        let options = templates
            .iter()
            .enumerate()
            .map(|(index, template)| TemplateOption {
                label: template.label.clone(),
                value: index,
            })
            .collect();
        self.templates = templates;
        self.options = options;
    }

    /// Bounds-checked lookup by selector option value
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    pub fn options(&self) -> &[TemplateOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<Template> {
        vec![
            Template {
                id: 0,
                label: "Company ratio".to_string(),
                name: "company_ratio".to_string(),
                params: vec![
                    TemplateParam {
                        name: "org".to_string(),
                        description: String::new(),
                        kind: None,
                    },
                    TemplateParam {
                        name: "email".to_string(),
                        description: "Accepts a JSON array of addresses".to_string(),
                        kind: None,
                    },
                ],
            },
            Template {
                id: 1,
                label: "Timezone ratio".to_string(),
                name: "timezone_ratio".to_string(),
                params: vec![],
            },
        ]
    }

    #[test]
    fn test_replace_derives_options() {
        let mut registry = TemplateRegistry::default();
        registry.replace(catalog());

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.options(),
            &[
                TemplateOption {
                    label: "Company ratio".to_string(),
                    value: 0,
                },
                TemplateOption {
                    label: "Timezone ratio".to_string(),
                    value: 1,
                },
            ]
        );
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let mut registry = TemplateRegistry::default();
        registry.replace(catalog());

        assert_eq!(registry.get(1).map(|t| t.name.as_str()), Some("timezone_ratio"));
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_replace_discards_previous_catalog() {
        let mut registry = TemplateRegistry::default();
        registry.replace(catalog());
        registry.replace(vec![]);

        assert!(registry.is_empty());
        assert!(registry.options().is_empty());
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn test_explicit_kind_wins() {
        let param = TemplateParam {
            name: "org".to_string(),
            description: "Accepts a JSON array".to_string(),
            kind: Some(ParamKind::Scalar),
        };
        assert_eq!(param.kind(), ParamKind::Scalar);
    }

    #[test]
    fn test_kind_falls_back_to_description_marker() {
        let multi = TemplateParam {
            name: "emails".to_string(),
            description: "Accepts a JSON array of addresses".to_string(),
            kind: None,
        };
        let scalar = TemplateParam {
            name: "org".to_string(),
            description: "Organization name".to_string(),
            kind: None,
        };
        assert_eq!(multi.kind(), ParamKind::MultiValue);
        assert_eq!(scalar.kind(), ParamKind::Scalar);
    }

    #[test]
    fn test_deserialize_with_params_list_alias() {
        let json = r#"{
            "id": 0,
            "label": "Company ratio",
            "name": "company_ratio",
            "paramsList": [
                {"name": "org", "description": ""},
                {"name": "email", "description": "a"}
            ]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.params.len(), 2);
        assert_eq!(template.params[0].name, "org");
        assert_eq!(template.params[0].kind(), ParamKind::Scalar);
    }

    #[test]
    fn test_deserialize_with_explicit_kind() {
        let json = r#"{
            "id": 2,
            "label": "Membership",
            "name": "membership",
            "params": [
                {"name": "groups", "description": "", "kind": "multi_value"}
            ]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.params[0].kind(), ParamKind::MultiValue);
    }
}
