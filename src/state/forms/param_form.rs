//! Live parameter state for the selected template

use std::collections::HashMap;

use super::multi_value::MultiValueList;
use crate::state::templates::{ParamKind, Template};

/// Parameter-name → value mapping for the currently selected template
///
/// The form is a two-state machine: unselected (empty payload) or selected,
/// with one payload entry per parameter of the selected template. Every
/// selection transition re-derives the payload and the multi-value
/// collectors from scratch; nothing from a previous template survives the
/// switch. Scalar entries hold the raw string, multi-value entries hold the
/// collector's JSON-array encoding.
#[derive(Debug, Default)]
pub struct ParamForm {
    template: Option<Template>,
    payload: HashMap<String, String>,
    collectors: HashMap<String, MultiValueList>,
}

impl ParamForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition to the given template, re-deriving all parameter state
    ///
    /// Fresh maps are built first and swapped in together, so no observer
    /// ever sees a payload mixing two templates.
    pub fn select_template(&mut self, template: &Template) {
        let mut payload = HashMap::with_capacity(template.params.len());
        let mut collectors = HashMap::new();

        for param in &template.params {
            match param.kind() {
                ParamKind::Scalar => {
                    payload.insert(param.name.clone(), String::new());
                }
                ParamKind::MultiValue => {
                    let list = MultiValueList::new();
                    payload.insert(param.name.clone(), list.encode());
                    collectors.insert(param.name.clone(), list);
                }
            }
        }

        self.template = Some(template.clone());
        self.payload = payload;
        self.collectors = collectors;
    }

    /// Transition back to the unselected state
    pub fn clear_selection(&mut self) {
        self.template = None;
        self.payload = HashMap::new();
        self.collectors = HashMap::new();
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.template.is_some()
    }

    /// Set the value of a scalar parameter of the current template
    ///
    /// Calling this without a selection, for an unknown name, or for a
    /// multi-value parameter is a caller bug; it logs and leaves the
    /// payload untouched.
    pub fn set_scalar(&mut self, name: &str, value: impl Into<String>) {
        if !self.param_has_kind(name, ParamKind::Scalar, "set_scalar") {
            return;
        }
        self.payload.insert(name.to_string(), value.into());
    }

    /// Append an empty entry to a multi-value parameter
    pub fn add_entry(&mut self, name: &str) {
        if !self.param_has_kind(name, ParamKind::MultiValue, "add_entry") {
            return;
        }
        if let Some(list) = self.collectors.get_mut(name) {
            list.add_entry();
            let encoded = list.encode();
            self.payload.insert(name.to_string(), encoded);
        }
    }

    /// Remove one entry of a multi-value parameter
    ///
    /// The "at least one row" rule is enforced by the caller hiding the
    /// remove affordance; the form removes whatever index it is given.
    pub fn remove_entry(&mut self, name: &str, index: u32) {
        if !self.param_has_kind(name, ParamKind::MultiValue, "remove_entry") {
            return;
        }
        if let Some(list) = self.collectors.get_mut(name) {
            list.remove_entry(index);
            let encoded = list.encode();
            self.payload.insert(name.to_string(), encoded);
        }
    }

    /// Set the value of one entry of a multi-value parameter
    pub fn update_entry(&mut self, name: &str, index: u32, value: impl Into<String>) {
        if !self.param_has_kind(name, ParamKind::MultiValue, "update_entry") {
            return;
        }
        if let Some(list) = self.collectors.get_mut(name) {
            list.update_entry(index, value);
            let encoded = list.encode();
            self.payload.insert(name.to_string(), encoded);
        }
    }

    /// Entry list of a multi-value parameter, for rendering
    pub fn collector(&self, name: &str) -> Option<&MultiValueList> {
        self.collectors.get(name)
    }

    /// Current value of a parameter, for rendering
    pub fn value(&self, name: &str) -> Option<&str> {
        self.payload.get(name).map(String::as_str)
    }

    /// Owned snapshot of the payload for validation and submission
    ///
    /// Callers never see the live map, so a snapshot taken at submission
    /// time cannot be torn by later edits.
    pub fn payload_snapshot(&self) -> HashMap<String, String> {
        self.payload.clone()
    }

    fn param_has_kind(&self, name: &str, expected: ParamKind, operation: &str) -> bool {
        let Some(template) = &self.template else {
            tracing::warn!(operation, name, "parameter edit without a selected template");
            return false;
        };
        match template.param(name) {
            Some(param) if param.kind() == expected => true,
            Some(_) => {
                tracing::warn!(
                    operation,
                    name,
                    template = %template.name,
                    "parameter edit with mismatched kind"
                );
                false
            }
            None => {
                tracing::warn!(
                    operation,
                    name,
                    template = %template.name,
                    "parameter edit for a name the template does not define"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::templates::TemplateParam;
    use pretty_assertions::assert_eq;

    fn scalar(name: &str) -> TemplateParam {
        TemplateParam {
            name: name.to_string(),
            description: String::new(),
            kind: Some(ParamKind::Scalar),
        }
    }

    fn multi(name: &str) -> TemplateParam {
        TemplateParam {
            name: name.to_string(),
            description: String::new(),
            kind: Some(ParamKind::MultiValue),
        }
    }

    fn template(id: i64, name: &str, params: Vec<TemplateParam>) -> Template {
        Template {
            id,
            label: name.to_string(),
            name: name.to_string(),
            params,
        }
    }

    #[test]
    fn test_unselected_has_empty_payload() {
        let form = ParamForm::new();
        assert!(!form.is_selected());
        assert!(form.payload_snapshot().is_empty());
    }

    #[test]
    fn test_select_initializes_one_entry_per_param() {
        let mut form = ParamForm::new();
        form.select_template(&template(
            0,
            "company_ratio",
            vec![scalar("org"), multi("emails")],
        ));

        let payload = form.payload_snapshot();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("org").map(String::as_str), Some(""));
        assert_eq!(payload.get("emails").map(String::as_str), Some("[]"));
    }

    #[test]
    fn test_switching_templates_resets_payload() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t1", vec![scalar("org"), multi("emails")]));
        form.set_scalar("org", "acme");
        form.update_entry("emails", 0, "a@b.c");

        form.select_template(&template(1, "t2", vec![scalar("region")]));

        let payload = form.payload_snapshot();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("region").map(String::as_str), Some(""));
        assert!(payload.get("org").is_none());
        assert!(payload.get("emails").is_none());
        assert!(form.collector("emails").is_none());
    }

    #[test]
    fn test_reselecting_resets_to_defaults() {
        let t = template(0, "t1", vec![scalar("org")]);
        let mut form = ParamForm::new();
        form.select_template(&t);
        form.set_scalar("org", "acme");
        form.select_template(&t);
        assert_eq!(form.value("org"), Some(""));
    }

    #[test]
    fn test_set_scalar_replaces_only_that_entry() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t", vec![scalar("org"), scalar("owner")]));
        form.set_scalar("org", "acme");

        assert_eq!(form.value("org"), Some("acme"));
        assert_eq!(form.value("owner"), Some(""));
    }

    #[test]
    fn test_set_scalar_ignores_unknown_name() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t", vec![scalar("org")]));
        form.set_scalar("missing", "x");
        assert_eq!(form.payload_snapshot().len(), 1);
        assert!(form.value("missing").is_none());
    }

    #[test]
    fn test_set_scalar_ignores_multi_value_param() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t", vec![multi("emails")]));
        form.set_scalar("emails", "not-an-array");
        assert_eq!(form.value("emails"), Some("[]"));
    }

    #[test]
    fn test_set_scalar_without_selection_is_noop() {
        let mut form = ParamForm::new();
        form.set_scalar("org", "acme");
        assert!(form.payload_snapshot().is_empty());
    }

    #[test]
    fn test_multi_value_edits_sync_into_payload() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t", vec![multi("emails")]));

        form.update_entry("emails", 0, "a@b.c");
        assert_eq!(form.value("emails"), Some(r#"["a@b.c"]"#));

        form.add_entry("emails");
        form.update_entry("emails", 1, "d@e.f");
        assert_eq!(form.value("emails"), Some(r#"["a@b.c","d@e.f"]"#));

        form.remove_entry("emails", 0);
        assert_eq!(form.value("emails"), Some(r#"["d@e.f"]"#));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let mut form = ParamForm::new();
        form.select_template(&template(0, "t", vec![scalar("org")]));
        let snapshot = form.payload_snapshot();
        form.set_scalar("org", "changed");

        assert_eq!(snapshot.get("org").map(String::as_str), Some(""));
        assert_eq!(form.value("org"), Some("changed"));
    }
}
