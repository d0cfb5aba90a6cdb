//! Form domain layer
//!
//! Validation rules, the per-template parameter form, and the entry lists
//! backing multi-value parameters.

mod multi_value;
mod param_form;
mod rules;

pub use multi_value::{MultiValueEntry, MultiValueList};
pub use param_form::ParamForm;
pub use rules::{Rule, Validator};
