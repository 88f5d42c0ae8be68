//! Audience segmentation rule model — the ordered field/operator/value
//! tuples a campaign uses to target customers, plus the editor semantics
//! for building them. Rules are evaluated server-side; this crate owns
//! only their shape, validation, and wire contract.

pub mod editor;
pub mod rule;

pub use editor::RuleSetEditor;
pub use rule::{
    FieldKind, LogicOperator, RuleField, RuleOperator, RuleValue, SegmentRule, SegmentRuleSet,
};
