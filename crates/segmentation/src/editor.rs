//! Editor semantics for building an ordered rule sequence: add/remove
//! rules, field changes with operator resets, and final validation.

use crate::rule::{LogicOperator, RuleField, RuleOperator, RuleValue, SegmentRule, SegmentRuleSet};
use crm_core::{CrmError, CrmResult};
use tracing::debug;

/// Builds the rule sequence for a campaign draft. Maintains the minimum
/// cardinality of one rule and keeps operators consistent with their
/// field's type category.
#[derive(Debug, Clone)]
pub struct RuleSetEditor {
    rules: Vec<SegmentRule>,
}

impl Default for RuleSetEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSetEditor {
    /// Starts with a single default rule: text field, `equals`, empty value.
    pub fn new() -> Self {
        Self {
            rules: vec![SegmentRule::new(RuleField::Tags, RuleOperator::Equals, "")],
        }
    }

    /// Resume editing an existing sequence, e.g. when reworking a draft.
    pub fn from_rules(rules: Vec<SegmentRule>) -> CrmResult<Self> {
        if rules.is_empty() {
            return Err(CrmError::Validation(
                "a rule sequence cannot be empty".to_string(),
            ));
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SegmentRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Appends a new default rule combined with `AND`.
    pub fn add_rule(&mut self) -> &mut Self {
        let mut rule = SegmentRule::new(RuleField::Tags, RuleOperator::Equals, "");
        rule.logic_operator = Some(LogicOperator::And);
        self.rules.push(rule);
        self
    }

    /// Removes the rule at `index`. The last remaining rule cannot be
    /// removed; the sequence keeps at least one entry.
    pub fn remove_rule(&mut self, index: usize) -> CrmResult<()> {
        if self.rules.len() == 1 {
            return Err(CrmError::Validation(
                "cannot remove the last segment rule".to_string(),
            ));
        }
        if index >= self.rules.len() {
            return Err(CrmError::Validation(format!(
                "no rule at position {}",
                index + 1
            )));
        }
        self.rules.remove(index);
        Ok(())
    }

    /// Changes a rule's field. The operator sets for numeric and text
    /// fields are disjoint, so an operator that is invalid for the new
    /// field's category resets to that category's default.
    pub fn set_field(&mut self, index: usize, field: RuleField) -> CrmResult<()> {
        let rule = self.rule_mut(index)?;
        let kind = field.kind();
        if !rule.operator.is_valid_for(kind) {
            debug!(
                old = %rule.operator,
                new = %RuleOperator::default_for(kind),
                "operator reset on field change"
            );
            rule.operator = RuleOperator::default_for(kind);
        }
        rule.field = field;
        Ok(())
    }

    pub fn set_operator(&mut self, index: usize, operator: RuleOperator) -> CrmResult<()> {
        let rule = self.rule_mut(index)?;
        if !operator.is_valid_for(rule.field.kind()) {
            return Err(CrmError::Validation(format!(
                "operator `{}` is not valid for field `{}`",
                operator, rule.field
            )));
        }
        rule.operator = operator;
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> CrmResult<()> {
        self.rule_mut(index)?.value = RuleValue::Text(value.into());
        Ok(())
    }

    /// Sets the combinator with the previous rule. Ignored on the first
    /// rule, which has no predecessor.
    pub fn set_logic(&mut self, index: usize, operator: LogicOperator) -> CrmResult<()> {
        let rule = self.rule_mut(index)?;
        if index > 0 {
            rule.logic_operator = Some(operator);
        }
        Ok(())
    }

    /// Validates and coerces the sequence into its wire form.
    pub fn finish(&self) -> CrmResult<SegmentRuleSet> {
        SegmentRuleSet::normalized(&self.rules)
    }

    fn rule_mut(&mut self, index: usize) -> CrmResult<&mut SegmentRule> {
        let len = self.rules.len();
        self.rules.get_mut(index).ok_or_else(|| {
            CrmError::Validation(format!("no rule at position {} (of {len})", index + 1))
        })
    }
}
