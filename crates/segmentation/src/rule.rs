//! Segment rule types and their serialization contract.

use crm_core::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Fields ────────────────────────────────────────────────────────────────

/// Customer attribute a rule filters on. The server owns the authoritative
/// set; unknown fields round-trip through `Other` so the client never
/// rejects a campaign it merely displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleField {
    Tags,
    TotalSpendings,
    Location,
    Other(String),
}

impl RuleField {
    pub fn kind(&self) -> FieldKind {
        match self {
            RuleField::TotalSpendings => FieldKind::Numeric,
            _ => FieldKind::Text,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RuleField::Tags => "tags",
            RuleField::TotalSpendings => "totalSpendings",
            RuleField::Location => "location",
            RuleField::Other(name) => name,
        }
    }
}

impl From<String> for RuleField {
    fn from(s: String) -> Self {
        match s.as_str() {
            "tags" => RuleField::Tags,
            "totalSpendings" => RuleField::TotalSpendings,
            "location" => RuleField::Location,
            _ => RuleField::Other(s),
        }
    }
}

impl From<RuleField> for String {
    fn from(field: RuleField) -> Self {
        field.as_str().to_string()
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type category of a field. Operator sets are disjoint between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

// ─── Operators ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    GreaterThan,
    LessThan,
    Contains,
    StartsWith,
    EndsWith,
}

impl RuleOperator {
    pub fn is_valid_for(self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Numeric => matches!(
                self,
                RuleOperator::Equals | RuleOperator::GreaterThan | RuleOperator::LessThan
            ),
            FieldKind::Text => matches!(
                self,
                RuleOperator::Equals
                    | RuleOperator::Contains
                    | RuleOperator::StartsWith
                    | RuleOperator::EndsWith
            ),
        }
    }

    /// Default operator when a rule's field changes category.
    pub fn default_for(_kind: FieldKind) -> Self {
        RuleOperator::Equals
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleOperator::Equals => "equals",
            RuleOperator::GreaterThan => "greaterThan",
            RuleOperator::LessThan => "lessThan",
            RuleOperator::Contains => "contains",
            RuleOperator::StartsWith => "startsWith",
            RuleOperator::EndsWith => "endsWith",
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleOperator {
    type Err = CrmError;

    /// Accepts the wire names, case-insensitively.
    fn from_str(s: &str) -> CrmResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "equals" => Ok(RuleOperator::Equals),
            "greaterthan" => Ok(RuleOperator::GreaterThan),
            "lessthan" => Ok(RuleOperator::LessThan),
            "contains" => Ok(RuleOperator::Contains),
            "startswith" => Ok(RuleOperator::StartsWith),
            "endswith" => Ok(RuleOperator::EndsWith),
            _ => Err(CrmError::Validation(format!("unknown operator `{s}`"))),
        }
    }
}

/// Combines a rule with the *previous* rule in the sequence. Absent on the
/// first rule. Evaluation is strictly left-associative with no grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    And,
    Or,
}

impl std::str::FromStr for LogicOperator {
    type Err = CrmError;

    fn from_str(s: &str) -> CrmResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicOperator::And),
            "OR" => Ok(LogicOperator::Or),
            _ => Err(CrmError::Validation(format!(
                "unknown logic operator `{s}` (expected AND or OR)"
            ))),
        }
    }
}

// ─── Rules ─────────────────────────────────────────────────────────────────

/// Rule values travel as strings for text fields and numbers for
/// `totalSpendings`; coercion happens in [`SegmentRuleSet::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl RuleValue {
    pub fn is_empty(&self) -> bool {
        match self {
            RuleValue::Number(_) => false,
            RuleValue::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{n}"),
            RuleValue::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRule {
    pub field: RuleField,
    pub operator: RuleOperator,
    pub value: RuleValue,
    /// `None` on the first rule of a sequence; omitted from the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_operator: Option<LogicOperator>,
}

impl SegmentRule {
    pub fn new(field: RuleField, operator: RuleOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: RuleValue::Text(value.into()),
            logic_operator: None,
        }
    }

    fn validate(&self, position: usize) -> CrmResult<()> {
        if self.value.is_empty() {
            return Err(CrmError::Validation(format!(
                "rule {} has an empty value",
                position + 1
            )));
        }
        if !self.operator.is_valid_for(self.field.kind()) {
            return Err(CrmError::Validation(format!(
                "operator `{}` is not valid for field `{}`",
                self.operator, self.field
            )));
        }
        Ok(())
    }

    /// Coerced copy ready for transmission: numeric fields carry numbers.
    fn coerced(&self, position: usize) -> CrmResult<SegmentRule> {
        let value = match (&self.value, self.field.kind()) {
            (RuleValue::Text(text), FieldKind::Numeric) => {
                let parsed: f64 = text.trim().parse().map_err(|_| {
                    CrmError::Validation(format!(
                        "rule {}: `{}` is not a number for field `{}`",
                        position + 1,
                        text,
                        self.field
                    ))
                })?;
                RuleValue::Number(parsed)
            }
            (value, _) => value.clone(),
        };
        Ok(SegmentRule {
            field: self.field.clone(),
            operator: self.operator,
            value,
            logic_operator: self.logic_operator,
        })
    }
}

/// An ordered, non-empty rule sequence. Order is significant: the audience
/// predicate is `rule1 (op2) rule2 (op3) rule3 ...` evaluated left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentRuleSet(Vec<SegmentRule>);

impl SegmentRuleSet {
    /// Validate and coerce a raw rule sequence into its wire form. The first
    /// rule loses any logic operator; later rules default to `AND`.
    pub fn normalized(rules: &[SegmentRule]) -> CrmResult<Self> {
        if rules.is_empty() {
            return Err(CrmError::Validation(
                "at least one segment rule is required".to_string(),
            ));
        }
        let mut normalized = Vec::with_capacity(rules.len());
        for (position, rule) in rules.iter().enumerate() {
            rule.validate(position)?;
            let mut coerced = rule.coerced(position)?;
            coerced.logic_operator = if position == 0 {
                None
            } else {
                Some(rule.logic_operator.unwrap_or(LogicOperator::And))
            };
            normalized.push(coerced);
        }
        Ok(SegmentRuleSet(normalized))
    }

    pub fn rules(&self) -> &[SegmentRule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Plain-language audience description fed to the message generator:
    /// `field operator value` per rule, joined with `AND`.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|rule| format!("{} {} {}", rule.field, rule.operator, rule.value))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spend_rule(value: &str) -> SegmentRule {
        SegmentRule::new(RuleField::TotalSpendings, RuleOperator::GreaterThan, value)
    }

    #[test]
    fn normalization_preserves_order_and_coerces_numbers() {
        let rules = vec![
            SegmentRule::new(RuleField::Tags, RuleOperator::Contains, "vip"),
            SegmentRule {
                logic_operator: Some(LogicOperator::Or),
                ..spend_rule("1000")
            },
        ];
        let set = SegmentRuleSet::normalized(&rules).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0].field, RuleField::Tags);
        assert_eq!(set.rules()[1].value, RuleValue::Number(1000.0));

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["field"], "tags");
        assert_eq!(json[0]["operator"], "contains");
        assert!(json[0].get("logicOperator").is_none());
        assert_eq!(json[1]["field"], "totalSpendings");
        assert_eq!(json[1]["operator"], "greaterThan");
        assert_eq!(json[1]["value"], 1000.0);
        assert_eq!(json[1]["logicOperator"], "OR");
    }

    #[test]
    fn missing_logic_operator_defaults_to_and_after_first() {
        let rules = vec![
            SegmentRule::new(RuleField::Location, RuleOperator::Equals, "London"),
            SegmentRule::new(RuleField::Tags, RuleOperator::Equals, "vip"),
        ];
        let set = SegmentRuleSet::normalized(&rules).unwrap();
        assert_eq!(set.rules()[0].logic_operator, None);
        assert_eq!(set.rules()[1].logic_operator, Some(LogicOperator::And));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(SegmentRuleSet::normalized(&[]).is_err());
    }

    #[test]
    fn empty_value_is_rejected() {
        let rules = vec![SegmentRule::new(RuleField::Tags, RuleOperator::Equals, "  ")];
        assert!(SegmentRuleSet::normalized(&rules).is_err());
    }

    #[test]
    fn non_numeric_spend_value_is_rejected() {
        let rules = vec![spend_rule("a lot")];
        assert!(SegmentRuleSet::normalized(&rules).is_err());
    }

    #[test]
    fn numeric_operator_on_text_field_is_rejected() {
        let rules = vec![SegmentRule::new(
            RuleField::Tags,
            RuleOperator::GreaterThan,
            "vip",
        )];
        assert!(SegmentRuleSet::normalized(&rules).is_err());
    }

    #[test]
    fn unknown_fields_round_trip() {
        let rule: SegmentRule =
            serde_json::from_str(r#"{"field":"lastSeen","operator":"equals","value":"2024"}"#)
                .unwrap();
        assert_eq!(rule.field, RuleField::Other("lastSeen".to_string()));
        assert_eq!(rule.field.kind(), FieldKind::Text);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["field"], "lastSeen");
    }

    #[test]
    fn operators_parse_from_wire_names() {
        assert_eq!(
            "greaterThan".parse::<RuleOperator>().unwrap(),
            RuleOperator::GreaterThan
        );
        assert_eq!(
            "startswith".parse::<RuleOperator>().unwrap(),
            RuleOperator::StartsWith
        );
        assert!("matches".parse::<RuleOperator>().is_err());

        assert_eq!("or".parse::<LogicOperator>().unwrap(), LogicOperator::Or);
        assert!("XOR".parse::<LogicOperator>().is_err());
    }

    #[test]
    fn describe_uses_wire_names() {
        let set = SegmentRuleSet::normalized(&[
            spend_rule("500"),
            SegmentRule::new(RuleField::Location, RuleOperator::StartsWith, "New"),
        ])
        .unwrap();
        assert_eq!(
            set.describe(),
            "totalSpendings greaterThan 500 AND location startsWith New"
        );
    }
}
