//! Claim schema: the closed set of fields the pipeline understands.
//!
//! Identifier-like dataset columns (policy numbers, dates, free-text
//! locations, vehicle make/model/year) are deliberately not part of the
//! schema; they carry no predictive signal and the loader drops them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the ground-truth column in training datasets.
pub const LABEL_COLUMN: &str = "fraud_reported";

/// Identifier columns the trainer drops on ingest. Kept as a list so the
/// loader can tell a deliberate drop apart from an unrecognised header.
pub const DROPPED_COLUMNS: [&str; 8] = [
    "policy_number",
    "policy_bind_date",
    "incident_location",
    "incident_date",
    "insured_zip",
    "auto_make",
    "auto_model",
    "auto_year",
];

/// Whether a field carries category strings or plain numbers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Categorical,
    Numeric,
}

/// Every predictive column, known at build time. Wire names match the
/// dataset headers exactly, including the hyphenated capital columns.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum Field {
    #[serde(rename = "policy_state")]
    PolicyState,
    #[serde(rename = "policy_csl")]
    PolicyCsl,
    #[serde(rename = "insured_sex")]
    InsuredSex,
    #[serde(rename = "insured_education_level")]
    InsuredEducationLevel,
    #[serde(rename = "insured_occupation")]
    InsuredOccupation,
    #[serde(rename = "insured_hobbies")]
    InsuredHobbies,
    #[serde(rename = "insured_relationship")]
    InsuredRelationship,
    #[serde(rename = "incident_type")]
    IncidentType,
    #[serde(rename = "collision_type")]
    CollisionType,
    #[serde(rename = "incident_severity")]
    IncidentSeverity,
    #[serde(rename = "authorities_contacted")]
    AuthoritiesContacted,
    #[serde(rename = "incident_state")]
    IncidentState,
    #[serde(rename = "incident_city")]
    IncidentCity,
    #[serde(rename = "property_damage")]
    PropertyDamage,
    #[serde(rename = "police_report_available")]
    PoliceReportAvailable,
    #[serde(rename = "months_as_customer")]
    MonthsAsCustomer,
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "policy_deductable")]
    PolicyDeductable,
    #[serde(rename = "policy_annual_premium")]
    PolicyAnnualPremium,
    #[serde(rename = "umbrella_limit")]
    UmbrellaLimit,
    #[serde(rename = "capital-gains")]
    CapitalGains,
    #[serde(rename = "capital-loss")]
    CapitalLoss,
    #[serde(rename = "incident_hour_of_the_day")]
    IncidentHourOfTheDay,
    #[serde(rename = "number_of_vehicles_involved")]
    NumberOfVehiclesInvolved,
    #[serde(rename = "bodily_injuries")]
    BodilyInjuries,
    #[serde(rename = "witnesses")]
    Witnesses,
    #[serde(rename = "total_claim_amount")]
    TotalClaimAmount,
    #[serde(rename = "injury_claim")]
    InjuryClaim,
    #[serde(rename = "property_claim")]
    PropertyClaim,
    #[serde(rename = "vehicle_claim")]
    VehicleClaim,
}

impl Field {
    /// All schema fields, in the column order training tables are built in.
    pub const ALL: [Field; 30] = [
        Field::PolicyState,
        Field::PolicyCsl,
        Field::InsuredSex,
        Field::InsuredEducationLevel,
        Field::InsuredOccupation,
        Field::InsuredHobbies,
        Field::InsuredRelationship,
        Field::IncidentType,
        Field::CollisionType,
        Field::IncidentSeverity,
        Field::AuthoritiesContacted,
        Field::IncidentState,
        Field::IncidentCity,
        Field::PropertyDamage,
        Field::PoliceReportAvailable,
        Field::MonthsAsCustomer,
        Field::Age,
        Field::PolicyDeductable,
        Field::PolicyAnnualPremium,
        Field::UmbrellaLimit,
        Field::CapitalGains,
        Field::CapitalLoss,
        Field::IncidentHourOfTheDay,
        Field::NumberOfVehiclesInvolved,
        Field::BodilyInjuries,
        Field::Witnesses,
        Field::TotalClaimAmount,
        Field::InjuryClaim,
        Field::PropertyClaim,
        Field::VehicleClaim,
    ];

    /// Wire name, identical to the dataset header.
    pub fn name(&self) -> &'static str {
        match self {
            Field::PolicyState => "policy_state",
            Field::PolicyCsl => "policy_csl",
            Field::InsuredSex => "insured_sex",
            Field::InsuredEducationLevel => "insured_education_level",
            Field::InsuredOccupation => "insured_occupation",
            Field::InsuredHobbies => "insured_hobbies",
            Field::InsuredRelationship => "insured_relationship",
            Field::IncidentType => "incident_type",
            Field::CollisionType => "collision_type",
            Field::IncidentSeverity => "incident_severity",
            Field::AuthoritiesContacted => "authorities_contacted",
            Field::IncidentState => "incident_state",
            Field::IncidentCity => "incident_city",
            Field::PropertyDamage => "property_damage",
            Field::PoliceReportAvailable => "police_report_available",
            Field::MonthsAsCustomer => "months_as_customer",
            Field::Age => "age",
            Field::PolicyDeductable => "policy_deductable",
            Field::PolicyAnnualPremium => "policy_annual_premium",
            Field::UmbrellaLimit => "umbrella_limit",
            Field::CapitalGains => "capital-gains",
            Field::CapitalLoss => "capital-loss",
            Field::IncidentHourOfTheDay => "incident_hour_of_the_day",
            Field::NumberOfVehiclesInvolved => "number_of_vehicles_involved",
            Field::BodilyInjuries => "bodily_injuries",
            Field::Witnesses => "witnesses",
            Field::TotalClaimAmount => "total_claim_amount",
            Field::InjuryClaim => "injury_claim",
            Field::PropertyClaim => "property_claim",
            Field::VehicleClaim => "vehicle_claim",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::PolicyState
            | Field::PolicyCsl
            | Field::InsuredSex
            | Field::InsuredEducationLevel
            | Field::InsuredOccupation
            | Field::InsuredHobbies
            | Field::InsuredRelationship
            | Field::IncidentType
            | Field::CollisionType
            | Field::IncidentSeverity
            | Field::AuthoritiesContacted
            | Field::IncidentState
            | Field::IncidentCity
            | Field::PropertyDamage
            | Field::PoliceReportAvailable => FieldKind::Categorical,
            _ => FieldKind::Numeric,
        }
    }

    /// Resolve a dataset header to a schema field.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Documented sane input ranges for numeric fields. These are an input
    /// quality aid for front ends; the predictor does not enforce them.
    pub fn numeric_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Field::MonthsAsCustomer => Some((0.0, 300.0)),
            Field::Age => Some((18.0, 100.0)),
            Field::PolicyDeductable => Some((0.0, 3_000.0)),
            Field::PolicyAnnualPremium => Some((0.0, 150_000.0)),
            Field::UmbrellaLimit => Some((-1_000_000.0, 1_000_000.0)),
            Field::CapitalGains => Some((0.0, 100_000.0)),
            Field::CapitalLoss => Some((0.0, 100_000.0)),
            Field::IncidentHourOfTheDay => Some((0.0, 23.0)),
            Field::NumberOfVehiclesInvolved => Some((1.0, 5.0)),
            Field::BodilyInjuries => Some((0.0, 5.0)),
            Field::Witnesses => Some((0.0, 10.0)),
            Field::TotalClaimAmount => Some((0.0, 100_000.0)),
            Field::InjuryClaim => Some((0.0, 50_000.0)),
            Field::PropertyClaim => Some((0.0, 50_000.0)),
            Field::VehicleClaim => Some((0.0, 50_000.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw field value as supplied by a dataset row or an inference request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

/// One claim as a typed field-to-value mapping. Missing entries are legal;
/// the predictor's fallback and fill rules handle them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord(BTreeMap<Field, FieldValue>);

impl ClaimRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.0.insert(field, value);
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        self.insert(field, FieldValue::Text(value.into()));
    }

    pub fn set_number(&mut self, field: Field, value: f64) {
        self.insert(field, FieldValue::Number(value));
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldValue> {
        self.0.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.0.iter().map(|(f, v)| (*f, v))
    }
}

/// Fixed label mapping: Y means fraudulent (1), N legitimate (0).
pub fn binarize_label(raw: &str) -> Option<u8> {
    match raw.trim() {
        "Y" => Some(1),
        "N" => Some(0),
        _ => None,
    }
}

/// A parsed training table: one record per row plus its binary label.
#[derive(Clone, Debug, Default)]
pub struct LabeledDataset {
    pub records: Vec<ClaimRecord>,
    pub labels: Vec<u8>,
}

impl LabeledDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_field_resolves_from_its_wire_name() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("policy_number"), None);
    }

    #[test]
    fn schema_splits_into_fifteen_of_each_kind() {
        let categorical = Field::ALL
            .iter()
            .filter(|f| f.kind() == FieldKind::Categorical)
            .count();
        assert_eq!(categorical, 15);
        assert_eq!(Field::ALL.len() - categorical, 15);
    }

    #[test]
    fn numeric_bounds_exist_exactly_for_numeric_fields() {
        for field in Field::ALL {
            assert_eq!(
                field.numeric_bounds().is_some(),
                field.kind() == FieldKind::Numeric,
                "bounds mismatch for {field}"
            );
        }
    }

    #[test]
    fn label_mapping_is_fixed() {
        assert_eq!(binarize_label("Y"), Some(1));
        assert_eq!(binarize_label("N"), Some(0));
        assert_eq!(binarize_label(""), None);
        assert_eq!(binarize_label("maybe"), None);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = ClaimRecord::new();
        record.set_text(Field::PolicyState, "OH");
        record.set_number(Field::Age, 34.0);
        record.set_number(Field::CapitalGains, 1200.0);

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"policy_state\":\"OH\""));
        assert!(json.contains("\"capital-gains\":1200.0"));

        let back: ClaimRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn unknown_json_keys_are_rejected() {
        let parsed: std::result::Result<ClaimRecord, _> =
            serde_json::from_str(r#"{"policy_numbr": "X1"}"#);
        assert!(parsed.is_err());
    }
}
