use captrack_core::errors::{ExError, ExErrorKind, FieldViolation, TrackerError};
use captrack_core::model::{PlanPhases, PlanType};
use captrack_core::rules::validate_plan_phases;

#[test]
fn test_version_regression_is_constraint_violation() {
    let err = TrackerError::VersionRegression {
        plan_id: "p1".to_string(),
        current: 3,
        requested: 1,
    };

    let ex: ExError = err.into();

    assert_eq!(ex.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(ex.code(), "ERR_CONSTRAINT_VIOLATION");
    assert_eq!(ex.entity_id(), Some("p1"));
    assert_eq!(ex.op(), Some("update_plan"));
}

#[test]
fn test_version_overflow_names_revise_plan() {
    let ex: ExError = TrackerError::VersionOverflow {
        plan_id: "p1".to_string(),
        current: u32::MAX,
    }
    .into();

    assert_eq!(ex.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(ex.op(), Some("revise_plan"));
    assert_eq!(ex.entity_id(), Some("p1"));
}

#[test]
fn test_milestone_not_found_kind() {
    let ex: ExError = TrackerError::MilestoneNotFound {
        milestone_id: "m9".to_string(),
    }
    .into();

    assert_eq!(ex.kind(), ExErrorKind::NotFound);
    assert_eq!(ex.entity_id(), Some("m9"));
}

#[test]
fn test_plan_validation_carries_all_violations() {
    let violations = validate_plan_phases(PlanType::Implementation, &PlanPhases::default());
    assert_eq!(violations.len(), 6);

    let ex: ExError = TrackerError::PlanValidation {
        violations: violations.clone(),
    }
    .into();

    assert_eq!(ex.kind(), ExErrorKind::ValidationFailed);
    assert_eq!(ex.violations(), violations.as_slice());
    let text = ex.to_string();
    assert!(text.starts_with("[ERR_VALIDATION_FAILED]"));
    assert!(text.contains("development start date is required"));
    assert!(text.contains("uat end date is required"));
}

#[test]
fn test_invalid_enum_value_message() {
    let err = "Purple".parse::<captrack_core::model::Rag>().unwrap_err();
    assert_eq!(
        err,
        TrackerError::InvalidEnumValue {
            field: "rag".to_string(),
            value: "Purple".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Invalid value 'Purple' for rag");
}

#[test]
fn test_custom_builders() {
    let ex = ExError::new(ExErrorKind::Io)
        .with_op("workspace_load")
        .with_message("permission denied")
        .with_violations(vec![FieldViolation::new("path", "unreadable")]);

    assert_eq!(ex.code(), "ERR_IO");
    assert_eq!(
        ex.to_string(),
        "[ERR_IO] in operation 'workspace_load': permission denied\n  - unreadable"
    );
}
