use thiserror::Error;

/// Result type alias using TrackerError
pub type Result<T> = std::result::Result<T, TrackerError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,
    ValidationFailed,

    // Integration/IO
    Io,
    Serialization,
    Configuration,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// the single user-facing notice the callers print.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    violations: Vec<FieldViolation>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            violations: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach field-level validation violations
    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        for violation in &self.violations {
            write!(f, "\n  - {}", violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// A single failed check from plan draft validation
///
/// `key` follows the `<phase><Check>` convention (e.g. `developmentStart`,
/// `cstSequence`) so callers can attach the message to the right field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub key: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Domain error taxonomy for CapTrack operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Phase progress outside 0..=100
    #[error("Invalid progress {progress} for phase {phase}: must be between 0 and 100")]
    InvalidProgress { phase: String, progress: u8 },

    /// Plan patch would move the version backwards
    #[error("Plan {plan_id} version cannot go from {current} to {requested}")]
    VersionRegression {
        plan_id: String,
        current: u32,
        requested: u32,
    },

    /// No version number is left above the plan's highest version
    #[error("Plan {plan_id} cannot be revised past version {current}")]
    VersionOverflow { plan_id: String, current: u32 },

    /// Milestone referenced for assignment does not exist
    #[error("Milestone not found: {milestone_id}")]
    MilestoneNotFound { milestone_id: String },

    /// Plan draft failed validation; every violation is reported
    #[error("Plan validation failed with {} violation(s)", violations.len())]
    PlanValidation { violations: Vec<FieldViolation> },

    /// A string did not name any variant of an enumerated field
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnumValue { field: String, value: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<TrackerError> for ExError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidProgress { phase, progress } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("update_plan_phase")
                    .with_message(format!(
                        "progress {} for phase {} is outside 0..=100",
                        progress, phase
                    ))
            }

            TrackerError::VersionRegression {
                plan_id,
                current,
                requested,
            } => ExError::new(ExErrorKind::ConstraintViolation)
                .with_op("update_plan")
                .with_entity_id(plan_id)
                .with_message(format!(
                    "version cannot go from {} to {}",
                    current, requested
                )),

            TrackerError::VersionOverflow { plan_id, current } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_op("revise_plan")
                    .with_entity_id(plan_id)
                    .with_message(format!("no version left after {}", current))
            }

            TrackerError::MilestoneNotFound { milestone_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("assign_milestone")
                    .with_entity_id(milestone_id)
                    .with_message("Milestone not found")
            }

            TrackerError::PlanValidation { violations } => {
                ExError::new(ExErrorKind::ValidationFailed)
                    .with_op("save_plan_draft")
                    .with_message("Please fix the errors before submitting")
                    .with_violations(violations)
            }

            TrackerError::InvalidEnumValue { field, value } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_message(format!("invalid value '{}' for {}", value, field))
            }

            TrackerError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            TrackerError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization {
            message: err.to_string(),
        }
    }
}
