// Errores del generador de horarios.
//
// `TimetableError` agrupa los errores recuperables (validación de entrada y
// uso incorrecto del estado). `GraphError` representa violaciones de las
// invariantes del grafo de conflictos: nunca deben llegar al usuario final.

/// Errores de validación y de uso del estado.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    #[error("invalid time '{0}' (expected HH:MM, 00:00-23:59)")]
    InvalidTime(String),

    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: String, end: String },

    #[error("unknown day '{0}'")]
    UnknownDay(String),

    #[error("duplicate course id '{0}'")]
    DuplicateId(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("a course needs at least one session")]
    NoSessions,

    #[error("course limit of {limit} reached")]
    CourseLimitExceeded { limit: usize },

    #[error("add at least one course before computing")]
    EmptyCourseList,

    #[error("course index {index} out of range ({len} courses)")]
    CourseIndexOutOfRange { index: usize, len: usize },

    #[error("result index {index} out of range ({len} results)")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("timetable {rank} does not exist (valid ranks are 1..={len})")]
    RankOutOfRange { rank: usize, len: usize },

    #[error("no computed results for the current course list")]
    NoResults,
}

impl TimetableError {
    /// Nombre estable del error (usado en las respuestas JSON).
    pub fn kind(&self) -> &'static str {
        match self {
            TimetableError::InvalidTime(_) => "InvalidTime",
            TimetableError::EndNotAfterStart { .. } => "EndNotAfterStart",
            TimetableError::UnknownDay(_) => "UnknownDay",
            TimetableError::DuplicateId(_) => "DuplicateId",
            TimetableError::MissingField(_) => "MissingField",
            TimetableError::NoSessions => "NoSessions",
            TimetableError::CourseLimitExceeded { .. } => "CourseLimitExceeded",
            TimetableError::EmptyCourseList => "EmptyCourseList",
            TimetableError::CourseIndexOutOfRange { .. } => "CourseIndexOutOfRange",
            TimetableError::SelectionOutOfRange { .. } => "SelectionOutOfRange",
            TimetableError::RankOutOfRange { .. } => "RankOutOfRange",
            TimetableError::NoResults => "NoResults",
        }
    }
}

/// Violaciones de invariantes del grafo de conflictos.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("conflict graph is not symmetric: {from} -> {to} has no reverse edge")]
    Asymmetric { from: usize, to: usize },

    #[error("vertex {0} conflicts with itself")]
    SelfLoop(usize),

    #[error("vertex {vertex} referenced by {from} is out of range ({len} vertices)")]
    VertexOutOfRange { from: usize, vertex: usize, len: usize },

    #[error("graph has {len} vertices, limit is {limit}")]
    TooManyVertices { len: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, TimetableError>;
