// Estructuras de datos principales: días, sesiones, cursos y borradores.
//
// Los registros son inmutables una vez creados y sólo se construyen a través
// de las operaciones de ingesta (`Session::new`/`Session::parse` y
// `CourseDraft`), que validan cada campo.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::time::{MINUTES_PER_DAY, format_time, parse_time};
use crate::error::{Result, TimetableError};

/// Día de la semana de una sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat, Day::Sun];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    /// Acepta abreviaturas de tres letras o el nombre completo, sin importar mayúsculas.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        let day = match token.as_str() {
            "mon" | "monday" => Day::Mon,
            "tue" | "tuesday" => Day::Tue,
            "wed" | "wednesday" => Day::Wed,
            "thu" | "thursday" => Day::Thu,
            "fri" | "friday" => Day::Fri,
            "sat" | "saturday" => Day::Sat,
            "sun" | "sunday" => Day::Sun,
            _ => return Err(TimetableError::UnknownDay(s.trim().to_string())),
        };
        Ok(day)
    }
}

/// Bloque semanal recurrente. Invariante: `start < end < 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Session {
    day: Day,
    start: u16,
    end: u16,
}

impl Session {
    pub fn new(day: Day, start: u16, end: u16) -> Result<Self> {
        if start >= MINUTES_PER_DAY {
            return Err(TimetableError::InvalidTime(start.to_string()));
        }
        if end >= MINUTES_PER_DAY {
            return Err(TimetableError::InvalidTime(end.to_string()));
        }
        if end <= start {
            return Err(TimetableError::EndNotAfterStart { start: format_time(start), end: format_time(end) });
        }
        Ok(Session { day, start, end })
    }

    /// Construye una sesión desde texto "HH:MM".
    pub fn parse(day: Day, start_text: &str, end_text: &str) -> Result<Self> {
        let start = parse_time(start_text)?;
        let end = parse_time(end_text)?;
        Session::new(day, start, end)
    }

    pub fn day(&self) -> Day { self.day }
    pub fn start(&self) -> u16 { self.start }
    pub fn end(&self) -> u16 { self.end }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, format_time(self.start), format_time(self.end))
    }
}

/// Curso candidato. La identidad es `id`; su posición en la lista es el
/// índice de vértice en el grafo de conflictos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: String,
    name: String,
    faculty: Option<String>,
    sessions: Vec<Session>,
}

impl Course {
    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn faculty(&self) -> Option<&str> { self.faculty.as_deref() }
    pub fn sessions(&self) -> &[Session] { &self.sessions }

    /// Etiqueta "ID - Nombre" usada en exportaciones y resúmenes.
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }

    /// Coincidencia parcial sin distinguir mayúsculas en id, nombre o facultad.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() { return true; }
        self.id.to_lowercase().contains(&q)
            || self.name.to_lowercase().contains(&q)
            || self.faculty.as_deref().unwrap_or("").to_lowercase().contains(&q)
    }
}

/// Borrador de curso en edición: acumula sesiones validadas antes de
/// entregarse a `Planner::add_course`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub id: String,
    pub name: String,
    pub faculty: String,
    sessions: Vec<Session>,
}

impl CourseDraft {
    pub fn new(id: impl Into<String>, name: impl Into<String>, faculty: impl Into<String>) -> Self {
        CourseDraft { id: id.into(), name: name.into(), faculty: faculty.into(), sessions: Vec::new() }
    }

    /// Agrega una sesión desde texto. Si falla, el borrador no cambia.
    pub fn add_session(&mut self, day: Day, start_text: &str, end_text: &str) -> Result<&mut Self> {
        let session = Session::parse(day, start_text, end_text)?;
        self.sessions.push(session);
        Ok(self)
    }

    /// Agrega una sesión ya construida.
    pub fn push_session(&mut self, session: Session) -> &mut Self {
        self.sessions.push(session);
        self
    }

    pub fn remove_session(&mut self, index: usize) -> Option<Session> {
        if index < self.sessions.len() { Some(self.sessions.remove(index)) } else { None }
    }

    pub fn sessions(&self) -> &[Session] { &self.sessions }

    /// Vacía el borrador (equivalente a "Clear Form").
    pub fn reset(&mut self) {
        *self = CourseDraft::default();
    }

    pub(crate) fn trimmed_id(&self) -> &str { self.id.trim() }

    /// Comprueba que id y nombre no estén vacíos.
    pub(crate) fn check_fields(&self) -> Result<()> {
        if self.id.trim().is_empty() { return Err(TimetableError::MissingField("id")); }
        if self.name.trim().is_empty() { return Err(TimetableError::MissingField("name")); }
        Ok(())
    }

    /// Valida el borrador y produce el registro inmutable (campos recortados,
    /// facultad vacía -> `None`). La unicidad del id la decide quien posee la lista.
    pub(crate) fn build(&self) -> Result<Course> {
        self.check_fields()?;
        if self.sessions.is_empty() { return Err(TimetableError::NoSessions); }
        let faculty = self.faculty.trim();
        Ok(Course {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            faculty: if faculty.is_empty() { None } else { Some(faculty.to_string()) },
            sessions: self.sessions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parsing_is_case_insensitive() {
        assert_eq!("mon".parse::<Day>(), Ok(Day::Mon));
        assert_eq!("Thursday".parse::<Day>(), Ok(Day::Thu));
        assert_eq!(" SUN ".parse::<Day>(), Ok(Day::Sun));
        assert_eq!("Lun".parse::<Day>(), Err(TimetableError::UnknownDay("Lun".into())));
    }

    #[test]
    fn session_requires_end_after_start() {
        assert!(Session::parse(Day::Mon, "09:00", "10:00").is_ok());
        assert!(matches!(Session::parse(Day::Mon, "10:00", "10:00"), Err(TimetableError::EndNotAfterStart { .. })));
        assert!(matches!(Session::parse(Day::Mon, "11:00", "10:00"), Err(TimetableError::EndNotAfterStart { .. })));
        assert!(matches!(Session::parse(Day::Mon, "25:00", "26:00"), Err(TimetableError::InvalidTime(_))));
        assert!(matches!(Session::new(Day::Mon, 10, 1440), Err(TimetableError::InvalidTime(_))));
    }

    #[test]
    fn draft_rejected_session_leaves_draft_untouched() {
        let mut d = CourseDraft::new("CS101", "Intro", "");
        d.add_session(Day::Mon, "09:00", "10:00").unwrap();
        assert!(d.add_session(Day::Tue, "10:00", "09:00").is_err());
        assert_eq!(d.sessions().len(), 1);
        assert_eq!(d.remove_session(3), None);
        assert!(d.remove_session(0).is_some());
        assert!(d.sessions().is_empty());
    }

    #[test]
    fn build_trims_fields_and_drops_empty_faculty() {
        let mut d = CourseDraft::new("  CS101 ", " Intro ", "   ");
        d.add_session(Day::Mon, "09:00", "10:00").unwrap();
        let c = d.build().unwrap();
        assert_eq!(c.id(), "CS101");
        assert_eq!(c.name(), "Intro");
        assert_eq!(c.faculty(), None);
        assert_eq!(c.label(), "CS101 - Intro");
    }

    #[test]
    fn build_reports_missing_fields_before_sessions() {
        assert_eq!(CourseDraft::new("", "x", "").build(), Err(TimetableError::MissingField("id")));
        assert_eq!(CourseDraft::new("a", " ", "").build(), Err(TimetableError::MissingField("name")));
        assert_eq!(CourseDraft::new("a", "b", "").build(), Err(TimetableError::NoSessions));
    }

    #[test]
    fn matches_filters_on_id_name_and_faculty() {
        let mut d = CourseDraft::new("CS101", "Intro to Programming", "Dr. Ada");
        d.add_session(Day::Mon, "09:00", "10:00").unwrap();
        let c = d.build().unwrap();
        assert!(c.matches("cs1"));
        assert!(c.matches("PROGRAM"));
        assert!(c.matches("ada"));
        assert!(c.matches(""));
        assert!(!c.matches("physics"));
    }
}
