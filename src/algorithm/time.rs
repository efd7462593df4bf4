// Modelo de tiempo: texto "HH:MM" <-> minutos desde medianoche.
use crate::error::{Result, TimetableError};
use crate::models::Session;

/// Minutos en un día; los tiempos válidos están en `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

fn to_min_opt(t: &str) -> Option<u16> {
    let (hh, mm) = t.trim().split_once(':')?;
    if hh.is_empty() || mm.is_empty() || hh.len() > 2 || mm.len() > 2 { return None; }
    if !hh.chars().all(|c| c.is_ascii_digit()) || !mm.chars().all(|c| c.is_ascii_digit()) { return None; }
    let hh = hh.parse::<u16>().ok()?;
    let mm = mm.parse::<u16>().ok()?;
    if hh > 23 || mm > 59 { return None; }
    Some(hh * 60 + mm)
}

/// Parsea "HH:MM" (24h) a minutos desde medianoche.
///
/// Acepta horas de uno o dos dígitos ("9:05" == "09:05"). Falla con
/// `InvalidTime` si el texto no tiene esa forma o si la hora/minuto están
/// fuera de rango.
pub fn parse_time(text: &str) -> Result<u16> {
    to_min_opt(text).ok_or_else(|| TimetableError::InvalidTime(text.trim().to_string()))
}

/// Formatea minutos como "HH:MM" con ceros a la izquierda.
pub fn format_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Intersección de intervalos semiabiertos en el mismo día.
/// Dos sesiones que sólo se tocan (a.end == b.start) no se solapan.
pub fn overlaps(a: &Session, b: &Session) -> bool {
    a.day() == b.day() && a.start() < b.end() && b.start() < a.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_time("00:00"), Ok(0));
        assert_eq!(parse_time("08:30"), Ok(510));
        assert_eq!(parse_time("9:05"), Ok(545));
        assert_eq!(parse_time(" 23:59 "), Ok(1439));
    }

    #[test]
    fn parse_rejects_out_of_range_and_garbage() {
        for bad in ["24:00", "12:60", "", "12", "ab:cd", "-1:00", "12:5x", "1:2:3", "123:00"] {
            assert!(matches!(parse_time(bad), Err(TimetableError::InvalidTime(_))), "{bad}");
        }
    }

    #[test]
    fn format_pads_with_zeros() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(545), "09:05");
        assert_eq!(format_time(1439), "23:59");
    }

    #[test]
    fn touching_sessions_do_not_overlap() {
        let a = Session::new(Day::Mon, 480, 540).unwrap();
        let b = Session::new(Day::Mon, 540, 600).unwrap();
        let c = Session::new(Day::Mon, 539, 600).unwrap();
        let d = Session::new(Day::Tue, 480, 540).unwrap();
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a, &c));
        assert!(overlaps(&c, &a));
        assert!(!overlaps(&a, &d));
    }
}
