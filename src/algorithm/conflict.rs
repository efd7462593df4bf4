// Detección de conflictos entre cursos.
use crate::algorithm::time::overlaps;
use crate::models::{Course, Session};

/// True si cualquiera de las sesiones de `a` solapa con cualquiera de `b`.
pub fn sessions_conflict(a: &[Session], b: &[Session]) -> bool {
    a.iter().any(|sa| b.iter().any(|sb| overlaps(sa, sb)))
}

/// True si los cursos comparten día con franjas solapadas en al menos un par de sesiones.
pub fn courses_conflict(a: &Course, b: &Course) -> bool {
    sessions_conflict(a.sessions(), b.sessions())
}

/// Pares de sesiones en conflicto entre dos cursos (para mensajes y diagnósticos).
pub fn conflicting_sessions<'a>(a: &'a Course, b: &'a Course) -> Vec<(&'a Session, &'a Session)> {
    let mut out = Vec::new();
    for sa in a.sessions() {
        for sb in b.sessions() {
            if overlaps(sa, sb) { out.push((sa, sb)); }
        }
    }
    out
}
