use crate::common::DomainResult;
use crate::domains::escape_planning::aggregate::{EscapeSession, Occupant, Position};

/// ASCII drawing of the session's current view.
///
/// Each cell is three characters wide: ` P ` evader, ` G ` guard, ` E ` exit.
/// Walls are drawn with `---` and `|`; corners are always `+`.
pub fn render_session(session: &EscapeSession) -> DomainResult<String> {
    let grid = &session.grid;
    let mut out = String::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let view = session.cell_view(Position::new(x, y))?;
            out.push('+');
            out.push_str(if view.walls.north { "---" } else { "   " });
        }
        out.push_str("+\n");

        for x in 0..grid.width() {
            let view = session.cell_view(Position::new(x, y))?;
            out.push(if view.walls.west { '|' } else { ' ' });
            out.push_str(match (view.occupant, view.exit) {
                (Occupant::Evader, _) => " P ",
                (Occupant::Pursuer, _) => " G ",
                (Occupant::None, true) => " E ",
                (Occupant::None, false) => "   ",
            });
        }
        let last = session.cell_view(Position::new(grid.width() - 1, y))?;
        out.push(if last.walls.east { '|' } else { ' ' });
        out.push('\n');
    }

    for x in 0..grid.width() {
        let view = session.cell_view(Position::new(x, grid.height() - 1))?;
        out.push('+');
        out.push_str(if view.walls.south { "---" } else { "   " });
    }
    out.push_str("+\n");
    Ok(out)
}

/// Status line under the drawing: the solve message plus the playback cursor.
pub fn render_status(session: &EscapeSession) -> String {
    match (&session.status_message, session.playback_status()) {
        (Some(message), Some(status)) => format!("{} {}", message, status),
        (Some(message), None) => message.clone(),
        (None, Some(status)) => status.to_string(),
        (None, None) => String::new(),
    }
}
