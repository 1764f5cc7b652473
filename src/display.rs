/// Rendering layer. All terminal I/O lives here.
///
/// Reads the controller's position, projectiles and state label after each
/// tick and translates them into terminal commands.  Nothing here feeds
/// back into the simulation.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use character_states::input_macro::InputMacro;
use character_states::Controller;

// ── World → terminal scale ────────────────────────────────────────────────────

/// World pixels per terminal column.
const PX_PER_COL: f64 = 8.0;
/// World pixels per terminal row.
const PX_PER_ROW: f64 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GROUND: Color = Color::DarkGreen;
const C_HUD_MACHINE: Color = Color::Yellow;
const C_HUD_STATE: Color = Color::Cyan;
const C_HUD_MACRO: Color = Color::Magenta;
const C_PLAYER: Color = Color::Green;
const C_PROJECTILE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    controller: &dyn Controller,
    input_macro: &InputMacro,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let ground_row = to_row(controller.config().ground_level, height);
    draw_ground(out, ground_row, width)?;
    draw_hud(out, controller, input_macro, width)?;

    for p in controller.projectiles() {
        if let Some((col, row)) = to_cell(p.x, p.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_PROJECTILE))?;
            out.queue(Print("-"))?;
        }
    }

    let k = controller.kinematics();
    if let Some((col, row)) = to_cell(k.x, k.y, width, height) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        // Two rows tall, standing on the ground row.
        out.queue(cursor::MoveTo(col, row.saturating_sub(1)))?;
        out.queue(Print("██"))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("██"))?;
    }

    draw_controls_hint(out, height)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The ground line sits one row below the resting character.
fn to_row(y: f64, height: u16) -> u16 {
    let row = (y / PX_PER_ROW).round().max(0.0) as u16 + 1;
    row.min(height.saturating_sub(3))
}

/// Map a world position to a visible cell, or `None` if off screen.
fn to_cell(x: f64, y: f64, width: u16, height: u16) -> Option<(u16, u16)> {
    let col = (x / PX_PER_COL).round();
    let row = (y / PX_PER_ROW).round();
    if col < 0.0 || row < 2.0 || col >= f64::from(width.saturating_sub(2)) {
        return None;
    }
    let row = (row as u16).min(height.saturating_sub(4));
    Some((col as u16, row))
}

fn draw_ground<W: Write>(out: &mut W, row: u16, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("▀".repeat(width as usize)))?;
    Ok(())
}

fn draw_hud<W: Write>(
    out: &mut W,
    controller: &dyn Controller,
    input_macro: &InputMacro,
    width: u16,
) -> std::io::Result<()> {
    let k = controller.kinematics();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_MACHINE))?;
    out.queue(Print(format!("[ {} ]", controller.kind())))?;

    out.queue(style::SetForegroundColor(C_HUD_STATE))?;
    out.queue(Print(format!(
        "  {}  x:{:>7.1} y:{:>6.1} vy:{:>5.1}  shots:{}",
        controller.state_label(),
        k.x,
        k.y,
        k.vertical_velocity,
        controller.projectiles().len()
    )))?;

    let macro_str = if input_macro.is_executing() {
        let status = if input_macro.is_paused() {
            "paused"
        } else {
            "executing"
        };
        format!(
            "macro: {} {} left, delay {}",
            status,
            input_macro.pending(),
            input_macro.frame_delay()
        )
    } else {
        format!(
            "macro: recording {} inputs, delay {}",
            input_macro.recorded_len(),
            input_macro.frame_delay()
        )
    };
    let mx = width.saturating_sub(macro_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(mx, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_MACRO))?;
    out.queue(Print(macro_str))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Walk   SPACE/W : Jump   ENTER/F : Fire   TAB : Machine   \
         R : Record  E : Run  P : Pause  C : Clear  Z/X : Delay   U/Y : Undo/Redo   Q : Quit",
    ))?;
    Ok(())
}
