// TUI widget modules, one per screen plus the shared bars.

pub mod club_select;
pub mod help_bar;
pub mod home;
pub mod title_bar;
pub mod wheel;

#[cfg(test)]
use ratatui::buffer::{Buffer, Cell};

/// Flatten a rendered buffer into text, one line per row.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
