// Library root for the terminal front end, so widget and input code can be
// tested without the binary.

pub mod tui;
