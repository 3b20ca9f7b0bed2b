// Neokeys Layouts
// Built-in keymap data

pub mod neo2;
