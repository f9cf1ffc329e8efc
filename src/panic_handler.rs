//! Panic hook that puts the terminal back before printing the report

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor, execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};

pub fn initialize_panic_handler() {
    better_panic::install();

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
        std::process::exit(1);
    }));
}

/// Restore terminal to a clean state: leave the alternate screen, disable
/// raw mode, show the cursor again.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    let _ = writeln!(io::stderr());
}
