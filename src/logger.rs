use colored::{Color, Colorize};
use log::{Level, Metadata, Record};
use std::io::Write;
use terminal_size::{terminal_size, Width};

/// Terminal logger that frames each agent-loop milestone in a colored box.
pub struct ColoredLogger;

impl ColoredLogger {
    fn color_for(message: &str) -> Color {
        if message.starts_with("Observation:") {
            Color::Yellow
        } else if message.starts_with("Error:") {
            Color::Red
        } else if message.starts_with("Executing tool call:") {
            Color::Magenta
        } else if message.starts_with("Final answer:") {
            Color::Green
        } else {
            Color::Blue
        }
    }
}

impl log::Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stdout = std::io::stdout();
        let msg = record.args().to_string();
        let color = Self::color_for(&msg);

        let width = if let Some((Width(w), _)) = terminal_size() {
            w as usize - 2
        } else {
            78
        };

        let top_border = format!("╔{}═", "═".repeat(width));
        let bottom_border = format!("╚{}═", "═".repeat(width));

        let _ = writeln!(stdout);
        let _ = writeln!(stdout, "{}", top_border.color(color));
        let _ = writeln!(stdout, "{}{}", "║ ".color(color), msg.color(color).bold());
        let _ = writeln!(stdout, "{}", bottom_border.color(color));
    }

    fn flush(&self) {}
}

pub static LOGGER: ColoredLogger = ColoredLogger;
