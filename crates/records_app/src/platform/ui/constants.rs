pub const FETCH_COMMANDS: &[&str] = &["", "f", "fetch", "r", "reload"];
pub const QUIT_COMMANDS: &[&str] = &["q", "quit", "exit"];
pub const HELP_TEXT: &str = "Enter/f: fetch records | q: quit";
pub const EMPTY_LIST_TEXT: &str = "(no records)";
pub const TIME_FORMAT: &str = "%H:%M:%S";
