/// Line commands understood by the shell
use comic_viewer::CurrentView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(String),
    Next,
    Previous,
    Autoplay,
    Music,
    Reload,
    View,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `None` for unknown or incomplete commands
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?.to_lowercase();

        match command.as_str() {
            "list" | "ls" => Some(Self::List),
            "select" | "s" => parts.next().map(|id| Self::Select(id.to_string())),
            "next" | "n" => Some(Self::Next),
            "prev" | "previous" | "p" => Some(Self::Previous),
            "play" | "autoplay" => Some(Self::Autoplay),
            "music" | "m" => Some(Self::Music),
            "reload" => Some(Self::Reload),
            "view" | "v" => Some(Self::View),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "commands: list | select <id> | next | prev | play | music | reload | view | quit";

/// Text rendering of the current view
pub fn render(view: Option<&CurrentView>) -> String {
    let Some(view) = view else {
        return "Loading...".to_string();
    };

    let mut out = format!("== {} ==\n", view.title);
    match &view.image {
        Some(image) => out.push_str(&format!("[{}]\n", image)),
        None => out.push_str("[no pages]\n"),
    }
    out.push_str(&format!("{}\n", view.caption));
    out.push_str(&format!("page {} of {}", view.page, view.page_count));
    if view.autoplay {
        out.push_str("  (autoplay)");
    }
    if view.music_on {
        out.push_str("  (music)");
    }
    if let Some(creator) = &view.creator {
        out.push_str(&format!("\n{}", creator));
    }
    out
}
