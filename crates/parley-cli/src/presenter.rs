//! Terminal rendering for chat sessions.

use std::io::{self, BufRead, IsTerminal, Write};

use parley_core::attachments::AttachmentPreview;
use parley_core::presenter::DEFAULT_TITLE;
use parley_core::{AttachmentId, Presenter, Role};

/// Prints the transcript to stdout and errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPresenter {
    quiet: bool,
    assume_yes: bool,
}

impl TerminalPresenter {
    pub const fn new() -> Self {
        Self {
            quiet: false,
            assume_yes: false,
        }
    }

    /// Only errors and prompts are printed; commands print their own results.
    pub const fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Answer every confirmation with yes.
    pub const fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl Presenter for TerminalPresenter {
    fn show_message(&self, role: Role, content: &str) {
        if !self.quiet {
            println!("{}\n", render_entry(role, content));
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn clear_transcript(&self) {
        if !self.quiet && io::stdout().is_terminal() {
            print!("\x1b[2J\x1b[H");
            let _ = io::stdout().flush();
        }
    }

    fn set_title(&self, title: Option<&str>) {
        if !self.quiet {
            println!("{}\n", render_title(title));
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                tracing::warn!("Failed to read confirmation: {error}");
                false
            }
        }
    }

    fn set_waiting(&self, waiting: bool) {
        if self.quiet || !io::stderr().is_terminal() {
            return;
        }
        if waiting {
            eprint!("waiting for reply...");
        } else {
            eprint!("\r\x1b[2K");
        }
        let _ = io::stderr().flush();
    }

    fn show_attachment_preview(&self, _id: AttachmentId, name: &str, preview: &AttachmentPreview) {
        if !self.quiet {
            println!("{}", render_preview(name, preview));
        }
    }
}

/// One transcript entry: the role label, then the content.
pub fn render_entry(role: Role, content: &str) -> String {
    format!("{}> {}", role.label(), content)
}

pub fn render_title(title: Option<&str>) -> String {
    format!("== {} ==", title.unwrap_or(DEFAULT_TITLE))
}

pub fn render_preview(name: &str, preview: &AttachmentPreview) -> String {
    match preview {
        AttachmentPreview::Thumbnail { width, height, .. } => {
            format!("attached {name} (image {width}x{height})")
        }
        AttachmentPreview::Icon { kind } => format!("attached {name} ({})", kind.label()),
        AttachmentPreview::Unavailable { reason } => {
            format!("attached {name} (no preview: {reason})")
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
