//! Submissions and the surface adapters that produce them.
//!
//! A [`SurfaceEvent`] is what a host hands over for one user action: a chat
//! line, a sign edit, a book being signed or an item being renamed. Each
//! variant knows how to split itself into text fragments, how to take the
//! censored fragments back in the same order, and how to describe its
//! original content for the offense log.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of text lines on a sign.
pub const SIGN_LINES: usize = 4;

/// Which surface a submission came from. Recorded with every offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Context {
    Chat,
    Sign,
    Book,
    Anvil,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Chat => "CHAT",
            Context::Sign => "SIGN",
            Context::Book => "BOOK",
            Context::Anvil => "ANVIL",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user behind a submission, as far as the host knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub id: Uuid,
    /// Offline actors are exempt and never notified.
    #[serde(default = "default_online")]
    pub online: bool,
}

fn default_online() -> bool {
    true
}

impl Actor {
    pub fn new(name: impl Into<String>, id: Uuid) -> Self {
        Self {
            name: name.into(),
            id,
            online: true,
        }
    }
}

/// Position of a fragment inside its artifact. Line and page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentId {
    Message,
    Line(usize),
    Page(usize),
    Title,
    DisplayName,
}

/// One piece of text to moderate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: FragmentId,
    pub text: String,
}

/// A single user action, ready for the workflow.
#[derive(Debug, Clone)]
pub struct Submission {
    pub fragments: Vec<Fragment>,
    pub actor: Option<Actor>,
    pub context: Context,
    /// Original content in offense-log form.
    pub original_text: String,
}

/// The raw artifact a host delivers, one variant per surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "surface", rename_all = "snake_case")]
pub enum SurfaceEvent {
    Chat {
        message: String,
    },
    Sign {
        lines: [Option<String>; SIGN_LINES],
    },
    Book {
        pages: Vec<String>,
        #[serde(default)]
        title: Option<String>,
        /// Only books being signed are moderated; drafts pass through.
        #[serde(default = "default_signing")]
        signing: bool,
    },
    AnvilRename {
        #[serde(default)]
        display_name: Option<String>,
    },
}

fn default_signing() -> bool {
    true
}

impl SurfaceEvent {
    pub fn context(&self) -> Context {
        match self {
            SurfaceEvent::Chat { .. } => Context::Chat,
            SurfaceEvent::Sign { .. } => Context::Sign,
            SurfaceEvent::Book { .. } => Context::Book,
            SurfaceEvent::AnvilRename { .. } => Context::Anvil,
        }
    }

    /// Splits the artifact into fragments, in the order `apply` expects them back.
    ///
    /// Returns an empty list when there is nothing to moderate (an unsigned
    /// book, an item without a custom name).
    pub fn fragments(&self) -> Vec<Fragment> {
        match self {
            SurfaceEvent::Chat { message } => vec![Fragment {
                id: FragmentId::Message,
                text: message.clone(),
            }],
            SurfaceEvent::Sign { lines } => lines
                .iter()
                .enumerate()
                .filter_map(|(i, line)| {
                    line.as_ref().map(|text| Fragment {
                        id: FragmentId::Line(i + 1),
                        text: text.clone(),
                    })
                })
                .collect(),
            SurfaceEvent::Book { signing: false, .. } => Vec::new(),
            SurfaceEvent::Book { pages, title, .. } => pages
                .iter()
                .enumerate()
                .map(|(i, page)| Fragment {
                    id: FragmentId::Page(i + 1),
                    text: page.clone(),
                })
                .chain(title.iter().map(|t| Fragment {
                    id: FragmentId::Title,
                    text: t.clone(),
                }))
                .collect(),
            SurfaceEvent::AnvilRename { display_name } => display_name
                .iter()
                .map(|name| Fragment {
                    id: FragmentId::DisplayName,
                    text: name.clone(),
                })
                .collect(),
        }
    }

    /// Writes censored fragments back, positionally matching [`SurfaceEvent::fragments`].
    ///
    /// Extra entries are ignored; missing entries leave the original text.
    pub fn apply(&mut self, censored: &[String]) {
        let mut replacements = censored.iter();
        match self {
            SurfaceEvent::Chat { message } => {
                if let Some(text) = replacements.next() {
                    *message = text.clone();
                }
            }
            SurfaceEvent::Sign { lines } => {
                for line in lines.iter_mut().flatten() {
                    match replacements.next() {
                        Some(text) => *line = text.clone(),
                        None => break,
                    }
                }
            }
            SurfaceEvent::Book { signing: false, .. } => {}
            SurfaceEvent::Book { pages, title, .. } => {
                for page in pages.iter_mut().chain(title.iter_mut()) {
                    match replacements.next() {
                        Some(text) => *page = text.clone(),
                        None => break,
                    }
                }
            }
            SurfaceEvent::AnvilRename { display_name } => {
                if let (Some(name), Some(text)) = (display_name.as_mut(), replacements.next()) {
                    *name = text.clone();
                }
            }
        }
    }

    /// The original content as it appears in the offense log.
    ///
    /// Signs list every present line as `Line N: text | `; books list every
    /// page as `Page N: text | ` followed by `Title: title`.
    pub fn describe(&self) -> String {
        match self {
            SurfaceEvent::Chat { message } => message.clone(),
            SurfaceEvent::Sign { lines } => lines
                .iter()
                .enumerate()
                .filter_map(|(i, line)| line.as_ref().map(|text| format!("Line {}: {} | ", i + 1, text)))
                .collect(),
            SurfaceEvent::Book { pages, title, .. } => {
                let mut out: String = pages
                    .iter()
                    .enumerate()
                    .map(|(i, page)| format!("Page {}: {} | ", i + 1, page))
                    .collect();
                if let Some(title) = title {
                    out.push_str("Title: ");
                    out.push_str(title);
                }
                out
            }
            SurfaceEvent::AnvilRename { display_name } => display_name.clone().unwrap_or_default(),
        }
    }

    /// Packages this event for the workflow.
    pub fn to_submission(&self, actor: Option<Actor>) -> Submission {
        Submission {
            fragments: self.fragments(),
            actor,
            context: self.context(),
            original_text: self.describe(),
        }
    }
}
