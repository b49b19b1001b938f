//! Descriptors for the supported chat assistants.
//!
//! Each assistant gets a fixed record: the site URL plus ordered selector
//! candidates for the prompt input and the response container. The lists are
//! tried in priority order so a site redesign degrades to the next fallback
//! instead of breaking the run outright.

/// A supported chat assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assistant {
    #[default]
    Gemini,
    ChatGpt,
    Claude,
}

/// How to drive one assistant's web UI.
#[derive(Debug, Clone, Copy)]
pub struct SiteDescriptor {
    pub url: &'static str,
    /// Prompt input candidates, most specific first.
    pub input_selectors: &'static [&'static str],
    /// Response container candidates, most specific first.
    pub response_selectors: &'static [&'static str],
}

const GEMINI: SiteDescriptor = SiteDescriptor {
    url: "https://gemini.google.com/app",
    input_selectors: &[
        "textarea",
        r#"div[role="textbox"]:not([aria-hidden="true"])"#,
        r#"div[contenteditable="true"]:not(.ql-clipboard):not([aria-hidden="true"])"#,
    ],
    response_selectors: &["div.markdown"],
};

const CHATGPT: SiteDescriptor = SiteDescriptor {
    url: "https://chatgpt.com",
    input_selectors: &[
        "textarea",
        r#"div[contenteditable="true"]:not([aria-hidden="true"])"#,
    ],
    response_selectors: &[".markdown", "[data-message-author-role=assistant]"],
};

const CLAUDE: SiteDescriptor = SiteDescriptor {
    url: "https://claude.ai/new",
    input_selectors: &[
        "textarea",
        r#"div[contenteditable="true"]:not([aria-hidden="true"])"#,
    ],
    response_selectors: &[".prose", ".markdown", "[data-testid=chat-message]"],
};

impl Assistant {
    /// Parse an assistant name as it appears on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gemini" => Some(Assistant::Gemini),
            "chatgpt" => Some(Assistant::ChatGpt),
            "claude" => Some(Assistant::Claude),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Assistant::Gemini => "gemini",
            Assistant::ChatGpt => "chatgpt",
            Assistant::Claude => "claude",
        }
    }

    pub fn descriptor(&self) -> &'static SiteDescriptor {
        match self {
            Assistant::Gemini => &GEMINI,
            Assistant::ChatGpt => &CHATGPT,
            Assistant::Claude => &CLAUDE,
        }
    }
}
