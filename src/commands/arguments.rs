//! Raw argument tokenization plus typed accessors.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Failure converting an argument into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("missing argument at position {0}")]
    Missing(usize),
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    #[error("`{0}` is not a boolean")]
    NotABool(String),
    #[error("`{0}` is not a {1} mention")]
    NotAMention(String, &'static str),
    #[error("arguments do not form a codeblock")]
    NotACodeblock,
}

fn user_mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<@!?(\d+)>$").expect("valid user mention regex"))
}

fn role_mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<@&(\d+)>$").expect("valid role mention regex"))
}

fn channel_mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<#(\d+)>$").expect("valid channel mention regex"))
}

fn codeblock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^```(?:([\w+-]*)\n)?(.*?)```$").expect("valid codeblock regex")
    })
}

/// One whitespace-separated argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    raw: String,
}

impl Argument {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn as_int(&self) -> Result<i64, ArgumentError> {
        self.raw
            .parse()
            .map_err(|_| ArgumentError::NotAnInteger(self.raw.clone()))
    }

    /// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, case-insensitively.
    pub fn as_bool(&self) -> Result<bool, ArgumentError> {
        match self.raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ArgumentError::NotABool(self.raw.clone())),
        }
    }

    pub fn as_user_mention_id(&self) -> Result<&str, ArgumentError> {
        self.mention_id(user_mention_regex(), "user")
    }

    pub fn as_role_mention_id(&self) -> Result<&str, ArgumentError> {
        self.mention_id(role_mention_regex(), "role")
    }

    pub fn as_channel_mention_id(&self) -> Result<&str, ArgumentError> {
        self.mention_id(channel_mention_regex(), "channel")
    }

    fn mention_id(&self, regex: &Regex, kind: &'static str) -> Result<&str, ArgumentError> {
        regex
            .captures(&self.raw)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str())
            .ok_or_else(|| ArgumentError::NotAMention(self.raw.clone(), kind))
    }
}

/// Code extracted from a fenced or inline codeblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeblock {
    pub language: Option<String>,
    pub content: String,
}

/// The argument text following a command token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    raw: String,
    arguments: Vec<Argument>,
}

impl Arguments {
    /// Split `raw` on runs of whitespace. Empty (or all-whitespace) text
    /// yields no arguments.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            arguments: raw.split_whitespace().map(Argument::new).collect(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<&Argument> {
        self.arguments.get(n)
    }

    /// Like [`Arguments::get`] but with a typed error for handlers that use `?`.
    pub fn require(&self, n: usize) -> Result<&Argument, ArgumentError> {
        self.get(n).ok_or(ArgumentError::Missing(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter()
    }

    /// The whole raw text as one argument.
    pub fn as_single(&self) -> Argument {
        Argument::new(self.raw.trim())
    }

    /// Interpret the raw text as a ```` ```lang\ncode``` ```` or `` `code` `` block.
    pub fn as_codeblock(&self) -> Result<Codeblock, ArgumentError> {
        let raw = self.raw.trim();
        if let Some(caps) = codeblock_regex().captures(raw) {
            let language = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|lang| !lang.is_empty());
            let content = caps.get(2).map_or("", |m| m.as_str()).to_string();
            return Ok(Codeblock { language, content });
        }
        if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
            return Ok(Codeblock {
                language: None,
                content: raw[1..raw.len() - 1].to_string(),
            });
        }
        Err(ArgumentError::NotACodeblock)
    }
}
