//! Positional message templates (`{0}`, `{1}`, `{{` and `}}` escapes) and a
//! sink that renders notices into chat lines.

use std::fmt::Write as _;

use tracing::trace;

use super::{Notice, NotificationSink};
use crate::config::{ChatConfig, Config, MessagesConfig};
use crate::kits::UserId;

enum Piece {
    Char(char),
    Arg(usize),
}

fn parse<F>(template: &str, mut emit: F) -> Result<(), String>
where
    F: FnMut(Piece),
{
    let mut chars = template.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        let doubled = chars.peek().is_some_and(|(_, next)| *next == ch);
        match ch {
            '{' | '}' if doubled => {
                chars.next();
                emit(Piece::Char(ch));
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) if c.is_ascii_digit() => digits.push(c),
                        Some((_, c)) => {
                            return Err(format!("unexpected '{c}' in placeholder at byte {index}"));
                        }
                        None => return Err(format!("unclosed placeholder at byte {index}")),
                    }
                }
                if digits.is_empty() {
                    return Err(format!("empty placeholder at byte {index}"));
                }
                let position = digits
                    .parse::<usize>()
                    .map_err(|_| format!("placeholder index out of range at byte {index}"))?;
                emit(Piece::Arg(position));
            }
            '}' => return Err(format!("unmatched '}}' at byte {index}")),
            other => emit(Piece::Char(other)),
        }
    }
    Ok(())
}

/// Substitute `args` into `template`.
///
/// Placeholders without an argument are kept verbatim; a malformed template
/// is returned unchanged.
#[must_use]
pub fn render(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let parsed = parse(template, |piece| match piece {
        Piece::Char(c) => out.push(c),
        Piece::Arg(position) => match args.get(position) {
            Some(arg) => out.push_str(arg),
            None => {
                let _ = write!(out, "{{{position}}}");
            }
        },
    });
    if parsed.is_err() {
        return template.to_string();
    }
    out
}

/// Check that `template` parses and only references arguments below `arity`.
pub fn check_template(template: &str, arity: usize) -> Result<(), String> {
    let mut highest: Option<usize> = None;
    parse(template, |piece| {
        if let Piece::Arg(position) = piece {
            highest = highest.max(Some(position));
        }
    })?;
    match highest {
        Some(position) if position >= arity => Err(format!(
            "placeholder {{{position}}} but only {arity} argument(s) available"
        )),
        _ => Ok(()),
    }
}

/// Sink that renders each notice as `"<prefix> <message>"` and hands the
/// line to a host delivery closure.
pub struct TemplateNotifier<D> {
    chat: ChatConfig,
    messages: MessagesConfig,
    deliver: D,
}

impl<D> TemplateNotifier<D> {
    pub fn new(config: &Config, deliver: D) -> Self {
        Self {
            chat: config.chat.clone(),
            messages: config.messages.clone(),
            deliver,
        }
    }

    #[must_use]
    pub fn render(&self, notice: &Notice) -> String {
        let prefix = render(&self.chat.prefix, std::slice::from_ref(&self.chat.plugin_name));
        let body = render(self.messages.template(notice.key()), &notice.args());
        if prefix.is_empty() {
            body
        } else {
            format!("{prefix} {body}")
        }
    }

    pub fn into_inner(self) -> D {
        self.deliver
    }
}

impl<D> NotificationSink for TemplateNotifier<D>
where
    D: FnMut(UserId, String),
{
    fn notify(&mut self, user: UserId, notice: Notice) {
        let line = self.render(&notice);
        trace!(user_id = %user, key = notice.key().as_str(), "delivering notice");
        (self.deliver)(user, line);
    }
}
