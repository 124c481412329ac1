//! Inline `**bold**` markup.
//!
//! Resolved content is parsed once into a list of styled runs; rendering
//! walks the runs without ever re-parsing the string.

use nom::{
    bytes::complete::{tag, take_until},
    IResult,
};

/// One styled segment of resolved element content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRun {
    Plain(String),
    Bold(String),
}

impl TextRun {
    pub fn text(&self) -> &str {
        match self {
            TextRun::Plain(t) | TextRun::Bold(t) => t,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, TextRun::Bold(_))
    }
}

/// Parse one `**...**` segment
fn bold_run(input: &str) -> IResult<&str, TextRun> {
    let (input, _) = tag("**")(input)?;
    let (input, inner) = take_until("**")(input)?;
    let (input, _) = tag("**")(input)?;
    Ok((input, TextRun::Bold(inner.to_string())))
}

/// Split resolved content into plain and bold runs.
///
/// Unterminated `**` markers are kept as literal text. Empty bold segments
/// (`****`) produce no run.
pub fn parse_markup(text: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut rest = text;

    let push_plain = |runs: &mut Vec<TextRun>, chunk: &str| {
        if chunk.is_empty() {
            return;
        }
        if let Some(TextRun::Plain(prev)) = runs.last_mut() {
            prev.push_str(chunk);
        } else {
            runs.push(TextRun::Plain(chunk.to_string()));
        }
    };

    while !rest.is_empty() {
        if rest.starts_with("**") {
            match bold_run(rest) {
                Ok((next, run)) => {
                    if !run.text().is_empty() {
                        runs.push(run);
                    }
                    rest = next;
                }
                Err(_) => {
                    // Opening marker with no closing pair: literal text
                    push_plain(&mut runs, "**");
                    rest = &rest[2..];
                }
            }
        } else {
            let split = rest.find("**").unwrap_or(rest.len());
            push_plain(&mut runs, &rest[..split]);
            rest = &rest[split..];
        }
    }

    runs
}
