//! Source file parsing.
//!
//! The engine only needs the declarations in a file: each object's kind,
//! id and name, plus its procedures with their attributes and parameters.
//! [`SourceParser`] is the seam for a full language front end.
//! [`AlHeaderParser`] is a line-oriented implementation that covers
//! declarations written in the usual layout:
//!
//! ```al
//! codeunit 50100 "Sales Events"
//! {
//!     [IntegrationEvent(false, false)]
//!     procedure OnAfterPost(var SalesHeader: Record "Sales Header"; Amount: Decimal)
//!     begin
//!     end;
//! }
//! ```
//!
//! Object headers are only recognized outside braces, so variable
//! declarations and statements inside an object body never start a new
//! object.

use std::path::Path;
use std::sync::LazyLock;

use alcatalog_types::{AttributeTag, DeclaredObject, MethodDecl, ObjectKind, ParameterDecl};
use regex::Regex;

use crate::ParseError;

/// Turns one source file into the objects it declares.
pub trait SourceParser: Send + Sync {
    fn parse(&self, path: &Path) -> Result<Vec<DeclaredObject>, ParseError>;
}

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^\s*(tableextension|table|pageextension|pagecustomization|page|report|codeunit|query|xmlport|profile|controladdin|enum|dotnet)\b\s*(\d+)?\s*("[^"]*"|[A-Za-z_][A-Za-z0-9_]*)?"#,
    )
    .expect("header pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:\((.*)\))?\s*\]\s*$")
        .expect("attribute pattern is valid")
});

static PROCEDURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^\s*(?:(?:local|internal|protected)\s+)?procedure\s+("[^"]*"|[A-Za-z_][A-Za-z0-9_]*)\s*\("#,
    )
    .expect("procedure pattern is valid")
});

static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)^\s*(var\s+)?("[^"]*"|[A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.+?)\s*$"#)
        .expect("parameter pattern is valid")
});

/// Line-oriented parser for object headers and procedure signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlHeaderParser;

impl SourceParser for AlHeaderParser {
    fn parse(&self, path: &Path) -> Result<Vec<DeclaredObject>, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        self.parse_str(path, text.trim_start_matches('\u{feff}'))
    }
}

/// A procedure whose parameter list continues on later lines.
struct OpenSignature {
    method: MethodDecl,
    params: String,
}

impl AlHeaderParser {
    /// Parses source text; `path` is only used in errors.
    pub fn parse_str(&self, path: &Path, text: &str) -> Result<Vec<DeclaredObject>, ParseError> {
        let mut objects: Vec<DeclaredObject> = Vec::new();
        let mut attributes: Vec<AttributeTag> = Vec::new();
        let mut open: Option<OpenSignature> = None;
        let mut depth: usize = 0;
        let mut in_block = false;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comments(raw_line, &mut in_block);

            if let Some(mut sig) = open.take() {
                match closing_paren(&line) {
                    Some(end) => {
                        sig.params.push(' ');
                        sig.params.push_str(&line[..end]);
                        sig.method.parameters = parse_parameters(&sig.params);
                        push_method(&mut objects, sig.method);
                    }
                    None => {
                        sig.params.push(' ');
                        sig.params.push_str(&line);
                        open = Some(sig);
                    }
                }
                depth = track_depth(depth, &line);
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            if depth == 0 {
                if let Some(object) = parse_header(path, line_no, &line)? {
                    objects.push(object);
                    attributes.clear();
                    depth = track_depth(depth, &line);
                    continue;
                }
            }

            if let Some(caps) = ATTRIBUTE.captures(&line) {
                attributes.push(AttributeTag {
                    name: caps[1].to_string(),
                    arguments: caps
                        .get(2)
                        .map(|m| split_arguments(m.as_str()))
                        .unwrap_or_default(),
                });
                continue;
            }

            if let Some(caps) = PROCEDURE.captures(&line) {
                let method = MethodDecl {
                    name: unquote(&caps[1]),
                    attributes: std::mem::take(&mut attributes),
                    parameters: Vec::new(),
                };
                let rest = &line[caps.get(0).map_or(0, |m| m.end())..];
                match closing_paren(rest) {
                    Some(end) => {
                        let method = MethodDecl {
                            parameters: parse_parameters(&rest[..end]),
                            ..method
                        };
                        push_method(&mut objects, method);
                    }
                    None => {
                        open = Some(OpenSignature {
                            method,
                            params: rest.to_string(),
                        });
                    }
                }
            } else {
                attributes.clear();
            }
            depth = track_depth(depth, &line);
        }

        if let Some(sig) = open {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: text.lines().count(),
                message: format!("unterminated parameter list for procedure {}", sig.method.name),
            });
        }
        Ok(objects)
    }
}

fn parse_header(
    path: &Path,
    line_no: usize,
    line: &str,
) -> Result<Option<DeclaredObject>, ParseError> {
    let Some(caps) = HEADER.captures(line) else {
        return Ok(None);
    };
    let Some(kind) = ObjectKind::from_source_keyword(&caps[1]) else {
        return Ok(None);
    };
    let name = caps.get(3).map(|m| unquote(m.as_str()));
    // Everything but a dotnet block needs a name; `Page.Run(...)` and the
    // like stop here.
    let name = match (kind, name) {
        (_, Some(name)) => name,
        (ObjectKind::DotNetPackage, None) => String::new(),
        (_, None) => return Ok(None),
    };
    let id = match caps.get(2) {
        Some(m) => m.as_str().parse::<i64>().map_err(|e| ParseError::Syntax {
            path: path.to_path_buf(),
            line: line_no,
            message: format!("invalid object id {}: {}", m.as_str(), e),
        })?,
        None => 0,
    };
    Ok(Some(DeclaredObject::new(kind, id, name)))
}

fn push_method(objects: &mut [DeclaredObject], method: MethodDecl) {
    if let Some(object) = objects.last_mut() {
        object.methods.push(method);
    }
}

fn parse_parameters(list: &str) -> Vec<ParameterDecl> {
    list.split(';')
        .filter_map(|part| PARAMETER.captures(part))
        .map(|caps| ParameterDecl {
            name: unquote(&caps[2]),
            type_name: collapse_whitespace(&caps[3]),
            is_var: caps.get(1).is_some(),
        })
        .collect()
}

fn split_arguments(args: &str) -> Vec<String> {
    args.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn unquote(name: &str) -> String {
    name.trim().trim_matches('"').to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes `//` and `/* */` comments that are not inside a string or
/// quoted name. `in_block` carries an open block comment to the next line.
fn strip_comments(line: &str, in_block: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if *in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block = false;
                out.push(' ');
            }
            continue;
        }
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match (c, chars.peek().copied()) {
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    chars.next();
                    *in_block = true;
                }
                ('\'' | '"', _) => {
                    quote = Some(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
        }
    }
    out
}

/// Byte offset of the first `)` outside strings and quoted names.
fn closing_paren(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                ')' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// Applies the braces on `line` (outside strings and quoted names) to `depth`.
fn track_depth(mut depth: usize, line: &str) -> usize {
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    depth
}
