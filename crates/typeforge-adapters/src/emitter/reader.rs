//! Reads declarations back out of a types file.
//!
//! Only `export interface` blocks are parsed; anything between them
//! (comments, imports, type aliases) is skipped. Members whose type is not
//! one the emitter writes are kept as [`FieldType::Opaque`], so hand-written
//! files with unions or generics still load. A member may span several lines
//! while its brackets are open.

use typeforge_core::domain::{
    Declaration, DomainError, FieldDecl, FieldType, PrimitiveKind, is_identifier,
    resolve_signatures,
};

const RECORD_ARRAY: &str = "Record<string, unknown>[]";

/// An interface being read: the declaration so far, its header line, and a
/// member still waiting for closing brackets.
struct OpenInterface {
    decl: Declaration,
    start: usize,
    pending: Option<(String, usize)>,
}

pub fn read_declarations(source: &str) -> Result<Vec<Declaration>, DomainError> {
    let mut declarations = Vec::new();
    let mut open: Option<OpenInterface> = None;

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();

        let Some(mut current) = open.take() else {
            if let Some(header) = line.strip_prefix("export interface ") {
                let (name, closed) = parse_header(header, number)?;
                let decl = Declaration::new(name, Vec::new());
                if closed {
                    declarations.push(decl);
                } else {
                    open = Some(OpenInterface {
                        decl,
                        start: number,
                        pending: None,
                    });
                }
            }
            continue;
        };

        if let Some((mut text, first)) = current.pending.take() {
            text.push(' ');
            text.push_str(line);
            if bracket_depth(&text) > 0 {
                current.pending = Some((text, first));
            } else {
                current.decl.fields.push(parse_member(&text, first)?);
            }
        } else if line == "}" {
            declarations.push(current.decl);
            continue;
        } else if !(line.is_empty() || line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')) {
            if bracket_depth(line) > 0 {
                current.pending = Some((line.to_string(), number));
            } else {
                current.decl.fields.push(parse_member(line, number)?);
            }
        }
        open = Some(current);
    }

    if let Some(current) = open {
        return Err(DomainError::MalformedDeclarations {
            line: current.start,
            reason: format!("interface {} is never closed", current.decl.name),
        });
    }

    resolve_signatures(&mut declarations);
    Ok(declarations)
}

/// `Name {`, `Name {}` or `Name<T> extends Base {` → name, and whether the
/// body closes on the same line.
fn parse_header(header: &str, line: usize) -> Result<(String, bool), DomainError> {
    let end = header
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(header.len());
    let name = &header[..end];

    if !is_identifier(name) {
        return Err(malformed(line, &format!("invalid interface name `{name}`")));
    }
    let rest = header[end..].trim_end();
    if rest.ends_with("{}") {
        Ok((name.to_string(), true))
    } else if rest.ends_with('{') {
        Ok((name.to_string(), false))
    } else {
        Err(malformed(line, "expected `{` after the interface name"))
    }
}

/// `name?: type;`, with the trailing `;` or `,` optional.
fn parse_member(line: &str, number: usize) -> Result<FieldDecl, DomainError> {
    let (name, rest) = split_name(line).ok_or_else(|| malformed(number, "expected `name: type;`"))?;

    let (optional, rest) = match rest.strip_prefix('?') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let ty = rest
        .trim_start()
        .strip_prefix(':')
        .map(|ty| ty.trim().trim_end_matches([';', ',']).trim_end())
        .filter(|ty| !ty.is_empty())
        .ok_or_else(|| malformed(number, "expected `name: type;`"))?;

    Ok(FieldDecl {
        name,
        ty: parse_type(ty),
        optional,
    })
}

/// Leading member name, unquoting `'...'` names.
fn split_name(line: &str) -> Option<(String, &str)> {
    if let Some(quoted) = line.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = quoted.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next()?.1 {
                    'n' => name.push('\n'),
                    'r' => name.push('\r'),
                    't' => name.push('\t'),
                    other => name.push(other),
                },
                '\'' => return Some((name, &quoted[i + 1..])),
                _ => name.push(c),
            }
        }
        return None;
    }

    let end = line.find(['?', ':'])?;
    let name = line[..end].trim();
    (!name.is_empty()).then(|| (name.to_string(), &line[end..]))
}

fn parse_type(ty: &str) -> FieldType {
    if ty == RECORD_ARRAY {
        return FieldType::RecordArray;
    }

    let (base, is_array) = match ty.strip_suffix("[]") {
        Some(base) => (base, true),
        None => (ty, false),
    };
    match base {
        "string" => FieldType::Primitive {
            kind: PrimitiveKind::String,
            is_array,
        },
        "number" => FieldType::Primitive {
            kind: PrimitiveKind::Number,
            is_array,
        },
        "boolean" => FieldType::Primitive {
            kind: PrimitiveKind::Boolean,
            is_array,
        },
        "unknown" => FieldType::Unknown { is_array },
        name if is_identifier(name) => FieldType::Reference {
            name: name.to_string(),
            is_array,
        },
        _ => FieldType::Opaque {
            text: ty.to_string(),
        },
    }
}

/// Opening minus closing `{`, `(`, `[` and `<`, ignoring quoted text and
/// the `>` of `=>`.
fn bracket_depth(text: &str) -> i32 {
    let mut depth = 0;
    let mut quote = None;
    let mut prev = ' ';
    for c in text.chars() {
        match quote {
            Some(q) if c == q && prev != '\\' => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '{' | '(' | '[' | '<' => depth += 1,
                '>' if prev == '=' => {}
                '}' | ')' | ']' | '>' => depth -= 1,
                _ => {}
            },
        }
        prev = c;
    }
    depth
}

fn malformed(line: usize, reason: &str) -> DomainError {
    DomainError::MalformedDeclarations {
        line,
        reason: reason.to_string(),
    }
}
