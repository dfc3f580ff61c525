use std::path::{Component, Path};

/// Module specifier that imports `to_file` from a module living at `from_file`.
///
/// Purely lexical: nothing touches the filesystem, so both paths must be
/// relative to the same base (or both absolute). `.d.ts` and `.ts` extensions
/// are dropped and the result always starts with `.`.
pub fn relative_import(from_file: &Path, to_file: &Path) -> String {
    let from_dir = normalize(from_file.parent().unwrap_or(Path::new("")));
    let target = normalize(to_file);

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_dir.len() - common];
    parts.extend(target[common..].iter().map(String::as_str));
    let mut joined = parts.join("/");

    if let Some(stripped) = joined.strip_suffix(".d.ts") {
        joined = stripped.to_string();
    } else if let Some(stripped) = joined.strip_suffix(".ts") {
        joined = stripped.to_string();
    }

    if joined.starts_with('.') {
        joined
    } else {
        format!("./{joined}")
    }
}

/// Path components with `.` removed and `..` folded where possible.
fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().map(String::as_str) {
                Some(last) if last != ".." && last != "/" => {
                    parts.pop();
                }
                _ => parts.push("..".into()),
            },
            Component::RootDir => parts.push("/".into()),
            Component::Prefix(prefix) => {
                parts.push(prefix.as_os_str().to_string_lossy().into_owned())
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }
    parts
}
