//! Structural deduplication and naming.
//!
//! [`deduplicate`] walks a [`Shape`] tree, groups every object shape by its
//! structural signature, picks one canonical name per group and returns one
//! [`Declaration`] per group in dependency order: a declaration always comes
//! after every declaration it references, so the root is last.
//!
//! Declarations read back from text get their signatures from
//! [`resolve_signatures`], which follows references by name and yields the
//! same strings [`Shape::signature`] does.

use std::collections::{HashMap, HashSet};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    error::DomainError,
    shape::{PrimitiveKind, Shape, ShapeKind, analyze, push_flags, push_key},
};

/// Type of one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `string`, `number[]`, ...
    Primitive { kind: PrimitiveKind, is_array: bool },
    /// Another declaration, by canonical name.
    Reference { name: String, is_array: bool },
    /// Array of objects without a resolved declaration.
    RecordArray,
    /// `unknown` / `unknown[]`.
    Unknown { is_array: bool },
    /// Type text outside the generated grammar (unions, generics, inline
    /// objects), kept verbatim.
    Opaque { text: String },
}

impl FieldType {
    pub fn is_array(&self) -> bool {
        match self {
            Self::Primitive { is_array, .. }
            | Self::Reference { is_array, .. }
            | Self::Unknown { is_array } => *is_array,
            Self::RecordArray => true,
            Self::Opaque { .. } => false,
        }
    }

    /// Name of the referenced declaration, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: FieldType,
    pub optional: bool,
}

/// One named structural type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Structural signature of the shape this declaration names.
    pub signature: String,
    pub fields: Vec<FieldDecl>,
}

impl Declaration {
    /// A declaration whose signature is filled in later by
    /// [`resolve_signatures`].
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            signature: String::new(),
            fields,
        }
    }

    /// Names of the declarations this one references, in field order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.ty.reference())
    }
}

/// Signature → shape + candidate names, accumulated during traversal.
#[derive(Debug)]
struct ShapeGroup<'a> {
    shape: &'a Shape,
    names: Vec<String>,
    dependencies: Vec<String>,
}

impl ShapeGroup<'_> {
    /// Shortest candidate in characters; ties go to the first one
    /// encountered.
    fn canonical_name(&self) -> &str {
        let mut best = self.names[0].as_str();
        let mut best_len = best.chars().count();
        for name in &self.names[1..] {
            let len = name.chars().count();
            if len < best_len {
                best = name;
                best_len = len;
            }
        }
        best
    }
}

/// Infer declarations straight from a JSON value.
pub fn infer_declarations(value: &Value, root_name: &str) -> Result<Vec<Declaration>, DomainError> {
    let shape = analyze(value, root_name);
    deduplicate(&shape, root_name)
}

/// Deduplicate and order every object shape reachable from `root`.
///
/// Emits exactly one declaration per distinct structural signature, the root
/// included. Fails if `root` is not an object.
pub fn deduplicate(root: &Shape, root_name: &str) -> Result<Vec<Declaration>, DomainError> {
    if !root.is_object() || root.is_array {
        return Err(DomainError::InvalidRootShape {
            found: root.describe(),
        });
    }

    let mut groups: IndexMap<String, ShapeGroup<'_>> = IndexMap::new();
    collect(root, root_name.to_string(), &mut groups);

    let order = topological_order(&root.signature(), &groups);
    let names = assign_names(&order, &groups);

    let declarations: Vec<Declaration> = order
        .iter()
        .map(|signature| {
            let group = &groups[signature.as_str()];
            Declaration {
                name: names[signature.as_str()].clone(),
                signature: signature.clone(),
                fields: declare_fields(group.shape, &names),
            }
        })
        .collect();

    debug!(
        root = root_name,
        declarations = declarations.len(),
        "deduplicated shapes"
    );
    Ok(declarations)
}

fn collect<'a>(shape: &'a Shape, name: String, groups: &mut IndexMap<String, ShapeGroup<'a>>) {
    let ShapeKind::Object(fields) = &shape.kind else {
        return;
    };

    let signature = shape.signature();
    let group = groups.entry(signature).or_insert_with(|| ShapeGroup {
        shape,
        names: Vec::new(),
        dependencies: fields
            .values()
            .filter(|child| child.is_object())
            .map(Shape::signature)
            .collect(),
    });
    if !group.names.contains(&name) {
        group.names.push(name.clone());
    }

    for (field, child) in fields {
        if child.is_object() {
            collect(child, format!("{name}{}", field.to_upper_camel_case()), groups);
        }
    }
}

/// Depth-first post-order from the root: dependencies before dependents.
fn topological_order(root: &str, groups: &IndexMap<String, ShapeGroup<'_>>) -> Vec<String> {
    fn visit(
        signature: &str,
        groups: &IndexMap<String, ShapeGroup<'_>>,
        seen: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) {
        if !seen.insert(signature.to_string()) {
            return;
        }
        if let Some(group) = groups.get(signature) {
            for dependency in &group.dependencies {
                visit(dependency, groups, seen, order);
            }
        }
        order.push(signature.to_string());
    }

    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(groups.len());
    visit(root, groups, &mut seen, &mut order);
    order
}

/// Canonical name per signature, made unique across distinct signatures.
fn assign_names(order: &[String], groups: &IndexMap<String, ShapeGroup<'_>>) -> HashMap<String, String> {
    let mut taken = HashSet::new();
    let mut names = HashMap::with_capacity(order.len());

    for signature in order {
        let base = groups[signature.as_str()].canonical_name();
        let mut name = base.to_string();
        let mut suffix = 2;
        while !taken.insert(name.clone()) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        names.insert(signature.clone(), name);
    }
    names
}

/// Recompute every declaration's signature from its fields.
///
/// References to declarations in the slice contribute the referenced
/// signature, exactly as a nested object does in [`Shape::signature`].
/// References that cannot be resolved, or that would recurse, contribute
/// their name instead.
pub fn resolve_signatures(declarations: &mut [Declaration]) {
    let signatures: Vec<String> = {
        let index: HashMap<&str, &Declaration> = declarations
            .iter()
            .map(|decl| (decl.name.as_str(), decl))
            .collect();
        let mut memo = HashMap::new();
        declarations
            .iter()
            .map(|decl| declared_signature(decl, &index, &mut memo, &mut HashSet::new()))
            .collect()
    };

    for (decl, signature) in declarations.iter_mut().zip(signatures) {
        decl.signature = signature;
    }
}

fn declared_signature<'a>(
    decl: &'a Declaration,
    index: &HashMap<&'a str, &'a Declaration>,
    memo: &mut HashMap<&'a str, String>,
    visiting: &mut HashSet<&'a str>,
) -> String {
    if let Some(signature) = memo.get(decl.name.as_str()) {
        return signature.clone();
    }
    visiting.insert(&decl.name);

    let mut fields: Vec<&FieldDecl> = decl.fields.iter().collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    let mut out = String::from("{");
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_key(&mut out, &field.name);
        match &field.ty {
            FieldType::Reference { name, is_array } => match index.get(name.as_str()) {
                Some(&target) if !visiting.contains(name.as_str()) => {
                    out.push_str(&declared_signature(target, index, memo, visiting));
                }
                _ => {
                    out.push_str(&format!("@{name:?}"));
                    push_flags(&mut out, *is_array, field.optional);
                }
            },
            FieldType::Primitive { kind, is_array } => {
                out.push_str(kind.as_str());
                push_flags(&mut out, *is_array, field.optional);
            }
            FieldType::Unknown { is_array } => {
                out.push_str("unknown");
                push_flags(&mut out, *is_array, field.optional);
            }
            FieldType::RecordArray => {
                out.push_str("record");
                push_flags(&mut out, true, field.optional);
            }
            FieldType::Opaque { text } => {
                out.push_str(&format!("={text:?}"));
                push_flags(&mut out, false, field.optional);
            }
        }
    }
    out.push('}');

    visiting.remove(decl.name.as_str());
    memo.insert(&decl.name, out.clone());
    out
}

fn declare_fields(shape: &Shape, names: &HashMap<String, String>) -> Vec<FieldDecl> {
    let Some(fields) = shape.fields() else {
        return Vec::new();
    };

    fields
        .iter()
        .map(|(field, child)| {
            let ty = match &child.kind {
                ShapeKind::Object(_) => match names.get(&child.signature()) {
                    Some(name) => FieldType::Reference {
                        name: name.clone(),
                        is_array: child.is_array,
                    },
                    None if child.is_array => FieldType::RecordArray,
                    None => FieldType::Unknown { is_array: false },
                },
                ShapeKind::Primitive(kind) => FieldType::Primitive {
                    kind: *kind,
                    is_array: child.is_array,
                },
                ShapeKind::Unknown => FieldType::Unknown {
                    is_array: child.is_array,
                },
            };
            FieldDecl {
                name: field.clone(),
                ty,
                optional: child.is_optional,
            }
        })
        .collect()
}
