//! A small Go syntax tree and its printer.
//!
//! Only the constructs the generator emits are modelled. The printer
//! follows gofmt layout: tab indentation, space-aligned struct fields and
//! constant groups, one blank line between top-level declarations.

use std::fmt::{self, Write as _};

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    String,
    Int,
    Float64,
    Bool,
    /// `time.Time`
    Time,
    Error,
    /// A type declared in the generated package.
    Named(String),
    /// A type from an imported package, such as `context.Context`.
    Qualified {
        package: String,
        name: String,
    },
    Pointer(Box<GoType>),
    Slice(Box<GoType>),
}

impl GoType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn context() -> Self {
        Self::Qualified {
            package: "context".to_string(),
            name: "Context".to_string(),
        }
    }

    #[must_use]
    pub fn pointer(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    #[must_use]
    pub fn slice(self) -> Self {
        Self::Slice(Box::new(self))
    }

    /// Returns true if the type refers to the `time` package.
    #[must_use]
    pub fn uses_time(&self) -> bool {
        match self {
            Self::Time => true,
            Self::Qualified { package, .. } => package == "time",
            Self::Pointer(inner) | Self::Slice(inner) => inner.uses_time(),
            _ => false,
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int => f.write_str("int"),
            Self::Float64 => f.write_str("float64"),
            Self::Bool => f.write_str("bool"),
            Self::Time => f.write_str("time.Time"),
            Self::Error => f.write_str("error"),
            Self::Named(name) => f.write_str(name),
            Self::Qualified { package, name } => write!(f, "{package}.{name}"),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Slice(inner) => write!(f, "[]{inner}"),
        }
    }
}

/// A Go expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// An interpreted string literal; quoted when printed.
    Str(String),
    Nil,
    Selector(Box<Expr>, String),
    Call(Box<Expr>, Vec<Expr>),
    AddrOf(Box<Expr>),
    NotEq(Box<Expr>, Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// `self.name`
    #[must_use]
    pub fn dot(self, name: impl Into<String>) -> Self {
        Self::Selector(Box::new(self), name.into())
    }

    /// `self(args...)`
    #[must_use]
    pub fn call(self, args: Vec<Self>) -> Self {
        Self::Call(Box::new(self), args)
    }

    /// `&self`
    #[must_use]
    pub fn addr(self) -> Self {
        Self::AddrOf(Box::new(self))
    }

    /// `self != nil`
    #[must_use]
    pub fn not_nil(self) -> Self {
        Self::NotEq(Box::new(self), Box::new(Self::Nil))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Str(value) => f.write_str(&quote(value)),
            Self::Nil => f.write_str("nil"),
            Self::Selector(base, name) => write!(f, "{base}.{name}"),
            Self::Call(func, args) => {
                write!(f, "{func}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::AddrOf(inner) => write!(f, "&{inner}"),
            Self::NotEq(lhs, rhs) => write!(f, "{lhs} != {rhs}"),
        }
    }
}

/// A Go statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `a, b := value`
    Define(Vec<String>, Expr),
    /// `a = value`
    Assign(Vec<String>, Expr),
    /// `var name T`
    Var(String, GoType),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `for cond { ... }`
    For(Expr, Vec<Stmt>),
    Defer(Expr),
    Return(Vec<Expr>),
}

impl Stmt {
    #[must_use]
    pub fn define(names: &[&str], value: Expr) -> Self {
        Self::Define(names.iter().map(ToString::to_string).collect(), value)
    }

    #[must_use]
    pub fn assign(name: &str, value: Expr) -> Self {
        Self::Assign(vec![name.to_string()], value)
    }

    /// `if err != nil { return ... }`, optionally with an init statement.
    #[must_use]
    pub fn return_on_err(init: Option<Self>, results: Vec<Expr>) -> Self {
        Self::If {
            init: init.map(Box::new),
            cond: Expr::ident("err").not_nil(),
            body: vec![Self::Return(results)],
        }
    }

    fn write_simple(&self, out: &mut String) {
        match self {
            Self::Define(names, value) => {
                let _ = write!(out, "{} := {value}", names.join(", "));
            }
            Self::Assign(names, value) => {
                let _ = write!(out, "{} = {value}", names.join(", "));
            }
            other => other.write(out, 0),
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        match self {
            Self::Define(..) | Self::Assign(..) => self.write_simple(out),
            Self::Var(name, ty) => {
                let _ = write!(out, "var {name} {ty}");
            }
            Self::If { init, cond, body } => {
                out.push_str("if ");
                if let Some(init) = init {
                    init.write_simple(out);
                    out.push_str("; ");
                }
                let _ = write!(out, "{cond} {{");
                write_block(out, body, depth);
            }
            Self::For(cond, body) => {
                let _ = write!(out, "for {cond} {{");
                write_block(out, body, depth);
            }
            Self::Defer(call) => {
                let _ = write!(out, "defer {call}");
            }
            Self::Return(results) => {
                out.push_str("return");
                for (i, result) in results.iter().enumerate() {
                    out.push_str(if i == 0 { " " } else { ", " });
                    let _ = write!(out, "{result}");
                }
            }
        }
        out.push('\n');
    }
}

/// Writes `{` already emitted, then the body and the closing brace.
fn write_block(out: &mut String, body: &[Stmt], depth: usize) {
    out.push('\n');
    for stmt in body {
        stmt.write(out, depth + 1);
    }
    indent(out, depth);
    out.push('}');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Quotes `value` as a Go interpreted string literal.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ================================================================
// Declarations
// ================================================================

/// A struct field with an optional raw tag (without backquotes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: GoType,
    pub tag: Option<String>,
}

/// `type Name struct { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl StructDecl {
    #[must_use]
    pub fn uses_time(&self) -> bool {
        self.fields.iter().any(|field| field.ty.uses_time())
    }
}

impl fmt::Display for StructDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "type {} struct{{}}", self.name);
        }
        writeln!(f, "type {} struct {{", self.name)?;
        let rows: Vec<Vec<String>> = self
            .fields
            .iter()
            .map(|field| {
                let mut row = vec![field.name.clone(), field.ty.to_string()];
                if let Some(tag) = &field.tag {
                    row.push(format!("`{tag}`"));
                }
                row
            })
            .collect();
        write_aligned(f, &rows)?;
        f.write_str("}")
    }
}

/// One member of an enum's constant group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: String,
}

/// A string-backed enum: a named type plus a `const` group of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
}

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type {} string", self.name)?;
        writeln!(f)?;
        writeln!(f, "const (")?;
        let rows: Vec<Vec<String>> = self
            .members
            .iter()
            .map(|member| {
                vec![
                    member.name.clone(),
                    self.name.clone(),
                    format!("= {}", quote(&member.value)),
                ]
            })
            .collect();
        write_aligned(f, &rows)?;
        f.write_str(")")
    }
}

/// Writes tab-indented rows with every column but the last padded to the
/// widest cell of that column.
fn write_aligned(f: &mut fmt::Formatter<'_>, rows: &[Vec<String>]) -> fmt::Result {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            let width = cell.chars().count();
            if i < widths.len() {
                widths[i] = widths[i].max(width);
            } else {
                widths.push(width);
            }
        }
    }
    for row in rows {
        f.write_str("\t")?;
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                f.write_str(cell)?;
            } else {
                write!(f, "{cell:<width$} ", width = widths[i])?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

/// A named, typed function parameter or receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: GoType,
}

impl Param {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub receiver: Option<Param>,
    pub name: String,
    pub params: Vec<Param>,
    pub results: Vec<GoType>,
    pub body: Vec<Stmt>,
}

impl FuncDecl {
    #[must_use]
    pub fn uses_time(&self) -> bool {
        self.params.iter().any(|p| p.ty.uses_time()) || self.results.iter().any(GoType::uses_time)
    }
}

impl fmt::Display for FuncDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func ")?;
        if let Some(receiver) = &self.receiver {
            write!(f, "({receiver}) ")?;
        }
        write!(f, "{}(", self.name)?;
        write_list(f, &self.params)?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => {}
            [single] => write!(f, " {single}")?,
            many => {
                f.write_str(" (")?;
                write_list(f, many)?;
                f.write_str(")")?;
            }
        }
        f.write_str(" {")?;

        let mut body = String::new();
        write_block(&mut body, &self.body, 0);
        f.write_str(&body)
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Struct(StructDecl),
    Enum(EnumDecl),
    Func(FuncDecl),
}

impl Decl {
    #[must_use]
    pub fn uses_time(&self) -> bool {
        match self {
            Self::Struct(decl) => decl.uses_time(),
            Self::Enum(_) => false,
            Self::Func(decl) => decl.uses_time(),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct(decl) => write!(f, "{decl}"),
            Self::Enum(decl) => write!(f, "{decl}"),
            Self::Func(decl) => write!(f, "{decl}"),
        }
    }
}

/// A complete Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    pub header: Option<String>,
    pub package: String,
    pub imports: Vec<String>,
    pub decls: Vec<Decl>,
}

impl fmt::Display for GoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "// {header}")?;
            writeln!(f)?;
        }
        writeln!(f, "package {}", self.package)?;
        if !self.imports.is_empty() {
            writeln!(f)?;
            writeln!(f, "import (")?;
            for import in &self.imports {
                writeln!(f, "\t{}", quote(import))?;
            }
            writeln!(f, ")")?;
        }
        for decl in &self.decls {
            writeln!(f)?;
            writeln!(f, "{decl}")?;
        }
        Ok(())
    }
}
