//! Abstract syntax tree for Cero.
//!
//! Nodes are allocated in an [`Arena`] owned by the [`Ast`] and refer to each other through [`NodeId`]s. Child lists
//! are [`ArenaArray`]s of ids stored in a second arena, so a function with no parameters costs nothing for its
//! parameter list.
//!
//! ## Notes
//! - A node stores the byte offset of the token that introduced it. Binary, postfix and call expressions use the offset
//!   of their left operand, so a diagnostic on `a + b` points at `a`.
//! - Names and lexemes are not copied out of the source. [`Ast::text`] resolves them against the [`SourceView`] the
//!   tree was parsed from.
//! - Only the parser builds an [`Ast`]; the mutation helpers are crate-private.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::ops::Index;

use cero_core::arena::{Arena, ArenaArray, Idx};

use crate::source::{SourceOffset, SourceView};

/// Handle to a node in an [`Ast`].
pub type NodeId = Idx<AstNode>;

/// Ordered children of a node.
pub type NodeList = ArenaArray<NodeId>;

// ============================================================================
// NAMES AND MODIFIERS
// ============================================================================

/// A name as a span of source text. An empty name means it was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AstName {
    pub offset: SourceOffset,
    pub length: u32,
}

impl AstName {
    pub const fn new(offset: SourceOffset, length: u32) -> Self {
        Self { offset, length }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessModifier {
    #[default]
    None,
    Private,
    Public,
}

impl AccessModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessModifier::None => "none",
            AccessModifier::Private => "private",
            AccessModifier::Public => "public",
        }
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    DecInt,
    HexInt,
    BinInt,
    OctInt,
    Float,
    Char,
    String,
}

impl LiteralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LiteralKind::DecInt => "dec_int",
            LiteralKind::HexInt => "hex_int",
            LiteralKind::BinInt => "bin_int",
            LiteralKind::OctInt => "oct_int",
            LiteralKind::Float => "float",
            LiteralKind::Char => "char",
            LiteralKind::String => "string",
        }
    }
}

/// Prefix and postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Negate,
    BitNot,
    LogicNot,
    AddrOf,
    Deref,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::PreIncrement => "pre_increment",
            UnaryOperator::PreDecrement => "pre_decrement",
            UnaryOperator::PostIncrement => "post_increment",
            UnaryOperator::PostDecrement => "post_decrement",
            UnaryOperator::Negate => "negate",
            UnaryOperator::BitNot => "bit_not",
            UnaryOperator::LogicNot => "logic_not",
            UnaryOperator::AddrOf => "addr_of",
            UnaryOperator::Deref => "deref",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(
            self,
            UnaryOperator::PostIncrement | UnaryOperator::PostDecrement | UnaryOperator::Deref
        )
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicAnd,
    LogicOr,
    Eq,
    Neq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    BitAndAssign,
    BitOrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    LogicAndAssign,
    LogicOrAssign,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Sub => "sub",
            BinaryOperator::Mul => "mul",
            BinaryOperator::Div => "div",
            BinaryOperator::Rem => "rem",
            BinaryOperator::BitAnd => "bit_and",
            BinaryOperator::BitOr => "bit_or",
            BinaryOperator::BitXor => "bit_xor",
            BinaryOperator::Shl => "shl",
            BinaryOperator::Shr => "shr",
            BinaryOperator::LogicAnd => "logic_and",
            BinaryOperator::LogicOr => "logic_or",
            BinaryOperator::Eq => "eq",
            BinaryOperator::Neq => "neq",
            BinaryOperator::Less => "less",
            BinaryOperator::LessEq => "less_eq",
            BinaryOperator::Greater => "greater",
            BinaryOperator::GreaterEq => "greater_eq",
            BinaryOperator::Assign => "assign",
            BinaryOperator::AddAssign => "add_assign",
            BinaryOperator::SubAssign => "sub_assign",
            BinaryOperator::MulAssign => "mul_assign",
            BinaryOperator::DivAssign => "div_assign",
            BinaryOperator::RemAssign => "rem_assign",
            BinaryOperator::BitAndAssign => "bit_and_assign",
            BinaryOperator::BitOrAssign => "bit_or_assign",
            BinaryOperator::XorAssign => "xor_assign",
            BinaryOperator::ShlAssign => "shl_assign",
            BinaryOperator::ShrAssign => "shr_assign",
            BinaryOperator::LogicAndAssign => "logic_and_assign",
            BinaryOperator::LogicOrAssign => "logic_or_assign",
        }
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOperator::Assign
                | BinaryOperator::AddAssign
                | BinaryOperator::SubAssign
                | BinaryOperator::MulAssign
                | BinaryOperator::DivAssign
                | BinaryOperator::RemAssign
                | BinaryOperator::BitAndAssign
                | BinaryOperator::BitOrAssign
                | BinaryOperator::XorAssign
                | BinaryOperator::ShlAssign
                | BinaryOperator::ShrAssign
                | BinaryOperator::LogicAndAssign
                | BinaryOperator::LogicOrAssign
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NODES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub access: AccessModifier,
    pub name: AstName,
    pub parameters: NodeList,
    pub outputs: NodeList,
    pub statements: NodeList,
}

/// What a node is, with its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstNodeKind {
    FunctionDefinition(FunctionDefinition),
    FunctionParameter { ty: NodeId, name: AstName },
    /// `ty` is `None` when the output type was missing; the definition is still kept.
    FunctionOutput { ty: Option<NodeId>, name: AstName },
    IdentExpr { length: u32 },
    LiteralExpr { kind: LiteralKind, length: u32 },
    BlockExpr { statements: NodeList },
    ReturnExpr { values: NodeList },
    UnaryExpr { op: UnaryOperator, operand: NodeId },
    BinaryExpr { op: BinaryOperator, left: NodeId, right: NodeId },
    CallExpr { callee: NodeId, args: NodeList },
}

impl AstNodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AstNodeKind::FunctionDefinition(_) => "FunctionDefinition",
            AstNodeKind::FunctionParameter { .. } => "FunctionParameter",
            AstNodeKind::FunctionOutput { .. } => "FunctionOutput",
            AstNodeKind::IdentExpr { .. } => "IdentExpr",
            AstNodeKind::LiteralExpr { .. } => "LiteralExpr",
            AstNodeKind::BlockExpr { .. } => "BlockExpr",
            AstNodeKind::ReturnExpr { .. } => "ReturnExpr",
            AstNodeKind::UnaryExpr { .. } => "UnaryExpr",
            AstNodeKind::BinaryExpr { .. } => "BinaryExpr",
            AstNodeKind::CallExpr { .. } => "CallExpr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstNode {
    pub offset: SourceOffset,
    pub kind: AstNodeKind,
}

impl AstNode {
    pub const fn new(offset: SourceOffset, kind: AstNodeKind) -> Self {
        Self { offset, kind }
    }
}

/// Top of the tree: the definitions of one source file, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AstRoot {
    pub definitions: NodeList,
}

// ============================================================================
// TREE
// ============================================================================

/// A parsed source file. Only the parser creates one.
#[derive(Debug)]
pub struct Ast {
    nodes: Arena<AstNode>,
    lists: Arena<NodeId>,
    root: AstRoot,
}

impl Ast {
    pub(crate) fn with_block_len(block_len: usize) -> Self {
        Self {
            nodes: Arena::with_block_len(block_len),
            lists: Arena::with_block_len(block_len),
            root: AstRoot::default(),
        }
    }

    pub fn root(&self) -> &AstRoot {
        &self.root
    }

    /// Top-level definitions in source order.
    pub fn definitions(&self) -> &[NodeId] {
        self.list(&self.root.definitions)
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id)
    }

    pub fn list(&self, list: &NodeList) -> &[NodeId] {
        list.as_slice(&self.lists)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Source text of a name.
    pub fn name_text<'s>(&self, name: AstName, source: &'s SourceView<'_>) -> Cow<'s, str> {
        source.slice(name.offset, name.length)
    }

    /// Source text of an identifier or literal expression, empty for every other node.
    pub fn text<'s>(&self, id: NodeId, source: &'s SourceView<'_>) -> Cow<'s, str> {
        let node = &self[id];
        match node.kind {
            AstNodeKind::IdentExpr { length } | AstNodeKind::LiteralExpr { length, .. } => {
                source.slice(node.offset, length)
            }
            _ => Cow::Borrowed(""),
        }
    }

    pub(crate) fn alloc(&mut self, offset: SourceOffset, kind: AstNodeKind) -> NodeId {
        self.nodes.alloc(AstNode::new(offset, kind))
    }

    pub(crate) fn push(&mut self, list: &mut NodeList, id: NodeId) {
        list.put(id, &mut self.lists);
    }

    pub(crate) fn push_definition(&mut self, id: NodeId) {
        let mut definitions = self.root.definitions;
        self.push(&mut definitions, id);
        self.root.definitions = definitions;
    }
}

impl Index<NodeId> for Ast {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &AstNode {
        &self.nodes[id]
    }
}

// ============================================================================
// DUMP
// ============================================================================

/// Render `ast` as an indented tree, one node per line with its location.
///
/// `source` must be the view the tree was parsed from. The format is meant for people and may change.
///
/// ## Notes
/// - Operator chains such as `a + b + c + ...` build trees as deep as the chain is long, so the printer walks the tree
///   with an explicit stack instead of recursing.
pub fn dump(ast: &Ast, source: &SourceView<'_>, tab_size: u8) -> String {
    let mut printer = DumpPrinter {
        ast,
        source,
        tab_size,
        out: String::new(),
        pending: Vec::new(),
    };
    printer.line(0, "Root", None);
    printer.push_nodes(ast.definitions(), 1);
    printer.run();
    printer.out
}

/// One line still to be printed.
#[derive(Debug, Clone, Copy)]
enum DumpItem {
    Node(NodeId, usize),
    /// A list heading followed by its members.
    List(&'static str, NodeList, usize),
    MissingType(usize),
}

struct DumpPrinter<'a, 's> {
    ast: &'a Ast,
    source: &'a SourceView<'s>,
    tab_size: u8,
    out: String,
    pending: Vec<DumpItem>,
}

impl DumpPrinter<'_, '_> {
    fn run(&mut self) {
        while let Some(item) = self.pending.pop() {
            match item {
                DumpItem::Node(id, depth) => self.node(id, depth),
                DumpItem::List(label, list, depth) => {
                    self.line(depth, label, None);
                    let ast = self.ast;
                    self.push_nodes(ast.list(&list), depth + 1);
                }
                DumpItem::MissingType(depth) => self.line(depth, "<missing type>", None),
            }
        }
    }

    fn line(&mut self, depth: usize, label: &str, offset: Option<SourceOffset>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(label);
        if let Some(offset) = offset {
            let location = self.source.locate(offset, self.tab_size);
            let _ = write!(self.out, " {}", location.short());
        }
        self.out.push('\n');
    }

    /// Queue `ids` so they print in order.
    fn push_nodes(&mut self, ids: &[NodeId], depth: usize) {
        self.pending.extend(ids.iter().rev().map(|&id| DumpItem::Node(id, depth)));
    }

    /// Queue a labelled list, skipping it entirely when empty.
    fn push_list(&mut self, label: &'static str, list: NodeList, depth: usize) {
        if !self.ast.list(&list).is_empty() {
            self.pending.push(DumpItem::List(label, list, depth));
        }
    }

    /// Print `id` and queue its children. Children are pushed last-first.
    fn node(&mut self, id: NodeId, depth: usize) {
        let node = self.ast[id];
        let name = node.kind.name();
        let at = Some(node.offset);

        match node.kind {
            AstNodeKind::FunctionDefinition(function) => {
                let label = format!(
                    "{name} `{}` access={}",
                    self.ast.name_text(function.name, self.source),
                    function.access.as_str()
                );
                self.line(depth, &label, at);
                self.push_list("statements", function.statements, depth + 1);
                self.push_list("outputs", function.outputs, depth + 1);
                self.push_list("parameters", function.parameters, depth + 1);
            }
            AstNodeKind::FunctionParameter { ty, name: param } => {
                let label = format!("{name} `{}`", self.ast.name_text(param, self.source));
                self.line(depth, &label, at);
                self.pending.push(DumpItem::Node(ty, depth + 1));
            }
            AstNodeKind::FunctionOutput { ty, name: output } => {
                let label = if output.is_empty() {
                    name.to_string()
                } else {
                    format!("{name} `{}`", self.ast.name_text(output, self.source))
                };
                self.line(depth, &label, at);
                self.pending.push(match ty {
                    Some(ty) => DumpItem::Node(ty, depth + 1),
                    None => DumpItem::MissingType(depth + 1),
                });
            }
            AstNodeKind::IdentExpr { .. } => {
                let label = format!("{name} `{}`", self.ast.text(id, self.source));
                self.line(depth, &label, at);
            }
            AstNodeKind::LiteralExpr { kind, .. } => {
                let label = format!("{name} {} `{}`", kind.as_str(), self.ast.text(id, self.source));
                self.line(depth, &label, at);
            }
            AstNodeKind::BlockExpr { statements: children } | AstNodeKind::ReturnExpr { values: children } => {
                self.line(depth, name, at);
                let ast = self.ast;
                self.push_nodes(ast.list(&children), depth + 1);
            }
            AstNodeKind::UnaryExpr { op, operand } => {
                self.line(depth, &format!("{name} {op}"), at);
                self.pending.push(DumpItem::Node(operand, depth + 1));
            }
            AstNodeKind::BinaryExpr { op, left, right } => {
                self.line(depth, &format!("{name} {op}"), at);
                self.pending.push(DumpItem::Node(right, depth + 1));
                self.pending.push(DumpItem::Node(left, depth + 1));
            }
            AstNodeKind::CallExpr { callee, args } => {
                self.line(depth, name, at);
                self.push_list("arguments", args, depth + 1);
                self.pending.push(DumpItem::Node(callee, depth + 1));
            }
        }
    }
}
