// AST (Abstract Syntax Tree) definitions for Grapher
//
// Nodes are built bottom-up by a parser and own their children exclusively,
// so dropping the root releases the whole tree.

use super::token::{Token, TokenKind};
use std::fmt;

/// Primitive types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Double,
    Bool,
    /// Marker only; adjacency data lives in the graph runtime.
    Graph,
}

impl PrimitiveType {
    /// Map a type keyword token to its primitive type.
    pub fn from_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::KwInt => Some(PrimitiveType::Int),
            TokenKind::KwDouble => Some(PrimitiveType::Double),
            TokenKind::KwBool => Some(PrimitiveType::Bool),
            TokenKind::KwGraph => Some(PrimitiveType::Graph),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Double => "double",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Graph => "graph",
        };
        f.write_str(name)
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub ty: PrimitiveType,
    pub name: String,
}

impl Arg {
    pub fn new(ty: PrimitiveType, name: impl Into<String>) -> Self {
        Arg {
            ty,
            name: name.into(),
        }
    }
}

/// Singly linked list node, grown by prepending.
///
/// A parser reducing `a, b, c` left to right calls [`NodeList::new`] with `a`,
/// then `b`, then `c`, so the head is `c`. Use
/// [`iter_source_order`](NodeList::iter_source_order) or
/// [`to_source_order`](NodeList::to_source_order) when source order matters.
///
/// Dropping, cloning and comparing walk the chain in a loop, so list length
/// is not bounded by stack depth.
pub struct NodeList<T> {
    pub item: T,
    pub next: Option<Box<NodeList<T>>>,
}

pub type ArgList = NodeList<Arg>;
pub type ExprList = NodeList<Expr>;
pub type StmtList = NodeList<Stmt>;

impl<T> NodeList<T> {
    /// Prepend `item` to `tail`, returning the new head.
    pub fn new(tail: Option<Box<NodeList<T>>>, item: T) -> Box<Self> {
        Box::new(NodeList { item, next: tail })
    }

    /// Iterate from the head, i.e. most recently added first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { node: Some(self) }
    }

    /// Iterate in the order the items were added.
    pub fn iter_source_order(&self) -> impl Iterator<Item = &T> {
        let mut items: Vec<&T> = self.iter().collect();
        items.reverse();
        items.into_iter()
    }

    /// Copy the items into a vector in the order they were added.
    pub fn to_source_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter_source_order().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// A list node always holds one item.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<T> Drop for NodeList<T> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl<T: Clone> Clone for NodeList<T> {
    fn clone(&self) -> Self {
        let mut tail = None;
        if let Some(next) = &self.next {
            for item in next.iter_source_order() {
                tail = Some(NodeList::new(tail, item.clone()));
            }
        }
        NodeList {
            item: self.item.clone(),
            next: tail,
        }
    }
}

impl<T: PartialEq> PartialEq for NodeList<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a == b => {}
                _ => return false,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over a [`NodeList`], head first
pub struct Iter<'a, T> {
    node: Option<&'a NodeList<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(&node.item)
    }
}

/// Prepend an argument (`new_arg_list(tail, arg)`).
pub fn new_arg_list(tail: Option<Box<ArgList>>, arg: Arg) -> Box<ArgList> {
    NodeList::new(tail, arg)
}

/// Prepend an expression (`new_expr_list(tail, expr)`).
pub fn new_expr_list(tail: Option<Box<ExprList>>, expr: Expr) -> Box<ExprList> {
    NodeList::new(tail, expr)
}

/// Prepend a statement (`new_stmt_list(tail, stmt)`).
pub fn new_stmt_list(tail: Option<Box<StmtList>>, stmt: Stmt) -> Box<StmtList> {
    NodeList::new(tail, stmt)
}

/// Kind of leaf value held by an [`Atom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    String,
    Integer,
    Float,
    Char,
    Var,
    FuncCallRef,
}

/// Leaf of an expression. `call` is set exactly when `kind` is
/// [`AtomKind::FuncCallRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub kind: AtomKind,
    pub text: String,
    pub call: Option<Box<FuncCall>>,
}

impl Atom {
    /// Literal or variable atom.
    pub fn new(kind: AtomKind, text: impl Into<String>) -> Self {
        debug_assert!(kind != AtomKind::FuncCallRef, "use Atom::call for calls");
        Atom {
            kind,
            text: text.into(),
            call: None,
        }
    }

    /// Atom referring to a function call; its text is the callee name.
    pub fn call(call: FuncCall) -> Self {
        Atom {
            kind: AtomKind::FuncCallRef,
            text: call.name.clone(),
            call: Some(Box::new(call)),
        }
    }

    /// Build an atom from a literal or identifier token.
    pub fn from_token(token: &Token) -> Option<Self> {
        let kind = match token.kind {
            TokenKind::IntegerLiteral => AtomKind::Integer,
            TokenKind::DoubleLiteral => AtomKind::Float,
            TokenKind::StringLiteral => AtomKind::String,
            TokenKind::Identifier => AtomKind::Var,
            _ => return None,
        };
        Some(Atom::new(kind, token.text.clone()))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.call) {
            (AtomKind::FuncCallRef, Some(call)) => write!(f, "{}", call),
            (AtomKind::String, _) => write!(f, "\"{}\"", self.text),
            (AtomKind::Char, _) => write!(f, "'{}'", self.text),
            _ => f.write_str(&self.text),
        }
    }
}

/// Expression operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprOp {
    Pow,
    Add,
    Sub,
    Mod,
    Mul,
    Div,
    UnaryNeg, // -x
    UnaryPos, // +x
    Paren,    // (x)
    AtomRef,  // leaf
}

impl ExprOp {
    /// Binary operator for an operator token.
    pub fn from_operator(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(ExprOp::Add),
            TokenKind::Sub => Some(ExprOp::Sub),
            TokenKind::Mul => Some(ExprOp::Mul),
            TokenKind::Div => Some(ExprOp::Div),
            _ => None,
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            ExprOp::Pow | ExprOp::Add | ExprOp::Sub | ExprOp::Mod | ExprOp::Mul | ExprOp::Div
        )
    }

    pub fn is_unary(self) -> bool {
        matches!(self, ExprOp::UnaryNeg | ExprOp::UnaryPos | ExprOp::Paren)
    }

    fn symbol(self) -> &'static str {
        match self {
            ExprOp::Pow => "^",
            ExprOp::Add => "+",
            ExprOp::Sub => "-",
            ExprOp::Mod => "%",
            ExprOp::Mul => "*",
            ExprOp::Div => "/",
            ExprOp::UnaryNeg => "neg",
            ExprOp::UnaryPos => "pos",
            ExprOp::Paren => "paren",
            ExprOp::AtomRef => "atom",
        }
    }
}

/// Expression node.
///
/// - leaf: `op = AtomRef`, no children, `atom` set
/// - unary (`UnaryNeg`, `UnaryPos`, `Paren`): operand in `left`
/// - binary: both children
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub op: ExprOp,
    pub left: Option<Box<Expr>>,
    pub right: Option<Box<Expr>>,
    pub atom: Option<Atom>,
}

impl Expr {
    pub fn new(
        op: ExprOp,
        left: Option<Box<Expr>>,
        right: Option<Box<Expr>>,
        atom: Option<Atom>,
    ) -> Self {
        Expr {
            op,
            left,
            right,
            atom,
        }
    }

    pub fn leaf(atom: Atom) -> Self {
        Expr::new(ExprOp::AtomRef, None, None, Some(atom))
    }

    pub fn unary(op: ExprOp, operand: Expr) -> Self {
        debug_assert!(op.is_unary());
        Expr::new(op, Some(Box::new(operand)), None, None)
    }

    pub fn binary(op: ExprOp, left: Expr, right: Expr) -> Self {
        debug_assert!(op.is_binary());
        Expr::new(op, Some(Box::new(left)), Some(Box::new(right)), None)
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::unary(ExprOp::Paren, inner)
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.atom.is_some()
    }

    /// Number of `Expr` nodes in this subtree, including call arguments.
    pub fn node_count(&self) -> usize {
        let children = [&self.left, &self.right]
            .into_iter()
            .flatten()
            .map(|e| e.node_count())
            .sum::<usize>();

        let in_call = self
            .atom
            .as_ref()
            .and_then(|a| a.call.as_deref())
            .and_then(|c| c.args.as_deref())
            .map(|args| args.iter().map(Expr::node_count).sum::<usize>())
            .unwrap_or(0);

        1 + children + in_call
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.left, &self.right, &self.atom) {
            (None, None, Some(atom)) => write!(f, "{}", atom),
            (Some(l), Some(r), _) => write!(f, "({} {} {})", self.op.symbol(), l, r),
            (Some(operand), None, _) => write!(f, "({} {})", self.op.symbol(), operand),
            _ => write!(f, "({})", self.op.symbol()),
        }
    }
}

/// Function call; arguments are stored head-first like every list.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub args: Option<Box<ExprList>>,
}

impl FuncCall {
    pub fn new(name: impl Into<String>, args: Option<Box<ExprList>>) -> Self {
        FuncCall {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for FuncCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(call {}", self.name)?;
        if let Some(args) = &self.args {
            for arg in args.iter_source_order() {
                write!(f, " {}", arg)?;
            }
        }
        write!(f, ")")
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub return_type: PrimitiveType,
    pub name: String,
    pub params: Option<Box<ArgList>>,
    pub body: Option<Box<StmtList>>,
}

impl FuncDef {
    pub fn new(
        return_type: PrimitiveType,
        name: impl Into<String>,
        params: Option<Box<ArgList>>,
        body: Option<Box<StmtList>>,
    ) -> Self {
        FuncDef {
            return_type,
            name: name.into(),
            params,
            body,
        }
    }

    pub fn param_count(&self) -> usize {
        self.params.as_ref().map_or(0, |p| p.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    FuncDef,
    Expr,
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FuncDef(FuncDef),
    Expr(Expr),
}

impl Stmt {
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::FuncDef(_) => StmtKind::FuncDef,
            Stmt::Expr(_) => StmtKind::Expr,
        }
    }
}
