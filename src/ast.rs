//! Node types of a Datalog program.
//!
//! The variant sets of [`Argument`], [`Literal`] and [`Constraint`] are closed:
//! consumers match on them exhaustively. Every node derives `Clone` and
//! `PartialEq`; equality never looks at interned ids, only at the strings they
//! stand for (see [`Symbol`]). Textual forms live in [`crate::printer`].

use crate::symbol::{Symbol, SymbolTable};

pub type Identifier = String;
pub type RelationName = Identifier;
pub type AttributeName = Identifier;
pub type TypeName = Identifier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    Nil,
    Number(i64),
    String(Symbol),
    Variable(Identifier),
    UnnamedVariable,
    /// Auto-incrementing counter placeholder.
    Counter,
    Aggregator(Box<Aggregator>),
}

impl Argument {
    pub fn variable(name: impl Into<Identifier>) -> Self {
        Argument::Variable(name.into())
    }

    pub fn string(symbols: &SymbolTable, text: &str) -> Self {
        Argument::String(symbols.symbol(text))
    }
}

impl From<Aggregator> for Argument {
    fn from(aggregator: Aggregator) -> Self {
        Argument::Aggregator(Box::new(aggregator))
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Number(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregatorKind {
    Min,
    Max,
    Count,
    Sum,
}

impl AggregatorKind {
    pub const ALL: [AggregatorKind; 4] = [
        AggregatorKind::Min,
        AggregatorKind::Max,
        AggregatorKind::Count,
        AggregatorKind::Sum,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            AggregatorKind::Min => "min",
            AggregatorKind::Max => "max",
            AggregatorKind::Count => "count",
            AggregatorKind::Sum => "sum",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.keyword() == keyword)
    }

    /// `count` is the only kind that can do without a target expression.
    pub fn requires_target(self) -> bool {
        !matches!(self, AggregatorKind::Count)
    }
}

/// Reduction over the bindings of a nested body, e.g. `min x : B(x)`.
///
/// The body is an ordinary literal sequence, scoped to the aggregator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregator {
    pub kind: AggregatorKind,
    pub target: Option<Argument>,
    pub body: Vec<Literal>,
}

impl Aggregator {
    pub fn new(kind: AggregatorKind) -> Self {
        Self {
            kind,
            target: None,
            body: Vec::new(),
        }
    }

    pub fn set_target_expression(&mut self, target: Argument) {
        self.target = Some(target);
    }

    pub fn add_body_literal(&mut self, literal: impl Into<Literal>) {
        self.body.push(literal.into());
    }

    pub fn target_expression(&self) -> Option<&Argument> {
        self.target.as_ref()
    }

    pub fn body_literals(&self) -> &[Literal] {
        &self.body
    }
}

/// A relation applied to positional arguments: `B(x, "y", _)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atom {
    pub name: RelationName,
    pub arguments: Vec<Argument>,
}

impl Atom {
    pub fn new(name: impl Into<RelationName>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(name: impl Into<RelationName>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn add_argument(&mut self, argument: impl Into<Argument>) {
        self.arguments.push(argument.into());
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ConstraintOp {
    pub const ALL: [ConstraintOp; 6] = [
        ConstraintOp::Eq,
        ConstraintOp::Ne,
        ConstraintOp::Lt,
        ConstraintOp::Le,
        ConstraintOp::Gt,
        ConstraintOp::Ge,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Ne => "!=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Le => "<=",
            ConstraintOp::Gt => ">",
            ConstraintOp::Ge => ">=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryConstraint {
    pub op: ConstraintOp,
    pub lhs: Argument,
    pub rhs: Argument,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    Binary(BinaryConstraint),
    Boolean(bool),
}

impl Constraint {
    pub fn binary(op: ConstraintOp, lhs: impl Into<Argument>, rhs: impl Into<Argument>) -> Self {
        Constraint::Binary(BinaryConstraint {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Atom(Atom),
    Negation(Atom),
    Constraint(Constraint),
}

impl From<Atom> for Literal {
    fn from(atom: Atom) -> Self {
        Literal::Atom(atom)
    }
}

impl From<Constraint> for Literal {
    fn from(constraint: Constraint) -> Self {
        Literal::Constraint(constraint)
    }
}

/// A rule `head :- body.`, or a fact when the body is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub head: Atom,
    pub body: Vec<Literal>,
}

impl Clause {
    pub fn new(head: Atom) -> Self {
        Self {
            head,
            body: Vec::new(),
        }
    }

    pub fn set_head(&mut self, head: Atom) {
        self.head = head;
    }

    pub fn add_to_body(&mut self, literal: impl Into<Literal>) {
        self.body.push(literal.into());
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    pub type_name: TypeName,
}

impl Attribute {
    pub fn new(name: impl Into<AttributeName>, type_name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Storage hint attached to a relation declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RelationRepresentation {
    #[default]
    Default,
    Btree,
    Brie,
    Eqrel,
}

impl RelationRepresentation {
    /// Qualifier spelling; `None` for the default representation, which is
    /// never written out.
    pub fn qualifier(self) -> Option<&'static str> {
        match self {
            RelationRepresentation::Default => None,
            RelationRepresentation::Btree => Some("btree"),
            RelationRepresentation::Brie => Some("brie"),
            RelationRepresentation::Eqrel => Some("eqrel"),
        }
    }

    pub fn from_qualifier(qualifier: &str) -> Option<Self> {
        match qualifier {
            "btree" => Some(RelationRepresentation::Btree),
            "brie" => Some(RelationRepresentation::Brie),
            "eqrel" => Some(RelationRepresentation::Eqrel),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub name: RelationName,
    pub attributes: Vec<Attribute>,
    pub representation: RelationRepresentation,
}

impl Relation {
    pub fn new(name: impl Into<RelationName>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            representation: RelationRepresentation::Default,
        }
    }

    pub fn set_name(&mut self, name: impl Into<RelationName>) {
        self.name = name.into();
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn set_representation(&mut self, representation: RelationRepresentation) {
        self.representation = representation;
    }

    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    /// Whether `other` could share a single `.decl` line with this relation.
    pub(crate) fn same_signature(&self, other: &Relation) -> bool {
        self.attributes == other.attributes && self.representation == other.representation
    }
}
