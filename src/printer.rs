//! Canonical textual form of the AST.
//!
//! Every node implements `Display`; the output is accepted by
//! [`crate::parser`] and re-parses to an equal tree.

use std::fmt;

use itertools::Itertools;

use crate::ast::{
    Aggregator, Argument, Atom, Attribute, BinaryConstraint, Clause, Constraint, Literal, Relation,
};
use crate::program::Program;
use crate::symbol::Symbol;

/// Token standing for [`Argument::Counter`].
pub const COUNTER_TOKEN: &str = "$";

pub fn print(program: &Program) -> String {
    program.to_string()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape(self.as_str()))
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Nil => write!(f, "nil"),
            Argument::Number(value) => write!(f, "{}", value),
            Argument::String(symbol) => write!(f, "{}", symbol),
            Argument::Variable(name) => write!(f, "{}", name),
            Argument::UnnamedVariable => write!(f, "_"),
            Argument::Counter => write!(f, "{}", COUNTER_TOKEN),
            Argument::Aggregator(aggregator) => write!(f, "{}", aggregator),
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.keyword())?;
        if let Some(target) = &self.target {
            write!(f, " {}", target)?;
        }
        // A lone atom needs no braces; anything else would swallow the
        // literals that follow the aggregator in the enclosing body.
        match self.body.as_slice() {
            [Literal::Atom(atom)] => write!(f, " : {}", atom),
            [] => write!(f, " : {{}}"),
            body => write!(f, " : {{ {} }}", body.iter().join(", ")),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments.iter().join(","))
    }
}

impl fmt::Display for BinaryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Binary(constraint) => write!(f, "{}", constraint),
            Constraint::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Atom(atom) => write!(f, "{}", atom),
            Literal::Negation(atom) => write!(f, "!{}", atom),
            Literal::Constraint(constraint) => write!(f, "{}", constraint),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- {}.", self.head, self.body.iter().join(", "))
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.type_name)
    }
}

/// Writes one `.decl` line covering `group`, which must share a signature.
fn write_declaration(f: &mut fmt::Formatter<'_>, group: &[&Relation]) -> fmt::Result {
    let first = match group.first() {
        Some(first) => first,
        None => return Ok(()),
    };
    write!(
        f,
        ".decl {}({})",
        group.iter().map(|relation| &relation.name).join(","),
        first.attributes.iter().join(",")
    )?;
    if let Some(qualifier) = first.representation.qualifier() {
        write!(f, " {}", qualifier)?;
    }
    Ok(())
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_declaration(f, &[self])
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut group: Vec<&Relation> = Vec::new();
        for relation in self.relations() {
            if let Some(last) = group.last() {
                if !last.same_signature(relation) {
                    write_declaration(f, &group)?;
                    writeln!(f)?;
                    group.clear();
                }
            }
            group.push(relation);
        }
        if !group.is_empty() {
            write_declaration(f, &group)?;
            writeln!(f)?;
        }

        for clause in self.clauses() {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AggregatorKind, ConstraintOp, RelationRepresentation};
    use crate::symbol::SymbolTable;

    fn atom(name: &str, args: Vec<Argument>) -> Atom {
        Atom::with_arguments(name, args)
    }

    #[test]
    fn argument_tokens() {
        let symbols = SymbolTable::new();
        assert_eq!(Argument::Nil.to_string(), "nil");
        assert_eq!(Argument::Number(-12).to_string(), "-12");
        assert_eq!(
            Argument::string(&symbols, "test string").to_string(),
            "\"test string\""
        );
        assert_eq!(Argument::variable("testVar").to_string(), "testVar");
        assert_eq!(Argument::UnnamedVariable.to_string(), "_");
        assert_eq!(Argument::Counter.to_string(), "$");
    }

    #[test]
    fn strings_are_escaped() {
        let symbols = SymbolTable::new();
        let argument = Argument::string(&symbols, "say \"hi\"\\\n");
        assert_eq!(argument.to_string(), r#""say \"hi\"\\\n""#);
    }

    #[test]
    fn single_atom_aggregator_body_is_bare() {
        let mut min = Aggregator::new(AggregatorKind::Min);
        min.set_target_expression(Argument::variable("x"));
        min.add_body_literal(atom("B", vec![Argument::variable("x")]));
        assert_eq!(min.to_string(), "min x : B(x)");

        let mut count = Aggregator::new(AggregatorKind::Count);
        count.add_body_literal(atom("B", vec![Argument::variable("x")]));
        assert_eq!(count.to_string(), "count : B(x)");
    }

    #[test]
    fn other_aggregator_bodies_are_braced() {
        let mut count = Aggregator::new(AggregatorKind::Count);
        count.add_body_literal(atom("B", vec![Argument::variable("x")]));
        count.add_body_literal(Literal::Negation(atom("C", vec![Argument::variable("x")])));
        assert_eq!(count.to_string(), "count : { B(x), !C(x) }");

        assert_eq!(Aggregator::new(AggregatorKind::Count).to_string(), "count : {}");
    }

    #[test]
    fn clauses_and_facts() {
        let mut clause = Clause::new(atom("A", vec![Argument::variable("y")]));
        assert_eq!(clause.to_string(), "A(y).");

        clause.add_to_body(atom("B", vec![Argument::variable("y"), Argument::Number(1)]));
        clause.add_to_body(Constraint::binary(
            ConstraintOp::Ne,
            Argument::variable("y"),
            Argument::Number(3),
        ));
        clause.add_to_body(Constraint::Boolean(true));
        assert_eq!(clause.to_string(), "A(y) :- B(y,1), y != 3, true.");
    }

    #[test]
    fn declarations_group_matching_relations() {
        let mut program = Program::new();
        for name in ["A", "B", "C"] {
            let mut relation = Relation::new(name);
            relation.add_attribute(Attribute::new("x", "number"));
            program.append_relation(relation).unwrap();
        }
        let mut d = Relation::new("D");
        d.set_representation(RelationRepresentation::Brie);
        program.append_relation(d).unwrap();

        assert_eq!(print(&program), ".decl A,B,C(x:number)\n.decl D() brie\n");
    }
}
