//! Text to AST.
//!
//! The grammar in `datalog.pest` accepts exactly what [`crate::printer`]
//! emits. Input is consumed one statement at a time; a statement that does not
//! parse is reported to the [`ErrorReport`] and skipped up to the next
//! statement terminator, so one typo never hides the rest of the unit.

use std::borrow::BorrowMut;
use std::collections::HashSet;

use itertools::Itertools;
use pest::error::{ErrorVariant, InputLocation};
use pest::Parser as _;
use pest_derive::Parser;
use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{
    Aggregator, AggregatorKind, Argument, Atom, Attribute, Clause, Constraint, ConstraintOp,
    Literal, Relation, RelationRepresentation,
};
use crate::printer::print;
use crate::program::{Program, TranslationUnit};
use crate::report::{DebugReport, ErrorReport, SrcLocation};
use crate::symbol::SymbolTable;

#[derive(Parser)]
#[grammar = "datalog.pest"]
struct Parser;

type Pair<'a> = pest::iterators::Pair<'a, Rule>;
type Pairs<'a> = pest::iterators::Pairs<'a, Rule>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error, {message}")]
    Syntax { message: String, offset: usize },
    #[error("number constant {literal} is out of range")]
    NumberOutOfRange { literal: String, offset: usize },
}

impl ParseError {
    /// Byte offset of the error, relative to the text that was parsed.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } | ParseError::NumberOutOfRange { offset, .. } => {
                *offset
            }
        }
    }

    fn unexpected(pair: &Pair<'_>) -> Self {
        ParseError::Syntax {
            message: format!("unexpected {}", rule_name(pair.as_rule())),
            offset: pair.as_span().start(),
        }
    }
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(error: pest::error::Error<Rule>) -> Self {
        ParseError::Syntax {
            message: describe(&error.variant),
            offset: error_offset(&error),
        }
    }
}

/// Parses `code` into a fresh translation unit with its own symbol table.
pub fn parse_program(code: &str) -> TranslationUnit {
    parse_translation_unit(
        code,
        SymbolTable::new(),
        ErrorReport::default(),
        DebugReport::default(),
    )
}

/// Parses `code`, interning strings into `symbols` and reporting malformed
/// statements into `errors`. Always returns a unit; check
/// [`ErrorReport::num_errors`] to find out whether the program is complete.
pub fn parse_translation_unit(
    code: &str,
    symbols: SymbolTable,
    mut errors: ErrorReport,
    mut debug_report: DebugReport,
) -> TranslationUnit {
    let mut program = Program::new();
    let builder = AstBuilder { symbols: &symbols };
    let mut offset = 0;

    while offset < code.len() {
        let rest = &code[offset..];
        if Parser::parse(Rule::end_of_input, rest).is_ok() {
            break;
        }

        let statement = match Parser::parse(Rule::next_statement, rest) {
            Ok(mut pairs) => match pairs.next() {
                Some(statement) => statement,
                None => break,
            },
            Err(error) => {
                let position = error_offset(&error);
                debug!(offset = offset + position, "syntax_error");
                errors.add_error(
                    format!("syntax error, {}", describe(&error.variant)),
                    location(code, offset + position),
                );
                offset += recovery_offset(rest);
                continue;
            }
        };

        let base = offset;
        let start = base + statement.as_span().start();
        offset += statement.as_span().end();
        match builder.statement(statement) {
            Ok(Statement::Declaration(relations)) => {
                let mut listed = HashSet::new();
                for relation in relations {
                    if !listed.insert(relation.name.clone()) {
                        errors.add_warning(
                            format!("Relation {} listed twice in declaration", relation.name),
                            location(code, start),
                        );
                        continue;
                    }
                    if let Err(error) = program.append_relation(relation) {
                        errors.add_error(error.to_string(), location(code, start));
                    }
                }
            }
            Ok(Statement::Clause(clause)) => {
                program.append_clause(clause);
            }
            Err(error) => {
                errors.add_error(error.to_string(), location(code, base + error.offset()));
            }
        }
    }

    debug!(
        relations = program.relations().len(),
        clauses = program.num_clauses(),
        errors = errors.num_errors(),
        "parsed_translation_unit"
    );
    if debug_report.is_enabled() {
        debug_report.add_section("parser", "Parsed program", print(&program));
    }

    TranslationUnit::new(program, symbols, errors, debug_report)
}

/// Parses a single clause such as `A(x) :- B(x).`.
pub fn parse_clause(code: &str, symbols: &SymbolTable) -> Result<Clause, ParseError> {
    let mut pairs = Parser::parse(Rule::single_clause, code)?;
    let clause = expect_next_rule(&mut pairs, Rule::clause)?;
    AstBuilder { symbols }.clause(clause)
}

enum Statement {
    Declaration(Vec<Relation>),
    Clause(Clause),
}

/// Converts pest pairs into AST nodes, interning string constants on the way.
struct AstBuilder<'s> {
    symbols: &'s SymbolTable,
}

impl AstBuilder<'_> {
    fn statement(&self, pair: Pair<'_>) -> Result<Statement, ParseError> {
        let inner = first_inner(pair)?;
        match inner.as_rule() {
            Rule::declaration => declaration(inner).map(Statement::Declaration),
            Rule::clause => self.clause(inner).map(Statement::Clause),
            _ => Err(ParseError::unexpected(&inner)),
        }
    }

    fn clause(&self, pair: Pair<'_>) -> Result<Clause, ParseError> {
        let mut pairs = pair.into_inner();
        let head = self.atom(expect_next_rule(&mut pairs, Rule::atom)?)?;
        trace!(head = %head.name, "clause");

        let mut clause = Clause::new(head);
        if let Some(body) = pairs.next() {
            for literal in body.into_inner() {
                clause.add_to_body(self.literal(literal)?);
            }
        }
        Ok(clause)
    }

    fn atom(&self, pair: Pair<'_>) -> Result<Atom, ParseError> {
        let mut pairs = pair.into_inner();
        let name = expect_next_rule(&mut pairs, Rule::identifier)?;
        let arguments = pairs
            .map(|argument| self.argument(argument))
            .collect::<Result<_, _>>()?;
        Ok(Atom::with_arguments(name.as_str(), arguments))
    }

    fn literal(&self, pair: Pair<'_>) -> Result<Literal, ParseError> {
        let inner = first_inner(pair)?;
        match inner.as_rule() {
            Rule::atom => self.atom(inner).map(Literal::Atom),
            Rule::negation => {
                let atom = expect_next_rule(inner.into_inner(), Rule::atom)?;
                self.atom(atom).map(Literal::Negation)
            }
            Rule::binary_constraint => {
                let mut pairs = inner.into_inner();
                let lhs = self.argument(expect_next_rule(&mut pairs, Rule::argument)?)?;
                let op_pair = expect_next_rule(&mut pairs, Rule::constraint_op)?;
                let op = ConstraintOp::from_symbol(op_pair.as_str())
                    .ok_or_else(|| ParseError::unexpected(&op_pair))?;
                let rhs = self.argument(expect_next_rule(&mut pairs, Rule::argument)?)?;
                Ok(Literal::Constraint(Constraint::binary(op, lhs, rhs)))
            }
            Rule::boolean => Ok(Literal::Constraint(Constraint::Boolean(
                inner.as_str() == "true",
            ))),
            _ => Err(ParseError::unexpected(&inner)),
        }
    }

    fn argument(&self, pair: Pair<'_>) -> Result<Argument, ParseError> {
        let inner = first_inner(pair)?;
        match inner.as_rule() {
            Rule::aggregator => self.aggregator(inner).map(Argument::from),
            Rule::nil => Ok(Argument::Nil),
            Rule::counter => Ok(Argument::Counter),
            Rule::number => inner
                .as_str()
                .parse()
                .map(Argument::Number)
                .map_err(|_| ParseError::NumberOutOfRange {
                    literal: inner.as_str().to_owned(),
                    offset: inner.as_span().start(),
                }),
            Rule::string_literal => {
                let interior = expect_next_rule(inner.into_inner(), Rule::string_interior)?;
                Ok(Argument::String(
                    self.symbols.symbol(&unescape(interior.as_str())),
                ))
            }
            Rule::unnamed_variable => Ok(Argument::UnnamedVariable),
            Rule::variable => Ok(Argument::Variable(inner.as_str().to_owned())),
            _ => Err(ParseError::unexpected(&inner)),
        }
    }

    fn aggregator(&self, pair: Pair<'_>) -> Result<Aggregator, ParseError> {
        let mut pairs = pair.into_inner();
        let kind_pair = expect_next_rule(&mut pairs, Rule::aggregate_kind)?;
        let kind = AggregatorKind::from_keyword(kind_pair.as_str())
            .ok_or_else(|| ParseError::unexpected(&kind_pair))?;

        let mut aggregator = Aggregator::new(kind);
        for pair in pairs {
            match pair.as_rule() {
                Rule::argument => aggregator.set_target_expression(self.argument(pair)?),
                Rule::aggregate_body => {
                    for literal in pair.into_inner() {
                        let literal = match literal.as_rule() {
                            Rule::atom => Literal::Atom(self.atom(literal)?),
                            _ => self.literal(literal)?,
                        };
                        aggregator.add_body_literal(literal);
                    }
                }
                _ => return Err(ParseError::unexpected(&pair)),
            }
        }
        Ok(aggregator)
    }
}

fn declaration(pair: Pair<'_>) -> Result<Vec<Relation>, ParseError> {
    let mut pairs = pair.into_inner();
    expect_next_rule(&mut pairs, Rule::decl_keyword)?;
    let names: Vec<_> = expect_next_rule(&mut pairs, Rule::relation_names)?
        .into_inner()
        .map(|name| name.as_str().to_owned())
        .collect();
    let attributes = expect_next_rule(&mut pairs, Rule::attributes)?
        .into_inner()
        .map(Attribute::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let representation = match pairs.next() {
        Some(pair) => RelationRepresentation::try_from(pair)?,
        None => RelationRepresentation::Default,
    };

    Ok(names
        .into_iter()
        .map(|name| Relation {
            name,
            attributes: attributes.clone(),
            representation,
        })
        .collect())
}

impl TryFrom<Pair<'_>> for Attribute {
    type Error = ParseError;

    fn try_from(pair: Pair<'_>) -> Result<Self, Self::Error> {
        let mut pairs = pair.into_inner();
        let name = expect_next_rule(&mut pairs, Rule::identifier)?;
        let type_name = expect_next_rule(&mut pairs, Rule::identifier)?;
        Ok(Attribute::new(name.as_str(), type_name.as_str()))
    }
}

impl TryFrom<Pair<'_>> for RelationRepresentation {
    type Error = ParseError;

    fn try_from(pair: Pair<'_>) -> Result<Self, Self::Error> {
        RelationRepresentation::from_qualifier(pair.as_str())
            .ok_or_else(|| ParseError::unexpected(&pair))
    }
}

fn expect_next_rule<'a, P: BorrowMut<Pairs<'a>>>(
    mut pairs: P,
    rule: Rule,
) -> Result<Pair<'a>, ParseError> {
    match pairs.borrow_mut().next() {
        Some(pair) if pair.as_rule() == rule => Ok(pair),
        Some(pair) => Err(ParseError::unexpected(&pair)),
        None => Err(ParseError::Syntax {
            message: format!("missing {}", rule_name(rule)),
            offset: 0,
        }),
    }
}

fn first_inner(pair: Pair<'_>) -> Result<Pair<'_>, ParseError> {
    let offset = pair.as_span().start();
    let rule = pair.as_rule();
    pair.into_inner().next().ok_or(ParseError::Syntax {
        message: format!("empty {}", rule_name(rule)),
        offset,
    })
}

fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('"') => unescaped.push('"'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Where to resume after the statement at the start of `rest` failed to
/// parse: just past its terminating `.`, or at the next `.decl`. Dots inside
/// string literals and comments do not count. Always makes progress on
/// non-empty input.
fn recovery_offset(rest: &str) -> usize {
    let mut state = Scan::Code;
    let mut seen_token = false;
    let mut chars = rest.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        let next = chars.peek().map(|&(_, next)| next);
        match state {
            Scan::String { escaped } => {
                state = match c {
                    _ if escaped => Scan::String { escaped: false },
                    '\\' => Scan::String { escaped: true },
                    '"' => Scan::Code,
                    _ => state,
                };
            }
            Scan::LineComment => {
                if c == '\n' || c == '\r' {
                    state = Scan::Code;
                }
            }
            Scan::BlockComment => {
                if c == '*' && next == Some('/') {
                    chars.next();
                    state = Scan::Code;
                }
            }
            Scan::Code => match c {
                '/' if next == Some('/') => {
                    chars.next();
                    state = Scan::LineComment;
                }
                '/' if next == Some('*') => {
                    chars.next();
                    state = Scan::BlockComment;
                }
                c if c.is_whitespace() => {}
                '.' if rest[position..].starts_with(".decl") => {
                    if seen_token {
                        return position;
                    }
                    // The failed statement's own keyword.
                    seen_token = true;
                }
                '.' => return position + 1,
                '"' => {
                    seen_token = true;
                    state = Scan::String { escaped: false };
                }
                _ => seen_token = true,
            },
        }
    }
    rest.len()
}

#[derive(Clone, Copy)]
enum Scan {
    Code,
    String { escaped: bool },
    LineComment,
    BlockComment,
}

fn error_offset(error: &pest::error::Error<Rule>) -> usize {
    match error.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    }
}

fn location(code: &str, offset: usize) -> Option<SrcLocation> {
    pest::Position::new(code, offset).map(|position| {
        let (line, column) = position.line_col();
        SrcLocation { line, column }
    })
}

fn describe(variant: &ErrorVariant<Rule>) -> String {
    match variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => {
            if !positives.is_empty() {
                format!(
                    "expected {}",
                    positives.iter().map(|rule| rule_name(*rule)).unique().join(" or ")
                )
            } else if !negatives.is_empty() {
                format!(
                    "unexpected {}",
                    negatives.iter().map(|rule| rule_name(*rule)).unique().join(" or ")
                )
            } else {
                "unexpected input".to_owned()
            }
        }
        ErrorVariant::CustomError { message } => message.clone(),
    }
}

fn rule_name(rule: Rule) -> &'static str {
    match rule {
        Rule::statement => "declaration or clause",
        Rule::declaration | Rule::decl_keyword => "declaration",
        Rule::clause => "clause",
        Rule::clause_body => "`:-` or `.`",
        Rule::relation_names | Rule::identifier => "identifier",
        Rule::attributes | Rule::attribute => "attribute",
        Rule::representation => "representation qualifier",
        Rule::atom => "atom",
        Rule::negation => "negation",
        Rule::literal | Rule::binary_constraint | Rule::boolean => "literal",
        Rule::constraint_op => "comparison operator",
        Rule::argument
        | Rule::nil
        | Rule::counter
        | Rule::number
        | Rule::unnamed_variable
        | Rule::variable => "argument",
        Rule::string_literal | Rule::string_interior => "string",
        Rule::aggregator | Rule::aggregate_kind | Rule::aggregate_body => "aggregate",
        Rule::keyword => "keyword",
        Rule::end_of_input | Rule::EOI => "end of input",
        _ => "input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(code: &str) -> Clause {
        parse_clause(code, &SymbolTable::new()).unwrap()
    }

    fn variable(name: &str) -> Argument {
        Argument::variable(name)
    }

    #[test]
    fn parse_fact_arguments() {
        let symbols = SymbolTable::new();
        let parsed = parse_clause(r#"A(nil, -2, "s", x, _, $)."#, &symbols).unwrap();
        assert!(parsed.is_fact());
        assert_eq!(
            parsed.head.arguments,
            [
                Argument::Nil,
                Argument::Number(-2),
                Argument::string(&symbols, "s"),
                variable("x"),
                Argument::UnnamedVariable,
                Argument::Counter,
            ]
        );
    }

    #[test]
    fn parse_rule_body_literals() {
        let parsed = clause("A(x) :- B(x), !C(x), x <= 3, true.");
        assert_eq!(parsed.body.len(), 4);
        assert_eq!(
            parsed.body[1],
            Literal::Negation(Atom::with_arguments("C", vec![variable("x")]))
        );
        assert_eq!(
            parsed.body[2],
            Literal::Constraint(Constraint::binary(
                ConstraintOp::Le,
                variable("x"),
                Argument::Number(3)
            ))
        );
        assert_eq!(parsed.body[3], Literal::Constraint(Constraint::Boolean(true)));
    }

    #[test]
    fn parse_aggregator_in_constraint() {
        let parsed = clause("A(y) :- y = min x : B(x).");
        let mut min = Aggregator::new(AggregatorKind::Min);
        min.set_target_expression(variable("x"));
        min.add_body_literal(Atom::with_arguments("B", vec![variable("x")]));
        assert_eq!(
            parsed.body,
            [Literal::Constraint(Constraint::binary(
                ConstraintOp::Eq,
                variable("y"),
                min
            ))]
        );
    }

    #[test]
    fn parse_count_without_target_and_braced_body() {
        let parsed = clause("A(n) :- n = count : { B(x), !C(x) }, D(n).");
        assert_eq!(parsed.body.len(), 2);
        match &parsed.body[0] {
            Literal::Constraint(Constraint::Binary(constraint)) => match &constraint.rhs {
                Argument::Aggregator(aggregator) => {
                    assert_eq!(aggregator.kind, AggregatorKind::Count);
                    assert_eq!(aggregator.target, None);
                    assert_eq!(aggregator.body.len(), 2);
                }
                other => panic!("expected aggregator, got {:?}", other),
            },
            other => panic!("expected constraint, got {:?}", other),
        }
    }

    #[test]
    fn keywords_are_not_variables() {
        assert!(parse_clause("A(min).", &SymbolTable::new()).is_err());
        assert_eq!(clause("A(minimum).").head.arguments, [variable("minimum")]);
        assert_eq!(clause("A(nil_x).").head.arguments, [variable("nil_x")]);
    }

    #[test]
    fn parse_declarations() {
        let unit = parse_program(".decl A,B(x:number, y:symbol) eqrel\n.decl C()");
        assert_eq!(unit.errors().num_errors(), 0);
        let program = unit.program();
        assert_eq!(program.relations().len(), 3);
        let b = program.relation("B").unwrap();
        assert_eq!(b.representation, RelationRepresentation::Eqrel);
        assert_eq!(
            b.attributes,
            [Attribute::new("x", "number"), Attribute::new("y", "symbol")]
        );
        assert_eq!(program.relation("C").unwrap().arity(), 0);
    }

    #[test]
    fn qualifier_lookalike_starts_next_clause() {
        let unit = parse_program(".decl brie(x:number)\n.decl A(x:number) brie(1).");
        assert_eq!(unit.errors().num_errors(), 0);
        let program = unit.program();
        assert_eq!(
            program.relation("A").unwrap().representation,
            RelationRepresentation::Default
        );
        assert_eq!(program.num_clauses(), 1);
    }

    #[test]
    fn comments_are_ignored() {
        let unit = parse_program("// facts\n.decl A(x:number) /* block */\nA(1). // trailing");
        assert!(unit.errors().is_empty());
        assert_eq!(unit.program().num_clauses(), 1);
    }

    #[test]
    fn syntax_error_recovers_at_next_statement() {
        let unit = parse_program(".decl A(x:number)\nA(1 2).\nA(3).\n.decl B(x:number\n.decl C()");
        assert_eq!(unit.errors().num_errors(), 2);
        let program = unit.program();
        assert_eq!(program.num_clauses(), 1);
        assert!(program.relation("A").is_some());
        assert!(program.relation("B").is_none());
        assert!(program.relation("C").is_some());

        let first = &unit.errors().diagnostics()[0];
        assert_eq!(first.location.map(|location| location.line), Some(2));
    }

    #[test]
    fn missing_terminator_is_reported() {
        let unit = parse_program(".decl A(x:symbol)\nA(\"test string\")");
        assert_eq!(unit.errors().num_errors(), 1);
        assert_eq!(unit.program().num_clauses(), 0);
        assert_eq!(unit.program().relations().len(), 1);
    }

    #[test]
    fn string_with_dot_does_not_end_recovery_early() {
        let unit = parse_program("A(\"a.b\" oops).\nB(1).");
        assert_eq!(unit.errors().num_errors(), 1);
        let clauses: Vec<_> = unit.program().clauses().collect();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].head.name, "B");
    }

    #[test]
    fn redeclaration_is_reported() {
        let unit = parse_program(".decl A(x:number)\n.decl B,A(y:symbol)");
        assert_eq!(unit.errors().num_errors(), 1);
        assert_eq!(
            unit.errors().diagnostics()[0].message,
            "Redefinition of relation A"
        );
        let a = unit.program().relation("A").unwrap();
        assert_eq!(a.attributes, [Attribute::new("x", "number")]);
        assert!(unit.program().relation("B").is_some());
    }

    #[test]
    fn number_overflow_is_reported() {
        let unit = parse_program("A(99999999999999999999).\nA(1).");
        assert_eq!(unit.errors().num_errors(), 1);
        assert_eq!(unit.program().num_clauses(), 1);
        assert!(unit.errors().diagnostics()[0].message.contains("out of range"));
    }

    #[test]
    fn string_escapes() {
        let symbols = SymbolTable::new();
        let parsed = parse_clause(r#"A("a\"b\\c\nd\q")."#, &symbols).unwrap();
        assert_eq!(
            parsed.head.arguments,
            [Argument::string(&symbols, "a\"b\\c\nd\\q")]
        );
    }

    #[test]
    fn recovery_always_progresses() {
        assert_eq!(recovery_offset(".decl"), 5);
        assert_eq!(recovery_offset("x.decl A()"), 1);
        assert_eq!(recovery_offset("x y. z"), 4);
        assert_eq!(recovery_offset(". A(1)."), 1);
        assert_eq!(recovery_offset("é"), 2);
        assert_eq!(recovery_offset("/* unterminated ."), 17);
    }

    #[test]
    fn recovery_skips_comments() {
        let code = "A(1 /* .decl G() */ x // .\n). B(1).";
        assert_eq!(recovery_offset(code), code.find(").").unwrap() + 2);

        let code = "\n.decl A(x:number /* . */\n.decl B()";
        assert_eq!(recovery_offset(code), code.rfind(".decl").unwrap());
    }

    #[test]
    fn commented_out_declaration_is_not_recovered_into() {
        let unit = parse_program(".decl A(x:number)\nA(1 x /* .decl Ghost() */).\nA(2).");
        assert_eq!(unit.errors().num_errors(), 1, "{}", unit.errors());
        assert!(unit.program().relation("Ghost").is_none());
        assert_eq!(unit.program().relations().len(), 1);
        assert_eq!(unit.program().num_clauses(), 1);
    }

    #[test]
    fn one_diagnostic_per_malformed_statement() {
        let code = ".decl A(x:number)\nA(1 x).\nA(\"p.q\" 2 3).\nA(4 /* . */ 5).\nA(6).";
        let unit = parse_program(code);
        assert_eq!(unit.errors().num_errors(), 3, "{}", unit.errors());
        let lines: Vec<_> = unit
            .errors()
            .diagnostics()
            .iter()
            .map(|diagnostic| diagnostic.location.map(|location| location.line))
            .collect();
        assert_eq!(lines, [Some(2), Some(3), Some(4)]);
        let clauses: Vec<_> = unit.program().clauses().collect();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].head.arguments, [Argument::Number(6)]);
    }

    #[test]
    fn name_listed_twice_in_declaration_is_a_warning() {
        let code = ".decl A,B,A(x:number)";
        let unit = parse_program(code);
        assert_eq!(unit.errors().num_errors(), 0);
        assert_eq!(unit.errors().num_warnings(), 1);
        assert_eq!(
            unit.errors().diagnostics()[0].message,
            "Relation A listed twice in declaration"
        );
        assert_eq!(unit.program().relations().len(), 2);

        let quiet = parse_translation_unit(
            code,
            SymbolTable::new(),
            ErrorReport::new(true),
            DebugReport::new(),
        );
        assert!(quiet.errors().is_empty());
        assert_eq!(quiet.program(), unit.program());
    }

    #[test]
    fn debug_report_receives_parsed_program() {
        let unit = parse_translation_unit(
            ".decl A(x:number)\nA(1).",
            SymbolTable::new(),
            ErrorReport::default(),
            DebugReport::enabled(),
        );
        let sections = unit.debug_report().sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, ".decl A(x:number)\nA(1).\n");
    }
}
