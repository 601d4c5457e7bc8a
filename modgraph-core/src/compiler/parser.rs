use core::ops::Range;

use tracing::{
    debug,
    trace,
};

use super::{
    Frontier,
    GraphBuilder,
    GraphError,
    Lexer,
    PositionedError,
    SyntaxError,
    Token,
};
use crate::{
    graph::OwnedModuleGraph,
    EdgeKind,
    NodeKind,
};

/// Maximum number of nested groups.
pub const MAX_GROUP_DEPTH: usize = 128;

/// Recursive descent parser for module expressions.
///
/// Precedence from loosest to tightest binding:
/// sequence (" "), alternation (","), conjunction ("+") and atoms (identifiers or groups).
/// Every level returns the [Frontier] of the sub expression it parsed.
pub struct ModuleParser<'a> {
    tokens: Vec<(Token<'a>, Range<usize>)>,
    cursor: usize,
    input_len: usize,
    group_depth: usize,

    builder: GraphBuilder,
}

impl<'a> ModuleParser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::with_capacity(32);
        while let Some(token) = lexer.next_token() {
            tokens.push((token, lexer.token_range()));
        }

        Self {
            tokens,
            cursor: 0,
            input_len: input.len(),
            group_depth: 0,

            builder: GraphBuilder::new(),
        }
    }

    fn peek_token(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn pop_token(&mut self) -> Result<Token<'a>, PositionedError<SyntaxError>> {
        let Some((token, _)) = self.tokens.get(self.cursor) else {
            return Err(self.error_at(self.cursor, SyntaxError::UnexpectedEnd));
        };

        self.cursor += 1;
        Ok(*token)
    }

    fn error_at(&self, token_index: usize, inner: SyntaxError) -> PositionedError<SyntaxError> {
        let position = self
            .tokens
            .get(token_index)
            .map_or(self.input_len..self.input_len, |(_, range)| range.clone());

        PositionedError::new(position, token_index, inner)
    }

    fn unexpected_token(&self, token_index: usize) -> PositionedError<SyntaxError> {
        match self.tokens.get(token_index) {
            Some((token, _)) => self.error_at(
                token_index,
                SyntaxError::UnexpectedToken {
                    found: token.to_string(),
                },
            ),
            None => self.error_at(token_index, SyntaxError::UnexpectedEnd),
        }
    }

    /// Consumes the operator at the cursor and ensures an operand follows it.
    fn pop_operator(&mut self) -> Result<(), PositionedError<SyntaxError>> {
        let operator_index = self.cursor;
        let operator = self.pop_token()?;

        if operator == Token::Sequence {
            /* a run of spaces is a single stage boundary */
            while matches!(self.peek_token(), Some(Token::Sequence)) {
                self.cursor += 1;
            }
        }

        if matches!(
            self.peek_token(),
            Some(Token::Identifier(_) | Token::GroupOpen)
        ) {
            Ok(())
        } else {
            Err(self.error_at(
                operator_index,
                SyntaxError::MissingOperand {
                    operator: operator.symbol().unwrap_or_default(),
                },
            ))
        }
    }

    pub fn parse(mut self) -> Result<OwnedModuleGraph, GraphError> {
        let has_identifier = self
            .tokens
            .iter()
            .any(|(token, _)| matches!(token, Token::Identifier(_)));
        if !has_identifier {
            return Err(GraphError::MalformedInput);
        }

        let frontier = self.parse_sequence()?;
        if self.cursor < self.tokens.len() {
            /* tokens after a complete expression, e.g. "(K1)(K2)" or "K1)" */
            return Err(self.unexpected_token(self.cursor).into());
        }

        debug!(
            nodes = self.builder.nodes().len(),
            edges = self.builder.edges().len(),
            top = ?frontier.top,
            last = ?frontier.last,
            "parsed module expression"
        );
        Ok(self.builder.finish())
    }

    fn parse_sequence(&mut self) -> Result<Frontier, PositionedError<SyntaxError>> {
        let mut frontier = self.parse_alternation()?;

        while matches!(self.peek_token(), Some(Token::Sequence)) {
            self.pop_operator()?;

            let stage = self.parse_alternation()?;
            self.builder
                .connect(&frontier.last, &stage.top, EdgeKind::Sequence);
            frontier.last = stage.last;
        }

        Ok(frontier)
    }

    fn parse_alternation(&mut self) -> Result<Frontier, PositionedError<SyntaxError>> {
        let mut frontier = self.parse_conjunction()?;

        while matches!(self.peek_token(), Some(Token::Alternation)) {
            self.pop_operator()?;

            /* alternatives are parallel, nothing to connect */
            let alternative = self.parse_conjunction()?;
            frontier.top.extend(alternative.top);
            frontier.last.extend(alternative.last);
        }

        Ok(frontier)
    }

    fn parse_conjunction(&mut self) -> Result<Frontier, PositionedError<SyntaxError>> {
        let mut frontier = self.parse_atom()?;

        /* folded from the left, only groups recurse */
        while matches!(self.peek_token(), Some(Token::Conjunction)) {
            self.pop_operator()?;

            let next = self.parse_atom()?;
            self.builder
                .connect(&frontier.last, &next.top, EdgeKind::Conjunction);
            frontier.last = next.last;
        }

        Ok(frontier)
    }

    fn parse_atom(&mut self) -> Result<Frontier, PositionedError<SyntaxError>> {
        let token_index = self.cursor;
        match self.pop_token()? {
            Token::GroupOpen => {
                if self.group_depth >= MAX_GROUP_DEPTH {
                    return Err(self.error_at(token_index, SyntaxError::NestingTooDeep));
                }

                self.group_depth += 1;
                let frontier = self.parse_sequence()?;
                self.group_depth -= 1;

                match self.peek_token().copied() {
                    Some(Token::GroupClose) => {
                        self.cursor += 1;
                        trace!(token_index, "closed group");
                        Ok(frontier)
                    }
                    None => Err(self.error_at(token_index, SyntaxError::GroupNotClosed)),
                    Some(_) => Err(self.unexpected_token(self.cursor)),
                }
            }
            Token::Identifier(label) => {
                let node = self.builder.add_node(NodeKind::Ortholog, label);
                Ok(Frontier::single(node))
            }
            _ => Err(self.unexpected_token(token_index)),
        }
    }
}

/// Parse the given module expression into a graph without anchors.
pub fn parse_module(expression: &str) -> Result<OwnedModuleGraph, GraphError> {
    let parser = ModuleParser::new(expression);
    parser.parse()
}

#[cfg(test)]
mod test {
    use super::{
        parse_module,
        MAX_GROUP_DEPTH,
    };
    use crate::{
        compiler::{
            GraphError,
            PositionedError,
            SyntaxError,
        },
        EdgeKind,
        ModuleGraph,
    };

    fn syntax_error(expression: &str) -> PositionedError<SyntaxError> {
        match parse_module(expression) {
            Err(GraphError::Syntax(error)) => error,
            other => panic!("expected a syntax error for {:?}, got {:?}", expression, other),
        }
    }

    #[test]
    fn test_single_identifier() {
        let graph = parse_module("K00001").unwrap();
        assert_eq!(graph.ortholog_count(), 1);
        assert!(graph.edges().is_empty());
        assert!(!graph.is_anchored());
    }

    #[test]
    fn test_conjunction_chain() {
        let graph = parse_module("A+B+C").unwrap();
        assert_eq!(graph.ortholog_count(), 3);
        assert_eq!(graph.labeled_edges(), [("A", "B"), ("B", "C")]);
        assert!(graph
            .edges()
            .iter()
            .all(|edge| edge.kind() == EdgeKind::Conjunction));
    }

    #[test]
    fn test_alternation_independent() {
        let graph = parse_module("A,B,C").unwrap();
        assert_eq!(graph.ortholog_count(), 3);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_sequence() {
        let graph = parse_module("A B C").unwrap();
        assert_eq!(graph.labeled_edges(), [("A", "B"), ("B", "C")]);
        assert!(graph
            .edges()
            .iter()
            .all(|edge| edge.kind() == EdgeKind::Sequence));
    }

    #[test]
    fn test_sequence_cartesian() {
        let graph = parse_module("(A,B) (C,D+E)").unwrap();
        assert_eq!(
            graph.labeled_edges(),
            [
                ("D", "E"),
                ("A", "C"),
                ("A", "D"),
                ("B", "C"),
                ("B", "D"),
            ]
        );
    }

    #[test]
    fn test_sequence_space_run() {
        let graph = parse_module("A   B").unwrap();
        assert_eq!(graph.labeled_edges(), [("A", "B")]);
    }

    #[test]
    fn test_precedence() {
        /* conjunction binds tighter than alternation, alternation tighter than sequence */
        let graph = parse_module("A+B,C D").unwrap();
        assert_eq!(
            graph.labeled_edges(),
            [("A", "B"), ("B", "D"), ("C", "D")]
        );
    }

    #[test]
    fn test_conjunction_of_groups() {
        let graph = parse_module("(A,B)+(C D)").unwrap();
        assert_eq!(
            graph.labeled_edges(),
            [("C", "D"), ("A", "C"), ("B", "C")]
        );
    }

    #[test]
    fn test_group_transparency() {
        for expression in ["K1", "K1+K2,K3", "K1 (K2,K3) K4", "(K1+K2) K3"] {
            let plain = parse_module(expression).unwrap();
            let grouped = parse_module(&format!("({})", expression)).unwrap();
            assert_eq!(plain, grouped, "expression: {:?}", expression);

            let nested = parse_module(&format!("(({}))", expression)).unwrap();
            assert_eq!(plain, nested, "expression: {:?}", expression);
        }
    }

    #[test]
    fn test_repeated_identifiers() {
        let graph = parse_module("K1 K1").unwrap();
        assert_eq!(graph.ortholog_count(), 2);
        assert_eq!(graph.labeled_edges(), [("K1", "K1")]);

        let edge = graph.edges()[0];
        assert_ne!(edge.from(), edge.to());
    }

    #[test]
    fn test_node_cardinality() {
        let expression = "(K00844,K12407,K00845,K00886,K08074,K00918) (K01810,K06859,K13810,K15916) (K00850,K16370,K21071,K00918) (K01623,K01624,K11645,K16305,K16306) K01803 ((K00134,K00150) K00927,K11389) (K01834,K15634,K15635,K01837) (K01689,K27394) (K00873,K12406)";
        let identifier_count = crate::compiler::tokenize(expression)
            .iter()
            .filter(|token| matches!(token, crate::compiler::Token::Identifier(_)))
            .count();

        let graph = parse_module(expression).unwrap();
        assert_eq!(graph.ortholog_count(), identifier_count);
        assert_eq!(graph.nodes().len(), identifier_count);
    }

    #[test]
    fn test_group_not_closed() {
        assert_eq!(
            syntax_error("(K01657"),
            PositionedError::new(0..1, 0, SyntaxError::GroupNotClosed)
        );

        assert_eq!(
            syntax_error("K1 ((K2,K3) K4"),
            PositionedError::new(3..4, 2, SyntaxError::GroupNotClosed)
        );
    }

    #[test]
    fn test_unexpected_token() {
        assert_eq!(
            syntax_error("K1)"),
            PositionedError::new(
                2..3,
                1,
                SyntaxError::UnexpectedToken {
                    found: ")".to_string()
                }
            )
        );

        /* no implicit sequencing between adjacent groups */
        assert_eq!(
            syntax_error("(K1)(K2)"),
            PositionedError::new(
                4..5,
                3,
                SyntaxError::UnexpectedToken {
                    found: "(".to_string()
                }
            )
        );
        assert_eq!(
            syntax_error("((K1)(K2))"),
            PositionedError::new(
                5..6,
                4,
                SyntaxError::UnexpectedToken {
                    found: "(".to_string()
                }
            )
        );

        /* empty group */
        assert_eq!(
            syntax_error("K1 ()"),
            PositionedError::new(
                4..5,
                3,
                SyntaxError::UnexpectedToken {
                    found: ")".to_string()
                }
            )
        );

        /* leading operator */
        assert_eq!(
            syntax_error("+K1"),
            PositionedError::new(
                0..1,
                0,
                SyntaxError::UnexpectedToken {
                    found: "+".to_string()
                }
            )
        );
        assert_eq!(
            syntax_error(" K1"),
            PositionedError::new(
                0..1,
                0,
                SyntaxError::UnexpectedToken {
                    found: " ".to_string()
                }
            )
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            syntax_error("K1+"),
            PositionedError::new(2..3, 1, SyntaxError::MissingOperand { operator: '+' })
        );
        assert_eq!(
            syntax_error("K1,,K2"),
            PositionedError::new(2..3, 1, SyntaxError::MissingOperand { operator: ',' })
        );
        assert_eq!(
            syntax_error("K1 "),
            PositionedError::new(2..3, 1, SyntaxError::MissingOperand { operator: ' ' })
        );
        assert_eq!(
            syntax_error("(K1+K2 )"),
            PositionedError::new(6..7, 4, SyntaxError::MissingOperand { operator: ' ' })
        );
        assert_eq!(
            syntax_error("K1, K2"),
            PositionedError::new(2..3, 1, SyntaxError::MissingOperand { operator: ',' })
        );
    }

    #[test]
    fn test_group_depth_limit() {
        let nested = |depth: usize| format!("{}K1{}", "(".repeat(depth), ")".repeat(depth));

        let graph = parse_module(&nested(MAX_GROUP_DEPTH)).unwrap();
        assert_eq!(graph.ortholog_count(), 1);

        assert_eq!(
            syntax_error(&nested(2000)),
            PositionedError::new(
                MAX_GROUP_DEPTH..MAX_GROUP_DEPTH + 1,
                MAX_GROUP_DEPTH,
                SyntaxError::NestingTooDeep
            )
        );
    }

    #[test]
    fn test_long_conjunction_chain() {
        let expression = (0..5000)
            .map(|index| format!("K{:05}", index))
            .collect::<Vec<_>>()
            .join("+");

        let graph = parse_module(&expression).unwrap();
        assert_eq!(graph.ortholog_count(), 5000);
        assert_eq!(graph.edges().len(), 4999);
    }

    #[test]
    fn test_malformed_input() {
        for expression in ["", " ", "()", "(+,)", "\n\t-"] {
            assert_eq!(
                parse_module(expression),
                Err(GraphError::MalformedInput),
                "expression: {:?}",
                expression
            );
        }
    }

    #[test]
    fn test_error_display() {
        let error = parse_module("(K01657").unwrap_err();
        assert_eq!(
            error.to_string(),
            "syntax error: group is never closed at token 0 (bytes 0..1)"
        );
        assert_eq!(error.syntax().map(|error| error.token_index()), Some(0));

        assert_eq!(
            GraphError::MalformedInput.to_string(),
            "malformed input: expression contains no identifiers"
        );
    }
}
