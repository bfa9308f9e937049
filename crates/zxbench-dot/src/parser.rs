//! Parser for the diagram text format.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use zxbench_ir::{Diagram, EdgeKind, Phase, V, VertexData, VertexKind};

use crate::error::{DotError, DotResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// A parsed diagram together with the file ids of its vertices.
#[derive(Debug, Clone)]
pub struct ParsedDiagram {
    /// The reconstructed diagram.
    pub diagram: Diagram,
    /// Map from the ids used in the file to the new vertex ids.
    pub ids: BTreeMap<usize, V>,
}

/// Parse a diagram file.
///
/// Boundaries labelled `:i`/`:o` become inputs/outputs, ordered by qubit
/// coordinate and then by file id. The scalar is not part of the format and
/// comes back as one.
pub fn parse(source: &str) -> DotResult<ParsedDiagram> {
    let mut parser = Parser::new(source)?;
    parser.parse_graph()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Io {
    Input,
    Output,
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    diagram: Diagram,
    ids: BTreeMap<usize, V>,
    io: Vec<(Io, usize, V)>,
}

impl Parser {
    fn new(source: &str) -> DotResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, message)) => {
                    return Err(DotError::LexerError {
                        position: span.start,
                        message,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            diagram: Diagram::new(),
            ids: BTreeMap::new(),
            io: Vec::new(),
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    #[allow(clippy::needless_pass_by_value)]
    fn expect(&mut self, expected: Token) -> DotResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| DotError::UnexpectedEof(format!("expected {expected}")))?;
        if found != expected {
            return Err(DotError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn expect_id(&mut self) -> DotResult<usize> {
        match self.advance() {
            Some(Token::Id(id)) => Ok(id),
            Some(other) => Err(DotError::UnexpectedToken {
                expected: "vertex id".into(),
                found: other.to_string(),
            }),
            None => Err(DotError::UnexpectedEof("expected vertex id".into())),
        }
    }

    fn parse_graph(&mut self) -> DotResult<ParsedDiagram> {
        self.expect(Token::Graph)?;
        self.expect(Token::LBrace)?;

        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(Token::Id(_)) => self.parse_statement()?,
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(other) => {
                    return Err(DotError::UnexpectedToken {
                        expected: "vertex id or '}'".into(),
                        found: other.to_string(),
                    });
                }
                None => return Err(DotError::UnexpectedEof("expected '}'".into())),
            }
        }

        self.io.sort_by(|a, b| {
            let qa = self.diagram.vertex(a.2).map_or(0.0, |d| d.qubit);
            let qb = self.diagram.vertex(b.2).map_or(0.0, |d| d.qubit);
            qa.total_cmp(&qb).then(a.1.cmp(&b.1))
        });
        let pick = |which: Io| -> Vec<V> {
            self.io
                .iter()
                .filter(|(io, _, _)| *io == which)
                .map(|&(_, _, v)| v)
                .collect()
        };
        let inputs = pick(Io::Input);
        let outputs = pick(Io::Output);

        let mut diagram = std::mem::take(&mut self.diagram);
        diagram.set_inputs(inputs);
        diagram.set_outputs(outputs);
        Ok(ParsedDiagram {
            diagram,
            ids: std::mem::take(&mut self.ids),
        })
    }

    fn parse_statement(&mut self) -> DotResult<()> {
        let id = self.expect_id()?;
        if self.peek() == Some(&Token::EdgeOp) {
            self.advance();
            let other = self.expect_id()?;
            let attrs = self.parse_attrs()?;
            self.add_edge(id, other, &attrs)
        } else {
            let attrs = self.parse_attrs()?;
            self.add_vertex(id, &attrs)
        }
    }

    /// Parse an optional `[key=value, ...]` list.
    fn parse_attrs(&mut self) -> DotResult<FxHashMap<String, String>> {
        let mut attrs = FxHashMap::default();
        if self.peek() != Some(&Token::LBracket) {
            return Ok(attrs);
        }
        self.advance();

        while self.peek() != Some(&Token::RBracket) {
            let key = match self.advance() {
                Some(Token::Identifier(k)) => k,
                Some(other) => {
                    return Err(DotError::UnexpectedToken {
                        expected: "attribute name".into(),
                        found: other.to_string(),
                    });
                }
                None => return Err(DotError::UnexpectedEof("expected ']'".into())),
            };
            self.expect(Token::Eq)?;
            let value = match self.advance() {
                Some(Token::Identifier(v) | Token::StringLiteral(v)) => v,
                Some(Token::Id(n)) => n.to_string(),
                Some(other) => {
                    return Err(DotError::UnexpectedToken {
                        expected: "attribute value".into(),
                        found: other.to_string(),
                    });
                }
                None => return Err(DotError::UnexpectedEof("expected attribute value".into())),
            };
            attrs.insert(key, value);

            if self.peek() == Some(&Token::Comma) {
                self.advance();
            }
        }
        self.expect(Token::RBracket)?;
        Ok(attrs)
    }

    fn add_vertex(&mut self, id: usize, attrs: &FxHashMap<String, String>) -> DotResult<()> {
        if self.ids.contains_key(&id) {
            return Err(DotError::DuplicateVertex(id));
        }

        let kind = match attrs.get("color").map_or("black", String::as_str) {
            "black" => VertexKind::Boundary,
            "green" => VertexKind::Z,
            "red" => VertexKind::X,
            "yellow" => VertexKind::HBox,
            other => return Err(DotError::UnknownColor(other.to_string())),
        };

        let mut data = VertexData::new(kind);
        let mut io = None;
        if let Some(label) = attrs.get("label") {
            let bad = || DotError::InvalidLabel {
                id,
                label: label.clone(),
            };
            match label.split_once(':') {
                Some((_, "i")) => io = Some(Io::Input),
                Some((_, "o")) => io = Some(Io::Output),
                Some((_, phase)) => data.phase = phase.parse::<Phase>().map_err(|_| bad())?,
                None => {}
            }
        }

        if let Some(pos) = attrs.get("pos") {
            let bad = || DotError::InvalidPosition {
                id,
                pos: pos.clone(),
            };
            let (q, r) = pos.trim_end_matches('!').split_once(',').ok_or_else(bad)?;
            data.qubit = q.trim().parse().map_err(|_| bad())?;
            data.row = r.trim().parse().map_err(|_| bad())?;
        }

        let v = self.diagram.add_vertex(data);
        self.ids.insert(id, v);
        if let Some(io) = io {
            self.io.push((io, id, v));
        }
        Ok(())
    }

    fn add_edge(&mut self, s: usize, t: usize, attrs: &FxHashMap<String, String>) -> DotResult<()> {
        let kind = match attrs.get("color").map(String::as_str) {
            None => EdgeKind::Simple,
            Some("blue") => EdgeKind::Hadamard,
            Some(other) => return Err(DotError::UnknownEdgeColor(other.to_string())),
        };
        let vs = *self.ids.get(&s).ok_or(DotError::UndefinedVertex(s))?;
        let vt = *self.ids.get(&t).ok_or(DotError::UndefinedVertex(t))?;
        self.diagram.add_edge(vs, vt, kind)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_graph() {
        let src = r#"graph {
  0 [color=black, label="0:i"]
  1 [color=green, label="1:1/3", pos="-1.2,3!"]
  2 [color=black, label="2:o", pos="0,4!"]

  0 -- 1
  1 -- 2 [color=blue]
}"#;
        let parsed = parse(src).unwrap();
        let d = &parsed.diagram;
        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.inputs(), &[parsed.ids[&0]]);
        assert_eq!(d.outputs(), &[parsed.ids[&2]]);

        let z = d.vertex(parsed.ids[&1]).unwrap();
        assert_eq!(z.kind, VertexKind::Z);
        assert_eq!(z.phase, Phase::third());
        assert_eq!((z.qubit, z.row), (-1.2, 3.0));
        assert_eq!(
            d.edge_kind(parsed.ids[&1], parsed.ids[&2]),
            Some(EdgeKind::Hadamard)
        );
    }

    #[test]
    fn test_undefined_vertex() {
        let err = parse("graph {\n 0 [color=red]\n 0 -- 5\n}").unwrap_err();
        assert!(matches!(err, DotError::UndefinedVertex(5)));
    }

    #[test]
    fn test_unknown_color() {
        let err = parse("graph {\n 0 [color=purple]\n}").unwrap_err();
        assert!(matches!(err, DotError::UnknownColor(_)));
    }

    #[test]
    fn test_missing_brace() {
        assert!(matches!(
            parse("graph {\n 0 [color=red]\n"),
            Err(DotError::UnexpectedEof(_))
        ));
    }
}
