//! Diagram emitter.

use zxbench_ir::{Diagram, EdgeKind, V, VertexKind};

/// Emit a diagram in the line-oriented graph format read by the solvers.
///
/// Vertices come first in ascending id order, then each edge once. Only
/// Hadamard edges carry an attribute.
pub fn emit(diagram: &Diagram) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_diagram(diagram);
    emitter.output
}

/// Color used for a vertex kind.
pub fn color(kind: VertexKind) -> &'static str {
    match kind {
        VertexKind::Boundary => "black",
        VertexKind::Z => "green",
        VertexKind::X => "red",
        VertexKind::HBox => "yellow",
    }
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_diagram(&mut self, diagram: &Diagram) {
        self.writeln("graph {");

        for v in diagram.vertices() {
            self.emit_vertex(diagram, v);
        }

        self.writeln("");

        for (s, t, kind) in diagram.edges() {
            let attr = match kind {
                EdgeKind::Hadamard => " [color=blue]",
                EdgeKind::Simple => "",
            };
            self.writeln(&format!("  {} -- {}{attr}", s.index(), t.index()));
        }

        self.writeln("}");
    }

    fn emit_vertex(&mut self, diagram: &Diagram, v: V) {
        let Some(data) = diagram.vertex(v) else {
            return;
        };
        let id = v.index();

        let label = if diagram.is_input(v) {
            format!("{id}:i")
        } else if diagram.is_output(v) {
            format!("{id}:o")
        } else if !data.phase.is_zero() {
            format!("{id}:{}", data.phase)
        } else {
            format!("{id}")
        };

        let mut line = format!("  {id} [color={}, label=\"{label}\"", color(data.kind));
        if data.qubit != 0.0 || data.row != 0.0 {
            line.push_str(&format!(", pos=\"{},{}!\"", data.qubit, data.row));
        }
        line.push(']');
        self.writeln(&line);
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}
