use std::io::{
    self,
    Cursor,
    Write,
};

use modgraph_core::{
    build_graph,
    compiler::GraphError,
    Edge,
    EdgeKind,
    ModuleGraph,
    Node,
    NodeKind,
};
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    parse2,
    Error,
    Expr,
    LitStr,
    Result,
};

fn emit_node(output: &mut dyn Write, node: &Node) -> io::Result<()> {
    let kind = match node.kind() {
        NodeKind::Ortholog => "modgraph::NodeKind::Ortholog",
        NodeKind::Source => "modgraph::NodeKind::Source",
        NodeKind::Sink => "modgraph::NodeKind::Sink",
    };

    let label = node.label_range();
    write!(
        output,
        "modgraph::Node::new_const({}, {}, {})",
        kind, label.start, label.end
    )
}

fn emit_edge(output: &mut dyn Write, edge: &Edge) -> io::Result<()> {
    let kind = match edge.kind() {
        EdgeKind::Sequence => "modgraph::EdgeKind::Sequence",
        EdgeKind::Conjunction => "modgraph::EdgeKind::Conjunction",
        EdgeKind::Anchor => "modgraph::EdgeKind::Anchor",
    };

    write!(
        output,
        "modgraph::Edge::new_const(modgraph::NodeId::new_const({}), modgraph::NodeId::new_const({}), {})",
        edge.from().index(),
        edge.to().index(),
        kind
    )
}

fn emit_list<T>(
    output: &mut dyn Write,
    values: &[T],
    emitter: fn(&mut dyn Write, &T) -> io::Result<()>,
) -> io::Result<()> {
    write!(output, "&[")?;

    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            write!(output, ", ")?;
        }

        emitter(output, value)?;
    }

    write!(output, "]")?;
    Ok(())
}

fn graph_to_const_str(graph: &dyn ModuleGraph) -> io::Result<String> {
    let mut result_buffer = Vec::<u8>::with_capacity(1024);
    {
        let mut writer = Cursor::new(&mut result_buffer);

        /* a const item keeps the slices promotable in any expression context */
        write!(
            &mut writer,
            "{{ const MODULE_GRAPH: modgraph::BorrowedModuleGraph<'static> = modgraph::BorrowedModuleGraph::new("
        )?;
        emit_list(&mut writer, graph.nodes(), emit_node)?;
        write!(&mut writer, ", ")?;
        emit_list(&mut writer, graph.edges(), emit_edge)?;
        write!(&mut writer, ", {:?}); MODULE_GRAPH }}", graph.labels())?;
    }

    String::from_utf8(result_buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Returns whether byte offsets into the literal's value line up with its source text.
fn has_plain_source(expression: &LitStr) -> bool {
    expression.token().to_string() == format!("\"{}\"", expression.value())
}

pub fn module_graph(item: TokenStream) -> Result<TokenStream> {
    let expression = parse2::<LitStr>(item)?;
    let graph = match build_graph(&expression.value()) {
        Ok(result) => result,
        Err(GraphError::Syntax(error)) => {
            let error_span = if has_plain_source(&expression) {
                expression
                    .token()
                    .subspan(error.position().start + 1..error.position().end + 1)
                    .unwrap_or(expression.span())
            } else {
                expression.span()
            };
            return Err(Error::new(error_span, format!("{}", error.inner())));
        }
        Err(error) => return Err(Error::new(expression.span(), format!("{}", error))),
    };

    let graph = graph_to_const_str(&graph).map_err(|err| Error::new(expression.span(), err))?;
    let graph = syn::parse_str::<Expr>(&graph)?;
    Ok(graph.to_token_stream())
}
