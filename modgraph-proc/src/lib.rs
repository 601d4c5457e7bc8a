use proc_macro::TokenStream;
use syn::parse_macro_input;

extern crate proc_macro;

mod macro_module_graph;

/// Parse a KEGG module expression and generate an anchored <a href="struct.BorrowedModuleGraph.html">BorrowedModuleGraph</a> at compile time.  
/// An exhausive overview of the expression syntax can be found here: <a href="index.html">modgraph</a>.
///
/// Syntax errors are reported as compile errors pointing at the offending token.
///
/// # Example
/// ```
/// # use modgraph_core as modgraph;
/// # use modgraph_core::*;
/// # use modgraph_proc::*;
/// static MY_MODULE: BorrowedModuleGraph<'static> = module_graph!("K01657+K01658,K13503");
/// assert_eq!(MY_MODULE.ortholog_count(), 3);
/// ```
#[proc_macro]
pub fn module_graph(item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item);

    macro_module_graph::module_graph(item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
