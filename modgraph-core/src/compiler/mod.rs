mod error;
pub use error::{
    GraphError,
    PositionedError,
    SyntaxError,
};

mod lexer;
pub use lexer::{
    tokenize,
    Lexer,
    Token,
};

mod builder;
pub use builder::{
    Frontier,
    GraphBuilder,
};

mod parser;
pub use parser::{
    parse_module,
    ModuleParser,
    MAX_GROUP_DEPTH,
};

mod anchor;
pub use anchor::attach_anchors;
