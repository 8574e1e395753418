//! JavaScript/TypeScript AST analysis module.
//!
//! Parses `.jsx`/`.tsx` sources with the OXC parser and condenses each tree
//! into an owned [`ModuleOutline`]: exported component symbols and imported
//! names. The OXC tree lives in a per-call arena, so it never outlives
//! [`parse_module`]; callers keep the outline instead.
//!
//! # Module Structure
//!
//! - `visitor`: visitor struct and span/name helpers
//! - `imports`: import declaration handling
//! - `exports`: export declaration handling

mod exports;
mod imports;
mod visitor;

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::debug;

use crate::types::{ModuleOutline, ParseFailure};

use visitor::OutlineVisitor;

/// Parse one module and return its outline.
///
/// Parsing is tolerant: recoverable syntax errors are logged and counted in
/// [`ModuleOutline::diagnostics`]. Only a parse the parser had to abandon is
/// returned as [`ParseFailure`].
pub(crate) fn parse_module(
    content: &str,
    path: &Path,
    relative: &str,
) -> Result<ModuleOutline, ParseFailure> {
    let allocator = Allocator::default();

    let source_type = SourceType::from_path(path)
        .unwrap_or_default()
        .with_typescript(true)
        .with_jsx(true);

    let ret = Parser::new(&allocator, content, source_type).parse();

    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(ParseFailure {
            path: relative.to_string(),
            message,
        });
    }

    if !ret.errors.is_empty() {
        debug!("{} recoverable parser errors in {}", ret.errors.len(), relative);
        for err in ret.errors.iter().take(5) {
            debug!("  {}: {}", relative, err);
        }
    }

    let file_stem = path.file_stem().and_then(|s| s.to_str());
    let mut visitor = OutlineVisitor::new(content, file_stem);
    visitor.visit_program(&ret.program);
    visitor.outline.diagnostics = ret.errors.len();
    Ok(visitor.outline)
}

/// Wires the visitor callbacks to the handlers in `imports`/`exports`.
/// Declarations are only recorded at module level, so the handlers do not
/// descend further.
impl<'a> Visit<'a> for OutlineVisitor<'_> {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.handle_import_declaration(decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        self.handle_export_named_declaration(decl);
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        self.handle_export_default_declaration(decl);
    }
}
