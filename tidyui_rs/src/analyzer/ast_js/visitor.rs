//! OutlineVisitor struct and helper methods for AST traversal.

use oxc_ast::ast::*;
use oxc_span::Span;

use crate::types::{ExportKind, ExportRecord, ModuleOutline, is_pascal_case};

/// Walks one module and condenses what the liveness pass needs.
pub(super) struct OutlineVisitor<'s> {
    pub outline: ModuleOutline,
    pub source_text: &'s str,
    /// File name without extension, used for anonymous default exports.
    pub file_stem: Option<&'s str>,
}

/// Wrappers whose result is still the wrapped component.
const COMPONENT_WRAPPERS: &[&str] = &["memo", "forwardRef", "observer"];

impl<'s> OutlineVisitor<'s> {
    pub(super) fn new(source_text: &'s str, file_stem: Option<&'s str>) -> Self {
        Self {
            outline: ModuleOutline::default(),
            source_text,
            file_stem,
        }
    }

    /// Get line number from span position.
    pub(super) fn get_line(&self, span: Span) -> usize {
        let start = span.start as usize;
        let capped = std::cmp::min(start, self.source_text.len());
        self.source_text.as_bytes()[..capped]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    /// Records a component export; non-PascalCase names are not components.
    pub(super) fn push_export(&mut self, name: &str, kind: ExportKind, span: Span) {
        if !is_pascal_case(name) {
            return;
        }
        let line = self.get_line(span);
        self.outline.exports.push(ExportRecord {
            name: name.to_string(),
            kind,
            line,
        });
    }

    /// Default export without an inline name: fall back to the file name.
    pub(super) fn push_anonymous_default(&mut self, span: Span) {
        if let Some(stem) = self.file_stem {
            self.push_export(stem, ExportKind::Default, span);
        }
    }

    pub(super) fn module_export_name(name: &ModuleExportName<'_>) -> String {
        match name {
            ModuleExportName::IdentifierName(id) => id.name.to_string(),
            ModuleExportName::IdentifierReference(id) => id.name.to_string(),
            ModuleExportName::StringLiteral(s) => s.value.to_string(),
        }
    }

    /// Arrow/function expressions, or one passed through `memo`/`forwardRef`.
    pub(super) fn is_component_initializer(expr: &Expression<'_>) -> bool {
        match expr {
            Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_) => true,
            Expression::CallExpression(call) => {
                let callee = match &call.callee {
                    Expression::Identifier(id) => Some(id.name.as_str()),
                    Expression::StaticMemberExpression(member) => {
                        Some(member.property.name.as_str())
                    }
                    _ => None,
                };
                callee.is_some_and(|name| COMPONENT_WRAPPERS.contains(&name))
            }
            _ => false,
        }
    }
}
